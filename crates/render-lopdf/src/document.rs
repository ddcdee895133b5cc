use crate::canvas::PageCanvas;
use crate::element::{Element, PositionedElement};
use crate::error::RenderError;
use crate::fonts::{encode_win_ansi, StandardFont};
use crate::image::image_streams;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use quittance_types::{ResolvedImage, Size};

const PDF_VERSION: &str = "1.7";

/// Entries for the document information dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub producer: String,
    /// A PDF date string such as `D:20240110000000`.
    pub creation_date: Option<String>,
}

/// Assembles pages, fonts and images into a complete PDF in memory.
///
/// Every page shares one resource dictionary holding the standard fonts and
/// all registered images. Output depends only on what was added, so the same
/// inputs always yield the same bytes.
pub struct PdfDocumentWriter {
    doc: Document,
    page_size: Size,
    pages_id: ObjectId,
    resources_id: ObjectId,
    xobjects: Dictionary,
    page_ids: Vec<ObjectId>,
}

impl PdfDocumentWriter {
    pub fn new(page_size: Size) -> Self {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();
        let resources_id = doc.new_object_id();
        Self {
            doc,
            page_size,
            pages_id,
            resources_id,
            xobjects: Dictionary::new(),
            page_ids: Vec::new(),
        }
    }

    /// Embeds `image` and makes it drawable as `Element::Image { name }`.
    pub fn add_image(&mut self, name: &str, image: &ResolvedImage) -> Result<ObjectId, RenderError> {
        let streams = image_streams(image)?;
        let mut image_stream = streams.image;
        if let Some(mask) = streams.soft_mask {
            let mask_id = self.doc.add_object(mask);
            image_stream.dict.set("SMask", mask_id);
        }
        let image_id = self.doc.add_object(image_stream);
        self.xobjects.set(name.as_bytes().to_vec(), image_id);
        log::debug!(
            "Embedded image '{}' ({}x{}) as object {:?}",
            name,
            image.width,
            image.height,
            image_id
        );
        Ok(image_id)
    }

    /// Draws `elements` onto a new page.
    ///
    /// Fails if an element refers to an image that was never added.
    pub fn add_page(&mut self, elements: &[PositionedElement]) -> Result<ObjectId, RenderError> {
        for el in elements {
            if let Element::Image { name } = &el.element {
                if !self.xobjects.has(name.as_bytes()) {
                    return Err(RenderError::UnknownImage { name: name.clone() });
                }
            }
        }

        let mut canvas = PageCanvas::new(self.page_size.height);
        canvas.draw_all(elements);
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, canvas.encode()?));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.page_size.width.into(), self.page_size.height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(page_id)
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Writes the page tree, catalog and info dictionary and serializes the document.
    pub fn finish(mut self, info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
        let mut fonts = Dictionary::new();
        for font in StandardFont::ALL {
            fonts.set(
                font.resource_name(),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.base_font(),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        let mut resources = dictionary! { "Font" => fonts };
        if !self.xobjects.is_empty() {
            resources.set("XObject", self.xobjects);
        }
        self.doc.objects.insert(self.resources_id, resources.into());

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.doc.objects.insert(self.pages_id, pages.into());

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let info_id = self.doc.add_object(info_dictionary(info));
        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

fn info_dictionary(info: &DocumentInfo) -> Dictionary {
    let text = |value: &str| Object::String(encode_win_ansi(value), StringFormat::Literal);
    let mut dict = dictionary! {
        "Title" => text(&info.title),
        "Producer" => text(&info.producer),
    };
    if let Some(subject) = &info.subject {
        dict.set("Subject", text(subject));
    }
    if let Some(author) = &info.author {
        dict.set("Author", text(author));
    }
    if let Some(date) = &info.creation_date {
        dict.set("CreationDate", Object::string_literal(date.as_str()));
    }
    dict
}
