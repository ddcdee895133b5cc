use crate::error::RenderError;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Dictionary, Stream};
use quittance_types::{PixelData, ResolvedImage};
use std::io::Write;

/// The image XObject for a resolved image, plus its soft mask when it has alpha.
///
/// The mask still has to be added to the document and referenced from the
/// image dictionary as `SMask`; [`PdfDocumentWriter`](crate::PdfDocumentWriter) does that.
#[derive(Debug, Clone)]
pub struct ImageStreams {
    pub image: Stream,
    pub soft_mask: Option<Stream>,
}

/// Encodes `image` as PDF image XObject streams.
///
/// JPEG data passes through untouched with `DCTDecode`. Raw samples are
/// zlib-compressed with `FlateDecode`.
pub fn image_streams(image: &ResolvedImage) -> Result<ImageStreams, RenderError> {
    match &image.pixels {
        PixelData::Dct { data, gray } => {
            let color_space = if *gray { "DeviceGray" } else { "DeviceRGB" };
            let dict = image_dict(image.width, image.height, color_space, "DCTDecode");
            Ok(ImageStreams {
                image: Stream::new(dict, data.to_vec()).with_compression(false),
                soft_mask: None,
            })
        }
        PixelData::Rgb { rgb, alpha } => {
            let dict = image_dict(image.width, image.height, "DeviceRGB", "FlateDecode");
            let image_stream = Stream::new(dict, flate_compress(rgb)?).with_compression(false);
            let soft_mask = match alpha {
                Some(alpha) => {
                    let dict = image_dict(image.width, image.height, "DeviceGray", "FlateDecode");
                    Some(Stream::new(dict, flate_compress(alpha)?).with_compression(false))
                }
                None => None,
            };
            Ok(ImageStreams {
                image: image_stream,
                soft_mask,
            })
        }
    }
}

fn image_dict(width: u32, height: u32, color_space: &str, filter: &str) -> Dictionary {
    dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(width),
        "Height" => i64::from(height),
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8,
        "Filter" => filter,
    }
}

fn flate_compress(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
