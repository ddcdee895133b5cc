//! Receipt PDF writer built on lopdf.
//!
//! Layout code produces [`PositionedElement`]s in top-left page coordinates;
//! [`PageCanvas`] turns them into a content stream and [`PdfDocumentWriter`]
//! seals pages, fonts and image XObjects into the final byte buffer.

mod canvas;
mod document;
mod element;
mod error;
pub mod fonts;
mod image;

pub use canvas::PageCanvas;
pub use document::{DocumentInfo, PdfDocumentWriter};
pub use element::{Element, PositionedElement};
pub use error::RenderError;
pub use fonts::{FittedText, StandardFont};
pub use image::{image_streams, ImageStreams};
