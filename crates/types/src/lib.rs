pub mod color;
pub mod geometry;
pub mod image;
pub mod record;

pub use color::Color;
pub use geometry::{Rect, Size};
pub use image::{ImageFormat, LogoOrigin, PixelData, ResolvedImage};
pub use record::{AccountSummary, LineItem, PaymentDetails, ReceiptKind, ReceiptRecord};
