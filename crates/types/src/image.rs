//! Fully materialized image data, ready to be embedded in a document.
//!
//! A [`ResolvedImage`] never refers to a pending load: every byte the PDF
//! writer needs is already in memory. Pixel buffers are reference-counted so
//! handing the same logo to many concurrent builds never copies them.

use std::sync::Arc;

/// The declared source format of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    /// Drawn in-process rather than decoded from an asset.
    Bitmap,
}

/// Where a resolved logo came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogoOrigin {
    /// The institution's branding asset.
    Canonical,
    /// The synthesized stand-in mark.
    Placeholder,
}

/// Pixel payload in one of the two shapes the PDF image model accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    /// A baseline JPEG stream, embedded untouched with `DCTDecode`.
    Dct { data: Arc<[u8]>, gray: bool },
    /// Interleaved 8-bit RGB samples, plus an optional 8-bit soft mask.
    Rgb {
        rgb: Arc<[u8]>,
        alpha: Option<Arc<[u8]>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub pixels: PixelData,
    pub origin: LogoOrigin,
}

impl ResolvedImage {
    /// Builds an image from raw RGB samples.
    ///
    /// Returns `None` when the buffer length does not match `width * height * 3`
    /// or a supplied soft mask does not match `width * height`.
    pub fn from_rgb(
        format: ImageFormat,
        width: u32,
        height: u32,
        rgb: Vec<u8>,
        alpha: Option<Vec<u8>>,
        origin: LogoOrigin,
    ) -> Option<Self> {
        let pixels = (width as usize).checked_mul(height as usize)?;
        if width == 0 || height == 0 || rgb.len() != pixels.checked_mul(3)? {
            return None;
        }
        if alpha.as_ref().is_some_and(|a| a.len() != pixels) {
            return None;
        }
        Some(Self {
            format,
            width,
            height,
            pixels: PixelData::Rgb {
                rgb: rgb.into(),
                alpha: alpha.map(Into::into),
            },
            origin,
        })
    }

    pub fn is_placeholder(&self) -> bool {
        self.origin == LogoOrigin::Placeholder
    }

    /// Size of the pixel payload in bytes.
    pub fn byte_len(&self) -> usize {
        match &self.pixels {
            PixelData::Dct { data, .. } => data.len(),
            PixelData::Rgb { rgb, alpha } => rgb.len() + alpha.as_ref().map_or(0, |a| a.len()),
        }
    }
}
