use crate::error::PrepareError;
use image::GenericImageView;
use quittance_types::{ImageFormat, LogoOrigin, PixelData, ResolvedImage};
use std::sync::Arc;

/// Decodes an encoded logo file into an embeddable [`ResolvedImage`].
///
/// Grayscale and RGB JPEG data is kept as-is and embedded with `DCTDecode`.
/// Everything else, CMYK and YCCK JPEGs included, is decoded to 8-bit RGB, with
/// a soft mask only when some pixel is not opaque.
/// `path` is only used in error messages.
pub fn decode_logo(path: &str, bytes: &[u8]) -> Result<ResolvedImage, PrepareError> {
    let decode_err = |message: String| PrepareError::Decode {
        path: path.to_string(),
        message,
    };

    let format = image::guess_format(bytes).map_err(|e| decode_err(e.to_string()))?;
    let tag = match format {
        image::ImageFormat::Jpeg => ImageFormat::Jpeg,
        image::ImageFormat::Png => ImageFormat::Png,
        image::ImageFormat::Gif => ImageFormat::Gif,
        other => return Err(decode_err(format!("unsupported image format {:?}", other))),
    };

    let decoded =
        image::load_from_memory_with_format(bytes, format).map_err(|e| decode_err(e.to_string()))?;
    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return Err(decode_err("image has no pixels".to_string()));
    }

    if tag == ImageFormat::Jpeg {
        match jpeg_components(bytes) {
            Some(components @ (1 | 3)) => {
                return Ok(ResolvedImage {
                    format: tag,
                    width,
                    height,
                    pixels: PixelData::Dct {
                        data: Arc::from(bytes),
                        gray: components == 1,
                    },
                    origin: LogoOrigin::Canonical,
                });
            }
            components => log::debug!(
                "Re-encoding JPEG logo '{}' with {:?} components as RGB",
                path,
                components
            ),
        }
    }

    let rgba = decoded.to_rgba8();
    let pixel_count = (width as usize) * (height as usize);
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    let mut alpha = Vec::with_capacity(pixel_count);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        rgb.extend_from_slice(&[r, g, b]);
        alpha.push(a);
    }
    let alpha = alpha.iter().any(|&a| a != u8::MAX).then_some(alpha);

    ResolvedImage::from_rgb(tag, width, height, rgb, alpha, LogoOrigin::Canonical)
        .ok_or_else(|| decode_err("decoded pixel buffer has unexpected length".to_string()))
}

/// Number of colour components declared in a JPEG's frame header.
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];
        match marker {
            // Fill byte before a marker.
            0xFF => {
                pos += 1;
                continue;
            }
            // Standalone markers carry no length.
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            // Start of scan or end of image: no frame header was found.
            0xD9 | 0xDA => return None,
            _ => {}
        }
        let length = usize::from(u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]));
        let is_frame = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_frame {
            // length(2) precision(1) height(2) width(2) components(1)
            return bytes.get(pos + 9).copied();
        }
        pos += 2 + length;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(image: DynamicImage, format: image::ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_opaque_png_has_no_soft_mask() {
        let png = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]))),
            image::ImageFormat::Png,
        );
        let logo = decode_logo("logo.png", &png).unwrap();

        assert_eq!((logo.format, logo.width, logo.height), (ImageFormat::Png, 4, 3));
        assert_eq!(logo.origin, LogoOrigin::Canonical);
        match logo.pixels {
            PixelData::Rgb { rgb, alpha } => {
                assert_eq!(rgb.len(), 4 * 3 * 3);
                assert_eq!(&rgb[..3], &[10, 20, 30]);
                assert!(alpha.is_none());
            }
            PixelData::Dct { .. } => panic!("PNG must be decoded to RGB"),
        }
    }

    #[test]
    fn test_transparent_png_keeps_alpha() {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let png = encode(DynamicImage::ImageRgba8(image), image::ImageFormat::Png);

        match decode_logo("logo.png", &png).unwrap().pixels {
            PixelData::Rgb { alpha: Some(alpha), .. } => assert_eq!(&*alpha, &[255, 255, 255, 0]),
            other => panic!("expected a soft mask, got {:?}", other),
        }
    }

    #[test]
    fn test_jpeg_is_passed_through() {
        let jpeg = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([200, 100, 50]))),
            image::ImageFormat::Jpeg,
        );
        let logo = decode_logo("logo.jpg", &jpeg).unwrap();

        assert_eq!(logo.format, ImageFormat::Jpeg);
        match logo.pixels {
            PixelData::Dct { data, gray } => {
                assert_eq!(&*data, jpeg.as_slice());
                assert!(!gray);
            }
            PixelData::Rgb { .. } => panic!("JPEG must not be re-encoded"),
        }
    }

    #[test]
    fn test_jpeg_component_count() {
        let rgb = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([200, 100, 50]))),
            image::ImageFormat::Jpeg,
        );
        let gray = encode(
            DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([90]))),
            image::ImageFormat::Jpeg,
        );
        assert_eq!(jpeg_components(&rgb), Some(3));
        assert_eq!(jpeg_components(&gray), Some(1));

        // SOI, then a baseline frame header declaring four (CMYK) components.
        let cmyk_header = [
            0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x14, 0x08, 0x00, 0x08, 0x00, 0x08, 0x04,
        ];
        assert_eq!(jpeg_components(&cmyk_header), Some(4));
        assert_eq!(jpeg_components(&[0xFF, 0xD8, 0xFF, 0xD9]), None);
    }

    #[test]
    fn test_gray_jpeg_is_passed_through_as_gray() {
        let jpeg = encode(
            DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([90]))),
            image::ImageFormat::Jpeg,
        );
        match decode_logo("logo.jpg", &jpeg).unwrap().pixels {
            PixelData::Dct { gray, .. } => assert!(gray),
            PixelData::Rgb { .. } => panic!("gray JPEG must not be re-encoded"),
        }
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let err = decode_logo("logo.png", b"definitely not an image").unwrap_err();
        assert!(matches!(err, PrepareError::Decode { ref path, .. } if path == "logo.png"));
    }

    #[test]
    fn test_truncated_png_is_a_decode_error() {
        let png = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([1, 2, 3]))),
            image::ImageFormat::Png,
        );
        assert!(decode_logo("logo.png", &png[..png.len() / 2]).is_err());
    }
}
