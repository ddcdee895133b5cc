use crate::config::PlaceholderSpec;
use crate::glyphs::{glyph, Glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
use image::{Rgb, RgbImage};
use quittance_types::{ImageFormat, LogoOrigin, PixelData, ResolvedImage};

const MIN_SIZE_PX: u32 = 16;
const MAX_SIZE_PX: u32 = 512;
/// Blank columns between adjacent glyphs, before scaling.
const GLYPH_SPACING: u32 = 1;

/// Draws the placeholder mark and returns its pixels.
///
/// The surface is created, painted and consumed within this call. Output
/// depends only on `spec`, so repeated calls produce identical pixels.
pub fn synthesize_placeholder(spec: &PlaceholderSpec) -> ResolvedImage {
    let size = spec.size_px.clamp(MIN_SIZE_PX, MAX_SIZE_PX);
    let mut surface = RgbImage::from_pixel(size, size, Rgb(spec.background.to_bytes()));

    let glyphs: Vec<Glyph> = spec.mark.mark().chars().map(glyph).collect();
    draw_centered(&mut surface, &glyphs, Rgb(spec.foreground.to_bytes()));

    ResolvedImage {
        format: ImageFormat::Bitmap,
        width: size,
        height: size,
        pixels: PixelData::Rgb {
            rgb: surface.into_raw().into(),
            alpha: None,
        },
        origin: LogoOrigin::Placeholder,
    }
}

fn draw_centered(surface: &mut RgbImage, glyphs: &[Glyph], color: Rgb<u8>) {
    if glyphs.is_empty() {
        return;
    }
    let count = glyphs.len() as u32;
    let columns = count * GLYPH_WIDTH + (count - 1) * GLYPH_SPACING;
    let size = surface.width();

    // Mark spans at most 60% of the width and half the height.
    let scale = ((size * 3 / 5) / columns).min((size / 2) / GLYPH_HEIGHT).max(1);
    let origin_x = size.saturating_sub(columns * scale) / 2;
    let origin_y = size.saturating_sub(GLYPH_HEIGHT * scale) / 2;

    for (index, rows) in glyphs.iter().enumerate() {
        let glyph_x = origin_x + index as u32 * (GLYPH_WIDTH + GLYPH_SPACING) * scale;
        for (row, bits) in rows.iter().enumerate() {
            for column in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - column)) != 0 {
                    fill_cell(
                        surface,
                        glyph_x + column * scale,
                        origin_y + row as u32 * scale,
                        scale,
                        color,
                    );
                }
            }
        }
    }
}

fn fill_cell(surface: &mut RgbImage, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    for dy in 0..scale {
        for dx in 0..scale {
            let (px, py) = (x + dx, y + dy);
            if px < surface.width() && py < surface.height() {
                surface.put_pixel(px, py, color);
            }
        }
    }
}
