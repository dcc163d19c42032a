use ab_glyph::{Font, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

use crate::geometry::Point;

/// Draws `text` with its baseline starting at `origin`.
///
/// `px_height` is the font's pixel height. A bold pass repeats the glyphs one
/// pixel to the right. Empty text and non-positive sizes draw nothing.
pub fn draw_text(
    image: &mut RgbImage,
    text: &str,
    origin: Point,
    font: &impl Font,
    px_height: f32,
    color: Rgb<u8>,
    bold: bool,
) {
    if text.is_empty() || px_height <= 0.0 {
        return;
    }

    let scale = PxScale::from(px_height);
    let ascent = font.as_scaled(scale).ascent().round() as i32;
    let top = origin.y - ascent;

    draw_text_mut(image, color, origin.x, top, scale, font, text);
    if bold {
        draw_text_mut(image, color, origin.x + 1, top, scale, font, text);
    }
}
