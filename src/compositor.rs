use image::{RgbImage, imageops::FilterType};
use tracing::debug;

use crate::MarkError;
use crate::geometry::{Rect, Size};

pub const WHITE: image::Rgb<u8> = image::Rgb([255, 255, 255]);

/// Creates a white canvas of the given size
pub fn blank_canvas(size: Size) -> RgbImage {
    RgbImage::from_pixel(size.width, size.height, WHITE)
}

/// Fits an image onto a canvas of `canvas_size`, letterboxed and centered.
///
/// Each axis is capped at the canvas dimension (images are never upscaled) and
/// then reduced by `gap`. The image is only resampled when that changes its
/// size. Returns the composited canvas together with the resized image.
pub fn fit(
    image: &RgbImage,
    canvas_size: Size,
    background: Option<RgbImage>,
    gap: (u32, u32),
) -> Result<(RgbImage, RgbImage), MarkError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(MarkError::EmptyImage);
    }

    let mut canvas = background.unwrap_or_else(|| blank_canvas(canvas_size));

    let width = image
        .width()
        .min(canvas_size.width)
        .saturating_sub(gap.0)
        .max(1);
    let height = image
        .height()
        .min(canvas_size.height)
        .saturating_sub(gap.1)
        .max(1);

    let resized = if (width, height) != image.dimensions() {
        debug!(
            "Resizing {}x{} to {}x{} for a {}x{} canvas",
            image.width(),
            image.height(),
            width,
            height,
            canvas_size.width,
            canvas_size.height
        );
        image::imageops::resize(image, width, height, FilterType::Lanczos3)
    } else {
        image.clone()
    };

    let x = (canvas_size.width as i64 - resized.width() as i64) / 2;
    let y = (canvas_size.height as i64 - resized.height() as i64) / 2;
    image::imageops::replace(&mut canvas, &resized, x, y);

    Ok((canvas, resized))
}

/// Rectangle of an `inner` sized object centered on an `outer` canvas
pub fn centered_rect(outer: Size, inner: Size) -> Rect {
    let cx = (outer.width / 2) as i32;
    let cy = (outer.height / 2) as i32;
    let half_w = (inner.width / 2) as i32;
    let half_h = (inner.height / 2) as i32;
    Rect::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
}
