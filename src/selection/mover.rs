use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};

/// Minimum distance, in pixels, between a selection and each canvas edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Margins kept around a dragged image watermark
    pub const fn object() -> Self {
        Self::new(4, 3, 4, 4)
    }

    /// Margins kept around a dragged text watermark
    pub const fn text() -> Self {
        Self::new(1, 10, 5, 10)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::object()
    }
}

/// Clamps a selection rectangle inside `bounds`.
///
/// Each edge that touches or crosses its margin is pinned to the margin and the
/// opposite edge is placed `selection` pixels away. Edges that stay clear keep
/// their recorded coordinates. A selection larger than the space between the
/// margins stays pinned to the left and top margins and overhangs the far side.
pub fn clamp_rect(rect: Rect, selection: Size, bounds: Size, margins: &Margins) -> Rect {
    let (sel_w, sel_h) = (selection.width as i32, selection.height as i32);
    let (max_x, max_y) = (bounds.width as i32, bounds.height as i32);
    let mut rect = rect;

    // Far edges first so the near margins win for oversized selections
    if rect.right >= max_x - margins.right {
        rect = Rect::new(
            max_x - margins.right - sel_w,
            rect.top,
            max_x - margins.right,
            rect.bottom,
        );
    }
    if rect.left <= margins.left {
        rect = Rect::new(margins.left, rect.top, margins.left + sel_w, rect.bottom);
    }
    if rect.bottom >= max_y - margins.bottom {
        rect = Rect::new(
            rect.left,
            max_y - margins.bottom - sel_h,
            rect.right,
            max_y - margins.bottom,
        );
    }
    if rect.top <= margins.top {
        rect = Rect::new(rect.left, margins.top, rect.right, margins.top + sel_h);
    }

    rect
}

/// Clamps a dragged text rectangle, preserving its own width and height
pub fn clamp_text_rect(rect: Rect, bounds: Size, margins: &Margins) -> Rect {
    let (width, height) = (rect.width(), rect.height());
    let (max_x, max_y) = (bounds.width as i32, bounds.height as i32);
    let mut rect = rect;

    if rect.left < margins.left {
        rect = Rect::new(margins.left, rect.top, margins.left + width, rect.bottom);
    } else if rect.right > max_x - margins.right {
        rect = Rect::new(
            max_x - margins.right - width,
            rect.top,
            max_x - margins.right,
            rect.bottom,
        );
    }
    if rect.top < margins.top {
        rect = Rect::new(rect.left, margins.top, rect.right, margins.top + height);
    } else if rect.bottom > max_y - margins.bottom {
        rect = Rect::new(
            rect.left,
            max_y - margins.bottom - height,
            rect.right,
            max_y - margins.bottom,
        );
    }

    rect
}

/// Clamps `rect` inside the canvas and pastes the selection pixels there.
///
/// The pasted span always has the selection's own dimensions, even when the
/// recorded rectangle is a pixel short from halving an odd size. Returns the
/// updated canvas and the clamped rectangle.
pub fn move_selection(
    mut canvas: RgbImage,
    selection: &RgbImage,
    rect: Rect,
    margins: &Margins,
) -> (RgbImage, Rect) {
    let rect = clamp_rect(rect, Size::of(selection), Size::of(&canvas), margins);
    image::imageops::replace(&mut canvas, selection, rect.left as i64, rect.top as i64);
    (canvas, rect)
}
