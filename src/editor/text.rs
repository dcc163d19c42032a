// Edit-canvas geometry of text watermarks
use crate::geometry::{Point, Rect, Size};
use crate::watermark::TextSize;

/// Placeholder shown for a new text watermark until the first key press
pub const PLACEHOLDER: &str = "text";

/// Horizontal advance assumed per character and size step
const CHAR_ADVANCE: i32 = 10;

/// Initial rectangle of a new text watermark, slightly above the canvas center
pub fn initial_rect(canvas: Size, size: TextSize, len: usize) -> Rect {
    let s = size.step();
    let cx = (canvas.width / 2) as i32;
    let cy = (canvas.height / 2) as i32 - 5;
    Rect::new(
        cx - 30 * s,
        cy - 5 * s,
        cx + 4 * len as i32 * s,
        cy + 5 * s,
    )
}

/// Rectangle the selection marker is drawn around
pub fn marker_rect(position: Rect, size: TextSize, len: usize) -> Rect {
    let s = size.step();
    Rect::new(
        position.left,
        position.top - 2 * s,
        position.left + len as i32 * CHAR_ADVANCE * s,
        position.bottom + 2 * s,
    )
}

/// Text baseline origin on the edit canvas
pub fn baseline(position: Rect) -> Point {
    Point::new(position.left, position.bottom)
}
