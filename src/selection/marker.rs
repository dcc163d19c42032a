use image::{Rgb, RgbImage};
use imageproc::drawing::draw_antialiased_line_segment_mut;
use imageproc::pixelops::interpolate;

use crate::geometry::{Point, Rect};

/// Distance between the starts of two neighbouring ticks
pub const TICK_SPACING: i32 = 10;
/// Length of a single tick
pub const TICK_LENGTH: i32 = TICK_SPACING / 3;

const TICK_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Draws a dashed highlight around `rect`, expanded outward by `outset`.
///
/// Top and bottom edges get `|width| / 10 + 1` ticks, the left and right edges
/// `|height| / 10`. Ticks run from the start corner toward the end corner and
/// anything outside the canvas is clipped.
pub fn mark_selection(canvas: &mut RgbImage, rect: Rect, outset: i32) {
    let start = Point::new(rect.left - outset, rect.top - outset);
    let end = Point::new(rect.right + outset, rect.bottom + outset);

    let x_gap = start.x - end.x;
    let y_gap = start.y - end.y;
    let x_dir = if start.x < end.x { 1 } else { -1 };
    let y_dir = if start.y < end.y { 1 } else { -1 };

    let top_left = start;
    let top_right = Point::new(end.x, start.y);
    let bottom_left = Point::new(start.x, end.y);

    for i in 0..=(x_gap.abs() / TICK_SPACING) {
        let from = TICK_SPACING * i * x_dir;
        let to = (TICK_LENGTH + TICK_SPACING * i) * x_dir;
        for corner in [top_left, bottom_left] {
            tick(canvas, (corner.x + from, corner.y), (corner.x + to, corner.y));
        }
    }

    for i in 0..(y_gap.abs() / TICK_SPACING) {
        let from = TICK_SPACING * i * y_dir;
        let to = (TICK_LENGTH + TICK_SPACING * i) * y_dir;
        for corner in [top_right, top_left] {
            tick(canvas, (corner.x, corner.y + from), (corner.x, corner.y + to));
        }
    }
}

fn tick(canvas: &mut RgbImage, start: (i32, i32), end: (i32, i32)) {
    draw_antialiased_line_segment_mut(canvas, start, end, TICK_COLOR, interpolate);
}
