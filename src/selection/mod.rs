// Selection module - marker drawing and bounded movement of the active selection
mod marker;
mod mover;

pub use marker::{TICK_LENGTH, TICK_SPACING, mark_selection};
pub use mover::{Margins, clamp_rect, clamp_text_rect, move_selection};
