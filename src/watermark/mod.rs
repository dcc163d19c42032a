// Watermark module - watermark objects, fonts, and rendering onto target images
mod fonts;
mod render;
mod text;
mod types;

// Re-export public items
pub use fonts::FontBook;
pub use render::{RenderJob, Renderer};
pub use text::draw_text;
pub use types::*;
