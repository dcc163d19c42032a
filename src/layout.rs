//! Watermark layouts stored as TOML.
//!
//! A layout lists watermarks the way a user would place them: each entry is
//! added to the editor, optionally dragged by an offset, then committed.
//!
//! ```toml
//! scale = "medium"
//!
//! [[watermark]]
//! kind = "image"
//! path = "logo.png"
//! offset = [40, 20]
//!
//! [[watermark]]
//! kind = "text"
//! content = "SAMPLE"
//! size = "small"
//! color = "#ff0000"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::MarkError;
use crate::editor::{Editor, InputEvent};
use crate::geometry::Point;
use crate::loader::load_image;
use crate::watermark::{Color, ScaleLevel, TextSize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub scale: Option<ScaleLevel>,
    #[serde(default)]
    pub watermark: Vec<WatermarkEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WatermarkEntry {
    Image {
        /// Relative paths resolve against the layout file's directory
        path: PathBuf,
        #[serde(default)]
        offset: Option<(i32, i32)>,
    },
    Text {
        content: String,
        #[serde(default)]
        font: Option<String>,
        #[serde(default)]
        size: TextSize,
        #[serde(default)]
        color: Color,
        #[serde(default)]
        bold: bool,
        #[serde(default)]
        offset: Option<(i32, i32)>,
    },
}

impl WatermarkEntry {
    fn offset(&self) -> Option<(i32, i32)> {
        match self {
            WatermarkEntry::Image { offset, .. } | WatermarkEntry::Text { offset, .. } => *offset,
        }
    }
}

impl Layout {
    pub fn load(path: &Path) -> Result<Self, MarkError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, MarkError> {
        Ok(toml_edit::de::from_str::<Layout>(content)?)
    }

    /// Replays every entry on `editor` and commits the last one.
    ///
    /// Entries without a font use `default_font`.
    pub fn apply(&self, editor: &mut Editor, base_dir: &Path, default_font: &str) -> Result<(), MarkError> {
        for entry in &self.watermark {
            match entry {
                WatermarkEntry::Image { path, .. } => {
                    let path = base_dir.join(path);
                    let pixels = load_image(&path)?;
                    editor.add_image(&pixels)?;
                }
                WatermarkEntry::Text {
                    content,
                    font,
                    size,
                    color,
                    bold,
                    ..
                } => {
                    // Restyling an active text would re-add it
                    editor.commit();
                    editor.set_font(font.as_deref().unwrap_or(default_font));
                    editor.set_text_size(*size);
                    editor.set_color(*color);
                    if editor.style().bold != *bold {
                        editor.toggle_bold();
                    }
                    editor.add_text(Some(content.as_str()));
                }
            }

            if let Some((dx, dy)) = entry.offset() {
                drag_selection(editor, dx, dy);
            }
        }

        editor.commit();
        debug!("Applied layout with {} watermarks", self.watermark.len());
        Ok(())
    }
}

/// Drags the active watermark from its center by `(dx, dy)`, keeping the
/// pointer on the canvas
fn drag_selection(editor: &mut Editor, dx: i32, dy: i32) {
    let Some(position) = editor.selected().map(|object| object.position()) else {
        return;
    };
    let canvas = editor.canvas_size();
    let start = position.center();
    let end = Point::new(
        (start.x + dx).clamp(1, canvas.width as i32 - 2),
        (start.y + dy).clamp(1, canvas.height as i32 - 2),
    );

    editor.handle(InputEvent::PointerDown(start));
    editor.handle(InputEvent::PointerMove(end));
    editor.handle(InputEvent::PointerUp(end));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::watermark::WatermarkObject;
    use crate::{CanvasConfig, RenderConfig};
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn editor() -> Editor {
        Editor::new(
            &CanvasConfig::default(),
            &RenderConfig::default(),
            "DejaVuSans.ttf",
        )
    }

    #[test]
    fn test_parse_layout() {
        let layout = Layout::parse(
            r##"
scale = "small"

[[watermark]]
kind = "image"
path = "logo.png"

[[watermark]]
kind = "text"
content = "HELLO"
size = "x-small"
color = "#00ff00"
bold = true
offset = [10, -5]
"##,
        )
        .unwrap();

        assert_eq!(layout.scale, Some(ScaleLevel::Small));
        assert_eq!(layout.watermark.len(), 2);
        assert!(matches!(
            &layout.watermark[0],
            WatermarkEntry::Image { path, offset: None } if path == Path::new("logo.png")
        ));
        match &layout.watermark[1] {
            WatermarkEntry::Text {
                content,
                font,
                size,
                color,
                bold,
                offset,
            } => {
                assert_eq!(content, "HELLO");
                assert!(font.is_none());
                assert_eq!(*size, TextSize::XSmall);
                assert_eq!(*color, Color([0, 255, 0]));
                assert!(*bold);
                assert_eq!(*offset, Some((10, -5)));
            }
            other => panic!("expected text entry, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_color() {
        let result = Layout::parse(
            r##"
[[watermark]]
kind = "text"
content = "X"
color = "#zzzzzz"
"##,
        );
        assert!(matches!(result, Err(MarkError::TomlError(_))));
    }

    #[test]
    fn test_apply_places_and_drags_entries() {
        let temp_dir = TempDir::new().unwrap();
        RgbImage::from_pixel(200, 100, Rgb([255, 0, 0]))
            .save(temp_dir.path().join("logo.png"))
            .unwrap();

        let layout = Layout::parse(
            r##"
[[watermark]]
kind = "image"
path = "logo.png"
offset = [50, 20]

[[watermark]]
kind = "text"
content = "HI"
font = "Other.ttf"
size = "small"
offset = [-300, 0]
"##,
        )
        .unwrap();

        let mut editor = editor();
        layout
            .apply(&mut editor, temp_dir.path(), "DejaVuSans.ttf")
            .unwrap();

        assert!(editor.selected().is_none());
        let objects = editor.objects();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].position(), Rect::new(195, 65, 355, 125));

        // The pointer stops at the canvas edge and the text clamp takes over
        let WatermarkObject::Text(text) = &objects[1] else {
            panic!("expected text watermark");
        };
        assert_eq!(text.position, Rect::new(1, 60, 77, 80));
        assert_eq!(text.content, "HI");
        assert_eq!(text.style.font, "Other.ttf");
        assert_eq!(text.style.size, TextSize::Small);
    }

    #[test]
    fn test_apply_missing_image_fails() {
        let temp_dir = TempDir::new().unwrap();
        let layout = Layout::parse(
            r#"
[[watermark]]
kind = "image"
path = "missing.png"
"#,
        )
        .unwrap();

        let mut editor = editor();
        let result = layout.apply(&mut editor, temp_dir.path(), "DejaVuSans.ttf");
        assert!(matches!(result, Err(MarkError::ImageLoad { .. })));
        assert!(editor.objects().is_empty());
    }

    #[test]
    fn test_text_entries_do_not_restyle_each_other() {
        let layout = Layout::parse(
            r##"
[[watermark]]
kind = "text"
content = "ONE"
size = "large"

[[watermark]]
kind = "text"
content = "TWO"
color = "#ff0000"
"##,
        )
        .unwrap();

        let mut editor = editor();
        layout
            .apply(&mut editor, Path::new("."), "DejaVuSans.ttf")
            .unwrap();

        let styles: Vec<_> = editor
            .objects()
            .iter()
            .map(|object| match object {
                WatermarkObject::Text(text) => (text.content.clone(), text.style.size, text.style.color),
                other => panic!("expected text watermark, got {:?}", other),
            })
            .collect();
        assert_eq!(
            styles,
            vec![
                ("ONE".to_string(), TextSize::Large, Color([0, 0, 0])),
                ("TWO".to_string(), TextSize::XSmall, Color([255, 0, 0])),
            ]
        );
    }
}
