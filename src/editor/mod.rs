//! Interaction controller for the edit canvas.
//!
//! The editor owns the watermark objects and the single active selection, which
//! is always the most recently added object. Input events only update that
//! state; [`Editor::frame`] composes a fresh canvas from it on demand.

mod events;
mod text;

pub use events::{InputEvent, Key, MoveMode};
pub use text::PLACEHOLDER;

use image::RgbImage;
use tracing::debug;

use crate::compositor::{blank_canvas, centered_rect, fit};
use crate::geometry::{Point, Rect, Size};
use crate::selection::{Margins, clamp_rect, clamp_text_rect, mark_selection, move_selection};
use crate::watermark::{
    Color, FontBook, ImageWatermark, TextSize, TextStyle, TextWatermark, WatermarkObject,
    draw_text,
};
use crate::{CanvasConfig, MarkError, RenderConfig};

#[derive(Debug, Clone, Default)]
struct Selection {
    move_mode: MoveMode,
    drag_origin: Option<Point>,
    /// Text still shows the placeholder and is replaced by the first key press
    pristine_text: bool,
}

pub struct Editor {
    canvas_size: Size,
    image_gap: (u32, u32),
    object_margins: Margins,
    text_margins: Margins,
    text_scale_per_step: f32,
    px_per_text_scale: f32,
    objects: Vec<WatermarkObject>,
    selection: Option<Selection>,
    style: TextStyle,
}

impl Editor {
    pub fn new(canvas: &CanvasConfig, render: &RenderConfig, default_font: &str) -> Self {
        let canvas_size = canvas.edit.size();
        Self {
            canvas_size,
            image_gap: canvas.image_gap,
            object_margins: canvas.object_margins,
            text_margins: canvas.text_margins,
            text_scale_per_step: render.edit_text_scale_per_step,
            px_per_text_scale: render.px_per_text_scale,
            objects: Vec::new(),
            selection: None,
            style: TextStyle::new(default_font),
        }
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    pub fn objects(&self) -> &[WatermarkObject] {
        &self.objects
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// The active object, if any
    pub fn selected(&self) -> Option<&WatermarkObject> {
        self.selection.as_ref().and_then(|_| self.objects.last())
    }

    pub fn move_mode(&self) -> MoveMode {
        self.selection
            .as_ref()
            .map(|s| s.move_mode)
            .unwrap_or_default()
    }

    /// True while a text watermark is selected and accepts key input
    pub fn in_text_mode(&self) -> bool {
        self.selected().is_some_and(WatermarkObject::is_text)
    }

    /// Adds an image watermark, fitted and centered on the edit canvas, and selects it
    pub fn add_image(&mut self, pixels: &RgbImage) -> Result<(), MarkError> {
        let (_, fitted) = fit(pixels, self.canvas_size, None, self.image_gap)?;
        self.commit();

        let position = centered_rect(self.canvas_size, Size::of(&fitted));
        debug!("Adding image watermark at {:?}", position);
        self.objects.push(WatermarkObject::Image(ImageWatermark {
            pixels: fitted,
            position,
        }));
        self.selection = Some(Selection::default());
        Ok(())
    }

    /// Adds a text watermark in the current style and selects it.
    ///
    /// Without `content` the text starts as the placeholder, which the first key
    /// press replaces.
    pub fn add_text(&mut self, content: Option<&str>) {
        self.commit();

        let (content, pristine_text) = match content {
            Some(content) => (content.to_string(), false),
            None => (PLACEHOLDER.to_string(), true),
        };
        let position = text::initial_rect(self.canvas_size, self.style.size, content.chars().count());
        debug!("Adding text watermark '{}' at {:?}", content, position);

        self.objects.push(WatermarkObject::Text(TextWatermark {
            style: self.style.clone(),
            content,
            position,
        }));
        self.selection = Some(Selection {
            pristine_text,
            ..Selection::default()
        });
    }

    /// Applies one input event; returns whether the canvas needs a redraw.
    ///
    /// Presses outside the canvas are ignored. Keys other than letters, digits,
    /// Space and Backspace are ignored too, and leave a placeholder text in place.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown(point) => self.pointer_down(point),
            InputEvent::PointerMove(point) => self.pointer_move(point),
            InputEvent::PointerUp(_) => self.pointer_up(),
            InputEvent::Key(key) => self.key(key),
        }
    }

    fn pointer_down(&mut self, point: Point) -> bool {
        if !Rect::of_size(self.canvas_size).contains_strict(point) {
            return false;
        }
        let Some(position) = self.selected().map(WatermarkObject::position) else {
            return false;
        };
        let is_text = self.in_text_mode();

        if position.contains_strict(point) {
            if let Some(selection) = self.selection.as_mut() {
                selection.move_mode = if is_text {
                    MoveMode::Text
                } else {
                    MoveMode::Object
                };
                selection.drag_origin = Some(point);
            }
            false
        } else {
            self.commit();
            true
        }
    }

    fn pointer_move(&mut self, point: Point) -> bool {
        let Some(selection) = self.selection.as_ref() else {
            return false;
        };
        let (mode, origin) = (selection.move_mode, selection.drag_origin);
        let Some(origin) = origin.filter(|_| mode != MoveMode::None) else {
            return false;
        };

        if !Rect::of_size(self.canvas_size).contains_strict(point) {
            if let Some(selection) = self.selection.as_mut() {
                selection.move_mode = MoveMode::None;
            }
            return false;
        }

        let (dx, dy) = origin.delta_to(point);
        let bounds = self.canvas_size;
        let object_margins = self.object_margins;
        let text_margins = self.text_margins;

        if let Some(object) = self.objects.last_mut() {
            let moved = object.position().translate(dx, dy);
            let clamped = match object {
                WatermarkObject::Image(image) => {
                    clamp_rect(moved, Size::of(&image.pixels), bounds, &object_margins)
                }
                WatermarkObject::Text(_) => clamp_text_rect(moved, bounds, &text_margins),
            };
            object.set_position(clamped);
        }
        if let Some(selection) = self.selection.as_mut() {
            selection.drag_origin = Some(point);
        }
        true
    }

    fn pointer_up(&mut self) -> bool {
        if let Some(selection) = self.selection.as_mut() {
            selection.move_mode = MoveMode::None;
        }
        false
    }

    fn key(&mut self, key: Key) -> bool {
        let Some(selection) = self.selection.as_mut() else {
            return false;
        };
        let Some(WatermarkObject::Text(text)) = self.objects.last_mut() else {
            return false;
        };

        let accepted = match key {
            Key::Backspace => true,
            Key::Space => true,
            Key::Char(c) => c.is_ascii_alphanumeric(),
            Key::Other => false,
        };
        if !accepted {
            return false;
        }

        if selection.pristine_text {
            text.content.clear();
            selection.pristine_text = false;
        }
        match key {
            Key::Backspace => {
                text.content.pop();
            }
            Key::Space => text.content.push(' '),
            Key::Char(c) => text.content.push(c.to_ascii_uppercase()),
            Key::Other => {}
        }

        let marker = text::marker_rect(text.position, text.style.size, text.content.chars().count());
        text.position.right = marker.right;
        true
    }

    pub fn set_font(&mut self, font: impl Into<String>) {
        self.style.font = font.into();
        self.restyle_text();
    }

    pub fn set_text_size(&mut self, size: TextSize) {
        self.style.size = size;
        self.restyle_text();
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
        self.restyle_text();
    }

    pub fn toggle_bold(&mut self) {
        self.style.bold = !self.style.bold;
        self.restyle_text();
    }

    /// Re-adds the active text watermark with the current style
    fn restyle_text(&mut self) {
        let Some(WatermarkObject::Text(text)) = self.selected() else {
            return;
        };
        let content = text.content.clone();
        let pristine = self.selection.as_ref().is_some_and(|s| s.pristine_text);

        if self.delete_selection().is_ok() {
            if pristine {
                self.add_text(None);
            } else {
                self.add_text(Some(&content));
            }
        }
    }

    /// Removes the active watermark
    pub fn delete_selection(&mut self) -> Result<WatermarkObject, MarkError> {
        if self.selection.take().is_none() {
            return Err(MarkError::EmptySelection);
        }
        self.objects.pop().ok_or(MarkError::EmptySelection)
    }

    /// Finalizes the active watermark in place and clears the selection
    pub fn commit(&mut self) {
        if self.selection.take().is_none() {
            return;
        }
        let Some(object) = self.objects.last_mut() else {
            return;
        };

        if let WatermarkObject::Image(image) = object {
            image.position = clamp_rect(
                image.position,
                Size::of(&image.pixels),
                self.canvas_size,
                &self.object_margins,
            );
        }
        debug!("Committed watermark at {:?}", object.position());
    }

    /// Discards every watermark and restores a blank canvas
    pub fn reset(&mut self) {
        self.objects.clear();
        self.selection = None;
    }

    /// Composes the edit canvas from scratch: every watermark in insertion order,
    /// plus the marker of the active one
    pub fn frame(&self, fonts: &FontBook) -> RgbImage {
        let mut canvas = blank_canvas(self.canvas_size);

        for (index, object) in self.objects.iter().enumerate() {
            let active = self.selection.is_some() && index + 1 == self.objects.len();
            match object {
                WatermarkObject::Image(image) => {
                    let (moved, position) =
                        move_selection(canvas, &image.pixels, image.position, &self.object_margins);
                    canvas = moved;
                    if active {
                        mark_selection(&mut canvas, position, 1);
                    }
                }
                WatermarkObject::Text(text) => {
                    self.draw_edit_text(&mut canvas, text, fonts);
                    if active {
                        let marker = text::marker_rect(
                            text.position,
                            text.style.size,
                            text.content.chars().count(),
                        );
                        mark_selection(&mut canvas, marker, 1);
                    }
                }
            }
        }

        canvas
    }

    fn draw_edit_text(&self, canvas: &mut RgbImage, text: &TextWatermark, fonts: &FontBook) {
        let Some(font) = fonts.get(&text.style.font) else {
            return;
        };
        let px_height =
            self.text_scale_per_step * text.style.size.step() as f32 * self.px_per_text_scale;
        draw_text(
            canvas,
            &text.content,
            text::baseline(text.position),
            font,
            px_height,
            text.style.color.to_rgb(),
            text.style.bold,
        );
    }
}

#[cfg(test)]
mod tests;
