use image::{RgbImage, imageops::FilterType};
use tracing::{debug, warn};

use super::fonts::FontBook;
use super::text::draw_text;
use super::types::{ImageWatermark, ScaleLevel, TextSize, TextWatermark, WatermarkObject};
use crate::RenderConfig;
use crate::geometry::{Point, Rect, Size};

/// Everything a render pass needs besides the target image
#[derive(Clone, Copy)]
pub struct RenderJob<'a> {
    pub objects: &'a [WatermarkObject],
    /// Size of the edit canvas the object positions were recorded on
    pub edit_canvas: Size,
    pub scale: ScaleLevel,
    pub fonts: &'a FontBook,
}

/// Maps watermark objects from the edit canvas onto target images
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders every watermark of `job` onto a copy of `image`.
    ///
    /// The copy is first stretched into the configured size range. Rendering is
    /// deterministic: the same inputs always produce the same pixels.
    pub fn render(&self, image: &RgbImage, job: &RenderJob<'_>) -> RgbImage {
        let target = self.target_size(Size::of(image));
        let mut output = if target != Size::of(image) {
            debug!(
                "Resizing {}x{} target to {}x{}",
                image.width(),
                image.height(),
                target.width,
                target.height
            );
            image::imageops::resize(image, target.width, target.height, FilterType::Lanczos3)
        } else {
            image.clone()
        };

        for object in job.objects {
            match object {
                WatermarkObject::Text(text) => self.draw_text_watermark(&mut output, text, job),
                WatermarkObject::Image(watermark) => {
                    self.draw_image_watermark(&mut output, watermark, job)
                }
            }
        }

        output
    }

    /// Clamps each axis of `size` into the configured range
    pub fn target_size(&self, size: Size) -> Size {
        let min = self.config.min_size;
        let max = self.config.max_size;
        Size::new(
            size.width.clamp(min.width, max.width),
            size.height.clamp(min.height, max.height),
        )
    }

    /// Region of the target that receives a text watermark of the given size
    pub fn text_area(&self, target: Size, size: TextSize) -> Rect {
        let band = self.config.text_band_base + self.config.text_band_step * size.step() as f64;
        self.area(target, band)
    }

    /// Region of the target that receives image watermarks
    pub fn image_area(&self, target: Size) -> Rect {
        self.area(target, self.config.image_band)
    }

    fn area(&self, target: Size, band: f64) -> Rect {
        Rect::new(
            0,
            (target.height as f64 * band) as i32,
            (target.width as f64 * self.config.area_width) as i32,
            target.height as i32,
        )
    }

    /// Baseline origin of a text watermark inside `area`
    pub fn text_anchor(&self, area: Rect, edit_canvas: Size, position: Rect) -> Point {
        let (x_ratio, y_ratio) = ratios(area, edit_canvas);
        Point::new(
            area.left + (position.left as f64 * x_ratio) as i32,
            area.top + (position.top as f64 * y_ratio) as i32 + self.config.text_baseline_offset,
        )
    }

    /// Text scale for a size step at a scale level
    pub fn text_scale(&self, size: TextSize, scale: ScaleLevel) -> f32 {
        self.config.text_scale_per_step * size.step() as f32
            - self.config.text_scale_per_level * (scale.factor() - 1) as f32
    }

    /// Destination rectangle of an image watermark on the target
    pub fn image_placement(
        &self,
        area: Rect,
        edit_canvas: Size,
        position: Rect,
        scale: ScaleLevel,
    ) -> Rect {
        let (x_ratio, y_ratio) = ratios(area, edit_canvas);
        let level = scale.factor();
        let offset = if level != 1 {
            self.config.scale_level_offset
        } else {
            0
        };

        let mapped = Rect::new(
            (position.left as f64 * x_ratio) as i32,
            (position.top as f64 * y_ratio) as i32 + offset,
            (position.right as f64 * x_ratio) as i32,
            (position.bottom as f64 * y_ratio) as i32 + offset,
        );

        let scalar = 1.0 + (level - 1) as f64 * self.config.scale_dampening;
        let shrink = |value: i32| (value as f64 / scalar).floor() as i32;

        let width = shrink(mapped.width());
        let height = shrink(mapped.height());
        let x = area.left + shrink(mapped.left);
        let y = area.top + shrink(mapped.top) + self.config.image_level_shift * (level - 1);

        Rect::new(x, y, x + width, y + height)
    }

    fn draw_text_watermark(&self, image: &mut RgbImage, text: &TextWatermark, job: &RenderJob<'_>) {
        let font = match job.fonts.require(&text.style.font) {
            Ok(font) => font,
            Err(e) => {
                warn!("{}, skipping text watermark", e);
                return;
            }
        };

        let area = self.text_area(Size::of(image), text.style.size);
        let anchor = self.text_anchor(area, job.edit_canvas, text.position);
        let px_height = self.text_scale(text.style.size, job.scale) * self.config.px_per_text_scale;

        draw_text(
            image,
            &text.content,
            anchor,
            font,
            px_height,
            text.style.color.to_rgb(),
            text.style.bold,
        );
    }

    fn draw_image_watermark(
        &self,
        image: &mut RgbImage,
        watermark: &ImageWatermark,
        job: &RenderJob<'_>,
    ) {
        let area = self.image_area(Size::of(image));
        let placement = self.image_placement(area, job.edit_canvas, watermark.position, job.scale);

        // The watermark is squeezed into whatever part of the placement is on the image
        let Some(visible) = placement.intersect(Rect::of_size(Size::of(image))) else {
            debug!("Image watermark at {:?} falls outside the target", placement);
            return;
        };
        if watermark.pixels.width() == 0 || watermark.pixels.height() == 0 {
            return;
        }

        let resized = image::imageops::resize(
            &watermark.pixels,
            visible.width() as u32,
            visible.height() as u32,
            FilterType::Lanczos3,
        );
        image::imageops::replace(image, &resized, visible.left as i64, visible.top as i64);
    }
}

/// Horizontal and vertical scale from the edit canvas to `area`
fn ratios(area: Rect, edit_canvas: Size) -> (f64, f64) {
    (
        area.width() as f64 / edit_canvas.width as f64,
        area.height() as f64 / edit_canvas.height as f64,
    )
}
