//! Target images waiting to be watermarked.
//!
//! A batch keeps the decoded pixels of every accepted input in insertion order.
//! Previews and exports both go through the same [`Renderer`], so the preview of
//! an image matches what export writes, apart from the preview's fixed size.

use image::{RgbImage, imageops::FilterType};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::compositor::blank_canvas;
use crate::export::{ExportReport, save_images};
use crate::geometry::Size;
use crate::loader::{image_stem, load_image};
use crate::watermark::{RenderJob, Renderer};
use crate::{ExportConfig, MarkError};

#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// File name up to the first dot, used to name the exported file
    pub name: String,
    pub pixels: RgbImage,
}

#[derive(Debug, Clone, Default)]
pub struct ImageBatch {
    images: Vec<LoadedImage>,
}

impl ImageBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every path, appending the readable ones.
    ///
    /// Unreadable files are skipped; the returned list pairs each with its error.
    pub fn load_paths(&mut self, paths: &[PathBuf]) -> Vec<(PathBuf, MarkError)> {
        let mut failures = Vec::new();

        for path in paths {
            match self.load_path(path) {
                Ok(()) => {}
                Err(e) => {
                    warn!("Skipping {:?}: {}", path, e);
                    failures.push((path.clone(), e));
                }
            }
        }

        info!(
            "Batch holds {} images ({} inputs skipped)",
            self.images.len(),
            failures.len()
        );
        failures
    }

    fn load_path(&mut self, path: &Path) -> Result<(), MarkError> {
        let pixels = load_image(path)?;
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(MarkError::EmptyImage);
        }
        self.push(image_stem(path), pixels);
        Ok(())
    }

    pub fn push(&mut self, name: impl Into<String>, pixels: RgbImage) {
        let name = name.into();
        debug!("Added {} ({}x{}) to batch", name, pixels.width(), pixels.height());
        self.images.push(LoadedImage { name, pixels });
    }

    pub fn remove(&mut self, index: usize) -> Option<LoadedImage> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&LoadedImage> {
        self.images.get(index)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(|image| image.name.as_str())
    }

    /// Renders the image at `index` at the fixed preview size.
    ///
    /// An empty batch or an index past the end gives a blank white canvas.
    pub fn preview(
        &self,
        index: usize,
        size: Size,
        renderer: &Renderer,
        job: &RenderJob<'_>,
    ) -> RgbImage {
        let Some(image) = self.images.get(index) else {
            debug!("No image at index {}, showing blank preview", index);
            return blank_canvas(size);
        };

        let resized = image::imageops::resize(
            &image.pixels,
            size.width,
            size.height,
            FilterType::Lanczos3,
        );
        renderer.render(&resized, job)
    }

    /// Renders every image and writes the results into a new folder inside `folder`
    pub fn export(
        &self,
        folder: &Path,
        config: &ExportConfig,
        renderer: &Renderer,
        job: &RenderJob<'_>,
    ) -> Result<ExportReport, MarkError> {
        if self.images.is_empty() {
            return Err(MarkError::NothingToExport("no images loaded"));
        }
        if job.objects.is_empty() {
            return Err(MarkError::NothingToExport("no watermarks placed"));
        }

        let rendered: Vec<(String, RgbImage)> = self
            .images
            .iter()
            .map(|image| (image.name.clone(), renderer.render(&image.pixels, job)))
            .collect();

        save_images(folder, config, &rendered)
    }
}
