use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::MarkError;

/// Loads an image file as RGB, guessing the format from its content
pub fn load_image(path: &Path) -> Result<RgbImage, MarkError> {
    let load_error = |source: image::ImageError| MarkError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };

    let reader = image::ImageReader::open(path)
        .map_err(|e| load_error(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| load_error(image::ImageError::IoError(e)))?;
    let image = reader.decode().map_err(load_error)?;

    debug!(
        "Loaded {:?} ({}x{})",
        path,
        image.width(),
        image.height()
    );
    Ok(image.to_rgb8())
}

/// Display name of an image: the file name up to its first dot
pub fn image_stem(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "image".to_string())
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_lowercase();
            lower == "png" || lower == "jpg" || lower == "jpeg"
        })
        .unwrap_or(false)
}

/// Expands the given inputs into image files.
///
/// Files are kept as given; directories are walked recursively for PNG and JPEG
/// files in name order. Inputs that do not exist are reported and skipped.
pub fn collect_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!("Failed to read directory entry under {:?}: {}", input, e);
                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file() && is_image(entry.path()))
                .map(|entry| entry.into_path())
                .collect();
            debug!("Found {} images in {:?}", found.len(), input);
            files.append(&mut found);
        } else if input.exists() {
            files.push(input.clone());
        } else {
            warn!("Input {:?} does not exist, skipping", input);
        }
    }

    files
}
