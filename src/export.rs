use image::{RgbImage, codecs::png::PngEncoder};
use std::collections::HashSet;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{ExportConfig, MarkError};

/// Where an export went and what it wrote
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Creates a fresh output directory inside `folder`.
///
/// Tries `name`, then `name_1`, `name_2`, ... until `max_slots` candidates have
/// been taken.
pub fn reserve_output_dir(folder: &Path, name: &str, max_slots: u32) -> Result<PathBuf, MarkError> {
    for slot in 0..max_slots {
        let candidate = slot_path(folder, name, slot);
        match std::fs::create_dir(&candidate) {
            Ok(()) => {
                debug!("Reserved output directory {:?}", candidate);
                return Ok(candidate);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Err(MarkError::NoOutputSlotAvailable {
        folder: folder.to_path_buf(),
        attempts: max_slots,
    })
}

/// Candidate output directory for `slot`: `name` itself, then `name_<slot>`
pub fn slot_path(folder: &Path, name: &str, slot: u32) -> PathBuf {
    if slot == 0 {
        folder.join(name)
    } else {
        folder.join(format!("{}_{}", name, slot))
    }
}

/// Save image as PNG
pub fn save_png(image: &RgbImage, path: &Path) -> Result<(), MarkError> {
    let output = BufWriter::new(std::fs::File::create(path)?);
    let encoder = PngEncoder::new(output);
    image.write_with_encoder(encoder)?;
    Ok(())
}

/// Appends `_2`, `_3`, ... to repeated names so every output file is distinct
pub fn unique_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut result = Vec::new();

    for name in names {
        let mut candidate = name.to_string();
        let mut suffix = 1;
        while taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}_{}", name, suffix);
        }
        taken.insert(candidate.clone());
        result.push(candidate);
    }

    result
}

/// Writes `images` as PNG files into a newly reserved directory inside `folder`
pub fn save_images(
    folder: &Path,
    config: &ExportConfig,
    images: &[(String, RgbImage)],
) -> Result<ExportReport, MarkError> {
    let dir = reserve_output_dir(folder, &config.folder_name, config.max_slots)?;
    let names = unique_names(images.iter().map(|(name, _)| name.as_str()));

    let mut files = Vec::with_capacity(images.len());
    for (name, (_, image)) in names.iter().zip(images) {
        let path = dir.join(format!("{}.png", name));
        save_png(image, &path)?;
        debug!("Saved {:?}", path);
        files.push(path);
    }

    info!("Exported {} images to {:?}", files.len(), dir);
    Ok(ExportReport { dir, files })
}
