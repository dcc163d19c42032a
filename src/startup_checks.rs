use crate::Config;
use crate::export::slot_path;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum StartupCheckError {
    #[error("Font directory does not exist: {0:?}")]
    FontDirectoryMissing(std::path::PathBuf),

    #[error("Required file missing: {0}")]
    RequiredFileMissing(String),

    #[error("Output folder is not usable: {0}")]
    OutputFolderUnusable(String),
}

impl StartupCheckError {
    /// Missing fonts only disable text watermarks
    pub fn is_critical(&self) -> bool {
        matches!(self, StartupCheckError::OutputFolderUnusable(_))
    }
}

/// Checks the environment before any work starts.
///
/// `output` is the folder an export will write into, when known.
pub fn perform_startup_checks(
    config: &Config,
    output: Option<&Path>,
) -> Result<(), Vec<StartupCheckError>> {
    let mut errors = Vec::new();

    info!("Performing startup checks...");

    // Check the font directory and the default font inside it
    let font_dir = &config.fonts.directory;
    if !font_dir.exists() {
        warn!("Font directory does not exist: {:?}", font_dir);
        warn!("Text watermarks will be skipped");
        errors.push(StartupCheckError::FontDirectoryMissing(font_dir.clone()));
    } else {
        info!("Font directory exists: {:?}", font_dir);

        let font_path = font_dir.join(&config.fonts.default);
        if font_path.exists() {
            info!("Required file found: {:?}", font_path);
        } else {
            warn!("Default font missing: {:?}", font_path);
            errors.push(StartupCheckError::RequiredFileMissing(
                config.fonts.default.clone(),
            ));
        }
    }

    // Check that the export folder exists and still has a free slot
    if let Some(output) = output {
        if !output.is_dir() {
            error!("Output folder does not exist: {:?}", output);
            errors.push(StartupCheckError::OutputFolderUnusable(format!(
                "{} is not a directory",
                output.display()
            )));
        } else if !has_free_slot(output, &config.export.folder_name, config.export.max_slots) {
            error!(
                "All {} output slots in {:?} are taken",
                config.export.max_slots, output
            );
            errors.push(StartupCheckError::OutputFolderUnusable(format!(
                "no free {} folder in {}",
                config.export.folder_name,
                output.display()
            )));
        } else {
            info!("Output folder is usable: {:?}", output);
        }
    }

    if errors.is_empty() {
        info!("All startup checks passed");
        Ok(())
    } else {
        warn!("Startup checks found {} problems", errors.len());
        Err(errors)
    }
}

fn has_free_slot(folder: &Path, name: &str, max_slots: u32) -> bool {
    (0..max_slots).any(|slot| !slot_path(folder, name, slot).exists())
}
