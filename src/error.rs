use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Failed to load image {path:?}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image has no pixels")]
    EmptyImage,

    #[error("No free output folder in {folder:?} after {attempts} attempts")]
    NoOutputSlotAvailable { folder: PathBuf, attempts: u32 },

    #[error("No watermark is selected")]
    EmptySelection,

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Failed to parse font: {0:?}")]
    FontParse(PathBuf),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml_edit::de::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Nothing to export: {0}")]
    NothingToExport(&'static str),
}
