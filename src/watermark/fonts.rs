use ab_glyph::FontVec;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::MarkError;

/// Fonts available to text watermarks, keyed by file name
#[derive(Default)]
pub struct FontBook {
    fonts: BTreeMap<String, FontVec>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `.ttf`/`.otf` file in `directory`.
    ///
    /// A missing directory yields an empty book; unparsable files are skipped.
    pub fn load_dir(directory: &Path) -> Result<Self, MarkError> {
        let mut book = Self::new();
        if !directory.exists() {
            debug!("Font directory not found at {:?}, no fonts loaded", directory);
            return Ok(book);
        }

        for entry in std::fs::read_dir(directory)? {
            let path = entry?.path();
            if !is_font_file(&path) {
                continue;
            }
            if let Err(e) = book.load_file(&path) {
                warn!("Skipping font {:?}: {}", path, e);
            }
        }

        debug!("Loaded {} fonts from {:?}", book.fonts.len(), directory);
        Ok(book)
    }

    /// Loads one font file and registers it under its file name
    pub fn load_file(&mut self, path: &Path) -> Result<String, MarkError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| MarkError::FontParse(path.to_path_buf()))?;
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec(data).map_err(|_| MarkError::FontParse(path.to_path_buf()))?;
        self.fonts.insert(name.clone(), font);
        Ok(name)
    }

    pub fn get(&self, name: &str) -> Option<&FontVec> {
        self.fonts.get(name)
    }

    /// Like [`FontBook::get`], but a missing font is an error
    pub fn require(&self, name: &str) -> Result<&FontVec, MarkError> {
        self.get(name)
            .ok_or_else(|| MarkError::FontNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
        .unwrap_or(false)
}
