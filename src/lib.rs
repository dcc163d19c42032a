use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod batch;
pub mod compositor;
pub mod editor;
mod error;
pub mod export;
pub mod geometry;
pub mod layout;
pub mod loader;
pub mod selection;
pub mod startup_checks;
pub mod watermark;

pub use error::MarkError;

use geometry::Size;
use selection::Margins;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub fonts: FontConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Reads `path`, falling back to the defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, MarkError> {
        if !path.exists() {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml_edit::de::from_str::<Config>(&content)?)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "markstudio".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub edit: ImageSizeConfig,
    pub preview: ImageSizeConfig,
    /// Padding removed from an image watermark when it is fitted to the edit canvas
    pub image_gap: (u32, u32),
    pub object_margins: Margins,
    pub text_margins: Margins,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            edit: ImageSizeConfig {
                width: 450,
                height: 150,
            },
            preview: ImageSizeConfig {
                width: 600,
                height: 300,
            },
            image_gap: (40, 40),
            object_margins: Margins::object(),
            text_margins: Margins::text(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ImageSizeConfig {
    pub width: u32,
    pub height: u32,
}

impl ImageSizeConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Placement constants used when mapping the edit canvas onto a target image.
///
/// The scale-level offsets and the dampening factor are hand-tuned visual
/// corrections.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    pub min_size: ImageSizeConfig,
    pub max_size: ImageSizeConfig,
    /// Share of the target width covered by the watermark area
    pub area_width: f64,
    /// Top of the text area as a share of the target height, before the size step
    pub text_band_base: f64,
    /// Added to the text band per text size step
    pub text_band_step: f64,
    /// Top of the image area as a share of the target height
    pub image_band: f64,
    /// Vertical shift applied to every text anchor
    pub text_baseline_offset: i32,
    /// Text scale per size step on target images
    pub text_scale_per_step: f32,
    /// Text scale removed per scale level above 1
    pub text_scale_per_level: f32,
    /// Vertical shift of image watermarks when the scale level is not 1
    pub scale_level_offset: i32,
    /// Fraction of the scale level that shrinks image watermarks
    pub scale_dampening: f64,
    /// Vertical shift of image watermarks per scale level above 1
    pub image_level_shift: i32,
    /// Edit-canvas text scale per size step
    pub edit_text_scale_per_step: f32,
    /// Font pixel height at text scale 1.0
    pub px_per_text_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            min_size: ImageSizeConfig {
                width: 600,
                height: 300,
            },
            max_size: ImageSizeConfig {
                width: 1920,
                height: 1080,
            },
            area_width: 0.55,
            text_band_base: 0.60,
            text_band_step: 0.04,
            image_band: 0.65,
            text_baseline_offset: 10,
            text_scale_per_step: 0.4,
            text_scale_per_level: 0.1,
            scale_level_offset: 10,
            scale_dampening: 0.2,
            image_level_shift: 12,
            edit_text_scale_per_step: 0.5,
            px_per_text_scale: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FontConfig {
    pub directory: PathBuf,
    pub default: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("static"),
            default: "DejaVuSans.ttf".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Name of the folder created inside the destination
    pub folder_name: String,
    /// Number of candidate folder names tried before giving up
    pub max_slots: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            folder_name: "PyMark".to_string(),
            max_slots: 100,
        }
    }
}
