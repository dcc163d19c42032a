use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::MarkError;
use crate::geometry::Rect;

/// RGB text color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb(self.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = MarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(MarkError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| MarkError::InvalidColor(s.to_string()))
        };
        Ok(Color([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl TryFrom<String> for Color {
    type Error = MarkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Text size picked in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextSize {
    #[default]
    XSmall,
    Small,
    Medium,
    Large,
}

impl TextSize {
    /// Size step, 1 for x-small up to 4 for large
    pub fn step(self) -> i32 {
        match self {
            TextSize::XSmall => 1,
            TextSize::Small => 2,
            TextSize::Medium => 3,
            TextSize::Large => 4,
        }
    }
}

/// Watermark scale used for previews and exports.
///
/// The factor grows as the watermark shrinks: `large` renders at factor 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScaleLevel {
    Small,
    Medium,
    #[default]
    Large,
}

impl ScaleLevel {
    pub fn factor(self) -> i32 {
        match self {
            ScaleLevel::Large => 1,
            ScaleLevel::Medium => 2,
            ScaleLevel::Small => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextStyle {
    pub color: Color,
    /// Name of a font registered in the [`FontBook`](super::FontBook)
    pub font: String,
    pub size: TextSize,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(font: impl Into<String>) -> Self {
        Self {
            color: Color::default(),
            font: font.into(),
            size: TextSize::default(),
            bold: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageWatermark {
    pub pixels: RgbImage,
    /// Position on the edit canvas
    pub position: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextWatermark {
    pub style: TextStyle,
    pub content: String,
    /// Position on the edit canvas; text is drawn on the bottom edge as baseline
    pub position: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WatermarkObject {
    Image(ImageWatermark),
    Text(TextWatermark),
}

impl WatermarkObject {
    pub fn position(&self) -> Rect {
        match self {
            WatermarkObject::Image(image) => image.position,
            WatermarkObject::Text(text) => text.position,
        }
    }

    pub fn set_position(&mut self, position: Rect) {
        match self {
            WatermarkObject::Image(image) => image.position = position,
            WatermarkObject::Text(text) => text.position = position,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, WatermarkObject::Text(_))
    }
}
