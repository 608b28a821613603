//! Text styling for card text blocks
//!
//! The editor offers a closed set of families and a six-swatch palette, but
//! the model itself accepts any family name and any valid hex color.

use crate::error::{CardError, Result};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub const MIN_FONT_SIZE: i32 = 12;
pub const MAX_FONT_SIZE: i32 = 32;
pub const DEFAULT_FONT_SIZE: i32 = 18;
/// Increment used by the size stepper
pub const FONT_SIZE_STEP: i32 = 2;
/// The message block is drawn this many points smaller than the scripture block
pub const MESSAGE_SIZE_OFFSET: i32 = 2;

/// Clamp a point size into the supported range
pub fn clamp_font_size(size: i32) -> i32 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FontFamily {
    Serif,
    SansSerif,
    Monospace,
    /// Any family the caller names outside the offered choices
    Other(String),
}

impl FontFamily {
    pub fn as_str(&self) -> &str {
        match self {
            FontFamily::Serif => "serif",
            FontFamily::SansSerif => "sans-serif",
            FontFamily::Monospace => "monospace",
            FontFamily::Other(name) => name,
        }
    }

    /// The choices the editor presents
    pub fn offered() -> Vec<FontFamily> {
        vec![FontFamily::Serif, FontFamily::SansSerif, FontFamily::Monospace]
    }

    pub fn display_name(&self) -> &str {
        match self {
            FontFamily::Serif => "Serif",
            FontFamily::SansSerif => "Sans-serif",
            FontFamily::Monospace => "Monospace",
            FontFamily::Other(name) => name,
        }
    }
}

impl FromStr for FontFamily {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "serif" => FontFamily::Serif,
            "sans-serif" => FontFamily::SansSerif,
            "monospace" => FontFamily::Monospace,
            other => FontFamily::Other(other.to_string()),
        })
    }
}

impl From<String> for FontFamily {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(family) => family,
            Err(never) => match never {},
        }
    }
}

impl From<FontFamily> for String {
    fn from(family: FontFamily) -> Self {
        family.as_str().to_string()
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text color, normalized to uppercase `#RRGGBB`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FontColor(String);

/// The swatches offered by the editor, in display order
pub const PALETTE: [&str; 6] = ["#FFFFFF", "#000000", "#D4A574", "#8B6F9B", "#2C5F7B", "#7B9B8B"];

impl FontColor {
    /// Parse `#RGB` or `#RRGGBB` (case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| CardError::InvalidColor(s.to_string()))?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CardError::InvalidColor(s.to_string()));
        }

        let expanded = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return Err(CardError::InvalidColor(s.to_string())),
        };

        Ok(Self(format!("#{}", expanded.to_ascii_uppercase())))
    }

    pub fn white() -> Self {
        Self("#FFFFFF".to_string())
    }

    pub fn palette() -> Vec<FontColor> {
        PALETTE.iter().map(|hex| Self(hex.to_string())).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_palette_swatch(&self) -> bool {
        PALETTE.contains(&self.0.as_str())
    }
}

impl Default for FontColor {
    fn default() -> Self {
        Self::white()
    }
}

impl FromStr for FontColor {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FontColor {
    type Error = CardError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<FontColor> for String {
    fn from(color: FontColor) -> Self {
        color.0
    }
}

impl fmt::Display for FontColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOptions {
    pub font_family: FontFamily,
    #[serde(deserialize_with = "deserialize_font_size")]
    font_size_pt: i32,
    pub font_color: FontColor,
}

impl StyleOptions {
    pub fn new(font_family: FontFamily, font_size_pt: i32, font_color: FontColor) -> Self {
        Self {
            font_family,
            font_size_pt: clamp_font_size(font_size_pt),
            font_color,
        }
    }

    pub fn font_size_pt(&self) -> i32 {
        self.font_size_pt
    }

    /// Set the size, clamping into `[MIN_FONT_SIZE, MAX_FONT_SIZE]`
    pub fn set_font_size(&mut self, size: i32) -> i32 {
        self.font_size_pt = clamp_font_size(size);
        self.font_size_pt
    }

    pub fn with_font_size(mut self, size: i32) -> Self {
        self.set_font_size(size);
        self
    }

    pub fn message_font_size(&self) -> i32 {
        self.font_size_pt - MESSAGE_SIZE_OFFSET
    }
}

fn deserialize_font_size<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    i32::deserialize(deserializer).map(clamp_font_size)
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            font_family: FontFamily::Serif,
            font_size_pt: DEFAULT_FONT_SIZE,
            font_color: FontColor::white(),
        }
    }
}
