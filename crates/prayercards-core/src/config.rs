use crate::error::{CardError, Result};
use crate::style::{FontColor, FontFamily, StyleOptions, DEFAULT_FONT_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Shown in place of a background the image loader cannot provide
pub const DEFAULT_PLACEHOLDER_BACKGROUND: &str = "placeholder://background";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub default_font: Option<String>,
    pub default_font_size: Option<i32>,
    pub default_font_color: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub placeholder_background: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            default_font: Some("serif".to_string()),
            default_font_size: Some(DEFAULT_FONT_SIZE),
            default_font_color: Some("#FFFFFF".to_string()),
            export_dir: None,
            placeholder_background: None,
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    /// Style for new drafts. Unset fields use the stock style; the size is
    /// clamped and a bad color is an error.
    pub fn default_style(&self) -> Result<StyleOptions> {
        let stock = StyleOptions::default();

        let family = match &self.default_font {
            Some(name) => FontFamily::from(name.clone()),
            None => stock.font_family.clone(),
        };
        let color = match &self.default_font_color {
            Some(hex) => FontColor::parse(hex)
                .map_err(|e| CardError::Config(format!("default_font_color: {}", e)))?,
            None => stock.font_color.clone(),
        };
        let size = self.default_font_size.unwrap_or(stock.font_size_pt());

        Ok(StyleOptions::new(family, size, color))
    }

    /// Like [`Config::default_style`], but an unusable config logs a warning
    /// and yields the stock style
    pub fn default_style_or_stock(&self) -> StyleOptions {
        self.default_style().unwrap_or_else(|e| {
            warn!("Ignoring configured style: {}", e);
            StyleOptions::default()
        })
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn placeholder_background(&self) -> &str {
        self.placeholder_background
            .as_deref()
            .unwrap_or(DEFAULT_PLACEHOLDER_BACKGROUND)
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CardError::Config("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("prayercards").join("config.json"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::MAX_FONT_SIZE;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.default_style().unwrap(), StyleOptions::default());
        assert_eq!(config.placeholder_background(), DEFAULT_PLACEHOLDER_BACKGROUND);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prayercards/config.json");

        let mut config = Config::new();
        config.default_font = Some("monospace".to_string());
        config.export_dir = Some(dir.path().join("cards"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.default_style().unwrap().font_family, FontFamily::Monospace);
        assert_eq!(loaded.export_dir(), dir.path().join("cards"));
    }

    #[test]
    fn test_partial_file_fills_in_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"default_font_size": 40}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_font.as_deref(), Some("serif"));
        assert_eq!(config.default_style().unwrap().font_size_pt(), MAX_FONT_SIZE);
    }

    #[test]
    fn test_bad_color_is_reported() {
        let mut config = Config::new();
        config.default_font_color = Some("purple".to_string());
        assert!(matches!(config.default_style(), Err(CardError::Config(_))));
    }

    #[test]
    fn test_bad_color_falls_back_to_stock_style() {
        let mut config = Config::new();
        config.default_font = Some("monospace".to_string());
        config.default_font_color = Some("purple".to_string());
        assert_eq!(config.default_style_or_stock(), StyleOptions::default());

        config.default_font_color = Some("#000".to_string());
        let style = config.default_style_or_stock();
        assert_eq!(style.font_family, FontFamily::Monospace);
        assert_eq!(style.font_color.as_str(), "#000000");
    }

    #[test]
    fn test_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CardError::Serialization(_))));
    }
}
