//! Configuration file support for tracemark.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/tracemark/config.toml`. Settings include brush defaults,
//! surface resize behavior, history depth and selection tuning.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, ResizePolicy};
pub use types::{BrushConfig, HistoryConfig, SelectionConfig, SurfaceConfig, ToolsConfig};

use crate::input::Tool;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [brush]
/// pencil_width = 15.0
/// pencil_color = "#00FFFF"
/// eraser_width = 30.0
///
/// [surface]
/// resize_policy = "replay"
/// max_scale = 4.0
///
/// [history]
/// max_undo = 0
///
/// [selection]
/// hit_tolerance = 4.0
///
/// [tools]
/// default_tool = "select"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Brush widths and colors for the drawing tools
    #[serde(default)]
    pub brush: BrushConfig,

    /// Drawing surface behavior
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Undo/redo limits
    #[serde(default)]
    pub history: HistoryConfig,

    /// Selection tool tuning
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Tool palette defaults
    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `brush.pencil_width`: 1.0 - 100.0
    /// - `brush.eraser_width`: 1.0 - 200.0
    /// - `surface.max_scale`: 1.0 - 8.0
    /// - `selection.hit_tolerance`: 0.0 - 32.0
    pub fn validate_and_clamp(&mut self) {
        if !(1.0..=100.0).contains(&self.brush.pencil_width) {
            log::warn!(
                "Invalid pencil_width {:.1}, clamping to 1.0-100.0 range",
                self.brush.pencil_width
            );
            self.brush.pencil_width = clamp_or(self.brush.pencil_width, 1.0, 100.0, 15.0);
        }

        if !(1.0..=200.0).contains(&self.brush.eraser_width) {
            log::warn!(
                "Invalid eraser_width {:.1}, clamping to 1.0-200.0 range",
                self.brush.eraser_width
            );
            self.brush.eraser_width = clamp_or(self.brush.eraser_width, 1.0, 200.0, 30.0);
        }

        if !self.brush.pencil_color.is_valid() {
            log::warn!(
                "Invalid pencil_color {:?}, falling back to '#00FFFF'",
                self.brush.pencil_color
            );
            self.brush.pencil_color = ColorSpec::Name("#00FFFF".to_string());
        }

        if !(1.0..=8.0).contains(&self.surface.max_scale) {
            log::warn!(
                "Invalid max_scale {:.2}, clamping to 1.0-8.0 range",
                self.surface.max_scale
            );
            self.surface.max_scale = clamp_or(self.surface.max_scale, 1.0, 8.0, 4.0);
        }

        if !(0.0..=32.0).contains(&self.selection.hit_tolerance) {
            log::warn!(
                "Invalid hit_tolerance {:.1}, clamping to 0.0-32.0 range",
                self.selection.hit_tolerance
            );
            self.selection.hit_tolerance = clamp_or(self.selection.hit_tolerance, 0.0, 32.0, 4.0);
        }

        if self.tools.default_tool.parse::<Tool>().is_err() {
            log::warn!(
                "Invalid default_tool '{}', falling back to 'select'",
                self.tools.default_tool
            );
            self.tools.default_tool = "select".to_string();
        }
    }

    /// The tool active when an overlay mounts.
    pub fn default_tool(&self) -> Tool {
        self.tools.default_tool.parse().unwrap_or(Tool::Select)
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("tracemark");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `path`, or returns defaults if the file is missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to TOML and writes it to `path`, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::CYAN;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_palette() {
        let config = Config::default();
        assert_eq!(config.brush.pencil_width, 15.0);
        assert_eq!(config.brush.eraser_width, 30.0);
        assert_eq!(config.brush.pencil_color.to_color(), CYAN);
        assert_eq!(config.surface.resize_policy, ResizePolicy::Replay);
        assert_eq!(config.default_tool(), Tool::Select);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.brush.pencil_width = 0.0;
        config.brush.eraser_width = 1000.0;
        config.surface.max_scale = f64::NAN;
        config.selection.hit_tolerance = -3.0;
        config.tools.default_tool = "lasso".to_string();
        config.brush.pencil_color = ColorSpec::Name("not-a-color".to_string());

        config.validate_and_clamp();

        assert_eq!(config.brush.pencil_width, 1.0);
        assert_eq!(config.brush.eraser_width, 200.0);
        assert_eq!(config.surface.max_scale, 4.0);
        assert_eq!(config.selection.hit_tolerance, 0.0);
        assert_eq!(config.tools.default_tool, "select");
        assert_eq!(config.brush.pencil_color.to_color(), CYAN);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [brush]
            pencil_width = 4.0
            pencil_color = [255, 0, 0]

            [surface]
            resize_policy = "raster"
            "#,
        )
        .unwrap();
        assert_eq!(config.brush.pencil_width, 4.0);
        assert_eq!(config.brush.eraser_width, 30.0);
        assert_eq!(config.brush.pencil_color, ColorSpec::Rgb([255, 0, 0]));
        assert_eq!(config.surface.resize_policy, ResizePolicy::Raster);
        assert_eq!(config.history.max_undo, 0);
    }

    #[test]
    fn save_and_load_from_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.history.max_undo = 25;
        config.tools.default_tool = "pencil".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.default_tool(), Tool::Pencil);
    }

    #[test]
    fn missing_file_yields_defaults_and_bad_toml_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("absent.toml");
        assert_eq!(Config::load_from(&missing).unwrap(), Config::default());

        let broken = temp.path().join("broken.toml");
        fs::write(&broken, "[brush\npencil_width = ").unwrap();
        let err = Config::load_from(&broken).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse config"));
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("brush"));
        assert!(schema.contains("resize_policy"));
    }
}
