//! Configuration file support for sketchpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchpad/config.toml`. Settings include the default tool and
//! stroke style, flood fill tolerance, stamp editing, and the default canvas size.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, DrawingConfig, FillConfig, StampConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "pen"
/// default_color = "red"
/// default_width = 3.0
/// pen_style = "neon"
///
/// [fill]
/// tolerance = 30
///
/// [stamp]
/// editable = true
///
/// [canvas]
/// width = 1024
/// height = 768
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Tool and stroke defaults (tool, color, width, opacity, pen style)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Flood fill tolerance
    #[serde(default)]
    pub fill: FillConfig,

    /// Stamp placement and editing
    #[serde(default)]
    pub stamp: StampConfig,

    /// Default canvas size
    #[serde(default)]
    pub canvas: CanvasConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_width`: 0.5 - 100.0
    /// - `default_alpha`: 0.0 - 1.0
    /// - `fill.tolerance`: 0 - 1020
    /// - `stamp.handle_size`: 8.0 - 96.0
    /// - `stamp.hit_padding`: 0.0 - 64.0
    /// - `stamp.min_scale`: 0.01 - 1.0
    /// - `canvas.width`, `canvas.height`: 1 - 16384
    fn validate_and_clamp(&mut self) {
        // Width: 0.5 - 100.0
        if !(0.5..=100.0).contains(&self.drawing.default_width) {
            log::warn!(
                "Invalid default_width {:.1}, clamping to 0.5-100.0 range",
                self.drawing.default_width
            );
            self.drawing.default_width = self.drawing.default_width.clamp(0.5, 100.0);
        }

        // Alpha: 0.0 - 1.0
        if !(0.0..=1.0).contains(&self.drawing.default_alpha) {
            log::warn!(
                "Invalid default_alpha {:.2}, clamping to 0.0-1.0 range",
                self.drawing.default_alpha
            );
            self.drawing.default_alpha = self.drawing.default_alpha.clamp(0.0, 1.0);
        }

        // Tolerance: four channels of at most 255 each
        if self.fill.tolerance > 1020 {
            log::warn!(
                "Invalid fill tolerance {}, clamping to 0-1020 range",
                self.fill.tolerance
            );
            self.fill.tolerance = 1020;
        }

        if !(8.0..=96.0).contains(&self.stamp.handle_size) {
            log::warn!(
                "Invalid stamp handle_size {:.1}, clamping to 8.0-96.0 range",
                self.stamp.handle_size
            );
            self.stamp.handle_size = self.stamp.handle_size.clamp(8.0, 96.0);
        }

        if !(0.0..=64.0).contains(&self.stamp.hit_padding) {
            log::warn!(
                "Invalid stamp hit_padding {:.1}, clamping to 0.0-64.0 range",
                self.stamp.hit_padding
            );
            self.stamp.hit_padding = self.stamp.hit_padding.clamp(0.0, 64.0);
        }

        if !(0.01..=1.0).contains(&self.stamp.min_scale) {
            log::warn!(
                "Invalid stamp min_scale {:.2}, clamping to 0.01-1.0 range",
                self.stamp.min_scale
            );
            self.stamp.min_scale = self.stamp.min_scale.clamp(0.01, 1.0);
        }

        if !(1..=16384).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 1-16384 range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(1, 16384);
        }

        if !(1..=16384).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 1-16384 range",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(1, 16384);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path. The file must exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to `~/.config/sketchpad/config.toml`.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Saves the configuration to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's config directory.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        // Create directory
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&config_path, Self::example_toml())?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// The documented example configuration shipped with the crate.
    pub fn example_toml() -> &'static str {
        include_str!("../../config.example.toml")
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
