//! Configuration file handling for FloorKit
//!
//! Configuration is organized into sections:
//! - Editor behavior (history depth, paste offset, hit tolerances)
//! - Scene builders (ceiling height, label metrics, glyph detail)
//! - Walk mode (eye height, collision radius, speeds)
//! - Palette (2D and 3D colors)
//!
//! Files are JSON or TOML, chosen by extension. Missing sections and keys
//! take their defaults.

use floorkit_core::Palette;
use floorkit_designer::{EditorOptions, SceneOptions, WalkOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{SettingsError, SettingsResult};

/// On-disk format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Format implied by the file extension.
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// `<config dir>/floorkit/config.toml`.
pub fn default_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("floorkit").join("config.toml"))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no config directory on this platform".into())
        })
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub editor: EditorOptions,
    pub scene: SceneOptions,
    pub walk: WalkOptions,
    pub palette: Palette,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a string in the given format.
    pub fn from_str_with(content: &str, format: ConfigFormat) -> SettingsResult<Self> {
        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a string in the given format.
    pub fn to_string_with(&self, format: ConfigFormat) -> SettingsResult<String> {
        self.validate()?;
        Ok(match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str_with(&content, format)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path`, or defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let content = self.to_string_with(ConfigFormat::from_path(path)?)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let editor = &self.editor;
        if editor.history_capacity == 0 {
            return Err(SettingsError::invalid("editor.history_capacity", "must be > 0"));
        }
        if editor.click_threshold < 0.0 {
            return Err(SettingsError::invalid("editor.click_threshold", "must be >= 0"));
        }
        if editor.factory_px_per_meter <= 0.0 {
            return Err(SettingsError::invalid("editor.factory_px_per_meter", "must be > 0"));
        }
        let hit = &editor.hit;
        let tolerances = [
            hit.label_half_width,
            hit.label_half_height,
            hit.window_distance,
            hit.door_distance,
            hit.wall_area,
        ];
        if tolerances.iter().any(|t| *t < 0.0) {
            return Err(SettingsError::invalid("editor.hit", "tolerances must be >= 0"));
        }

        let scene = &self.scene;
        if scene.ceiling_height_m <= 0.0 {
            return Err(SettingsError::invalid("scene.ceiling_height_m", "must be > 0"));
        }
        if scene.wall_thickness_m <= 0.0 {
            return Err(SettingsError::invalid("scene.wall_thickness_m", "must be > 0"));
        }
        if scene.door_arc_segments == 0 {
            return Err(SettingsError::invalid("scene.door_arc_segments", "must be > 0"));
        }
        if scene.label_font_size <= 0.0 {
            return Err(SettingsError::invalid("scene.label_font_size", "must be > 0"));
        }

        let walk = &self.walk;
        if walk.eye_height_m <= 0.0 {
            return Err(SettingsError::invalid("walk.eye_height_m", "must be > 0"));
        }
        if walk.collision_radius_m <= 0.0 {
            return Err(SettingsError::invalid("walk.collision_radius_m", "must be > 0"));
        }
        if walk.walk_speed <= 0.0 {
            return Err(SettingsError::invalid("walk.walk_speed", "must be > 0"));
        }
        if walk.run_multiplier < 1.0 {
            return Err(SettingsError::invalid("walk.run_multiplier", "must be >= 1"));
        }

        Ok(())
    }
}
