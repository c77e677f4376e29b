//! FloorKit Settings Crate
//!
//! Persists the tunables of the editor, the scene builders, walk mode and
//! the color palette as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{default_path, Config, ConfigFormat};
pub use error::{SettingsError, SettingsResult};
