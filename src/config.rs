//! # Configuration
//!
//! Tunables for a sculpting session, loadable from JSON. Every field has a
//! default, so a config file only needs to name what it changes.
//!
//! ```
//! use voxel_sculpt::config::WorldConfig;
//!
//! let config = WorldConfig::from_json_str(r#"{ "history_capacity": 20 }"#).unwrap();
//! assert_eq!(config.history_capacity, 20);
//! assert_eq!(config.atlas_size, 2048);
//! ```

use std::{fs, io, path::Path};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::editing::DEFAULT_HISTORY_CAPACITY;
use crate::rendering::texture::DEFAULT_ATLAS_SIZE;

/// Errors raised while loading a [`WorldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Change-sets kept for undo.
    pub history_capacity: usize,
    /// Highest visible world y when the layer limit is enabled.
    pub layer_limit: i32,
    /// Whether voxels above `layer_limit` are hidden.
    pub layer_limit_enabled: bool,
    /// Edge length of the texture atlas in pixels.
    pub atlas_size: u32,
    /// Edge length of one texture tile in pixels.
    pub tile_size: u32,
    /// Gap between tiles in pixels.
    pub tile_padding: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            layer_limit: 256,
            layer_limit_enabled: false,
            atlas_size: DEFAULT_ATLAS_SIZE,
            tile_size: 16,
            tile_padding: 2,
        }
    }
}

impl WorldConfig {
    /// Parses a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// The layer ceiling the mesh builder should enforce, if any.
    pub fn layer_ceiling(&self) -> Option<i32> {
        self.layer_limit_enabled.then_some(self.layer_limit)
    }
}
