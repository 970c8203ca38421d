//! Activation settings
//!
//! Layered with increasing precedence:
//! 1. Built-in defaults
//! 2. A TOML file (`cinder.toml` by convention)
//! 3. The `CINDER_DEFAULT_SPRITE` environment variable

use cinder_core::{CinderError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SPRITE_ENV: &str = "CINDER_DEFAULT_SPRITE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationConfig {
    /// Sprite used when a script names neither texture nor a resolvable material
    #[serde(default = "default_sprite")]
    pub default_sprite: String,
    /// Prepended to ColourImage image names before they are loaded
    #[serde(default = "default_image_prefix")]
    pub image_prefix: String,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            default_sprite: default_sprite(),
            image_prefix: default_image_prefix(),
        }
    }
}

fn default_sprite() -> String {
    "emitter/images/bgx.jpg".to_string()
}

fn default_image_prefix() -> String {
    "Effects/".to_string()
}

impl ActivationConfig {
    /// Defaults with environment overrides applied
    pub fn load() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Settings from a TOML file, then environment overrides
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content).map_err(|e| {
            CinderError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Settings from TOML text alone; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        self.override_sprite(std::env::var(DEFAULT_SPRITE_ENV).ok());
    }

    fn override_sprite(&mut self, sprite: Option<String>) {
        if let Some(sprite) = sprite.filter(|s| !s.is_empty()) {
            self.default_sprite = sprite;
        }
    }

    /// Path handed to the resolver for a ColourImage image name
    pub fn image_path(&self, image: &str) -> String {
        format!("{}{}", self.image_prefix, image)
    }
}
