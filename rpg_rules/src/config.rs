//! Tunable combat rules.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors raised while loading a [`RulesConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Combat rule parameters. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Damage dealt by an attack without a weapon.
    pub unarmed_damage: u32,

    /// Lowest health a hit can leave a target at. `None` = no clamp.
    pub health_floor: Option<i32>,
}

impl RulesConfig {
    pub const DEFAULT_UNARMED_DAMAGE: u32 = 1;

    pub fn new() -> Self {
        Self {
            unarmed_damage: Self::DEFAULT_UNARMED_DAMAGE,
            health_floor: None,
        }
    }

    pub fn with_health_floor(mut self, floor: i32) -> Self {
        self.health_floor = Some(floor);
        self
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), ?config, "loaded rules config");
        Ok(config)
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
