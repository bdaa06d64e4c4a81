//! Game configuration supplied by the host before play starts.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::strategy::Policy;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("target_score must be at least 1 (got {0})")]
    InvalidTarget(u32),
}

/// Session settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    /// Total a side must reach to end the game.
    #[serde(default = "default_target_score")]
    pub target_score: u32,
    /// Computer reroll policy ("smart" or "random").
    #[serde(default)]
    pub policy: Policy,
    /// Fixed RNG seed for reproducible sessions. None draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_target_score() -> u32 {
    101
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: default_target_score(),
            policy: Policy::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Boundary validation: a session must never see a non-positive target.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_score == 0 {
            return Err(ConfigError::InvalidTarget(self.target_score));
        }
        Ok(())
    }
}
