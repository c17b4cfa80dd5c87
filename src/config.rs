//! Runtime configuration.
//!
//! Loaded from an optional JSON file, then overridden from the environment.
//! Out-of-range values are rejected, never clamped.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const ENV_CONFIDENCE: &str = "CATPOINT_CONFIDENCE_THRESHOLD";
const ENV_STORE_PATH: &str = "CATPOINT_STORE_PATH";
const ENV_LOG_LEVEL: &str = "CATPOINT_LOG_LEVEL";

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Minimum classifier confidence (percent) to accept a trigger detection
    pub confidence_threshold: f32,
    /// JSON status store location; in-memory when unset
    pub store_path: Option<PathBuf>,
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 50.0,
            store_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl SecurityConfig {
    /// Read and validate a JSON config file.  Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        info!("config loaded from {}", path.display());
        Ok(config)
    }

    /// Apply `CATPOINT_*` environment overrides, then re-validate.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by the `CATPOINT_*` variable
    /// names, then re-validate.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(ENV_CONFIDENCE) {
            self.confidence_threshold = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::ValidationFailed("CATPOINT_CONFIDENCE_THRESHOLD is not a number"))?;
        }
        if let Some(path) = lookup(ENV_STORE_PATH) {
            self.store_path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::ValidationFailed(
                "confidence_threshold must be 0.0–100.0",
            ));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("log_level must not be empty"));
        }
        Ok(())
    }
}
