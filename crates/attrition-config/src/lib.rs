//! # attrition-config
//!
//! Layered configuration loading for the attrition predictor using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ATTRITION_*` prefix, `__` as separator)
//! 2. Project-level `.attrition/config.toml`
//! 3. User-level `~/.config/attrition/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are applied by the CLI on top of the extracted config.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ATTRITION_ARTIFACTS__PIPELINE_PATH` -> `artifacts.pipeline_path`
//! and `ATTRITION_GENERAL__DEFAULT_FORMAT` -> `general.default_format`.
//!
//! # Usage
//!
//! ```no_run
//! use attrition_config::AttritionConfig;
//!
//! let config = AttritionConfig::load_with_dotenv().expect("config");
//! println!("pipeline: {}", config.artifacts.pipeline_path.display());
//! ```

mod artifacts;
mod error;
mod general;

pub use artifacts::ArtifactsConfig;
pub use error::ConfigError;
pub use general::{GeneralConfig, OUTPUT_FORMATS};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AttritionConfig {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl AttritionConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source fails to parse, or
    /// [`ConfigError::InvalidValue`] if a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.artifacts.validate()?;
        self.general.validate()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".attrition/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("ATTRITION_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("attrition").join("config.toml"))
    }
}
