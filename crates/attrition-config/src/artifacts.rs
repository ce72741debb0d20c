//! Artifact location configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_pipeline_path() -> PathBuf {
    PathBuf::from("models/attrition_pipeline.json")
}

fn default_defaults_path() -> PathBuf {
    PathBuf::from("models/defaults_row.csv")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtifactsConfig {
    /// Serialized fitted pipeline (JSON).
    #[serde(default = "default_pipeline_path")]
    pub pipeline_path: PathBuf,

    /// Single-row defaults table (CSV with header).
    #[serde(default = "default_defaults_path")]
    pub defaults_path: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            pipeline_path: default_pipeline_path(),
            defaults_path: default_defaults_path(),
        }
    }
}

impl ArtifactsConfig {
    /// Apply command-line overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, pipeline: Option<PathBuf>, defaults: Option<PathBuf>) {
        if let Some(path) = pipeline {
            self.pipeline_path = path;
        }
        if let Some(path) = defaults {
            self.defaults_path = path;
        }
    }

    /// Both paths must be non-empty. Existence is checked by the loader.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the empty path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, path) in [
            ("artifacts.pipeline_path", &self.pipeline_path),
            ("artifacts.defaults_path", &self.defaults_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: "path is empty".into(),
                });
            }
        }
        Ok(())
    }
}
