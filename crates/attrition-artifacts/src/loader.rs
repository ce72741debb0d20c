//! Locating and deserializing the two startup artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use attrition_core::{FeatureSchema, RawRow};
use serde::Deserialize;
use serde_json::Value;

use crate::compat::{self, CompatShim};
use crate::defaults::read_defaults_row;
use crate::error::{ArtifactError, ArtifactKind, LoadFailure};
use crate::pipeline::FittedPipeline;

/// Everything a prediction session needs, loaded once and then read-only.
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub pipeline: FittedPipeline,
    pub defaults: RawRow,
    pub schema: FeatureSchema,
    /// Name of the compatibility shim applied to the pipeline, if any.
    pub shim: Option<&'static str>,
    pub pipeline_path: PathBuf,
    pub defaults_path: PathBuf,
}

impl LoadedArtifacts {
    /// Pipeline input columns the defaults row does not provide. Any entry
    /// here means every prediction will fail with a schema mismatch.
    #[must_use]
    pub fn missing_required_columns(&self) -> Vec<&str> {
        self.pipeline
            .required_columns()
            .into_iter()
            .filter(|column| !self.schema.contains(column))
            .collect()
    }
}

/// A decoded pipeline and the shim that made it decode, if one was needed.
#[derive(Debug)]
pub struct DecodedPipeline {
    pub pipeline: FittedPipeline,
    pub shim: Option<&'static CompatShim>,
}

/// Load both artifacts. Both paths are checked for existence before either is
/// read.
///
/// # Errors
///
/// Returns [`ArtifactError::MissingArtifact`] naming the first absent path, or
/// [`ArtifactError::ArtifactLoad`] if either artifact cannot be decoded.
pub fn load(pipeline_path: &Path, defaults_path: &Path) -> Result<LoadedArtifacts, ArtifactError> {
    ensure_exists(ArtifactKind::Pipeline, pipeline_path)?;
    ensure_exists(ArtifactKind::Defaults, defaults_path)?;

    let decoded = load_pipeline(pipeline_path)?;
    let defaults = load_defaults(defaults_path)?;
    let schema = FeatureSchema::from_defaults(&defaults);

    let artifacts = LoadedArtifacts {
        pipeline: decoded.pipeline,
        defaults,
        schema,
        shim: decoded.shim.map(|shim| shim.name),
        pipeline_path: pipeline_path.to_path_buf(),
        defaults_path: defaults_path.to_path_buf(),
    };

    let missing = artifacts.missing_required_columns();
    if !missing.is_empty() {
        tracing::warn!(
            ?missing,
            "defaults row lacks columns the pipeline requires; predictions will fail"
        );
    }

    Ok(artifacts)
}

/// Read and decode the pipeline artifact.
///
/// # Errors
///
/// See [`load`].
pub fn load_pipeline(path: &Path) -> Result<DecodedPipeline, ArtifactError> {
    ensure_exists(ArtifactKind::Pipeline, path)?;
    let fail = |source: LoadFailure| ArtifactError::ArtifactLoad {
        kind: ArtifactKind::Pipeline,
        path: path.to_path_buf(),
        source,
    };

    let bytes = fs::read(path).map_err(|error| fail(error.into()))?;
    let decoded = decode_pipeline(&bytes).map_err(fail)?;
    decoded
        .pipeline
        .validate()
        .map_err(|reason| fail(LoadFailure::Pipeline(reason)))?;

    tracing::info!(
        path = %path.display(),
        format_version = decoded.pipeline.format_version,
        producer = decoded.pipeline.producer.as_deref().unwrap_or("unknown"),
        inputs = ?decoded.pipeline.required_columns(),
        shim = decoded.shim.map_or("none", |shim| shim.name),
        "loaded pipeline artifact"
    );
    Ok(decoded)
}

/// Read the defaults table.
///
/// # Errors
///
/// See [`load`].
pub fn load_defaults(path: &Path) -> Result<RawRow, ArtifactError> {
    ensure_exists(ArtifactKind::Defaults, path)?;
    let fail = |source: LoadFailure| ArtifactError::ArtifactLoad {
        kind: ArtifactKind::Defaults,
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::open(path).map_err(|error| fail(error.into()))?;
    let row = read_defaults_row(file).map_err(fail)?;

    tracing::info!(path = %path.display(), columns = row.len(), "loaded defaults row");
    Ok(row)
}

/// Decode pipeline JSON, retrying once through a matching compatibility shim.
///
/// # Errors
///
/// Returns [`LoadFailure::Json`] for malformed JSON or an error no shim
/// answers, and [`LoadFailure::ShimRetry`] (carrying the original error) if
/// the retry after a shim also fails.
pub fn decode_pipeline(bytes: &[u8]) -> Result<DecodedPipeline, LoadFailure> {
    let document: Value = serde_json::from_slice(bytes)?;

    let original = match FittedPipeline::deserialize(&document) {
        Ok(pipeline) => return Ok(DecodedPipeline { pipeline, shim: None }),
        Err(error) => error,
    };

    let Some(shim) = compat::find_shim(&original) else {
        return Err(LoadFailure::Json(original));
    };

    let mut patched = document;
    let rewritten = (shim.apply)(&mut patched);
    tracing::warn!(
        shim = shim.name,
        rewritten,
        error = %original,
        "pipeline artifact needed a compatibility shim"
    );

    match FittedPipeline::deserialize(&patched) {
        Ok(pipeline) => Ok(DecodedPipeline {
            pipeline,
            shim: Some(shim),
        }),
        Err(retry) => Err(LoadFailure::ShimRetry {
            shim: shim.name,
            original,
            retry,
        }),
    }
}

fn ensure_exists(kind: ArtifactKind, path: &Path) -> Result<(), ArtifactError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ArtifactError::MissingArtifact {
            kind,
            path: path.to_path_buf(),
        })
    }
}
