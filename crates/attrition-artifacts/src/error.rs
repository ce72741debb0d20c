//! Artifact loading error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two startup artifacts an error concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Pipeline,
    Defaults,
}

impl ArtifactKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pipeline => "pipeline",
            Self::Defaults => "defaults",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal startup errors. Nothing can be predicted after one of these.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact file does not exist.
    #[error("Missing {kind} artifact: {}", path.display())]
    MissingArtifact { kind: ArtifactKind, path: PathBuf },

    /// The artifact exists but could not be read or deserialized.
    #[error("Failed to load {kind} artifact {}: {source}", path.display())]
    ArtifactLoad {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: LoadFailure,
    },
}

impl ArtifactError {
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        match self {
            Self::MissingArtifact { kind, .. } | Self::ArtifactLoad { kind, .. } => *kind,
        }
    }
}

/// Underlying cause of an [`ArtifactError::ArtifactLoad`].
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// A compatibility shim matched the first error but the retry failed too.
    /// Carries the original error as the source.
    #[error("compatibility shim '{shim}' did not resolve '{original}': {retry}")]
    ShimRetry {
        shim: &'static str,
        #[source]
        original: serde_json::Error,
        retry: serde_json::Error,
    },

    #[error("invalid table: {0}")]
    Csv(#[from] csv::Error),

    /// The table parsed but does not hold exactly one usable row.
    #[error("invalid defaults table: {0}")]
    Table(String),

    /// The pipeline deserialized but is internally inconsistent.
    #[error("invalid pipeline: {0}")]
    Pipeline(String),
}
