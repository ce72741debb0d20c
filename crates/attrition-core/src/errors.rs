//! Cross-cutting error types for the attrition predictor.
//!
//! Artifact loading errors live in `attrition-artifacts` and configuration
//! errors in `attrition-config`. Everything converges into `anyhow::Error` in
//! the CLI.

use thiserror::Error;

/// Errors raised while building rows and override sets.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (domain, shape, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A field name did not match any editable field.
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// A single prediction request failed.
///
/// These are local to one request: the caller reports them and keeps the
/// session alive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// The feature row lacks a column the pipeline was fit on.
    #[error("Inference failed: column '{column}' is missing from the feature row")]
    MissingColumn { column: String },

    /// A categorical value was not seen when the encoder was fit.
    #[error("Inference failed: unseen category '{value}' in column '{column}'")]
    UnseenCategory { column: String, value: String },

    /// A numeric transformer received an undefined cell with nothing to impute it.
    #[error("Inference failed: column '{column}' holds an undefined numeric value")]
    UndefinedValue { column: String },

    /// A numeric transformer received text that does not parse as a number.
    #[error("Inference failed: could not convert '{value}' in column '{column}' to a number")]
    NonNumeric { column: String, value: String },

    /// The transformed feature vector does not match the classifier's width.
    #[error("Inference failed: classifier expects {expected} features, got {actual}")]
    FeatureWidth { expected: usize, actual: usize },

    /// The classifier produced something that is not a probability.
    #[error("Inference failed: classifier returned invalid probability {0}")]
    InvalidProbability(f64),
}
