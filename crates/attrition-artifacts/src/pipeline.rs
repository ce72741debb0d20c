//! The fitted prediction pipeline: a column transformer feeding a classifier.
//!
//! This is the typed model of the pipeline artifact. Loading (including the
//! compatibility shims) lives in [`crate::loader`].

mod classifier;
mod transform;

pub use classifier::Estimator;
pub use transform::{
    ColumnList, ColumnTransformer, HandleUnknown, Remainder, RemainderAction, Step,
    TransformerGroup,
};

use attrition_core::{Classifier, FeatureRow, InferenceError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Artifact format versions this reader understands.
pub const SUPPORTED_FORMAT_VERSIONS: [u32; 1] = [1];

const fn default_format_version() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FittedPipeline {
    #[serde(default = "default_format_version")]
    pub format_version: u32,

    /// Free-form description of the tool that exported the artifact.
    #[serde(default)]
    pub producer: Option<String>,

    pub preprocessor: ColumnTransformer,

    pub classifier: Estimator,
}

impl FittedPipeline {
    /// Input columns a feature row must carry.
    #[must_use]
    pub fn required_columns(&self) -> Vec<&str> {
        self.preprocessor.input_columns()
    }

    /// Check internal consistency after deserialization.
    ///
    /// # Errors
    ///
    /// Returns a description of the first inconsistency found.
    pub fn validate(&self) -> Result<(), String> {
        if !SUPPORTED_FORMAT_VERSIONS.contains(&self.format_version) {
            return Err(format!(
                "unsupported format_version {} (supported: {SUPPORTED_FORMAT_VERSIONS:?})",
                self.format_version
            ));
        }

        self.preprocessor.validate()?;

        let produced = self.preprocessor.output_width();
        let expected = self.classifier.input_width();
        if produced != expected {
            return Err(format!(
                "preprocessor emits {produced} features but classifier expects {expected}"
            ));
        }
        Ok(())
    }
}

impl Classifier for FittedPipeline {
    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], InferenceError> {
        let features = self.preprocessor.transform(row)?;
        self.classifier.predict_proba(&features)
    }
}
