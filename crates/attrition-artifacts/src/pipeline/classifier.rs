//! Fitted classifiers at the end of the pipeline.

use attrition_core::InferenceError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression { coef: Vec<f64>, intercept: f64 },
}

impl Estimator {
    /// Number of input features the estimator was fit on.
    #[must_use]
    pub fn input_width(&self) -> usize {
        match self {
            Self::LogisticRegression { coef, .. } => coef.len(),
        }
    }

    /// `[P(class 0), P(class 1)]` for one transformed feature vector.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::FeatureWidth`] if `features` does not match
    /// the fitted width.
    pub fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], InferenceError> {
        match self {
            Self::LogisticRegression { coef, intercept } => {
                if features.len() != coef.len() {
                    return Err(InferenceError::FeatureWidth {
                        expected: coef.len(),
                        actual: features.len(),
                    });
                }
                let z = intercept + coef.iter().zip(features).map(|(w, x)| w * x).sum::<f64>();
                let positive = sigmoid(z);
                Ok([1.0 - positive, positive])
            }
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
