//! Classifier seam, probability thresholding and prediction labels.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::InferenceError;
use crate::row::FeatureRow;

/// Probabilities at or above this value are labelled positive.
pub const POSITIVE_THRESHOLD: f64 = 0.5;

/// A fitted model that scores a single feature row.
///
/// Implementations must be deterministic and must not mutate shared state, so
/// one loaded classifier can serve any number of requests.
pub trait Classifier {
    /// Class probabilities `[P(stay), P(leave)]` for one row.
    ///
    /// # Errors
    ///
    /// Returns an [`InferenceError`] when the row does not fit the model
    /// (missing column, unseen category, undefined numeric cell).
    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], InferenceError>;
}

/// Binary outcome derived from the attrition probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttritionLabel {
    MayLeave,
    LikelyToStay,
}

impl AttritionLabel {
    /// Label for `probability`, inclusive at [`POSITIVE_THRESHOLD`].
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability >= POSITIVE_THRESHOLD {
            Self::MayLeave
        } else {
            Self::LikelyToStay
        }
    }

    /// `1` for the positive class, `0` otherwise.
    #[must_use]
    pub const fn as_class(self) -> u8 {
        match self {
            Self::MayLeave => 1,
            Self::LikelyToStay => 0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MayLeave => "May Leave",
            Self::LikelyToStay => "Likely to Stay",
        }
    }
}

impl fmt::Display for AttritionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictionResult {
    /// Probability of attrition in `[0, 1]`.
    pub probability: f64,
    pub label: AttritionLabel,
}

impl PredictionResult {
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            label: AttritionLabel::from_probability(probability),
        }
    }

    /// Probability formatted as a percentage with two decimals (`37.12%`).
    #[must_use]
    pub fn percentage(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

/// Score one feature row and threshold the positive-class probability.
///
/// # Errors
///
/// Returns the classifier's [`InferenceError`] unchanged, or
/// [`InferenceError::InvalidProbability`] if the output is not in `[0, 1]`.
pub fn predict<C>(classifier: &C, row: &FeatureRow) -> Result<PredictionResult, InferenceError>
where
    C: Classifier + ?Sized,
{
    let [_, positive] = classifier.predict_proba(row)?;
    if !(0.0..=1.0).contains(&positive) {
        return Err(InferenceError::InvalidProbability(positive));
    }

    let result = PredictionResult::from_probability(positive);
    tracing::debug!(
        probability = result.probability,
        label = %result.label,
        "prediction complete"
    );
    Ok(result)
}
