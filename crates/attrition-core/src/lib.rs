//! # attrition-core
//!
//! Core types and the record reconciliation procedure for the attrition
//! predictor.
//!
//! This crate provides the pieces shared by the artifact loader and the CLI:
//! - Raw (all-string) and typed feature rows, with an explicit coercion step
//! - The fixed numeric column list and the schema inferred from a defaults row
//! - Editable override fields with their domains and fallback constants
//! - `reconcile`, which pads a partial record out to a full feature row
//! - The `Classifier` seam, probability thresholding and prediction labels
//! - CLI response types

pub mod errors;
pub mod fields;
pub mod overrides;
pub mod prediction;
pub mod reconcile;
pub mod responses;
pub mod row;
pub mod schema;

pub use errors::{CoreError, InferenceError};
pub use fields::{FieldDomain, OverrideField, OverrideValue};
pub use overrides::{DefaultSource, FormDefaults, OverrideSet, derive_form_defaults};
pub use prediction::{AttritionLabel, Classifier, POSITIVE_THRESHOLD, PredictionResult, predict};
pub use reconcile::reconcile;
pub use row::{FeatureRow, FeatureValue, RawRow};
pub use schema::{ColumnKind, FeatureSchema, NUMERIC_COLUMNS};
