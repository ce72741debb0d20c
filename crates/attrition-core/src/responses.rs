//! CLI response types returned by `attrition` commands.
//!
//! These structs define the shape of the JSON (or table) output of
//! `attrition predict`, `attrition defaults`, `attrition row` and
//! `attrition schema`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::fields::{OverrideField, OverrideValue};
use crate::overrides::{DefaultSource, FormDefaults};
use crate::prediction::{AttritionLabel, PredictionResult};
use crate::row::{FeatureRow, FeatureValue};
use crate::schema::ColumnKind;

/// Response from `attrition predict`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PredictionResponse {
    pub probability: f64,
    /// Probability as a percentage string, e.g. `37.12%`.
    pub probability_display: String,
    /// `1` for "May Leave", `0` for "Likely to Stay".
    pub prediction: u8,
    pub label: AttritionLabel,
    pub label_display: String,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            probability: result.probability,
            probability_display: result.percentage(),
            prediction: result.label.as_class(),
            label: result.label,
            label_display: result.label.to_string(),
        }
    }
}

/// One editable field's initial value, from `attrition defaults`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FormDefaultEntry {
    pub field: OverrideField,
    pub value: OverrideValue,
    pub source: DefaultSource,
    pub domain: String,
}

impl FormDefaultEntry {
    #[must_use]
    pub fn collect(defaults: &FormDefaults) -> Vec<Self> {
        defaults
            .iter()
            .map(|(field, value, source)| Self {
                field,
                value: value.clone(),
                source,
                domain: field.domain().to_string(),
            })
            .collect()
    }
}

/// One cell of a reconciled row, from `attrition row`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FeatureCell {
    pub column: String,
    pub kind: ColumnKind,
    pub value: FeatureValue,
}

impl FeatureCell {
    #[must_use]
    pub fn collect(row: &FeatureRow) -> Vec<Self> {
        row.iter()
            .map(|(column, value)| Self {
                column: column.to_string(),
                kind: ColumnKind::of(column),
                value: value.clone(),
            })
            .collect()
    }
}

/// One schema column, from `attrition schema`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SchemaColumnEntry {
    pub column: String,
    pub kind: ColumnKind,
    /// Whether the loaded pipeline reads this column.
    pub required: bool,
    /// Raw value in the defaults row.
    pub default: String,
}
