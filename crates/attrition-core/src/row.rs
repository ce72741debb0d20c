//! Raw and typed single-record rows.
//!
//! A [`RawRow`] is what the defaults table holds: one uninterpreted string per
//! column. A [`FeatureRow`] is what the pipeline consumes: typed cells in the
//! same column order. The only way from one to the other is
//! [`FeatureRow::from_raw`] followed by explicit coercion.

use std::collections::HashSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One record with every cell kept as a raw string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    columns: Vec<String>,
    values: Vec<String>,
}

impl RawRow {
    /// Build a row from parallel column and value lists.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the lists differ in length or a
    /// column name repeats.
    pub fn new(columns: Vec<String>, values: Vec<String>) -> Result<Self, CoreError> {
        if columns.len() != values.len() {
            return Err(CoreError::Validation(format!(
                "row has {} columns but {} values",
                columns.len(),
                values.len()
            )));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate column '{column}'"
                )));
            }
        }

        Ok(Self { columns, values })
    }

    /// Build a row from `(column, value)` pairs, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if a column name repeats.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (columns, values) = pairs
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .unzip();
        Self::new(columns, values)
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw value of `column`, if the row has it.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.position(column).map(|idx| self.values[idx].as_str())
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }
}

/// A typed cell of a [`FeatureRow`].
///
/// Serializes as a JSON number, string or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
    Undefined,
}

impl FeatureValue {
    /// Parse text into a number. Empty, malformed or non-finite input becomes
    /// [`FeatureValue::Undefined`]; this never fails.
    #[must_use]
    pub fn parse_numeric(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            _ => Self::Undefined,
        }
    }

    /// Convert this cell to its numeric form.
    #[must_use]
    pub fn into_numeric(self) -> Self {
        match self {
            Self::Number(value) if !value.is_finite() => Self::Undefined,
            Self::Text(text) => Self::parse_numeric(&text),
            other => other,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

/// A single fully populated feature row, ready for inference.
///
/// The column set is fixed at construction: cells can be replaced or coerced
/// but never added or dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: Vec<String>,
    values: Vec<FeatureValue>,
}

impl FeatureRow {
    /// Copy every raw cell as text.
    #[must_use]
    pub fn from_raw(raw: &RawRow) -> Self {
        Self {
            columns: raw.columns.clone(),
            values: raw.values.iter().cloned().map(FeatureValue::Text).collect(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.position(column).map(|idx| &self.values[idx])
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// Replace the value of an existing column. Returns `false` (and leaves the
    /// row untouched) if the column is not part of the row.
    pub fn replace(&mut self, column: &str, value: FeatureValue) -> bool {
        match self.position(column) {
            Some(idx) => {
                self.values[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Coerce an existing column to numeric. Returns `false` if absent.
    pub fn coerce_numeric(&mut self, column: &str) -> bool {
        match self.position(column) {
            Some(idx) => {
                let value = std::mem::replace(&mut self.values[idx], FeatureValue::Undefined);
                self.values[idx] = value.into_numeric();
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }
}
