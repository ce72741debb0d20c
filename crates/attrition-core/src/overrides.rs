//! Override sets and the derivation of initial form values.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::fields::{FieldDomain, OverrideField, OverrideValue};
use crate::row::RawRow;

/// User-supplied values for a subset of the editable fields.
///
/// Every stored value is inside its field's domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    values: BTreeMap<OverrideField, OverrideValue>,
}

impl OverrideSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `value` is outside the field's domain.
    pub fn set(&mut self, field: OverrideField, value: OverrideValue) -> Result<(), CoreError> {
        let domain = field.domain();
        if !domain.contains(&value) {
            return Err(CoreError::Validation(format!(
                "{field}: '{value}' is outside {domain}"
            )));
        }
        self.values.insert(field, value);
        Ok(())
    }

    /// Parse `input` against the field's domain and set it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the input does not parse or is out of domain.
    pub fn set_from_str(&mut self, field: OverrideField, input: &str) -> Result<(), CoreError> {
        let value = field
            .domain()
            .parse(input)
            .map_err(|error| match error {
                CoreError::Validation(reason) => CoreError::Validation(format!("{field}: {reason}")),
                other => other,
            })?;
        self.values.insert(field, value);
        Ok(())
    }

    /// Builder-style [`Self::set`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::set`].
    pub fn with(mut self, field: OverrideField, value: OverrideValue) -> Result<Self, CoreError> {
        self.set(field, value)?;
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, field: OverrideField) -> Option<&OverrideValue> {
        self.values.get(&field)
    }

    pub fn remove(&mut self, field: OverrideField) -> Option<OverrideValue> {
        self.values.remove(&field)
    }

    /// Overlay every value of `other` on top of this set.
    pub fn extend(&mut self, other: &Self) {
        for (field, value) in &other.values {
            self.values.insert(*field, value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverrideField, &OverrideValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Where an initial form value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DefaultSource {
    /// Taken from the defaults row.
    DefaultsRow,
    /// The defaults row lacked a usable value.
    Fallback,
}

/// Initial values for every editable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefaults {
    values: OverrideSet,
    sources: BTreeMap<OverrideField, DefaultSource>,
}

impl FormDefaults {
    /// The derived values as a complete override set.
    #[must_use]
    pub const fn overrides(&self) -> &OverrideSet {
        &self.values
    }

    #[must_use]
    pub fn source(&self, field: OverrideField) -> DefaultSource {
        self.sources
            .get(&field)
            .copied()
            .unwrap_or(DefaultSource::Fallback)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverrideField, &OverrideValue, DefaultSource)> {
        self.values
            .iter()
            .map(|(field, value)| (field, value, self.source(field)))
    }
}

/// Derive the initial value of every editable field from the defaults row.
///
/// Total: every field gets an in-domain value, either from the row or from
/// its fallback constant.
#[must_use]
pub fn derive_form_defaults(defaults: &RawRow) -> FormDefaults {
    let mut values = BTreeMap::new();
    let mut sources = BTreeMap::new();

    for field in OverrideField::ALL {
        let (value, source) = derive_field_default(field, defaults.get(field.column()));
        tracing::debug!(field = field.column(), %value, ?source, "derived form default");
        values.insert(field, value);
        sources.insert(field, source);
    }

    FormDefaults {
        values: OverrideSet { values },
        sources,
    }
}

/// Initial value of one field given its raw cell, if any.
#[must_use]
pub fn derive_field_default(
    field: OverrideField,
    raw: Option<&str>,
) -> (OverrideValue, DefaultSource) {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty());
    let Some(raw) = raw else {
        return (field.fallback(), DefaultSource::Fallback);
    };

    match field.domain() {
        FieldDomain::Integer { min, max, .. } => match truncate_in_range(raw, min, max) {
            Some(value) => (OverrideValue::Integer(value), DefaultSource::DefaultsRow),
            None => (field.fallback(), DefaultSource::Fallback),
        },
        FieldDomain::Categorical(choices) => {
            if choices.contains(&raw) {
                (OverrideValue::Category(raw.to_string()), DefaultSource::DefaultsRow)
            } else {
                let first = choices
                    .first()
                    .map_or_else(|| field.fallback().to_string(), |choice| (*choice).to_string());
                (OverrideValue::Category(first), DefaultSource::Fallback)
            }
        }
    }
}

/// Parse as a float, truncate toward zero and keep it only inside `min..=max`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate_in_range(raw: &str, min: i64, max: i64) -> Option<i64> {
    let parsed = raw.parse::<f64>().ok().filter(|value| value.is_finite())?;
    let truncated = parsed.trunc();
    if truncated < min as f64 || truncated > max as f64 {
        return None;
    }
    Some(truncated as i64)
}
