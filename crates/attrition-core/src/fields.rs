//! Editable form fields, their domains and fallback constants.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::row::FeatureValue;

pub const OVERTIME_CHOICES: [&str; 2] = ["No", "Yes"];

pub const DEPARTMENT_CHOICES: [&str; 3] = ["Research & Development", "Sales", "Human Resources"];

/// One of the fields a user may edit before a prediction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum OverrideField {
    Age,
    MonthlyIncome,
    DistanceFromHome,
    WorkLifeBalance,
    OverTime,
    Department,
}

impl OverrideField {
    pub const ALL: [Self; 6] = [
        Self::Age,
        Self::MonthlyIncome,
        Self::DistanceFromHome,
        Self::WorkLifeBalance,
        Self::OverTime,
        Self::Department,
    ];

    /// Column name in the training schema.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::MonthlyIncome => "MonthlyIncome",
            Self::DistanceFromHome => "DistanceFromHome",
            Self::WorkLifeBalance => "WorkLifeBalance",
            Self::OverTime => "OverTime",
            Self::Department => "Department",
        }
    }

    #[must_use]
    pub const fn domain(self) -> FieldDomain {
        match self {
            Self::Age => FieldDomain::Integer {
                min: 18,
                max: 65,
                step: 1,
            },
            Self::MonthlyIncome => FieldDomain::Integer {
                min: 500,
                max: 100_000,
                step: 100,
            },
            Self::DistanceFromHome => FieldDomain::Integer {
                min: 0,
                max: 50,
                step: 1,
            },
            Self::WorkLifeBalance => FieldDomain::Integer {
                min: 1,
                max: 4,
                step: 1,
            },
            Self::OverTime => FieldDomain::Categorical(&OVERTIME_CHOICES),
            Self::Department => FieldDomain::Categorical(&DEPARTMENT_CHOICES),
        }
    }

    /// Value used when the defaults row cannot supply a valid one.
    #[must_use]
    pub fn fallback(self) -> OverrideValue {
        match self {
            Self::Age => OverrideValue::Integer(35),
            Self::MonthlyIncome => OverrideValue::Integer(5000),
            Self::DistanceFromHome => OverrideValue::Integer(5),
            Self::WorkLifeBalance => OverrideValue::Integer(3),
            Self::OverTime => OverrideValue::Category("No".into()),
            Self::Department => OverrideValue::Category("Research & Development".into()),
        }
    }
}

impl fmt::Display for OverrideField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Accepts the column name in any case, with or without `_`/`-` separators
/// (`MonthlyIncome`, `monthly_income`, `monthly-income`).
impl FromStr for OverrideField {
    type Err = CoreError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized: String = input
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|field| field.column().to_ascii_lowercase() == normalized)
            .ok_or_else(|| CoreError::UnknownField(input.to_string()))
    }
}

/// Valid values for an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDomain {
    /// Inclusive integer range. `step` is the form's increment, not a
    /// validity constraint.
    Integer { min: i64, max: i64, step: i64 },
    /// Fixed category list; the first member is the reset value.
    Categorical(&'static [&'static str]),
}

impl FieldDomain {
    #[must_use]
    pub fn contains(&self, value: &OverrideValue) -> bool {
        match (self, value) {
            (Self::Integer { min, max, .. }, OverrideValue::Integer(v)) => (*min..=*max).contains(v),
            (Self::Categorical(choices), OverrideValue::Category(v)) => choices.contains(&v.as_str()),
            _ => false,
        }
    }

    /// First member of a categorical domain, `None` for integer ranges.
    #[must_use]
    pub fn first_choice(&self) -> Option<&'static str> {
        match self {
            Self::Categorical(choices) => choices.first().copied(),
            Self::Integer { .. } => None,
        }
    }

    /// Parse user input into a value of this domain and check membership.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the input is not an integer (for
    /// ranges) or falls outside the domain.
    pub fn parse(&self, input: &str) -> Result<OverrideValue, CoreError> {
        let trimmed = input.trim();
        let value = match self {
            Self::Integer { .. } => trimmed
                .parse::<i64>()
                .map(OverrideValue::Integer)
                .map_err(|_| CoreError::Validation(format!("'{trimmed}' is not an integer")))?,
            Self::Categorical(_) => OverrideValue::Category(trimmed.to_string()),
        };

        if self.contains(&value) {
            Ok(value)
        } else {
            Err(CoreError::Validation(format!(
                "'{trimmed}' is outside {self}"
            )))
        }
    }
}

impl fmt::Display for FieldDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer { min, max, .. } => write!(f, "{min}..={max}"),
            Self::Categorical(choices) => write!(f, "{{{}}}", choices.join(", ")),
        }
    }
}

/// The current value of an editable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum OverrideValue {
    Integer(i64),
    Category(String),
}

impl OverrideValue {
    /// The typed cell this value becomes inside a feature row.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_feature_value(&self) -> FeatureValue {
        match self {
            Self::Integer(value) => FeatureValue::Number(*value as f64),
            Self::Category(value) => FeatureValue::Text(value.clone()),
        }
    }
}

impl fmt::Display for OverrideValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Category(value) => f.write_str(value),
        }
    }
}
