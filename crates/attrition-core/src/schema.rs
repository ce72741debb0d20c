//! Feature schema inferred from the defaults row.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::row::RawRow;

/// Columns the training schema holds as numbers. Any of these present in a
/// row is coerced before inference; every other column stays text.
pub const NUMERIC_COLUMNS: [&str; 19] = [
    "Age",
    "MonthlyIncome",
    "DistanceFromHome",
    "WorkLifeBalance",
    "YearsAtCompany",
    "YearsInCurrentRole",
    "YearsSinceLastPromotion",
    "YearsWithCurrManager",
    "HourlyRate",
    "DailyRate",
    "MonthlyRate",
    "PercentSalaryHike",
    "TotalWorkingYears",
    "EnvironmentSatisfaction",
    "JobLevel",
    "JobInvolvement",
    "JobSatisfaction",
    "RelationshipSatisfaction",
    "TrainingTimesLastYear",
];

#[must_use]
pub fn is_numeric_column(column: &str) -> bool {
    NUMERIC_COLUMNS.contains(&column)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    #[must_use]
    pub fn of(column: &str) -> Self {
        if is_numeric_column(column) {
            Self::Numeric
        } else {
            Self::Categorical
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered column list of the loaded pipeline, each tagged with its kind.
///
/// Derived from the defaults row and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<(String, ColumnKind)>,
}

impl FeatureSchema {
    #[must_use]
    pub fn from_defaults(defaults: &RawRow) -> Self {
        let columns = defaults
            .columns()
            .iter()
            .map(|name| (name.clone(), ColumnKind::of(name)))
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnKind)> {
        self.columns.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    #[must_use]
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, kind)| *kind)
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.kind_of(column).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
