//! Column transformer: named groups of columns, each run through a short
//! chain of fitted steps, plus a remainder policy.

use attrition_core::{FeatureRow, FeatureValue, InferenceError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named cell travelling through a transformer group.
type Cell = (String, FeatureValue);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnTransformer {
    pub transformers: Vec<TransformerGroup>,
    #[serde(default)]
    pub remainder: Remainder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TransformerGroup {
    pub name: String,
    pub columns: Vec<String>,
    /// Empty means passthrough.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A fitted preprocessing step. Per-column parameters are aligned with the
/// owning group's `columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Replace undefined cells with a per-column constant.
    SimpleImputer { fill_values: Vec<f64> },
    /// `(x - mean) / scale`.
    StandardScaler { mean: Vec<f64>, scale: Vec<f64> },
    /// One indicator per known category. Must be the last step of its group.
    OneHotEncoder {
        categories: Vec<Vec<String>>,
        #[serde(default)]
        handle_unknown: HandleUnknown,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    #[default]
    Error,
    Ignore,
}

/// What happens to input columns not claimed by any group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Remainder {
    #[serde(default)]
    pub action: RemainderAction,
    #[serde(default)]
    pub columns: ColumnList,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RemainderAction {
    #[default]
    Drop,
    Passthrough,
}

/// Column list as written by the exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnList {
    List { names: Vec<String> },
}

impl Default for ColumnList {
    fn default() -> Self {
        Self::List { names: Vec::new() }
    }
}

impl ColumnList {
    #[must_use]
    pub fn names(&self) -> &[String] {
        match self {
            Self::List { names } => names,
        }
    }
}

impl Step {
    const fn kind(&self) -> &'static str {
        match self {
            Self::SimpleImputer { .. } => "simple_imputer",
            Self::StandardScaler { .. } => "standard_scaler",
            Self::OneHotEncoder { .. } => "one_hot_encoder",
        }
    }

    fn check_widths(&self, columns: usize) -> Result<(), String> {
        let widths: Vec<(&str, usize)> = match self {
            Self::SimpleImputer { fill_values } => vec![("fill_values", fill_values.len())],
            Self::StandardScaler { mean, scale } => {
                if let Some(idx) = scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
                    return Err(format!("standard_scaler scale[{idx}] must be finite and non-zero"));
                }
                vec![("mean", mean.len()), ("scale", scale.len())]
            }
            Self::OneHotEncoder { categories, .. } => vec![("categories", categories.len())],
        };

        for (name, len) in widths {
            if len != columns {
                return Err(format!(
                    "{} {name} has {len} entries for {columns} columns",
                    self.kind()
                ));
            }
        }
        Ok(())
    }

    fn apply(&self, cells: Vec<Cell>) -> Result<Vec<Cell>, InferenceError> {
        match self {
            Self::SimpleImputer { fill_values } => Ok(cells
                .into_iter()
                .zip(fill_values)
                .map(|((column, value), fill)| match value {
                    FeatureValue::Undefined => (column, FeatureValue::Number(*fill)),
                    other => (column, other),
                })
                .collect()),
            Self::StandardScaler { mean, scale } => cells
                .into_iter()
                .zip(mean.iter().zip(scale))
                .map(|((column, value), (mean, scale))| {
                    let x = to_number(&column, &value)?;
                    Ok((column, FeatureValue::Number((x - mean) / scale)))
                })
                .collect(),
            Self::OneHotEncoder {
                categories,
                handle_unknown,
            } => {
                let mut out = Vec::new();
                for ((column, value), known) in cells.into_iter().zip(categories) {
                    let category = match value {
                        FeatureValue::Text(text) => text,
                        FeatureValue::Number(n) => n.to_string(),
                        FeatureValue::Undefined => {
                            return Err(InferenceError::UndefinedValue { column });
                        }
                    };
                    let hit = known.iter().position(|c| *c == category);
                    if hit.is_none() && *handle_unknown == HandleUnknown::Error {
                        return Err(InferenceError::UnseenCategory {
                            column,
                            value: category,
                        });
                    }
                    for (idx, name) in known.iter().enumerate() {
                        let indicator = if hit == Some(idx) { 1.0 } else { 0.0 };
                        out.push((format!("{column}_{name}"), FeatureValue::Number(indicator)));
                    }
                }
                Ok(out)
            }
        }
    }
}

impl TransformerGroup {
    fn output_width(&self) -> usize {
        match self.steps.last() {
            Some(Step::OneHotEncoder { categories, .. }) => categories.iter().map(Vec::len).sum(),
            _ => self.columns.len(),
        }
    }

    fn validate(&self) -> Result<(), String> {
        for (idx, step) in self.steps.iter().enumerate() {
            step.check_widths(self.columns.len())
                .map_err(|reason| format!("group '{}': {reason}", self.name))?;
            if matches!(step, Step::OneHotEncoder { .. }) && idx + 1 != self.steps.len() {
                return Err(format!(
                    "group '{}': one_hot_encoder must be the last step",
                    self.name
                ));
            }
        }
        Ok(())
    }

    fn transform(&self, row: &FeatureRow, out: &mut Vec<f64>) -> Result<(), InferenceError> {
        let mut cells = gather(row, &self.columns)?;
        for step in &self.steps {
            cells = step.apply(cells)?;
        }
        for (column, value) in &cells {
            out.push(to_number(column, value)?);
        }
        Ok(())
    }
}

impl ColumnTransformer {
    /// Every input column the transformer was fit on, remainder included.
    #[must_use]
    pub fn input_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        let grouped = self.transformers.iter().flat_map(|group| group.columns.iter());
        for column in grouped.chain(self.remainder.columns.names()) {
            if !columns.contains(&column.as_str()) {
                columns.push(column.as_str());
            }
        }
        columns
    }

    /// Number of features the transformer emits.
    #[must_use]
    pub fn output_width(&self) -> usize {
        let grouped: usize = self.transformers.iter().map(TransformerGroup::output_width).sum();
        match self.remainder.action {
            RemainderAction::Drop => grouped,
            RemainderAction::Passthrough => grouped + self.remainder.columns.names().len(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.transformers.is_empty() {
            return Err("column transformer has no groups".into());
        }
        for group in &self.transformers {
            group.validate()?;
        }
        Ok(())
    }

    /// Turn a feature row into the numeric vector the classifier consumes.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::MissingColumn`] if the row lacks any input
    /// column, or the first step failure.
    pub fn transform(&self, row: &FeatureRow) -> Result<Vec<f64>, InferenceError> {
        if let Some(missing) = self.input_columns().into_iter().find(|c| !row.contains(c)) {
            return Err(InferenceError::MissingColumn {
                column: missing.to_string(),
            });
        }

        let mut out = Vec::with_capacity(self.output_width());
        for group in &self.transformers {
            group.transform(row, &mut out)?;
        }
        if self.remainder.action == RemainderAction::Passthrough {
            for (column, value) in gather(row, self.remainder.columns.names())? {
                out.push(to_number(&column, &value)?);
            }
        }
        Ok(out)
    }
}

fn gather(row: &FeatureRow, columns: &[String]) -> Result<Vec<Cell>, InferenceError> {
    columns
        .iter()
        .map(|column| {
            row.get(column)
                .map(|value| (column.clone(), value.clone()))
                .ok_or_else(|| InferenceError::MissingColumn {
                    column: column.clone(),
                })
        })
        .collect()
}

/// Numeric view of a cell. Text that parses as a number is accepted.
fn to_number(column: &str, value: &FeatureValue) -> Result<f64, InferenceError> {
    match value {
        FeatureValue::Number(n) => Ok(*n),
        FeatureValue::Text(text) => match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(InferenceError::NonNumeric {
                column: column.to_string(),
                value: text.clone(),
            }),
        },
        FeatureValue::Undefined => Err(InferenceError::UndefinedValue {
            column: column.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use attrition_core::RawRow;
    use pretty_assertions::assert_eq;

    use super::*;

    fn transformer(handle_unknown: HandleUnknown, steps: Vec<Step>) -> ColumnTransformer {
        ColumnTransformer {
            transformers: vec![
                TransformerGroup {
                    name: "num".into(),
                    columns: vec!["Age".into(), "JobLevel".into()],
                    steps,
                },
                TransformerGroup {
                    name: "cat".into(),
                    columns: vec!["OverTime".into()],
                    steps: vec![Step::OneHotEncoder {
                        categories: vec![vec!["No".into(), "Yes".into()]],
                        handle_unknown,
                    }],
                },
            ],
            remainder: Remainder {
                action: RemainderAction::Passthrough,
                columns: ColumnList::List {
                    names: vec!["StockOptionLevel".into()],
                },
            },
        }
    }

    fn scaler() -> Vec<Step> {
        vec![
            Step::SimpleImputer {
                fill_values: vec![30.0, 1.0],
            },
            Step::StandardScaler {
                mean: vec![30.0, 2.0],
                scale: vec![10.0, 1.0],
            },
        ]
    }

    fn row(pairs: &[(&str, FeatureValue)]) -> FeatureRow {
        let raw = RawRow::from_pairs(pairs.iter().map(|(c, _)| (*c, ""))).expect("valid");
        let mut row = FeatureRow::from_raw(&raw);
        for (column, value) in pairs {
            row.replace(column, value.clone());
        }
        row
    }

    #[test]
    fn transforms_groups_in_order() {
        let t = transformer(HandleUnknown::Error, scaler());
        let out = t
            .transform(&row(&[
                ("Age", FeatureValue::Number(40.0)),
                ("JobLevel", FeatureValue::Text("3".into())),
                ("OverTime", FeatureValue::Text("Yes".into())),
                ("StockOptionLevel", FeatureValue::Text("1".into())),
            ]))
            .expect("transform");
        assert_eq!(out, vec![1.0, 1.0, 0.0, 1.0, 1.0]);
        assert_eq!(t.output_width(), 5);
    }

    #[test]
    fn imputer_fills_undefined_cells() {
        let t = transformer(HandleUnknown::Error, scaler());
        let out = t
            .transform(&row(&[
                ("Age", FeatureValue::Undefined),
                ("JobLevel", FeatureValue::Number(2.0)),
                ("OverTime", FeatureValue::Text("No".into())),
                ("StockOptionLevel", FeatureValue::Number(0.0)),
            ]))
            .expect("transform");
        assert_eq!(out[0], 0.0);
    }

    #[test]
    fn undefined_without_imputer_fails() {
        let t = transformer(
            HandleUnknown::Error,
            vec![Step::StandardScaler {
                mean: vec![30.0, 2.0],
                scale: vec![10.0, 1.0],
            }],
        );
        let err = t
            .transform(&row(&[
                ("Age", FeatureValue::Undefined),
                ("JobLevel", FeatureValue::Number(2.0)),
                ("OverTime", FeatureValue::Text("No".into())),
                ("StockOptionLevel", FeatureValue::Number(0.0)),
            ]))
            .unwrap_err();
        assert_eq!(
            err,
            InferenceError::UndefinedValue {
                column: "Age".into()
            }
        );
    }

    #[test]
    fn unseen_category_respects_handle_unknown() {
        let cells = [
            ("Age", FeatureValue::Number(30.0)),
            ("JobLevel", FeatureValue::Number(2.0)),
            ("OverTime", FeatureValue::Text("Sometimes".into())),
            ("StockOptionLevel", FeatureValue::Number(0.0)),
        ];

        let err = transformer(HandleUnknown::Error, scaler())
            .transform(&row(&cells))
            .unwrap_err();
        assert!(matches!(err, InferenceError::UnseenCategory { ref value, .. } if value == "Sometimes"));

        let out = transformer(HandleUnknown::Ignore, scaler())
            .transform(&row(&cells))
            .expect("ignored");
        assert_eq!(&out[2..4], &[0.0, 0.0]);
    }

    #[test]
    fn missing_remainder_column_is_a_schema_mismatch() {
        let err = transformer(HandleUnknown::Error, scaler())
            .transform(&row(&[
                ("Age", FeatureValue::Number(30.0)),
                ("JobLevel", FeatureValue::Number(2.0)),
                ("OverTime", FeatureValue::Text("No".into())),
            ]))
            .unwrap_err();
        assert_eq!(
            err,
            InferenceError::MissingColumn {
                column: "StockOptionLevel".into()
            }
        );
    }

    #[test]
    fn non_numeric_text_fails_in_numeric_group() {
        let err = transformer(HandleUnknown::Error, scaler())
            .transform(&row(&[
                ("Age", FeatureValue::Number(30.0)),
                ("JobLevel", FeatureValue::Text("senior".into())),
                ("OverTime", FeatureValue::Text("No".into())),
                ("StockOptionLevel", FeatureValue::Number(0.0)),
            ]))
            .unwrap_err();
        assert!(matches!(err, InferenceError::NonNumeric { ref column, .. } if column == "JobLevel"));
    }

    #[test]
    fn validation_catches_misaligned_parameters() {
        let t = transformer(
            HandleUnknown::Error,
            vec![Step::SimpleImputer {
                fill_values: vec![1.0],
            }],
        );
        let err = t.validate().unwrap_err();
        assert!(err.contains("fill_values has 1 entries for 2 columns"), "{err}");
    }

    #[test]
    fn validation_requires_one_hot_last() {
        let mut t = transformer(HandleUnknown::Error, scaler());
        t.transformers[1].steps.push(Step::SimpleImputer {
            fill_values: vec![0.0],
        });
        assert!(t.validate().unwrap_err().contains("must be the last step"));
    }
}
