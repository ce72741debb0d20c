//! Record reconciliation: defaults row + overrides -> feature row.

use crate::overrides::OverrideSet;
use crate::row::{FeatureRow, FeatureValue, RawRow};
use crate::schema::NUMERIC_COLUMNS;

/// Build the feature row for one prediction request.
///
/// Starts from a copy of `defaults`, replaces every overridden column that the
/// defaults row has, then coerces the numeric column list. The result has
/// exactly the defaults row's columns in the same order. Overrides for columns
/// the defaults row lacks are skipped: the schema comes from the defaults row.
///
/// Cells in numeric columns that fail to parse become undefined rather than an
/// error; inference surfaces them later if the pipeline cannot impute them.
#[must_use]
pub fn reconcile(defaults: &RawRow, overrides: &OverrideSet) -> FeatureRow {
    let mut row = FeatureRow::from_raw(defaults);

    for (field, value) in overrides.iter() {
        if !row.replace(field.column(), value.to_feature_value()) {
            tracing::debug!(
                column = field.column(),
                "override skipped; column absent from defaults row"
            );
        }
    }

    coerce_numeric_columns(&mut row);
    row
}

/// Coerce every column of [`NUMERIC_COLUMNS`] present in `row`.
pub fn coerce_numeric_columns(row: &mut FeatureRow) {
    for column in NUMERIC_COLUMNS {
        if row.coerce_numeric(column) && row.get(column).is_some_and(FeatureValue::is_undefined) {
            tracing::debug!(column, "numeric coercion left cell undefined");
        }
    }
}
