//! Properties of reconciliation and form-default derivation across a spread of
//! defaults rows.

use attrition_core::fields::{DEPARTMENT_CHOICES, OVERTIME_CHOICES};
use attrition_core::overrides::derive_field_default;
use attrition_core::{
    Classifier, DefaultSource, FeatureRow, FeatureValue, InferenceError, NUMERIC_COLUMNS,
    OverrideField, OverrideSet, OverrideValue, RawRow, derive_form_defaults, predict, reconcile,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn full_defaults() -> RawRow {
    RawRow::from_pairs([
        ("Age", "40"),
        ("BusinessTravel", "Travel_Rarely"),
        ("DailyRate", "802"),
        ("Department", "Sales"),
        ("DistanceFromHome", "7"),
        ("EnvironmentSatisfaction", "3"),
        ("Gender", "Male"),
        ("JobRole", "Sales Executive"),
        ("MonthlyIncome", "6000"),
        ("OverTime", "No"),
        ("WorkLifeBalance", "3"),
        ("YearsAtCompany", "5"),
    ])
    .expect("valid row")
}

fn sparse_defaults() -> RawRow {
    RawRow::from_pairs([("JobRole", "Laboratory Technician"), ("Age", "n/a")]).expect("valid row")
}

fn malformed_defaults() -> RawRow {
    RawRow::from_pairs([
        ("Age", "seventy"),
        ("MonthlyIncome", "1e9"),
        ("OverTime", "maybe"),
        ("Department", ""),
        ("HourlyRate", "  "),
    ])
    .expect("valid row")
}

fn all_overrides() -> OverrideSet {
    let mut set = OverrideSet::new();
    set.set_from_str(OverrideField::Age, "45").expect("valid");
    set.set_from_str(OverrideField::MonthlyIncome, "7200").expect("valid");
    set.set_from_str(OverrideField::DistanceFromHome, "12").expect("valid");
    set.set_from_str(OverrideField::WorkLifeBalance, "2").expect("valid");
    set.set_from_str(OverrideField::OverTime, "Yes").expect("valid");
    set.set_from_str(OverrideField::Department, "Human Resources")
        .expect("valid");
    set
}

#[rstest]
#[case::full(full_defaults())]
#[case::sparse(sparse_defaults())]
#[case::malformed(malformed_defaults())]
fn reconcile_preserves_column_set(#[case] defaults: RawRow) {
    for overrides in [OverrideSet::new(), all_overrides()] {
        let row = reconcile(&defaults, &overrides);
        assert_eq!(row.columns(), defaults.columns());
    }
}

#[rstest]
#[case::full(full_defaults())]
#[case::sparse(sparse_defaults())]
#[case::malformed(malformed_defaults())]
fn overridden_fields_carry_override_values(#[case] defaults: RawRow) {
    let overrides = all_overrides();
    let row = reconcile(&defaults, &overrides);

    for (field, value) in overrides.iter() {
        if defaults.contains(field.column()) {
            assert_eq!(row.get(field.column()), Some(&value.to_feature_value()), "{field}");
        } else {
            assert!(!row.contains(field.column()), "{field}");
        }
    }
}

#[rstest]
#[case::full(full_defaults())]
#[case::sparse(sparse_defaults())]
#[case::malformed(malformed_defaults())]
fn numeric_columns_are_numeric_or_undefined(#[case] defaults: RawRow) {
    let row = reconcile(&defaults, &OverrideSet::new());
    for column in NUMERIC_COLUMNS {
        if let Some(value) = row.get(column) {
            assert!(
                value.is_numeric() || value.is_undefined(),
                "{column} holds {value:?}"
            );
        }
    }
}

#[rstest]
#[case::full(full_defaults())]
#[case::sparse(sparse_defaults())]
#[case::malformed(malformed_defaults())]
fn derived_defaults_are_always_in_domain(#[case] defaults: RawRow) {
    let derived = derive_form_defaults(&defaults);
    for field in OverrideField::ALL {
        let value = derived.overrides().get(field).expect("every field derived");
        assert!(field.domain().contains(value), "{field} = {value}");
    }

    let overtime = derived.overrides().get(OverrideField::OverTime).expect("derived");
    assert!(OVERTIME_CHOICES.contains(&overtime.to_string().as_str()));
    let department = derived.overrides().get(OverrideField::Department).expect("derived");
    assert!(DEPARTMENT_CHOICES.contains(&department.to_string().as_str()));
}

#[test]
fn derived_defaults_read_the_full_row() {
    let derived = derive_form_defaults(&full_defaults());
    let values: Vec<(OverrideField, String, DefaultSource)> = derived
        .iter()
        .map(|(field, value, source)| (field, value.to_string(), source))
        .collect();

    assert_eq!(
        values,
        vec![
            (OverrideField::Age, "40".into(), DefaultSource::DefaultsRow),
            (OverrideField::MonthlyIncome, "6000".into(), DefaultSource::DefaultsRow),
            (OverrideField::DistanceFromHome, "7".into(), DefaultSource::DefaultsRow),
            (OverrideField::WorkLifeBalance, "3".into(), DefaultSource::DefaultsRow),
            (OverrideField::OverTime, "No".into(), DefaultSource::DefaultsRow),
            (OverrideField::Department, "Sales".into(), DefaultSource::DefaultsRow),
        ]
    );
}

#[test]
fn missing_department_is_not_added_to_the_row() {
    let defaults =
        RawRow::from_pairs([("Age", "40"), ("OverTime", "No"), ("JobRole", "Manager")])
            .expect("valid row");

    let derived = derive_form_defaults(&defaults);
    assert_eq!(
        derive_field_default(OverrideField::Department, defaults.get("Department")),
        (
            OverrideValue::Category("Research & Development".into()),
            DefaultSource::Fallback
        )
    );

    let mut overrides = derived.overrides().clone();
    overrides.remove(OverrideField::Department);
    let row = reconcile(&defaults, &overrides);
    assert!(!row.contains("Department"));

    // Even the complete form state does not widen the schema.
    let row = reconcile(&defaults, derived.overrides());
    assert!(!row.contains("Department"));
    assert_eq!(row.len(), 3);
}

/// Sums the numeric cells; good enough to check determinism end to end.
struct SumModel;

impl Classifier for SumModel {
    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], InferenceError> {
        let mut total = 0.0;
        for (column, value) in row.iter() {
            match value {
                FeatureValue::Number(n) => total += n,
                FeatureValue::Undefined => {
                    return Err(InferenceError::UndefinedValue {
                        column: column.to_string(),
                    });
                }
                FeatureValue::Text(_) => {}
            }
        }
        let p = 1.0 / (1.0 + (-(total / 10_000.0)).exp());
        Ok([1.0 - p, p])
    }
}

#[test]
fn predict_is_deterministic() {
    let row = reconcile(&full_defaults(), &all_overrides());
    let first = predict(&SumModel, &row).expect("prediction");
    for _ in 0..10 {
        assert_eq!(predict(&SumModel, &row).expect("prediction"), first);
    }
}

#[test]
fn undefined_cells_surface_at_inference() {
    let row = reconcile(&malformed_defaults(), &OverrideSet::new());
    let err = predict(&SumModel, &row).unwrap_err();
    assert!(matches!(err, InferenceError::UndefinedValue { .. }));
}
