use clap::{Args, Subcommand};

use attrition_core::OverrideField;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Predict attrition risk for the defaults row with the given fields changed.
    Predict(FieldArgs),
    /// Show the initial value of every editable field and where it came from.
    Defaults,
    /// Show the reconciled feature row without predicting.
    Row(FieldArgs),
    /// Show the feature schema of the loaded artifacts.
    Schema,
    /// Interactive session: edit fields line by line and predict on demand.
    Form,
    /// Print the JSON Schema of the pipeline artifact format.
    ArtifactSchema,
}

/// Editable fields. Anything not given keeps its derived default.
#[derive(Clone, Debug, Default, Args)]
pub struct FieldArgs {
    /// Age in years (18-65)
    #[arg(long)]
    pub age: Option<String>,

    /// Monthly income (500-100000)
    #[arg(long)]
    pub monthly_income: Option<String>,

    /// Distance from home (0-50)
    #[arg(long)]
    pub distance_from_home: Option<String>,

    /// Work-life balance rating (1-4)
    #[arg(long)]
    pub work_life_balance: Option<String>,

    /// Works overtime: No or Yes
    #[arg(long)]
    pub overtime: Option<String>,

    /// Department: "Research & Development", "Sales" or "Human Resources"
    #[arg(long)]
    pub department: Option<String>,
}

impl FieldArgs {
    /// Fields that were given on the command line, in form order.
    pub fn given(&self) -> impl Iterator<Item = (OverrideField, &str)> {
        [
            (OverrideField::Age, &self.age),
            (OverrideField::MonthlyIncome, &self.monthly_income),
            (OverrideField::DistanceFromHome, &self.distance_from_home),
            (OverrideField::WorkLifeBalance, &self.work_life_balance),
            (OverrideField::OverTime, &self.overtime),
            (OverrideField::Department, &self.department),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
    }
}
