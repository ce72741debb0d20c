use attrition_core::responses::SchemaColumnEntry;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `attrition schema`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&collect(ctx), flags.format)
}

fn collect(ctx: &AppContext) -> Vec<SchemaColumnEntry> {
    let required = ctx.artifacts.pipeline.required_columns();
    ctx.artifacts
        .schema
        .columns()
        .map(|(column, kind)| SchemaColumnEntry {
            column: column.to_string(),
            kind,
            required: required.contains(&column),
            default: ctx
                .artifacts
                .defaults
                .get(column)
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use attrition_core::ColumnKind;

    use super::collect;
    use crate::context::AppContext;

    #[test]
    fn schema_marks_dropped_remainder_as_required_input() {
        let entries = collect(&AppContext::sample());
        assert_eq!(entries.len(), 30);
        assert!(entries.iter().all(|entry| entry.required));

        let daily = entries
            .iter()
            .find(|entry| entry.column == "DailyRate")
            .expect("DailyRate");
        assert_eq!(daily.kind, ColumnKind::Numeric);
        assert_eq!(daily.default, "802");

        let department = entries
            .iter()
            .find(|entry| entry.column == "Department")
            .expect("Department");
        assert_eq!(department.kind, ColumnKind::Categorical);
    }
}
