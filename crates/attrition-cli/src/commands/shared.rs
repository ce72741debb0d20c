use attrition_core::OverrideSet;

use crate::cli::FieldArgs;
use crate::context::AppContext;

/// The derived form defaults with every field given on the command line
/// applied on top.
pub fn form_state(ctx: &AppContext, fields: &FieldArgs) -> anyhow::Result<OverrideSet> {
    let mut overrides = ctx.form_defaults.overrides().clone();
    for (field, value) in fields.given() {
        overrides.set_from_str(field, value)?;
    }
    Ok(overrides)
}
