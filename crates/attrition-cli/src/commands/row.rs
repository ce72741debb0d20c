use attrition_core::reconcile;
use attrition_core::responses::FeatureCell;

use crate::cli::{FieldArgs, GlobalFlags};
use crate::commands::shared::form_state;
use crate::context::AppContext;
use crate::output::output;

/// Handle `attrition row`.
pub fn handle(args: &FieldArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&run(args, ctx)?, flags.format)
}

fn run(args: &FieldArgs, ctx: &AppContext) -> anyhow::Result<Vec<FeatureCell>> {
    let overrides = form_state(ctx, args)?;
    Ok(FeatureCell::collect(&reconcile(
        &ctx.artifacts.defaults,
        &overrides,
    )))
}
