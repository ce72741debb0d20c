use attrition_core::responses::PredictionResponse;
use attrition_core::{predict, reconcile};

use crate::cli::{FieldArgs, GlobalFlags};
use crate::commands::shared::form_state;
use crate::context::AppContext;
use crate::output::output;

/// Handle `attrition predict`.
pub fn handle(args: &FieldArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = run(args, ctx)?;
    output(&response, flags.format)
}

fn run(args: &FieldArgs, ctx: &AppContext) -> anyhow::Result<PredictionResponse> {
    let overrides = form_state(ctx, args)?;
    let row = reconcile(&ctx.artifacts.defaults, &overrides);
    let result = predict(&ctx.artifacts.pipeline, &row)?;
    Ok(result.into())
}
