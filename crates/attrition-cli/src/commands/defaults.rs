use attrition_core::responses::FormDefaultEntry;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `attrition defaults`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&FormDefaultEntry::collect(&ctx.form_defaults), flags.format)
}
