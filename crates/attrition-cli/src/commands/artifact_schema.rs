use attrition_artifacts::FittedPipeline;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `attrition artifact-schema`. A schema does not tabulate, so table
/// output falls back to pretty JSON.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    };
    output(&schemars::schema_for!(FittedPipeline), format)
}
