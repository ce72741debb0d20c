use anyhow::Context;
use attrition_config::AttritionConfig;
use clap::ValueEnum;

use crate::cli::{Cli, OutputFormat};

/// Load layered configuration, then apply the path flags on top.
pub fn load_config(cli: &Cli) -> anyhow::Result<AttritionConfig> {
    let mut config =
        AttritionConfig::load_with_dotenv().context("failed to load attrition configuration")?;

    config
        .artifacts
        .apply_overrides(cli.pipeline.clone(), cli.defaults.clone());
    config
        .validate()
        .context("invalid artifact path on the command line")?;

    tracing::debug!(
        pipeline = %config.artifacts.pipeline_path.display(),
        defaults = %config.artifacts.defaults_path.display(),
        format = %config.general.default_format,
        "configuration resolved"
    );
    Ok(config)
}

/// The configured output format. Config validation already restricts the
/// value, so an unknown name only happens if the two lists drift apart.
pub fn default_format(config: &AttritionConfig) -> OutputFormat {
    OutputFormat::from_str(&config.general.default_format, true).unwrap_or_else(|_| {
        tracing::warn!(
            format = %config.general.default_format,
            "unknown default format; using table"
        );
        OutputFormat::Table
    })
}
