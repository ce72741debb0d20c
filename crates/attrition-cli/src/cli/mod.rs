use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, FieldArgs};

/// Top-level CLI parser for the `attrition` binary.
#[derive(Debug, Parser)]
#[command(
    name = "attrition",
    version,
    about = "Attrition - employee attrition risk from a fitted pipeline"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (default from config, else table)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pipeline artifact path (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub pipeline: Option<PathBuf>,

    /// Defaults table path (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub defaults: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self, default_format: OutputFormat) -> GlobalFlags {
        GlobalFlags {
            format: self.format.unwrap_or(default_format),
            quiet: self.quiet,
            verbose: self.verbose,
            pipeline: self.pipeline.clone(),
            defaults: self.defaults.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use attrition_core::OverrideField;
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "attrition",
            "--format",
            "json",
            "--verbose",
            "--pipeline",
            "/tmp/p.json",
            "defaults",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.verbose);
        assert_eq!(cli.pipeline.as_deref(), Some(Path::new("/tmp/p.json")));
        assert!(matches!(cli.command, Commands::Defaults));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["attrition", "schema", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Raw));
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["attrition", "--format", "xml", "schema"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn format_falls_back_to_configured_default() {
        let cli = Cli::try_parse_from(["attrition", "defaults"]).expect("cli should parse");
        assert_eq!(cli.global_flags(OutputFormat::Table).format, OutputFormat::Table);

        let cli = Cli::try_parse_from(["attrition", "-f", "raw", "defaults"])
            .expect("cli should parse");
        assert_eq!(cli.global_flags(OutputFormat::Table).format, OutputFormat::Raw);
    }

    #[test]
    fn predict_collects_given_fields_in_form_order() {
        let cli = Cli::try_parse_from([
            "attrition",
            "predict",
            "--overtime",
            "Yes",
            "--age",
            "45",
            "--department",
            "Human Resources",
        ])
        .expect("cli should parse");

        let Commands::Predict(fields) = cli.command else {
            panic!("expected predict");
        };
        let given: Vec<_> = fields.given().collect();
        assert_eq!(
            given,
            vec![
                (OverrideField::Age, "45"),
                (OverrideField::OverTime, "Yes"),
                (OverrideField::Department, "Human Resources"),
            ]
        );
    }

    #[test]
    fn field_values_are_not_validated_by_clap() {
        // Domain checks happen against the override set so errors name the domain.
        let cli = Cli::try_parse_from(["attrition", "row", "--age", "200"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Row(_)));
    }

    #[test]
    fn artifact_schema_subcommand_is_kebab_case() {
        let cli = Cli::try_parse_from(["attrition", "artifact-schema"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::ArtifactSchema));
    }
}
