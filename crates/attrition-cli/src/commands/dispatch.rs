use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Predict(args) => commands::predict::handle(&args, ctx, flags),
        Commands::Defaults => commands::defaults::handle(ctx, flags),
        Commands::Row(args) => commands::row::handle(&args, ctx, flags),
        Commands::Schema => commands::schema::handle(ctx, flags),
        Commands::Form => commands::form::handle(ctx, flags),
        // Needs no artifacts, so main answers it before loading them.
        Commands::ArtifactSchema => commands::artifact_schema::handle(flags),
    }
}
