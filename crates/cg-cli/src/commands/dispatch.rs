use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Predict(args) => commands::predict::handle(&args, ctx, flags).await,
        Commands::Farm { action } => commands::farm::handle(&action, ctx, flags).await,
        Commands::Alerts => commands::alerts::handle(ctx, flags).await,
        Commands::Health => commands::health::handle(ctx, flags).await,
        Commands::Preview(args) => commands::preview::handle(&args, flags),
    }
}
