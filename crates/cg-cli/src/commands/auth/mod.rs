mod login;
mod logout;
mod status;

use cg_core::AuthMode;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `cropguard auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(AuthMode::Login, args, None, ctx, flags).await,
        AuthCommands::Register(args) => {
            login::handle(
                AuthMode::Register,
                &args.credentials,
                args.name.as_deref(),
                ctx,
                flags,
            )
            .await
        }
        AuthCommands::Logout => logout::handle(ctx, flags),
        AuthCommands::Status => status::handle(ctx, flags),
    }
}
