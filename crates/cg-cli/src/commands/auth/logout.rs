use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
    session_store: String,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    cg_session::logout(ctx.store())?;
    tracing::info!("session cleared");
    output(
        &AuthLogoutResponse {
            cleared: true,
            session_store: ctx.store().describe(),
        },
        flags.format,
    )
}
