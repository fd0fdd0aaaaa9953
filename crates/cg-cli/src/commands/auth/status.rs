use cg_core::{GuardOutcome, Page};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::NOT_LOGGED_IN;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    email: Option<String>,
    user: Option<String>,
    session_scheme: String,
    session_store: String,
    note: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let decision = cg_session::guard(ctx.store(), Page::Dashboard, ctx.scheme())?;
    let marker = match decision.outcome {
        GuardOutcome::Proceed(marker) => marker,
        GuardOutcome::RedirectToDashboard(marker) => Some(marker),
        GuardOutcome::RedirectToLogin => None,
    };

    let note = if decision.clear_storage {
        Some("incomplete session data was cleared".to_string())
    } else if marker.is_none() {
        Some(NOT_LOGGED_IN.to_string())
    } else {
        None
    };

    output(
        &AuthStatusResponse {
            authenticated: marker.is_some(),
            user: marker.as_ref().map(|m| m.display_name().to_string()),
            email: marker.map(|m| m.email),
            session_scheme: ctx.scheme().to_string(),
            session_store: ctx.store().describe(),
            note,
        },
        flags.format,
    )
}
