use cg_core::{FlowError, GuardOutcome, Page, SessionMarker};

use crate::context::AppContext;

pub const NOT_LOGGED_IN: &str = "not logged in. Run 'cropguard auth login' first.";

/// Run the session guard for a command that needs a logged-in user.
///
/// Incomplete stored state is wiped before the redirect is reported.
pub fn require_session(ctx: &AppContext) -> anyhow::Result<SessionMarker> {
    let decision = cg_session::guard(ctx.store(), Page::Dashboard, ctx.scheme())?;
    match decision.outcome {
        GuardOutcome::Proceed(Some(marker)) | GuardOutcome::RedirectToDashboard(marker) => Ok(marker),
        GuardOutcome::Proceed(None) | GuardOutcome::RedirectToLogin => {
            anyhow::bail!(NOT_LOGGED_IN)
        }
    }
}

/// The message a panel would show for `error`, as a command failure.
pub fn shown(error: &FlowError) -> anyhow::Error {
    tracing::debug!(%error, "request failed");
    anyhow::anyhow!("{}", error.user_message())
}
