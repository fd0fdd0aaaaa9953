use cg_client::AuthFlow;
use cg_core::{AuthForm, AuthMode, AuthPanel, GuardOutcome, Page, SessionMarker};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

const PASSWORD_ENV: &str = "CROPGUARD_PASSWORD";

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    mode: &'static str,
    email: String,
    user: String,
    already_logged_in: bool,
    session_store: String,
}

impl AuthLoginResponse {
    fn new(mode: AuthMode, marker: &SessionMarker, already: bool, ctx: &AppContext) -> Self {
        Self {
            authenticated: true,
            mode: mode.as_str(),
            email: marker.email.clone(),
            user: marker.display_name().to_string(),
            already_logged_in: already,
            session_store: ctx.store().describe(),
        }
    }
}

pub async fn handle(
    mode: AuthMode,
    args: &AuthLoginArgs,
    name: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let decision = cg_session::guard(ctx.store(), Page::Login, ctx.scheme())?;
    if let GuardOutcome::RedirectToDashboard(marker) = &decision.outcome
        && !args.force
    {
        return output(
            &AuthLoginResponse::new(mode, marker, true, ctx),
            flags.format,
        );
    }

    let form = AuthForm {
        email: args.email.clone().unwrap_or_default(),
        password: resolve_password(args.password.as_deref(), std::env::var(PASSWORD_ENV).ok()),
        name: name.unwrap_or_default().to_string(),
    };

    let mut panel = AuthPanel::new(mode);
    let flow = AuthFlow::new(ctx.client(), ctx.store(), ctx.scheme(), ctx.token_policy());

    let spinner = Progress::spinner(AuthPanel::BUSY_LABEL);
    let result = flow.submit(&mut panel, &form).await;
    spinner.finish_clear();

    match result {
        Ok(marker) => output(
            &AuthLoginResponse::new(mode, &marker, false, ctx),
            flags.format,
        ),
        Err(error) => {
            anyhow::bail!("{}", panel.error().unwrap_or_else(|| error.user_message()))
        }
    }
}

/// The `--password` flag wins over the environment.
fn resolve_password(flag: Option<&str>, env: Option<String>) -> String {
    flag.map(str::to_string).or(env).unwrap_or_default()
}
