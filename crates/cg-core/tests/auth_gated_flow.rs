//! Walks the login → dashboard → logout sequence over plain session state,
//! applying each decision the way a storage adapter would.

use chrono::Utc;
use pretty_assertions::assert_eq;

use cg_core::auth::{self, AuthForm, AuthMode, AuthResponse, TokenPolicy};
use cg_core::session::{self, GuardOutcome, Page, SessionState};
use cg_core::SessionScheme;

fn apply_guard(state: &mut SessionState, page: Page, scheme: SessionScheme) -> GuardOutcome {
    let decision = session::evaluate(state, page, scheme);
    if decision.clear_storage {
        state.clear();
    }
    decision.outcome
}

fn login(state: &mut SessionState, response: &AuthResponse) {
    let form = AuthForm {
        email: "farmer@example.com".into(),
        password: "pw".into(),
        name: String::new(),
    };
    let request = auth::validate(AuthMode::Login, &form).expect("valid form");
    let marker = auth::session_marker(
        &request,
        response,
        TokenPolicy::Synthesize,
        SessionScheme::Strict,
        Utc::now(),
    )
    .expect("marker");
    marker.write_to(state, SessionScheme::Strict);
}

#[test]
fn login_then_dashboard_then_logout() {
    let scheme = SessionScheme::Strict;
    let mut state = SessionState::new();

    assert_eq!(
        apply_guard(&mut state, Page::Dashboard, scheme),
        GuardOutcome::RedirectToLogin
    );
    assert_eq!(
        apply_guard(&mut state, Page::Login, scheme),
        GuardOutcome::Proceed(None)
    );

    login(
        &mut state,
        &AuthResponse {
            token: Some("tok".into()),
            error: None,
        },
    );

    let outcome = apply_guard(&mut state, Page::Dashboard, scheme);
    let GuardOutcome::Proceed(Some(marker)) = outcome else {
        panic!("expected dashboard to proceed, got {outcome:?}");
    };
    assert_eq!(marker.email, "farmer@example.com");
    assert_eq!(marker.auth_token.as_deref(), Some("tok"));

    assert!(matches!(
        apply_guard(&mut state, Page::Login, scheme),
        GuardOutcome::RedirectToDashboard(_)
    ));

    // logout
    state.clear();
    assert_eq!(
        apply_guard(&mut state, Page::Dashboard, scheme),
        GuardOutcome::RedirectToLogin
    );
}

#[test]
fn login_without_server_token_still_passes_guard() {
    let mut state = SessionState::new();
    login(&mut state, &AuthResponse::default());

    let token = state.get(session::KEY_AUTH_TOKEN).expect("synthetic token");
    assert!(token.starts_with("verified_"));
    assert!(matches!(
        apply_guard(&mut state, Page::Dashboard, SessionScheme::Strict),
        GuardOutcome::Proceed(Some(_))
    ));
}

#[test]
fn tampered_state_is_wiped_on_next_load() {
    let mut state = SessionState::new();
    login(&mut state, &AuthResponse::default());
    state.remove(session::KEY_LOGGED_IN);

    assert_eq!(
        apply_guard(&mut state, Page::Dashboard, SessionScheme::Strict),
        GuardOutcome::RedirectToLogin
    );
    assert!(state.is_empty());
}
