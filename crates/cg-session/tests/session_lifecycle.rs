//! Session guard, persist and logout against a real session file.

use cg_core::session::{KEY_AUTH_TOKEN, KEY_EMAIL, KEY_LOGGED_IN};
use cg_core::{GuardOutcome, Page, SessionMarker, SessionScheme};
use cg_session::{FileStore, SessionStore};
use pretty_assertions::assert_eq;

fn store_in(tmp: &tempfile::TempDir) -> FileStore {
    FileStore::new(tmp.path().join(".cropguard").join("session.json"))
}

#[test]
fn login_persists_all_markers_and_dashboard_proceeds() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = store_in(&tmp);

    cg_session::persist(
        &store,
        &SessionMarker::strict("farmer@example.com", "tok_1"),
        SessionScheme::Strict,
    )
    .expect("persist");

    let state = store.load().expect("load");
    assert_eq!(state.get(KEY_EMAIL), Some("farmer@example.com"));
    assert_eq!(state.get(KEY_LOGGED_IN), Some("true"));
    assert_eq!(state.get(KEY_AUTH_TOKEN), Some("tok_1"));

    let decision =
        cg_session::guard(&store, Page::Dashboard, SessionScheme::Strict).expect("guard");
    assert!(matches!(decision.outcome, GuardOutcome::Proceed(Some(_))));
    assert!(store.path().exists(), "complete session must not be cleared");
}

#[test]
fn logout_then_dashboard_redirects_to_login() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = store_in(&tmp);

    cg_session::persist(
        &store,
        &SessionMarker::strict("farmer@example.com", "tok_1"),
        SessionScheme::Strict,
    )
    .expect("persist");
    cg_session::logout(&store).expect("logout");

    assert!(store.load().expect("load").is_empty());
    let decision =
        cg_session::guard(&store, Page::Dashboard, SessionScheme::Strict).expect("guard");
    assert_eq!(decision.outcome, GuardOutcome::RedirectToLogin);
}

#[test]
fn login_page_redirects_forward_when_logged_in() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = store_in(&tmp);
    cg_session::persist(
        &store,
        &SessionMarker::legacy("farmer@example.com", "Asha"),
        SessionScheme::Legacy,
    )
    .expect("persist");

    let decision = cg_session::guard(&store, Page::Login, SessionScheme::Legacy).expect("guard");
    let GuardOutcome::RedirectToDashboard(marker) = decision.outcome else {
        panic!("expected forward redirect");
    };
    assert_eq!(marker.display_name(), "Asha");
}

#[test]
fn corrupt_session_file_is_wiped_by_guard() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = store_in(&tmp);
    std::fs::create_dir_all(store.path().parent().expect("parent")).expect("mkdir");
    std::fs::write(store.path(), "{{{").expect("write");

    let decision =
        cg_session::guard(&store, Page::Dashboard, SessionScheme::Strict).expect("guard");
    assert_eq!(decision.outcome, GuardOutcome::RedirectToLogin);
    assert!(!store.path().exists());
}
