//! Session markers and the session guard decision.
//!
//! Persisted client state is a flat string map. A [`SessionMarker`] is the
//! typed view of the keys that prove a login; [`evaluate`] decides what a page
//! load does with that state. Reading and writing the actual storage is left
//! to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::endpoint::SessionScheme;

pub const KEY_EMAIL: &str = "email";
pub const KEY_LOGGED_IN: &str = "loggedIn";
pub const KEY_AUTH_TOKEN: &str = "authToken";
pub const KEY_USER_NAME: &str = "userName";

const LOGGED_IN_VALUE: &str = "true";

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Snapshot of the persisted key-value session storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionState(BTreeMap<String, String>);

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, treating empty strings as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SessionState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// SessionMarker
// ---------------------------------------------------------------------------

/// The persisted fields proving a user is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMarker {
    pub email: String,
    pub logged_in: bool,
    /// Required by the strict scheme.
    pub auth_token: Option<String>,
    /// Display name kept by the legacy scheme.
    pub user_name: Option<String>,
}

impl SessionMarker {
    #[must_use]
    pub fn strict(email: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            logged_in: true,
            auth_token: Some(auth_token.into()),
            user_name: None,
        }
    }

    #[must_use]
    pub fn legacy(email: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            logged_in: true,
            auth_token: None,
            user_name: Some(user_name.into()),
        }
    }

    /// Read a complete marker from `state`.
    ///
    /// Returns `None` when any field the scheme requires is missing or empty.
    #[must_use]
    pub fn read(state: &SessionState, scheme: SessionScheme) -> Option<Self> {
        let email = state.get(KEY_EMAIL)?;
        match scheme {
            SessionScheme::Strict => {
                state.get(KEY_LOGGED_IN)?;
                let token = state.get(KEY_AUTH_TOKEN)?;
                Some(Self::strict(email, token))
            }
            SessionScheme::Legacy => Some(Self {
                email: email.to_string(),
                logged_in: true,
                auth_token: None,
                user_name: state.get(KEY_USER_NAME).map(str::to_string),
            }),
        }
    }

    /// Key-value pairs to persist for `scheme`.
    #[must_use]
    pub fn entries(&self, scheme: SessionScheme) -> Vec<(&'static str, String)> {
        match scheme {
            SessionScheme::Strict => vec![
                (KEY_EMAIL, self.email.clone()),
                (KEY_LOGGED_IN, LOGGED_IN_VALUE.to_string()),
                (KEY_AUTH_TOKEN, self.auth_token.clone().unwrap_or_default()),
            ],
            SessionScheme::Legacy => vec![
                (KEY_EMAIL, self.email.clone()),
                (KEY_USER_NAME, self.display_name().to_string()),
            ],
        }
    }

    pub fn write_to(&self, state: &mut SessionState, scheme: SessionScheme) {
        for (key, value) in self.entries(scheme) {
            state.set(key, value);
        }
    }

    /// Name shown in the dashboard header: user name, else the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.email)
    }
}

// ---------------------------------------------------------------------------
// Guard
// ---------------------------------------------------------------------------

/// Where the guard runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Dashboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Stay on the page. Carries the marker when one is complete.
    Proceed(Option<SessionMarker>),
    RedirectToLogin,
    RedirectToDashboard(SessionMarker),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    pub outcome: GuardOutcome,
    /// All session storage must be erased before acting on `outcome`.
    pub clear_storage: bool,
}

impl GuardDecision {
    #[must_use]
    pub fn marker(&self) -> Option<&SessionMarker> {
        match &self.outcome {
            GuardOutcome::Proceed(marker) => marker.as_ref(),
            GuardOutcome::RedirectToDashboard(marker) => Some(marker),
            GuardOutcome::RedirectToLogin => None,
        }
    }
}

/// Decide what a page load does with the persisted session state.
///
/// Incomplete state is always logged-out and always cleared.
#[must_use]
pub fn evaluate(state: &SessionState, page: Page, scheme: SessionScheme) -> GuardDecision {
    let marker = SessionMarker::read(state, scheme);
    let clear_storage = marker.is_none() && !state.is_empty();

    let outcome = match (page, marker) {
        (Page::Dashboard, Some(marker)) => GuardOutcome::Proceed(Some(marker)),
        (Page::Dashboard, None) => GuardOutcome::RedirectToLogin,
        (Page::Login, Some(marker)) => GuardOutcome::RedirectToDashboard(marker),
        (Page::Login, None) => GuardOutcome::Proceed(None),
    };

    GuardDecision {
        outcome,
        clear_storage,
    }
}
