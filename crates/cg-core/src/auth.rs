//! Login/register form state, validation, and turning a successful auth
//! response into a session marker.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::control::SubmitControl;
use crate::endpoint::SessionScheme;
use crate::errors::FlowError;
use crate::session::SessionMarker;

pub const MSG_CREDENTIALS_REQUIRED: &str = "Email and password required";
pub const MSG_NAME_REQUIRED: &str = "Name required for registration";
pub const MSG_MISSING_TOKEN: &str = "Server did not issue a token";

const SYNTHETIC_TOKEN_PREFIX: &str = "verified_";

// ---------------------------------------------------------------------------
// AuthMode
// ---------------------------------------------------------------------------

/// Intent of the auth form. The backend serves both through one endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    /// Label of the submit control while idle.
    #[must_use]
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TokenPolicy
// ---------------------------------------------------------------------------

/// What to do when a successful auth response carries no token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPolicy {
    /// Store `verified_<unix millis>` in place of the missing token.
    #[default]
    Synthesize,
    /// Fail the login; only the server may issue tokens.
    Server,
}

// ---------------------------------------------------------------------------
// Form, request, response
// ---------------------------------------------------------------------------

/// Raw field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// JSON body posted to the auth endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AuthRequest {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub name: String,
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("mode", &self.mode)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Body returned by the auth endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Validate the form for `mode` and build the request body.
///
/// All fields are trimmed. No request may be sent when this fails.
///
/// # Errors
///
/// Returns [`FlowError::Validation`] when email or password is blank, or when
/// registering without a name.
pub fn validate(mode: AuthMode, form: &AuthForm) -> Result<AuthRequest, FlowError> {
    let email = form.email.trim();
    let password = form.password.trim();
    let name = form.name.trim();

    if email.is_empty() || password.is_empty() {
        return Err(FlowError::validation(MSG_CREDENTIALS_REQUIRED));
    }
    if mode == AuthMode::Register && name.is_empty() {
        return Err(FlowError::validation(MSG_NAME_REQUIRED));
    }

    Ok(AuthRequest {
        mode,
        email: email.to_string(),
        password: password.to_string(),
        name: name.to_string(),
    })
}

/// Token stored when the server omits one under [`TokenPolicy::Synthesize`].
#[must_use]
pub fn synthetic_token(now: DateTime<Utc>) -> String {
    format!("{SYNTHETIC_TOKEN_PREFIX}{}", now.timestamp_millis())
}

/// Build the marker to persist after a 2xx auth response.
///
/// # Errors
///
/// Returns [`FlowError::Server`] when the strict scheme needs a token, the
/// server sent none, and the policy is [`TokenPolicy::Server`].
pub fn session_marker(
    request: &AuthRequest,
    response: &AuthResponse,
    policy: TokenPolicy,
    scheme: SessionScheme,
    now: DateTime<Utc>,
) -> Result<SessionMarker, FlowError> {
    match scheme {
        SessionScheme::Strict => {
            let server_token = response
                .token
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty());
            let token = match (server_token, policy) {
                (Some(token), _) => token.to_string(),
                (None, TokenPolicy::Synthesize) => {
                    tracing::debug!(email = %request.email, "auth response had no token; synthesizing one");
                    synthetic_token(now)
                }
                (None, TokenPolicy::Server) => {
                    return Err(FlowError::server(200, Some(MSG_MISSING_TOKEN.into())));
                }
            };
            Ok(SessionMarker::strict(&request.email, token))
        }
        SessionScheme::Legacy => {
            let user_name = if request.name.is_empty() {
                request
                    .email
                    .split('@')
                    .next()
                    .unwrap_or(&request.email)
                    .to_string()
            } else {
                request.name.clone()
            };
            Ok(SessionMarker::legacy(&request.email, user_name))
        }
    }
}

// ---------------------------------------------------------------------------
// AuthPanel
// ---------------------------------------------------------------------------

/// Form-level state of the login/register panel.
#[derive(Debug)]
pub struct AuthPanel {
    mode: AuthMode,
    error: Option<String>,
    control: SubmitControl,
}

impl Default for AuthPanel {
    fn default() -> Self {
        Self::new(AuthMode::Login)
    }
}

impl AuthPanel {
    pub const BUSY_LABEL: &'static str = "Loading...";

    #[must_use]
    pub const fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            error: None,
            control: SubmitControl::new(mode.submit_label(), Self::BUSY_LABEL),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Switch tabs. Clears any displayed error.
    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.error = None;
        self.control.set_idle_label(mode.submit_label());
    }

    /// The name field is only shown (and required) when registering.
    #[must_use]
    pub fn name_visible(&self) -> bool {
        self.mode == AuthMode::Register
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn show_error(&mut self, error: &FlowError) {
        self.error = Some(error.user_message().to_string());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    #[must_use]
    pub const fn control(&self) -> &SubmitControl {
        &self.control
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn form(email: &str, password: &str, name: &str) -> AuthForm {
        AuthForm {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_123).unwrap()
    }

    #[rstest]
    #[case("", "secret")]
    #[case("   ", "secret")]
    #[case("a@b.c", "")]
    #[case("a@b.c", " \t ")]
    fn blank_credentials_fail_validation(#[case] email: &str, #[case] password: &str) {
        for mode in [AuthMode::Login, AuthMode::Register] {
            let err = validate(mode, &form(email, password, "Asha")).unwrap_err();
            assert_eq!(err, FlowError::validation(MSG_CREDENTIALS_REQUIRED));
        }
    }

    #[test]
    fn register_requires_name() {
        let err = validate(AuthMode::Register, &form("a@b.c", "pw", "  ")).unwrap_err();
        assert_eq!(err.user_message(), "Name required for registration");
    }

    #[test]
    fn login_does_not_require_name() {
        let request = validate(AuthMode::Login, &form(" a@b.c ", " pw ", "")).unwrap();
        assert_eq!(request.email, "a@b.c");
        assert_eq!(request.password, "pw");
        assert_eq!(request.name, "");
    }

    #[test]
    fn request_body_has_mode_and_fields() {
        let request = validate(AuthMode::Register, &form("a@b.c", "pw", "Asha")).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mode": "register",
                "email": "a@b.c",
                "password": "pw",
                "name": "Asha",
            })
        );
    }

    #[test]
    fn request_debug_redacts_password() {
        let request = validate(AuthMode::Login, &form("a@b.c", "hunter2", "")).unwrap();
        let debug = format!("{request:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn server_token_is_stored() {
        let request = validate(AuthMode::Login, &form("a@b.c", "pw", "")).unwrap();
        let response = AuthResponse {
            token: Some("jwt-abc".into()),
            error: None,
        };
        let marker = session_marker(
            &request,
            &response,
            TokenPolicy::Server,
            SessionScheme::Strict,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(marker, SessionMarker::strict("a@b.c", "jwt-abc"));
    }

    #[test]
    fn missing_token_is_synthesized() {
        let request = validate(AuthMode::Login, &form("a@b.c", "pw", "")).unwrap();
        let marker = session_marker(
            &request,
            &AuthResponse::default(),
            TokenPolicy::Synthesize,
            SessionScheme::Strict,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(
            marker.auth_token.as_deref(),
            Some("verified_1700000000123")
        );
    }

    #[test]
    fn missing_token_fails_under_server_policy() {
        let request = validate(AuthMode::Login, &form("a@b.c", "pw", "")).unwrap();
        let err = session_marker(
            &request,
            &AuthResponse::default(),
            TokenPolicy::Server,
            SessionScheme::Strict,
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(err.user_message(), MSG_MISSING_TOKEN);
    }

    #[test]
    fn legacy_marker_derives_user_name_from_email() {
        let request = validate(AuthMode::Login, &form("asha@farm.in", "pw", "")).unwrap();
        let marker = session_marker(
            &request,
            &AuthResponse::default(),
            TokenPolicy::Server,
            SessionScheme::Legacy,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(marker.user_name.as_deref(), Some("asha"));
    }

    #[test]
    fn response_ignores_unknown_fields() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"status":"ok","email":"a@b.c","user":{"id":1}}"#).unwrap();
        assert_eq!(response, AuthResponse::default());
    }

    #[test]
    fn switching_mode_clears_error_and_toggles_name() {
        let mut panel = AuthPanel::default();
        assert!(!panel.name_visible());
        assert_eq!(panel.control().label(), "Login");

        panel.show_error(&FlowError::validation(MSG_CREDENTIALS_REQUIRED));
        assert_eq!(panel.error(), Some(MSG_CREDENTIALS_REQUIRED));

        panel.set_mode(AuthMode::Register);
        assert!(panel.error().is_none());
        assert!(panel.name_visible());
        assert_eq!(panel.control().label(), "Register");
    }
}
