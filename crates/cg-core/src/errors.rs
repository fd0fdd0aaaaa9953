//! The three error kinds surfaced by the auth and predict panels.
//!
//! Every failure of a user action maps to one of these. All three are handled
//! the same way by callers: show [`FlowError::user_message`] inline, keep the
//! form input, release the submit control. None are retried.

use thiserror::Error;

/// Generic text shown when a request could not complete.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Generic text shown when the server rejects a request without saying why.
pub const GENERIC_SERVER_MESSAGE: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Local, pre-network failure. The request was never sent.
    #[error("{0}")]
    Validation(String),

    /// The backend answered with a non-2xx status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request could not complete (DNS, refused connection, timeout,
    /// unreadable body).
    #[error("transport error: {0}")]
    Transport(String),
}

impl FlowError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Build a server error from an optional server-supplied message.
    ///
    /// Blank messages fall back to [`GENERIC_SERVER_MESSAGE`].
    pub fn server(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_SERVER_MESSAGE.to_string());
        Self::Server { status, message }
    }

    /// The text displayed to the user for this error.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(message) | Self::Server { message, .. } => message,
            Self::Transport(_) => NETWORK_ERROR_MESSAGE,
        }
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
