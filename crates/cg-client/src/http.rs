//! Shared HTTP response helpers.
//!
//! Maps transport failures and non-2xx statuses onto [`FlowError`] so the
//! endpoint methods only build requests and decode bodies.

use cg_core::FlowError;
use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// A request that could not complete.
pub fn transport(error: &reqwest::Error) -> FlowError {
    FlowError::Transport(error.to_string())
}

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. Otherwise the body's `error`
/// field becomes the message; bodies without one get the generic message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, FlowError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error);
    tracing::debug!(status = status.as_u16(), ?message, "backend rejected request");
    Err(FlowError::server(status.as_u16(), message))
}

/// Read a success body as bytes.
pub async fn read_body(resp: reqwest::Response) -> Result<Vec<u8>, FlowError> {
    resp.bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| transport(&e))
}

/// Decode a success body; unreadable JSON counts as a failed request.
pub fn decode<T: serde::de::DeserializeOwned>(what: &str, body: &[u8]) -> Result<T, FlowError> {
    serde_json::from_slice(body)
        .map_err(|e| FlowError::Transport(format!("invalid {what} response: {e}")))
}
