//! # cg-client
//!
//! HTTP client for the CropGuard backend and the two user-facing flows built
//! on it:
//! - [`auth_panel::AuthFlow`]: validate, post credentials, persist markers
//! - [`predict_panel::PredictFlow`]: validate, upload an image, render the
//!   diagnosis
//!
//! Every network call is one `async` request returning
//! `Result<_, FlowError>`. There are no retries.

pub mod auth_panel;
pub mod predict_panel;

mod http;

use std::time::Duration;

use cg_core::endpoint::join_url;
use cg_core::{
    AuthRequest, AuthResponse, Diagnosis, FarmRequest, FlowError, PredictRequest, Variant,
};
use serde::{Deserialize, Serialize};

pub use auth_panel::AuthFlow;
pub use predict_panel::{PredictFlow, load_image};

const USER_AGENT: &str = concat!("cropguard/", env!("CARGO_PKG_VERSION"));

/// Backend liveness as reported by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

/// Acknowledgement returned by `POST /api/addFarm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmStatus {
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize)]
struct AlertsBody {
    #[serde(default)]
    alerts: Vec<serde_json::Value>,
}

/// HTTP client bound to one backend deployment.
#[derive(Debug, Clone)]
pub struct CropGuardClient {
    http: reqwest::Client,
    base_url: String,
    variant: Variant,
}

impl CropGuardClient {
    /// Create a client for `base_url` using `variant`'s paths and schema.
    ///
    /// `timeout` of `None` lets a hung request wait indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Transport`] if the underlying client cannot be
    /// built (for example, no TLS backend).
    pub fn new(
        base_url: impl Into<String>,
        variant: Variant,
        timeout: Option<Duration>,
    ) -> Result<Self, FlowError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| http::transport(&e))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            variant,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// `POST` the credentials as JSON to the register/login endpoint.
    ///
    /// # Errors
    ///
    /// - [`FlowError::Validation`] if this deployment has no auth endpoint
    /// - [`FlowError::Server`] on a non-2xx status
    /// - [`FlowError::Transport`] if the request fails or the body is unreadable
    pub async fn authenticate(&self, request: &AuthRequest) -> Result<AuthResponse, FlowError> {
        let path = self.variant.auth_path().ok_or_else(|| {
            FlowError::validation(format!(
                "The '{}' deployment has no login endpoint",
                self.variant
            ))
        })?;
        let url = self.url(path);
        tracing::debug!(%url, mode = %request.mode, email = %request.email, "auth request");

        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| http::transport(&e))?;
        let resp = http::check_response(resp).await?;
        let body = http::read_body(resp).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(AuthResponse::default());
        }
        http::decode("auth", &body)
    }

    /// `POST` the image and metadata as multipart form data.
    ///
    /// # Errors
    ///
    /// - [`FlowError::Server`] on a non-2xx status
    /// - [`FlowError::Transport`] if the request fails or the body does not
    ///   match the deployment's response schema
    pub async fn predict(&self, request: &PredictRequest) -> Result<Diagnosis, FlowError> {
        let url = self.url(self.variant.predict_path());
        tracing::debug!(
            %url,
            email = %request.email,
            image = %request.image.file_name(),
            bytes = request.image.bytes.len(),
            "predict request"
        );

        let form = self.predict_form(request)?;
        let resp = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| http::transport(&e))?;
        let resp = http::check_response(resp).await?;
        let body = http::read_body(resp).await?;
        Diagnosis::decode(self.variant.response_schema(), &body)
            .map_err(|e| FlowError::Transport(format!("invalid predict response: {e}")))
    }

    fn predict_form(&self, request: &PredictRequest) -> Result<reqwest::multipart::Form, FlowError> {
        let image = reqwest::multipart::Part::bytes(request.image.bytes.clone())
            .file_name(request.image.file_name())
            .mime_str(request.image.mime_type)
            .map_err(|e| http::transport(&e))?;

        let form = reqwest::multipart::Form::new();
        let form = if self.variant.sends_metadata() {
            form.text("email", request.email.clone())
                .text("crop_type", request.crop_type.clone())
                .text("location", request.location.clone())
        } else {
            form
        };
        Ok(form.part("image", image))
    }

    /// `POST` a farm record as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Server`] (for example "missing fields") or
    /// [`FlowError::Transport`] as for the other calls.
    pub async fn add_farm(&self, request: &FarmRequest) -> Result<FarmStatus, FlowError> {
        let url = self.url(self.variant.farm_path());
        tracing::debug!(%url, email = %request.email, crop_type = %request.crop_type, "add farm request");

        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| http::transport(&e))?;
        let resp = http::check_response(resp).await?;
        let body = http::read_body(resp).await?;
        http::decode("farm", &body)
    }

    /// `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Server`] or [`FlowError::Transport`] as for the
    /// other calls.
    pub async fn health(&self) -> Result<HealthStatus, FlowError> {
        let url = self.url(self.variant.health_path());
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| http::transport(&e))?;
        let resp = http::check_response(resp).await?;
        let body = http::read_body(resp).await?;
        http::decode("health", &body)
    }

    /// `GET /api/alerts?email=...`: alerts raised by past predictions.
    ///
    /// Alert objects are returned as the backend sends them.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Server`] or [`FlowError::Transport`] as for the
    /// other calls.
    pub async fn alerts(&self, email: &str) -> Result<Vec<serde_json::Value>, FlowError> {
        let url = format!(
            "{}?email={}",
            self.url(self.variant.alerts_path()),
            urlencoding::encode(email)
        );
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| http::transport(&e))?;
        let resp = http::check_response(resp).await?;
        let body = http::read_body(resp).await?;
        http::decode::<AlertsBody>("alerts", &body).map(|b| b.alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cg_core::ImageFile;

    fn request() -> PredictRequest {
        PredictRequest {
            email: "a@b.c".into(),
            crop_type: "Tomato".into(),
            location: "Pune".into(),
            image: ImageFile::new("leaf.png", vec![1, 2, 3]),
        }
    }

    #[test]
    fn urls_join_variant_paths() {
        let client = CropGuardClient::new("http://127.0.0.1:5000/", Variant::Api, None).unwrap();
        assert_eq!(
            client.url(client.variant().predict_path()),
            "http://127.0.0.1:5000/api/predict"
        );
    }

    #[test]
    fn predict_form_builds_for_every_variant() {
        for variant in Variant::ALL {
            let client = CropGuardClient::new("http://localhost", variant, None).unwrap();
            assert!(client.predict_form(&request()).is_ok());
        }
    }

    #[tokio::test]
    async fn analyze_variant_has_no_auth_endpoint() {
        let client = CropGuardClient::new("http://localhost", Variant::Analyze, None).unwrap();
        let auth = AuthRequest {
            mode: cg_core::AuthMode::Login,
            email: "a@b.c".into(),
            password: "pw".into(),
            name: String::new(),
        };
        let err = client.authenticate(&auth).await.unwrap_err();
        assert!(err.is_validation());
    }
}
