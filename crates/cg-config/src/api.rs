//! Backend API configuration.

use std::time::Duration;

use cg_core::{SessionScheme, Variant};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the backend (no trailing path).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path layout and response schema of the deployment.
    #[serde(default)]
    pub variant: Variant,

    /// Whole-request timeout. `0` waits forever.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Overrides the variant's default session scheme.
    #[serde(default)]
    pub session_scheme: Option<SessionScheme>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            variant: Variant::default(),
            timeout_secs: default_timeout_secs(),
            session_scheme: None,
        }
    }
}

impl ApiConfig {
    /// Session scheme in effect: the override, else the variant default.
    #[must_use]
    pub fn session_scheme(&self) -> SessionScheme {
        self.session_scheme
            .unwrap_or_else(|| self.variant.default_session_scheme())
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: "must not be empty".into(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("'{url}' must start with http:// or https://"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.variant, Variant::Root);
        assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.session_scheme(), SessionScheme::Strict);
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(config.timeout().is_none());
    }

    #[test]
    fn scheme_override_beats_variant_default() {
        let config = ApiConfig {
            variant: Variant::Api,
            session_scheme: Some(SessionScheme::Strict),
            ..ApiConfig::default()
        };
        assert_eq!(config.session_scheme(), SessionScheme::Strict);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = ApiConfig {
            base_url: "ftp://example.com".into(),
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
