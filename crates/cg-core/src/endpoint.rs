//! Backend deployment variants.
//!
//! The backend has been deployed under a few path layouts with slightly
//! different response shapes and session conventions. A [`Variant`] names one
//! layout; everything path- or schema-dependent is derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ResponseSchema
// ---------------------------------------------------------------------------

/// Shape of the predict endpoint's JSON response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSchema {
    /// `{disease, confidence, severity, recommendation, explanation}`
    Standard,
    /// `{disease, confidence, advisory, alert}`
    Advisory,
}

// ---------------------------------------------------------------------------
// SessionScheme
// ---------------------------------------------------------------------------

/// Which set of keys proves a user is logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionScheme {
    /// `email`, `loggedIn`, `authToken`, all required.
    Strict,
    /// `email` and `userName`; only `email` gates access.
    Legacy,
}

impl SessionScheme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for SessionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// A backend deployment layout.
///
/// | Variant   | auth                 | predict        | schema   | session |
/// |-----------|----------------------|----------------|----------|---------|
/// | `root`    | `/register`          | `/predict`     | standard | strict  |
/// | `api`     | `/api/user/register` | `/api/predict` | standard | legacy  |
/// | `analyze` | -                    | `/api/analyze` | advisory | strict  |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Root,
    Api,
    Analyze,
}

impl Variant {
    pub const ALL: [Self; 3] = [Self::Root, Self::Api, Self::Analyze];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Api => "api",
            Self::Analyze => "analyze",
        }
    }

    /// Path of the combined register/login endpoint, if this layout has one.
    #[must_use]
    pub const fn auth_path(self) -> Option<&'static str> {
        match self {
            Self::Root => Some("/register"),
            Self::Api => Some("/api/user/register"),
            Self::Analyze => None,
        }
    }

    #[must_use]
    pub const fn predict_path(self) -> &'static str {
        match self {
            Self::Root => "/predict",
            Self::Api => "/api/predict",
            Self::Analyze => "/api/analyze",
        }
    }

    #[must_use]
    pub const fn alerts_path(self) -> &'static str {
        "/api/alerts"
    }

    #[must_use]
    pub const fn farm_path(self) -> &'static str {
        "/api/addFarm"
    }

    #[must_use]
    pub const fn health_path(self) -> &'static str {
        "/health"
    }

    #[must_use]
    pub const fn response_schema(self) -> ResponseSchema {
        match self {
            Self::Root | Self::Api => ResponseSchema::Standard,
            Self::Analyze => ResponseSchema::Advisory,
        }
    }

    #[must_use]
    pub const fn default_session_scheme(self) -> SessionScheme {
        match self {
            Self::Root | Self::Analyze => SessionScheme::Strict,
            Self::Api => SessionScheme::Legacy,
        }
    }

    /// Whether the predict form carries `email`, `crop_type` and `location`
    /// alongside the image.
    #[must_use]
    pub const fn sends_metadata(self) -> bool {
        !matches!(self, Self::Analyze)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown variant '{s}' (expected root, api, or analyze)"))
    }
}

/// Join a base URL and an endpoint path without doubling the slash.
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Variant::Root, Some("/register"), "/predict")]
    #[case(Variant::Api, Some("/api/user/register"), "/api/predict")]
    #[case(Variant::Analyze, None, "/api/analyze")]
    fn variant_paths(
        #[case] variant: Variant,
        #[case] auth: Option<&str>,
        #[case] predict: &str,
    ) {
        assert_eq!(variant.auth_path(), auth);
        assert_eq!(variant.predict_path(), predict);
        assert_eq!(variant.farm_path(), "/api/addFarm");
    }

    #[test]
    fn analyze_uses_advisory_schema_without_metadata() {
        assert_eq!(Variant::Analyze.response_schema(), ResponseSchema::Advisory);
        assert!(!Variant::Analyze.sends_metadata());
        assert!(Variant::Root.sends_metadata());
    }

    #[test]
    fn api_variant_defaults_to_legacy_session() {
        assert_eq!(Variant::Api.default_session_scheme(), SessionScheme::Legacy);
        assert_eq!(Variant::Root.default_session_scheme(), SessionScheme::Strict);
    }

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("API".parse::<Variant>(), Ok(Variant::Api));
        assert_eq!(" analyze ".parse::<Variant>(), Ok(Variant::Analyze));
        assert!("graphql".parse::<Variant>().is_err());
    }

    #[test]
    fn variant_serde_is_snake_case() {
        let json = serde_json::to_string(&Variant::Analyze).unwrap();
        assert_eq!(json, "\"analyze\"");
    }

    #[test]
    fn join_url_handles_trailing_slash() {
        assert_eq!(
            join_url("http://127.0.0.1:5000/", "/predict"),
            "http://127.0.0.1:5000/predict"
        );
        assert_eq!(
            join_url("http://127.0.0.1:5000", "/predict"),
            "http://127.0.0.1:5000/predict"
        );
    }
}
