//! # cg-config
//!
//! Layered configuration loading for the CropGuard client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CROPGUARD_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.cropguard/config.toml`
//! 4. User-level `~/.config/cropguard/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CROPGUARD_API__BASE_URL` -> `api.base_url`,
//! `CROPGUARD_SESSION__BACKEND` -> `session.backend`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use cg_config::CropGuardConfig;
//!
//! let config = CropGuardConfig::load_with_dotenv(None).expect("config");
//! println!("backend: {} ({})", config.api.base_url, config.api.variant);
//! ```

mod api;
mod auth;
mod error;
mod general;
mod session;

pub use api::{ApiConfig, DEFAULT_BASE_URL};
pub use auth::AuthConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use session::{SessionBackend, SessionConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "CROPGUARD_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CropGuardConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CropGuardConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env`
    /// support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or stack more providers.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".cropguard/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.general.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cropguard").join("config.toml"))
    }
}
