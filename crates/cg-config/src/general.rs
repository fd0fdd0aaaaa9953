//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default recent-results list length.
const fn default_recent_limit() -> usize {
    cg_core::recent::DEFAULT_RECENT_LIMIT
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Maximum entries kept in the in-memory recent results list.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

impl GeneralConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.recent_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.recent_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
