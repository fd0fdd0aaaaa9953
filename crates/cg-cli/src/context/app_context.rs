use anyhow::Context;
use cg_client::CropGuardClient;
use cg_config::CropGuardConfig;
use cg_core::{SessionScheme, TokenPolicy};
use cg_session::SessionStore;

use crate::bootstrap;

/// Everything a backend-facing command needs.
pub struct AppContext {
    config: CropGuardConfig,
    store: Box<dyn SessionStore>,
    client: CropGuardClient,
}

impl AppContext {
    pub fn init(config: CropGuardConfig) -> anyhow::Result<Self> {
        let store = bootstrap::open_store(&config.session)?;
        let client = CropGuardClient::new(
            config.api.base_url.clone(),
            config.api.variant,
            config.api.timeout(),
        )
        .context("failed to build HTTP client")?;

        tracing::debug!(
            base_url = %config.api.base_url,
            variant = %config.api.variant,
            store = %store.describe(),
            "application context ready"
        );

        Ok(Self {
            config,
            store,
            client,
        })
    }

    pub const fn config(&self) -> &CropGuardConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    pub const fn client(&self) -> &CropGuardClient {
        &self.client
    }

    pub fn scheme(&self) -> SessionScheme {
        self.config.api.session_scheme()
    }

    pub const fn token_policy(&self) -> TokenPolicy {
        self.config.auth.token_policy
    }
}
