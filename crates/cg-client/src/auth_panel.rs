//! The login/register submit flow.

use chrono::Utc;

use cg_core::auth::{self, AuthForm, AuthPanel};
use cg_core::{FlowError, SessionMarker, SessionScheme, SubmitControl, TokenPolicy};
use cg_session::SessionStore;

use crate::CropGuardClient;

/// Returned when the submit control is already held. Flows borrow their panel
/// mutably, so only callers sharing a `SubmitControl` can hit this.
pub const MSG_IN_PROGRESS: &str = "Request already in progress";

/// Everything a submit needs besides the form itself.
pub struct AuthFlow<'a> {
    client: &'a CropGuardClient,
    store: &'a dyn SessionStore,
    scheme: SessionScheme,
    policy: TokenPolicy,
}

impl<'a> AuthFlow<'a> {
    #[must_use]
    pub fn new(
        client: &'a CropGuardClient,
        store: &'a dyn SessionStore,
        scheme: SessionScheme,
        policy: TokenPolicy,
    ) -> Self {
        Self {
            client,
            store,
            scheme,
            policy,
        }
    }

    /// Submit the auth form in the panel's current mode.
    ///
    /// On success the session markers are persisted and the returned marker
    /// is what the dashboard will see. On failure the panel shows the error
    /// message and nothing is persisted. The submit control is released on
    /// every path.
    ///
    /// # Errors
    ///
    /// Returns the [`FlowError`] that is also displayed in the panel.
    pub async fn submit(
        &self,
        panel: &mut AuthPanel,
        form: &AuthForm,
    ) -> Result<SessionMarker, FlowError> {
        panel.clear_error();
        let result = self.run(panel.mode(), panel.control(), form).await;
        if let Err(error) = &result {
            tracing::debug!(%error, mode = %panel.mode(), "auth submit failed");
            panel.show_error(error);
        }
        result
    }

    async fn run(
        &self,
        mode: auth::AuthMode,
        control: &SubmitControl,
        form: &AuthForm,
    ) -> Result<SessionMarker, FlowError> {
        let request = auth::validate(mode, form)?;
        let _busy = control
            .try_begin()
            .ok_or_else(|| FlowError::validation(MSG_IN_PROGRESS))?;

        let response = self.client.authenticate(&request).await?;
        let marker =
            auth::session_marker(&request, &response, self.policy, self.scheme, Utc::now())?;

        cg_session::persist(self.store, &marker, self.scheme)
            .map_err(|e| FlowError::Transport(format!("session storage: {e}")))?;
        tracing::info!(email = %marker.email, mode = %mode, "authenticated");
        Ok(marker)
    }
}
