//! # cg-session
//!
//! Persistent session storage for the CropGuard client.
//!
//! This is the thin adapter between `cg-core`'s pure session logic and real
//! storage: a [`SessionStore`] trait with file, keychain and in-memory
//! implementations, plus the three operations that touch stored markers:
//! [`guard`] on every gated invocation, [`persist`] after a successful login,
//! and [`logout`].

pub mod error;
pub mod file_store;
pub mod keyring_store;
pub mod store;

pub use error::SessionError;
pub use file_store::FileStore;
pub use keyring_store::KeyringStore;
pub use store::{MemoryStore, SessionStore};

use cg_core::session::{self, GuardDecision, Page, SessionMarker, SessionState};
use cg_core::SessionScheme;

/// Run the session guard for a page load.
///
/// Reads the store once and clears all session storage when the stored
/// markers are incomplete. Unreadable (corrupt) data counts as incomplete.
///
/// # Errors
///
/// Returns [`SessionError`] if the store cannot be read or cleared.
pub fn guard(
    store: &dyn SessionStore,
    page: Page,
    scheme: SessionScheme,
) -> Result<GuardDecision, SessionError> {
    let state = match store.load() {
        Ok(state) => state,
        Err(SessionError::Corrupt { location, reason }) => {
            tracing::warn!(%location, %reason, "discarding corrupt session data");
            store.clear()?;
            SessionState::new()
        }
        Err(other) => return Err(other),
    };

    let decision = session::evaluate(&state, page, scheme);
    if decision.clear_storage {
        tracing::debug!(store = %store.describe(), "incomplete session markers; clearing storage");
        store.clear()?;
    }
    Ok(decision)
}

/// Write a marker after a successful login, keeping unrelated keys.
///
/// # Errors
///
/// Returns [`SessionError`] if the store cannot be read or written.
pub fn persist(
    store: &dyn SessionStore,
    marker: &SessionMarker,
    scheme: SessionScheme,
) -> Result<(), SessionError> {
    let mut state = store.load().unwrap_or_else(|error| {
        tracing::warn!(%error, "overwriting unreadable session data");
        SessionState::new()
    });
    marker.write_to(&mut state, scheme);
    store.save(&state)?;
    tracing::debug!(email = %marker.email, store = %store.describe(), "session markers persisted");
    Ok(())
}

/// Clear all session storage. No confirmation, no server call.
///
/// # Errors
///
/// Returns [`SessionError`] if existing storage cannot be removed.
pub fn logout(store: &dyn SessionStore) -> Result<(), SessionError> {
    store.clear()
}
