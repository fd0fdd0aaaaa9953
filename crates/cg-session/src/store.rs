//! The storage seam and the in-memory store.

use std::sync::Mutex;

use cg_core::SessionState;

use crate::error::SessionError;

/// Persistent key-value session storage.
///
/// Stores hold the whole map: reads return a snapshot, writes replace it.
pub trait SessionStore: Send + Sync {
    /// Read the current state. Missing storage reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Corrupt`] if stored data cannot be parsed, or
    /// an I/O / keyring error if it cannot be read.
    fn load(&self) -> Result<SessionState, SessionError>;

    /// Replace the stored state.
    ///
    /// # Errors
    ///
    /// Returns an I/O or keyring error if the state cannot be written.
    fn save(&self, state: &SessionState) -> Result<(), SessionError>;

    /// Erase all session storage.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if existing storage cannot be removed.
    fn clear(&self) -> Result<(), SessionError>;

    /// Short human-readable location, e.g. `file:/home/u/.cropguard/session.json`.
    fn describe(&self) -> String;
}

/// Session storage that lives only as long as the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<SessionState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(state: SessionState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<SessionState, SessionError> {
        Ok(self.lock().clone())
    }

    fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        *self.lock() = state.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.lock().clear();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Parse stored JSON into a session state.
pub(crate) fn parse_state(location: &str, raw: &str) -> Result<SessionState, SessionError> {
    if raw.trim().is_empty() {
        return Ok(SessionState::new());
    }
    serde_json::from_str(raw).map_err(|e| SessionError::Corrupt {
        location: location.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn render_state(state: &SessionState) -> String {
    // A flat string map always serializes.
    serde_json::to_string_pretty(state).unwrap_or_else(|_| String::from("{}"))
}
