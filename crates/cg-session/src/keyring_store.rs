//! OS keychain session storage with a file fallback.

use cg_core::SessionState;

use crate::error::SessionError;
use crate::file_store::FileStore;
use crate::store::{SessionStore, parse_state, render_state};

const DEFAULT_KEYRING_SERVICE: &str = "cropguard-cli";
const KEYRING_USER: &str = "session";

/// Returns the keyring service name.
///
/// Defaults to `"cropguard-cli"`. Override via `CROPGUARD_KEYRING_SERVICE`
/// for testing to avoid touching real credentials.
fn keyring_service() -> String {
    std::env::var("CROPGUARD_KEYRING_SERVICE")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Keeps the session map in the OS keychain.
///
/// Reads fall back to `fallback` when the keychain has no entry or is
/// unavailable; writes fall back to it when the keychain rejects them.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
    fallback: FileStore,
}

impl KeyringStore {
    #[must_use]
    pub fn new(fallback: FileStore) -> Self {
        Self {
            service: keyring_service(),
            fallback,
        }
    }

    fn entry(&self) -> Result<keyring::Entry, SessionError> {
        keyring::Entry::new(&self.service, KEYRING_USER)
            .map_err(|e| SessionError::Keyring(e.to_string()))
    }
}

impl SessionStore for KeyringStore {
    fn load(&self) -> Result<SessionState, SessionError> {
        match self.entry().map(|entry| entry.get_password()) {
            Ok(Ok(raw)) if !raw.trim().is_empty() => parse_state(&self.describe(), &raw),
            Ok(Ok(_) | Err(keyring::Error::NoEntry)) => self.fallback.load(),
            Ok(Err(error)) => {
                tracing::warn!(%error, "keyring read failed; falling back to file");
                self.fallback.load()
            }
            Err(error) => {
                tracing::warn!(%error, "keyring unavailable; falling back to file");
                self.fallback.load()
            }
        }
    }

    fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        match self.entry() {
            Ok(entry) => match entry.set_password(&render_state(state)) {
                Ok(()) => Ok(()),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    self.fallback.save(state)
                }
            },
            Err(error) => {
                tracing::warn!(%error, "keyring unavailable; falling back to file");
                self.fallback.save(state)
            }
        }
    }

    fn clear(&self) -> Result<(), SessionError> {
        // An unavailable keychain holds nothing to clear.
        let deleted = self
            .entry()
            .map_or(Ok(()), |entry| deletion_outcome(entry.delete_credential()));
        self.fallback.clear()?;
        deleted
    }

    fn describe(&self) -> String {
        format!("keyring:{} ({})", self.service, self.fallback.describe())
    }
}

/// A missing entry counts as deleted; any other failure leaves a session
/// behind that `load` would still read.
fn deletion_outcome(result: keyring::Result<()>) -> Result<(), SessionError> {
    match result {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(error) => Err(SessionError::Keyring(error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletion_treats_missing_entry_as_cleared() {
        assert!(deletion_outcome(Ok(())).is_ok());
        assert!(deletion_outcome(Err(keyring::Error::NoEntry)).is_ok());
    }

    #[test]
    fn deletion_surfaces_platform_failures() {
        let failure = keyring::Error::PlatformFailure(Box::new(std::io::Error::other("denied")));
        let err = deletion_outcome(Err(failure)).unwrap_err();
        assert!(matches!(err, SessionError::Keyring(ref msg) if msg.contains("denied")));
    }

    #[test]
    fn describe_names_service_and_fallback() {
        let store = KeyringStore::new(FileStore::new("/tmp/cg/session.json"));
        let described = store.describe();
        assert!(described.starts_with("keyring:"));
        assert!(described.contains("file:/tmp/cg/session.json"));
    }
}
