//! Where session markers are persisted.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionBackend {
    /// JSON file under the home directory.
    #[default]
    File,
    /// OS keychain, falling back to the file when unavailable.
    Keyring,
    /// Process memory only; nothing survives the command.
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub backend: SessionBackend,

    /// Session file path. Empty means `~/.cropguard/session.json`.
    #[serde(default)]
    pub path: String,
}

impl SessionConfig {
    /// Explicit session file path, if one is configured.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        let path = self.path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}
