use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("home directory not found; cannot locate session file")]
    NoHome,

    #[error("session store I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored data exists but is not a flat JSON object of strings.
    #[error("session data in {location} is corrupt: {reason}")]
    Corrupt { location: String, reason: String },

    #[error("keyring error: {0}")]
    Keyring(String),
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
