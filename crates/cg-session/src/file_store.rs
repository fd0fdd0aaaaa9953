//! JSON file session storage, `~/.cropguard/session.json` by default.

use std::fs;
use std::path::{Path, PathBuf};

use cg_core::SessionState;

use crate::error::SessionError;
use crate::store::{SessionStore, parse_state, render_state};

const SESSION_DIR_NAME: &str = ".cropguard";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under the home directory.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoHome`] if the home directory is unknown.
    pub fn at_default_path() -> Result<Self, SessionError> {
        default_path().map(Self::new)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `~/.cropguard/session.json`
///
/// # Errors
///
/// Returns [`SessionError::NoHome`] if the home directory is unknown.
pub fn default_path() -> Result<PathBuf, SessionError> {
    dirs::home_dir()
        .map(|h| h.join(SESSION_DIR_NAME).join(SESSION_FILE_NAME))
        .ok_or(SessionError::NoHome)
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<SessionState, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => parse_state(&self.describe(), &raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SessionState::new()),
            Err(e) => Err(SessionError::io(&self.path, e)),
        }
    }

    fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| SessionError::io(parent, e))?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        fs::write(&self.path, render_state(state)).map_err(|e| SessionError::io(&self.path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|e| SessionError::io(&self.path, e))?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::io(&self.path, e)),
        }
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
