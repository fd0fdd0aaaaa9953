use anyhow::Context;
use cg_config::{CropGuardConfig, SessionBackend, SessionConfig};
use cg_session::{FileStore, KeyringStore, MemoryStore, SessionStore};

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config, honoring `--config`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<CropGuardConfig> {
    CropGuardConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load cropguard configuration")
}

/// Open the session store selected by `[session]`.
pub fn open_store(config: &SessionConfig) -> anyhow::Result<Box<dyn SessionStore>> {
    if config.backend == SessionBackend::Memory {
        return Ok(Box::new(MemoryStore::new()));
    }

    let file = match config.path() {
        Some(path) => FileStore::new(path),
        None => FileStore::at_default_path().context("cannot locate the session file")?,
    };

    Ok(match config.backend {
        SessionBackend::Keyring => Box::new(KeyringStore::new(file)),
        SessionBackend::File | SessionBackend::Memory => Box::new(file),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_backend_uses_configured_path() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("session.json");
        let store = open_store(&SessionConfig {
            backend: SessionBackend::File,
            path: path.display().to_string(),
        })
        .expect("store opens");

        assert!(store.describe().contains("session.json"));
        assert!(store.load().expect("empty load").is_empty());
    }

    #[test]
    fn memory_backend_starts_empty() {
        let store = open_store(&SessionConfig {
            backend: SessionBackend::Memory,
            path: String::new(),
        })
        .expect("store opens");
        assert!(store.load().expect("load").is_empty());
    }
}
