//! Session holder for the API client
//!
//! A session is at most one opaque token. The client reads it before every
//! request; login sets it and logout clears it. There is no expiry or refresh.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use crate::Result;

/// Well-known name the token is stored under.
pub const SESSION_KEY: &str = "token";

/// Storage for the current session token.
pub trait SessionStorage: Send + Sync {
    /// Store a token, replacing any existing one.
    fn set(&self, token: &str) -> Result<()>;

    /// The current token, if any.
    fn get(&self) -> Option<String>;

    /// Forget the token; later `get` calls return `None`.
    fn clear(&self) -> Result<()>;
}

/// Process-local session, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemorySession {
    token: RwLock<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySession {
    fn set(&self, token: &str) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Session persisted in a small JSON file so it survives restarts.
///
/// The file holds a string map; the token lives under [`SESSION_KEY`].
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl SessionStorage for FileSession {
    fn set(&self, token: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking login
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(SESSION_KEY.to_string(), token.to_string());
        self.write_entries(&entries)
    }

    fn get(&self) -> Option<String> {
        match self.read_entries() {
            Ok(mut entries) => entries.remove(SESSION_KEY),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {}: {e}", self.path.display());
                None
            }
        }
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.remove(SESSION_KEY);
        if entries.is_empty() {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        } else {
            self.write_entries(&entries)
        }
    }
}
