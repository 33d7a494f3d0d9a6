//! Persistence operations for the in-memory user store
//!
//! This module handles serialization and file I/O for saving/loading
//! the store state to/from JSON files.

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Deserializer, Serialize};

use super::{
    errors::UserError,
    store::{InMemoryUserStore, StoreState},
    types::UserRecord,
};
use crate::Result;

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the persistence version during deserialization.
fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// Serializable version of the store for persistence
#[derive(Serialize, Deserialize)]
struct SerializableStore {
    /// File format version for compatibility checking
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    #[serde(default)]
    last_id: u64,
    #[serde(default)]
    users: Vec<UserRecord>,
}

impl SerializableStore {
    fn into_state(self) -> Result<StoreState> {
        let mut seen = HashSet::new();
        for user in &self.users {
            if !seen.insert(user.id) {
                return Err(UserError::UnsupportedFormat {
                    reason: format!("duplicate user id {}", user.id),
                }
                .into());
            }
        }

        // An older or hand-edited file may lag behind its own records
        let max_id = self.users.iter().map(|u| u.id).max().unwrap_or(0);
        Ok(StoreState {
            last_id: self.last_id.max(max_id),
            users: self.users,
        })
    }
}

/// Saves the entire store state to a specified file as JSON.
pub(crate) async fn save_to_file<P: AsRef<Path>>(store: &InMemoryUserStore, path: P) -> Result<()> {
    let serializable = {
        let state = store.state.read().await;
        SerializableStore {
            version: PERSISTENCE_VERSION,
            last_id: state.last_id,
            users: state.users.clone(),
        }
    };

    let json = serde_json::to_string_pretty(&serializable)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Loads the store state from a specified JSON file.
///
/// If the file does not exist, a new, empty store is returned.
pub(crate) async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<InMemoryUserStore> {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => {
            let serializable: SerializableStore = serde_json::from_str(&json)?;
            Ok(InMemoryUserStore::from_state(serializable.into_state()?))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(InMemoryUserStore::new()),
        Err(e) => Err(e.into()),
    }
}
