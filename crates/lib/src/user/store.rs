//! The user store: trait and in-memory implementation.

use std::path::Path;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{
    crypto,
    errors::UserError,
    persistence,
    types::{UserRecord, UserSummary, UserUpdate},
};
use crate::Result;

/// Authoritative holder of user records.
///
/// Implementations must be `Send` and `Sync` so one store can be shared by
/// every request the service handles. Operations are individually atomic but
/// there is no isolation between callers: concurrent writers race and the last
/// write wins.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All current users in insertion order.
    async fn list(&self) -> Result<Vec<UserSummary>>;

    /// The user with the given id, or [`UserError::NotFound`].
    async fn get_by_id(&self, id: u64) -> Result<UserSummary>;

    /// Creates a user with a fresh id.
    ///
    /// Fails with [`UserError::EmptyField`] when the email or password is blank.
    async fn create(&self, email: &str, password: &str) -> Result<UserSummary>;

    /// Merges the supplied fields into an existing user, leaving the rest unchanged.
    async fn update(&self, id: u64, update: UserUpdate) -> Result<UserSummary>;

    /// Removes a user. Deleting a missing id is an error, not a no-op.
    async fn delete(&self, id: u64) -> Result<()>;

    /// Checks a login attempt against the stored password hashes.
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserSummary>;

    /// Number of users currently stored.
    async fn count(&self) -> Result<usize>;
}

/// Mutable contents of an [`InMemoryUserStore`].
#[derive(Debug, Default, Clone)]
pub(crate) struct StoreState {
    /// Highest id ever handed out; ids are never reused
    pub(crate) last_id: u64,
    pub(crate) users: Vec<UserRecord>,
}

impl StoreState {
    fn position(&self, id: u64) -> Option<usize> {
        self.users.iter().position(|u| u.id == id)
    }
}

/// A user store kept entirely in memory.
///
/// Records live in a `Vec` so listing preserves insertion order. The whole
/// state can be saved to and restored from a JSON file.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    pub(crate) state: RwLock<StoreState>,
}

impl InMemoryUserStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_state(state: StoreState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Saves every record and the id counter to `path` as JSON.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persistence::save_to_file(self, path).await
    }

    /// Loads a store from `path`.
    ///
    /// If the file does not exist, a new, empty store is returned.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        persistence::load_from_file(path).await
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<UserSummary>> {
        let state = self.state.read().await;
        Ok(state.users.iter().map(UserRecord::summary).collect())
    }

    async fn get_by_id(&self, id: u64) -> Result<UserSummary> {
        let state = self.state.read().await;
        state
            .users
            .iter()
            .find(|u| u.id == id)
            .map(UserRecord::summary)
            .ok_or_else(|| UserError::NotFound { id }.into())
    }

    async fn create(&self, email: &str, password: &str) -> Result<UserSummary> {
        let email = email.trim();
        if email.is_empty() {
            return Err(UserError::EmptyField { field: "email" }.into());
        }
        if password.trim().is_empty() {
            return Err(UserError::EmptyField { field: "password" }.into());
        }

        // Hash before taking the lock; Argon2 is deliberately slow
        let password_hash = crypto::hash_password(password)?;

        let mut state = self.state.write().await;
        state.last_id += 1;
        let record = UserRecord {
            id: state.last_id,
            email: email.to_string(),
            password_hash,
            created_at: chrono::Utc::now().timestamp(),
            updated_at: None,
        };
        let summary = record.summary();
        state.users.push(record);

        info!(id = summary.id, email = %summary.email, "Created user");
        Ok(summary)
    }

    async fn update(&self, id: u64, update: UserUpdate) -> Result<UserSummary> {
        if self.state.read().await.position(id).is_none() {
            return Err(UserError::NotFound { id }.into());
        }

        let password_hash = match update.new_password() {
            Some(password) => Some(crypto::hash_password(password)?),
            None => None,
        };

        let mut state = self.state.write().await;
        // The user may have been deleted while the password was hashing
        let index = state.position(id).ok_or(UserError::NotFound { id })?;
        let record = &mut state.users[index];

        if let Some(email) = update.new_email() {
            record.email = email.to_string();
        }
        if let Some(hash) = password_hash {
            record.password_hash = hash;
        }
        if !update.is_empty() {
            record.updated_at = Some(chrono::Utc::now().timestamp());
        }

        debug!(id, "Updated user");
        Ok(record.summary())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let mut state = self.state.write().await;
        let index = state.position(id).ok_or(UserError::NotFound { id })?;
        let removed = state.users.remove(index);

        info!(id, email = %removed.email, "Deleted user");
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<UserSummary> {
        let email = email.trim();
        let candidates: Vec<UserRecord> = {
            let state = self.state.read().await;
            state
                .users
                .iter()
                .filter(|u| u.email == email)
                .cloned()
                .collect()
        };

        candidates
            .iter()
            .find(|u| crypto::verify_password(password, &u.password_hash))
            .map(UserRecord::summary)
            .ok_or_else(|| UserError::InvalidCredentials.into())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.state.read().await.users.len())
    }
}
