//! Session tokens issued by the service
//!
//! Provides in-memory storage mapping opaque tokens to the id of the user who
//! logged in with them.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

/// Opaque session token (a random UUID)
pub type SessionToken = String;

/// In-memory token registry
///
/// Tokens are ephemeral and lost on server restart. They carry no expiry;
/// a token lives until it is revoked by logout or its user is deleted.
#[derive(Clone, Debug, Default)]
pub struct TokenRegistry {
    tokens: Arc<RwLock<HashMap<SessionToken, u64>>>,
}

impl TokenRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for a user
    pub async fn issue(&self, user_id: u64) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.clone(), user_id);
        token
    }

    /// The user a token was issued to, if it is still live
    pub async fn user_for(&self, token: &str) -> Option<u64> {
        let tokens = self.tokens.read().await;
        tokens.get(token).copied()
    }

    /// Revoke a single token, returning whether it was live
    pub async fn revoke(&self, token: &str) -> bool {
        let mut tokens = self.tokens.write().await;
        tokens.remove(token).is_some()
    }

    /// Revoke every token belonging to a user, returning how many were dropped
    pub async fn revoke_user(&self, user_id: u64) -> usize {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, owner| *owner != user_id);
        before - tokens.len()
    }

    /// Get the number of live tokens (for debugging)
    pub async fn token_count(&self) -> usize {
        let tokens = self.tokens.read().await;
        tokens.len()
    }
}
