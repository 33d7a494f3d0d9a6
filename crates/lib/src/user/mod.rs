//! User store for Roster
//!
//! Holds the authoritative user records, hashes passwords with Argon2id,
//! and optionally persists everything to a JSON file.

pub mod crypto;
pub mod errors;
mod persistence;
pub mod store;
pub mod types;

pub use errors::UserError;
pub use store::{InMemoryUserStore, UserStore};
pub use types::*;
