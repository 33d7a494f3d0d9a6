//! Core data types for the user store

use serde::{Deserialize, Serialize};

/// A user record as held by the store.
///
/// The password is only ever kept as an Argon2id hash and never leaves the
/// store; reads hand out [`UserSummary`] instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned id, immutable after creation
    pub id: u64,

    /// Login identifier
    pub email: String,

    /// Password hash (PHC format)
    pub password_hash: String,

    /// Creation timestamp (Unix timestamp)
    pub created_at: i64,

    /// Last update timestamp (Unix timestamp)
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl UserRecord {
    /// The password-free view of this record.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// The readable shape of a user: id and email only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: u64,
    pub email: String,
}

/// Fields to merge into an existing user.
///
/// `None` and empty strings both mean "leave unchanged".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserUpdate {
    /// Update only the email.
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: None,
        }
    }

    /// Update only the password.
    pub fn password(password: impl Into<String>) -> Self {
        Self {
            email: None,
            password: Some(password.into()),
        }
    }

    /// The email to apply, if one was supplied and is not blank.
    pub fn new_email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    /// The password to apply, if one was supplied and is not blank.
    ///
    /// Unlike the email, the password is returned untrimmed: it is hashed
    /// exactly as typed, the same way `create` hashes it.
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// True when applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.new_email().is_none() && self.new_password().is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
