use serde::{Deserialize, Serialize};

use crate::auth::password::{self, PasswordScheme};
use crate::error::PasswordError;

/// User record in the wallet document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String, // unique key
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String, // digest, never plaintext
}

impl User {
    /// Builds a user with the unsalted SHA-256 digest of `password`.
    pub fn new(username: impl Into<String>, email: impl Into<String>, password: &str) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password::hash(password),
        }
    }

    pub fn with_scheme(
        username: impl Into<String>,
        email: impl Into<String>,
        password: &str,
        scheme: PasswordScheme,
    ) -> Result<Self, PasswordError> {
        Ok(Self {
            username: username.into(),
            email: email.into(),
            password_hash: password::hash_password(password, scheme)?,
        })
    }
}
