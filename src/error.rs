//! Error types for the wallet core.
//!
//! Only failures the caller cannot branch on live here. Wrong credentials,
//! duplicate usernames and empty histories are ordinary return values.

use std::io;
use std::path::PathBuf;

/// Failures touching the backing JSON file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read store file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse store file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode store document: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write store file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("argon2 hash_password failed: {0}")]
    Hash(String),
}

/// Errors surfaced by the auth and payment services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Password(#[from] PasswordError),
}
