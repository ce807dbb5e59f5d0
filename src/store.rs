//! Flat-file JSON store.
//!
//! The whole document lives in memory and is rewritten to disk after every
//! mutation. There is no locking: two processes sharing a file race and the
//! last writer wins.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::repo_types::User;
use crate::error::StoreError;
use crate::payments::repo_types::Payment;

/// Everything the wallet knows, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

/// What to do when the backing file exists but cannot be read or parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Boot with an empty document.
    #[default]
    Lenient,
    /// Return the [`StoreError`].
    Strict,
}

impl FromStr for LoadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown load policy `{other}`")),
        }
    }
}

impl fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => f.write_str("lenient"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    pub(crate) doc: Document,
}

impl JsonStore {
    /// Opens the store, masking unreadable files as an empty document.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let doc = Self::load(&path);
        Self::from_parts(path, doc)
    }

    pub fn open_with(path: impl Into<PathBuf>, policy: LoadPolicy) -> Result<Self, StoreError> {
        let path = path.into();
        let doc = match policy {
            LoadPolicy::Lenient => Self::load(&path),
            LoadPolicy::Strict => Self::try_load(&path)?,
        };
        Ok(Self::from_parts(path, doc))
    }

    fn from_parts(path: PathBuf, doc: Document) -> Self {
        info!(
            path = %path.display(),
            users = doc.users.len(),
            payments = doc.payments.len(),
            "store opened"
        );
        Self { path, doc }
    }

    /// Reads the document at `path`. Never fails: a missing, unreadable or
    /// malformed file yields an empty document.
    pub fn load(path: &Path) -> Document {
        match Self::try_load(path) {
            Ok(doc) => doc,
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "failed to load store; booting with empty document"
                );
                Document::default()
            }
        }
    }

    /// Like [`JsonStore::load`] but reports read and parse failures.
    /// A missing file is still an empty document.
    pub fn try_load(path: &Path) -> Result<Document, StoreError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(Document::default());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overwrites the backing file with the in-memory document.
    pub fn persist(&self) -> Result<(), StoreError> {
        write_document(&self.path, &self.doc)?;
        debug!(
            path = %self.path.display(),
            users = self.doc.users.len(),
            payments = self.doc.payments.len(),
            "store persisted"
        );
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serializes `doc` with four-space indentation and overwrites `path`.
pub fn write_document(path: &Path, doc: &Document) -> Result<(), StoreError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser).map_err(StoreError::Encode)?;
    fs::write(path, buf).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
