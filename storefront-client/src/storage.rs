//! Client-local storage
//!
//! A directory of pretty-printed JSON documents, one file per key.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Persisted cart lines
pub const CART_KEY: &str = "cart";

/// Id and total of the most recent order
pub const LAST_ORDER_KEY: &str = "last_order";

/// Admin session token
pub const ADMIN_SESSION_KEY: &str = "admin_session";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt document '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// `Ok(None)` when the document does not exist
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let json = match fs::read_to_string(self.path(key)) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    /// Write via a temp file and rename so a crash never leaves half a document
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, self.path(key))?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn exists(&self, key: &str) -> bool {
        self.path(key).exists()
    }
}
