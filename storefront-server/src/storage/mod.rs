//! Payment proof object store
//!
//! Proofs are opaque blobs addressed by a randomized file name inside one
//! bucket. [`ProofStore`] is the seam; [`LocalProofStore`] keeps the bucket
//! on local disk and serves it through `GET /api/proofs/{file_name}`.

mod local;

pub use local::LocalProofStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid object name: {0}")]
    InvalidName(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidName(name) => {
                AppError::invalid_request(format!("Invalid file name: {name}"))
            }
            StorageError::NotFound(name) => {
                AppError::new(ErrorCode::ProofNotFound).with_detail("file_name", name)
            }
            StorageError::Io(e) => {
                tracing::error!(error = %e, "Proof storage I/O failure");
                AppError::storage("Failed to access payment proof storage")
            }
        }
    }
}

/// Reject names that could escape the bucket
pub fn validate_object_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty()
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.starts_with('.')
    {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[async_trait]
pub trait ProofStore: Send + Sync {
    /// Store an object, replacing any existing one with the same name
    async fn put(&self, file_name: &str, data: Vec<u8>) -> Result<(), StorageError>;

    async fn get(&self, file_name: &str) -> Result<Vec<u8>, StorageError>;

    async fn exists(&self, file_name: &str) -> Result<bool, StorageError>;

    /// Public URL of an object
    fn public_url(&self, file_name: &str) -> String;

    /// Inverse of [`ProofStore::public_url`]; `None` for foreign URLs
    fn file_name_from_url(&self, url: &str) -> Option<String>;
}
