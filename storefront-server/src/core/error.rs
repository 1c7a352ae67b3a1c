use thiserror::Error;

use crate::storage::StorageError;
use crate::utils::AppError;

/// Failures that stop the server from starting or serving
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    App(#[from] AppError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
