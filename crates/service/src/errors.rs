use std::path::PathBuf;

use models::errors::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("cannot read {path}: {reason}")]
    StorageRead { path: PathBuf, reason: String },
    #[error("cannot write {path}: {reason}")]
    StorageWrite { path: PathBuf, reason: String },
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(entity.to_string()) }

    pub fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::StorageRead { path: path.into(), reason: reason.to_string() }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::StorageWrite { path: path.into(), reason: reason.to_string() }
    }

    /// Machine-readable error kind, stable across message changes.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation_error",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::StorageRead { .. } => "storage_read_error",
            ServiceError::StorageWrite { .. } => "storage_write_error",
        }
    }
}
