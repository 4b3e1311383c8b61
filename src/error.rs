use std::io;

use thiserror::Error;

use crate::backup::BackupError;
use crate::storage::StorageError;

pub type ServiceResult<T> = core::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    FromString(String),
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Backup(#[from] BackupError),
    #[error("{0}")]
    IoError(#[from] io::Error),
    #[error("{0}")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("{0}")]
    Prompt(#[from] dialoguer::Error),
}

impl From<String> for ServiceError {
    fn from(value: String) -> Self {
        ServiceError::FromString(value)
    }
}
