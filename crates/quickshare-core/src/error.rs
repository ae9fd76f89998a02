//! Error types for shared directory operations

use std::path::PathBuf;

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while reading or writing the shared directory
#[derive(Debug, Error)]
pub enum StorageError {
    /// No regular file with this name inside the shared directory
    #[error("File not found: {0}")]
    NotFound(String),

    /// Client-supplied name has nothing usable left after sanitization
    #[error("Invalid file name: {0:?}")]
    InvalidName(String),

    /// Target name exists but is not a regular file (directory, symlink, ...)
    #[error("Not a regular file: {0}")]
    NotAFile(String),

    /// Storage root exists but is not a directory
    #[error("Storage path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
