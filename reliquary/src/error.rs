//! Error types for store operations

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failure of a store operation.
///
/// Every public save/load path returns one of these instead of panicking;
/// `Display` carries the human-readable message.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record file exists at the resolved path.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// The per-user data directory could not be resolved.
    #[error("no per-user data directory on this platform")]
    DataDir,

    /// Value serialization or deserialization failed.
    #[error("serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    /// Transport string is not valid base64.
    #[error("transport decoding failed: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Cipher rejected the data (wrong key or corrupted file).
    #[error("decryption failed: wrong key or corrupted data")]
    Cipher,

    /// Decoded bytes are not valid UTF-8.
    #[error("decoded content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Filesystem operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Background task was cancelled or panicked.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
