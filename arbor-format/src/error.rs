//! Error types for the Arbor container format

use thiserror::Error;

/// Arbor error types
#[derive(Debug, Error)]
pub enum ArborError {
    /// Input does not start with the expected file magic bytes.
    #[error("Invalid magic bytes")]
    InvalidMagic,
    /// File version is not supported by this decoder.
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u8),
    /// File header contents are inconsistent or corrupt.
    #[error("Corrupt header")]
    CorruptHeader,
    /// A group or dataset record is malformed.
    #[error("Corrupt node: {0}")]
    CorruptNode(String),
    /// CRC32C verification failed for the container body.
    #[error("Checksum mismatch")]
    ChecksumMismatch,
    /// Encountered unexpected end of input.
    #[error("Unexpected end of file")]
    UnexpectedEof,
    /// A configured security limit was exceeded.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
    /// Encountered a feature that the implementation does not support.
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
    /// Group or dataset name cannot be stored.
    #[error("Invalid name: {0:?}")]
    InvalidName(String),
    /// An entry with the same name already exists in the group.
    #[error("Name already exists: {0:?}")]
    DuplicateName(String),
    /// Leaf value has no dataset representation.
    #[error("Unsupported leaf value: {0}")]
    UnsupportedLeaf(String),
    /// Byte string is not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// I/O operation failed while reading or writing data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Internal invariant was violated.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ArborError>;
