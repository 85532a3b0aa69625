//! Error types for the proto-faker crate.

use std::path::PathBuf;

use crate::schema::FieldKind;

/// Errors that can occur while loading schemas or generating fake messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The schema document violates a descriptor invariant.
    #[error("schema error: {0}")]
    Schema(String),

    /// A requested message type was not found in the schema registry.
    #[error("message type '{name}' not found in schema (available: {available})")]
    MessageNotFound { name: String, available: String },

    /// A field name was not declared on the target message type.
    #[error("field '{field}' not found on message '{message}'")]
    FieldNotFound { field: String, message: String },

    /// A value was set on a field whose declared kind does not accept it.
    ///
    /// Field overrides are not validated up front; an incompatible override
    /// surfaces here when the builder attempts the assignment.
    #[error("type mismatch for field '{field}': expected {expected:?}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        actual: String,
    },

    /// Failed to read a schema file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a file to disk.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parse error with context.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Network error during schema download.
    #[cfg(feature = "download")]
    #[error("download failed: {0}")]
    Download(String),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
