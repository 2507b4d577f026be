//! # Error Types — Generation Failure Hierarchy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations. The generator does not catch or recover from any of
//! these; they propagate through the recursive call chain to the caller,
//! which decides whether to abort or skip to the next schema file.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for schema fixture generation.
#[derive(Error, Debug)]
pub enum FakerError {
    /// The root input was not a schema-shaped value (a JSON object).
    #[error("invalid schema: expected a JSON object, got {0}")]
    InvalidSchema(String),

    /// A node carried no recognizable `type`, `enum`, or `$ref` after
    /// combinator resolution, or named a type outside the seven kinds.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A string schema named a `format` the provider set does not cover.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// An in-document fragment path did not resolve through its parent.
    #[error("broken reference '{reference}': segment '{segment}' not found")]
    BrokenReference {
        /// The full `$ref` string that failed to resolve.
        reference: String,
        /// The first path segment that was absent.
        segment: String,
    },

    /// An external `$ref` named a file that does not exist.
    #[error("schema file not found: {}", .0.display())]
    SchemaFileNotFound(PathBuf),

    /// A combined external+fragment reference did not split into exactly
    /// one file path and one fragment.
    #[error("invalid reference format: {0}")]
    InvalidReferenceFormat(String),

    /// An `items` value that is neither a single schema object nor a
    /// sequence of schemas.
    #[error("invalid items: expected schema or sequence of schemas, got {0}")]
    InvalidItems(String),

    /// IO error reading an external schema file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A schema document failed to parse as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FakerError>;
