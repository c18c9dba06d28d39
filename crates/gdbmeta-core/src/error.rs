//! Error types for geodatabase introspection.
//!
//! Construction-time failures (unreadable path, missing system tables for an
//! explicitly requested backend) propagate to the caller; per-item failures
//! during enumeration are handled at the iteration site and never surface
//! here.

use std::path::PathBuf;

use thiserror::Error;

use crate::backend::BackendKind;

/// Root error type for geodatabase operations.
#[derive(Debug, Error)]
pub enum GdbError {
    /// The container could not be opened at all.
    #[error("failed to open geodatabase '{}': {source}", path.display())]
    Open {
        /// The path that was handed to the accessor.
        path: PathBuf,
        /// The native SQLite error.
        #[source]
        source: rusqlite::Error,
    },

    /// The requested backend cannot serve this container.
    #[error("backend '{kind}' is not available for '{}': {reason}", path.display())]
    BackendUnavailable {
        /// The backend that was requested.
        kind: BackendKind,
        /// The container path.
        path: PathBuf,
        /// Why the backend refused the container.
        reason: String,
    },

    /// A catalog or dataset query failed.
    #[error("catalog query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// A serialized object definition could not be parsed.
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

/// Errors raised while parsing serialized XML object definitions.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The document is not well-formed XML.
    #[error("malformed definition XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document parsed but its structure is unusable.
    #[error("malformed definition XML: {0}")]
    Malformed(String),

    /// A numeric element held a non-numeric value.
    #[error("element '{element}' holds non-numeric value '{value}'")]
    InvalidNumber {
        /// The element whose text was expected to be numeric.
        element: String,
        /// The offending text.
        value: String,
    },
}

/// Result alias using [`GdbError`].
pub type Result<T> = std::result::Result<T, GdbError>;
