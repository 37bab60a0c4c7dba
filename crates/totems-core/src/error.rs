//! Layout error types.

use std::path::PathBuf;

use thiserror::Error;
use totems_proto::EncodeError;

/// Errors from schema resolution and layout computation.
///
/// Every variant is terminal for the request that produced it: nothing is
/// retried internally, and a failed resolution leaves the cache untouched.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The ABI has no action with this name.
    #[error("Action {0} not found")]
    ActionNotFound(String),

    /// The action's argument struct (or a base struct) is missing from the
    /// ABI, or its type alias chain does not terminate.
    #[error("Struct {0} not found")]
    StructNotFound(String),

    /// An unenforced variable-length field precedes every enforced field.
    #[error("Variable-length field \"{0}\" occurs before enforced fields")]
    OrderingViolation(String),

    /// A field's type has no placeholder or encoding support.
    #[error("Unsupported dynamic field type: {0}")]
    UnsupportedType(String),

    /// A `Static` rule was supplied without a literal.
    #[error("Static field \"{0}\" has no literal value")]
    MissingLiteral(String),

    /// The same parameter was named by more than one rule.
    #[error("Duplicate enforcement rule for \"{0}\"")]
    DuplicateRule(String),

    /// A rule names a parameter the action does not declare.
    #[error("Action has no parameter \"{0}\"")]
    UnknownParam(String),

    /// The encode primitive rejected a value.
    #[error(transparent)]
    Encode(EncodeError),

    /// The ABI could not be obtained.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<EncodeError> for LayoutError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::UnsupportedType(name) => Self::UnsupportedType(name),
            other => Self::Encode(other),
        }
    }
}

/// Errors from an [`crate::AbiProvider`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No ABI is known for the contract.
    #[error("ABI not found for {0}")]
    NotFound(String),

    /// Reading an ABI file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An ABI file is not valid ABI JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
