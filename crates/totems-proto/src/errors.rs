//! Error types for field encoding.

use thiserror::Error;

/// Result alias for encoding operations.
pub type Result<T> = std::result::Result<T, EncodeError>;

/// Errors raised while projecting a [`crate::Value`] onto its ABI byte form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The ABI type has no encoding support.
    #[error("Unsupported dynamic field type: {0}")]
    UnsupportedType(String),

    /// The value's shape does not match the ABI type (e.g. text for a `bool`).
    #[error("expected {expected} value for {type_name}, got {found}")]
    TypeMismatch {
        /// ABI type being encoded
        type_name: String,
        /// What the encoder accepts for this type
        expected: &'static str,
        /// Shape of the supplied value
        found: &'static str,
    },

    /// Numeric value does not fit the target width.
    #[error("value {value} out of range for {type_name}")]
    OutOfRange {
        /// ABI type being encoded
        type_name: String,
        /// Offending value, rendered
        value: String,
    },

    /// Malformed account name.
    #[error("invalid name {0:?}")]
    InvalidName(String),

    /// Malformed symbol or symbol code.
    #[error("invalid symbol {0:?}")]
    InvalidSymbol(String),

    /// Malformed asset quantity.
    #[error("invalid asset {0:?}")]
    InvalidAsset(String),

    /// Public key failed to decode or its checksum did not match.
    #[error("invalid public key {0:?}")]
    InvalidPublicKey(String),

    /// Checksum hex text is malformed or has the wrong length.
    #[error("invalid checksum for {type_name}: expected {expected} bytes")]
    InvalidChecksum {
        /// ABI checksum type
        type_name: String,
        /// Required byte length
        expected: usize,
    },

    /// Hex text could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Time literal could not be parsed or is out of range.
    #[error("invalid time {0:?}")]
    InvalidTime(String),
}
