//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;
use totems_core::LayoutError;

/// Errors surfaced by the `totems` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A rules or manifest file is not valid JSON for its format.
    #[error("invalid {what} in {path}: {source}")]
    Input {
        /// Kind of document expected
        what: &'static str,
        /// File being parsed
        path: PathBuf,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },

    /// Layout compilation failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// JSON output could not be written.
    #[error("failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// CBOR output could not be written.
    #[error("failed to write CBOR output: {0}")]
    Cbor(#[from] ciborium::ser::Error<std::io::Error>),

    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}
