//! Command-line front end for the Totems layout compiler.
//!
//! Reads contract ABIs from a directory (one `<contract>.abi.json` per
//! account), compiles enforcement rules into byte layouts, and writes the
//! result as JSON or CBOR. The binary in `main.rs` only parses arguments,
//! installs logging, and maps errors to the exit status.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Command, CommonArgs, OutputFormat};
pub use commands::run;
pub use error::CliError;
pub use output::write_output;
