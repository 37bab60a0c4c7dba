//! ABI model and field encoding for Totems required actions.
//!
//! A Totems mod can demand that a transaction carry certain actions with
//! certain field values. The on-chain check never decodes action data: it
//! compares raw byte ranges. This crate provides the vocabulary needed to
//! compute those ranges off-chain: the ABI document shape, the closed set of
//! ABI field types, dynamic literal values, and the Antelope binary encoding
//! of a single field.
//!
//! # Components
//!
//! - [`abi`]: ABI document (actions, structs, type aliases)
//! - [`types`]: [`TypeTag`] vocabulary
//! - [`value`]: [`Value`] literals
//! - [`encode`]: [`FieldEncoder`] seam and the [`AntelopeEncoder`]
//! - [`errors`]: [`EncodeError`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod abi;
pub mod encode;
pub mod errors;
pub mod types;
pub mod value;

pub use abi::{AbiAction, AbiDocument, AbiField, AbiStruct, AbiTypeDef, GetAbiResponse};
pub use encode::{AntelopeEncoder, FieldEncoder, to_hex};
pub use errors::{EncodeError, Result};
pub use types::TypeTag;
pub use value::Value;
