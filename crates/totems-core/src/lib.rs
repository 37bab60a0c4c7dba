//! Totems required-action layout compiler
//!
//! A Totems mod can require that a transaction carry specific actions whose
//! fields hold specific values. The on-chain validator checks this with raw
//! byte-range comparisons against each submitted action's data, so every
//! requirement has to be compiled ahead of time into exact offsets, sizes and,
//! for literal values, the expected bytes. This crate does that compilation.
//!
//! # Architecture
//!
//! Everything here is pure and synchronous. The only external inputs are the
//! ABI documents, which arrive through the [`AbiProvider`] trait, and the
//! encode primitive, which arrives through [`totems_proto::FieldEncoder`].
//! Shared state is limited to the [`AbiCache`], which callers construct and
//! hand to the resolver explicitly.
//!
//! # Components
//!
//! - [`classify`]: fixed vs variable-length types
//! - [`placeholder`]: canonical values for fields with unknown content
//! - [`resolver`]: action schema lookup and ABI caching
//! - [`layout`]: the layout engine
//! - [`rule`]: enforcement rules and compiled layouts
//! - [`error`]: error types

pub mod classify;
pub mod error;
pub mod layout;
pub mod placeholder;
pub mod resolver;
pub mod rule;

pub use classify::{Extent, classify};
pub use error::{LayoutError, ProviderError, Result};
pub use layout::{DuplicatePolicy, LayoutConfig, LayoutEngine, UnknownParamPolicy};
pub use placeholder::synthesize;
pub use resolver::{
    AbiCache, AbiProvider, DirectoryProvider, MemoryProvider, SchemaField, SchemaResolver,
    resolve_action,
};
pub use rule::{EnforcementKind, EnforcementRule, Layout, RequiredActionSpec, SerializedField};
