//! Byte layout computation for enforced action fields.
//!
//! The on-chain validator never decodes action data. It compares the bytes at
//! `[offset, offset + size)` of each submitted action against what a required
//! action demands. This module computes those ranges by simulating a full
//! encoding pass over the action's struct: enforced `Static` fields are
//! encoded from their literal, every other field from a canonical
//! placeholder, and the cursor advances by each field's encoded length.
//!
//! # Ordering
//!
//! Placeholders give variable-length fields a deterministic length, but not
//! the length the real transaction will carry. An unenforced variable-length
//! field that precedes every enforced field would therefore shift every
//! offset by an unknown amount, and is rejected with
//! [`LayoutError::OrderingViolation`]. Once an enforced field has anchored the
//! layout, later variable-length fields only shift fields after them, which
//! is acceptable because the validator bounds-checks each enforced range
//! independently.
//!
//! ```text
//!  from:name   to:name    quantity:asset        memo:string
//! ┌──────────┬──────────┬─────────────────────┬──────────────┐
//! │ 0..8     │ 8..16    │ 16..32              │ 32..         │
//! │ Sender   │ Static   │ Dynamic             │ (ignored)    │
//! └──────────┴──────────┴─────────────────────┴──────────────┘
//! ```

use std::collections::{HashMap, HashSet};

use bytes::Bytes;
use totems_proto::{AntelopeEncoder, FieldEncoder};
use tracing::{debug, warn};

use crate::{
    classify::{Extent, classify},
    error::{LayoutError, Result},
    placeholder::synthesize,
    resolver::{AbiProvider, SchemaField, SchemaResolver},
    rule::{EnforcementKind, EnforcementRule, Layout, RequiredActionSpec, SerializedField},
};

/// What to do when two rules name the same parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The later rule replaces the earlier one.
    #[default]
    LastWins,
    /// Fail with [`LayoutError::DuplicateRule`].
    Reject,
}

/// What to do when a rule names a parameter the action does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownParamPolicy {
    /// Drop the rule.
    #[default]
    Ignore,
    /// Fail with [`LayoutError::UnknownParam`].
    Reject,
}

/// Layout engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutConfig {
    /// Handling of repeated parameter names
    pub duplicate_rules: DuplicatePolicy,
    /// Handling of rules for undeclared parameters
    pub unknown_params: UnknownParamPolicy,
}

impl LayoutConfig {
    /// Reject duplicate and unknown parameters instead of tolerating them.
    pub fn strict() -> Self {
        Self {
            duplicate_rules: DuplicatePolicy::Reject,
            unknown_params: UnknownParamPolicy::Reject,
        }
    }
}

/// Computes [`Layout`]s from resolved schemas and enforcement rules.
///
/// Pure and synchronous; one engine can serve any number of callers.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine<E = AntelopeEncoder> {
    encoder: E,
    config: LayoutConfig,
}

impl LayoutEngine<AntelopeEncoder> {
    /// Engine using the Antelope binary encoding.
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_encoder(AntelopeEncoder, config)
    }
}

impl<E: FieldEncoder> LayoutEngine<E> {
    /// Engine using a custom encode primitive.
    pub fn with_encoder(encoder: E, config: LayoutConfig) -> Self {
        Self { encoder, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Compute the layout of `rules` over `schema`.
    ///
    /// Fields are walked in declaration order and the result lists enforced
    /// fields in that same order, whatever order `rules` came in. Fails on
    /// the first violation without partial output.
    pub fn layout(
        &self,
        contract: &str,
        action: &str,
        schema: &[SchemaField],
        rules: &[EnforcementRule],
        label: &str,
    ) -> Result<Layout> {
        let rules_by_param = self.index_rules(schema, rules)?;

        let mut offset = 0usize;
        let mut enforced_seen = false;
        let mut fields = Vec::with_capacity(rules_by_param.len());

        for field in schema {
            let rule = rules_by_param.get(field.name.as_str()).copied();

            if !enforced_seen && rule.is_none() && classify(&field.ty) == Extent::Variable {
                return Err(LayoutError::OrderingViolation(field.name.clone()));
            }
            if rule.is_some() {
                enforced_seen = true;
            }

            let encoded = self.encode_field(field, rule)?;
            let size = encoded.len();

            if let Some(rule) = rule {
                let literal_bytes =
                    if rule.kind == EnforcementKind::Static { encoded } else { Bytes::new() };
                fields.push(SerializedField {
                    param: field.name.clone(),
                    kind: rule.kind,
                    literal_bytes,
                    offset,
                    size,
                    lower_bound: rule.lower_bound,
                    upper_bound: rule.upper_bound,
                });
            }

            offset += size;
        }

        debug!(
            contract,
            action,
            enforced = fields.len(),
            encoded_len = offset,
            "computed layout"
        );

        Ok(Layout {
            contract: contract.to_string(),
            action: action.to_string(),
            fields,
            label: label.to_string(),
        })
    }

    /// Resolve `spec`'s action through `resolver` and lay out its rules.
    pub fn compile<P: AbiProvider>(
        &self,
        resolver: &SchemaResolver<P>,
        spec: &RequiredActionSpec,
    ) -> Result<Layout> {
        let schema = resolver.resolve(&spec.contract, &spec.action)?;
        self.layout(&spec.contract, &spec.action, &schema, &spec.rules, &spec.label)
    }

    /// [`Self::compile`] over a list, stopping at the first failure.
    pub fn compile_all<P: AbiProvider>(
        &self,
        resolver: &SchemaResolver<P>,
        specs: &[RequiredActionSpec],
    ) -> Result<Vec<Layout>> {
        specs.iter().map(|spec| self.compile(resolver, spec)).collect()
    }

    /// Static fields encode their literal; everything else, enforced or not,
    /// encodes the type's placeholder since its real value is unknown here.
    fn encode_field(&self, field: &SchemaField, rule: Option<&EnforcementRule>) -> Result<Bytes> {
        if let Some(rule) = rule {
            if rule.kind == EnforcementKind::Static {
                let literal = rule
                    .literal
                    .as_ref()
                    .ok_or_else(|| LayoutError::MissingLiteral(rule.param.clone()))?;
                return Ok(self.encoder.encode(&field.ty, literal)?);
            }
            if rule.literal.is_some() {
                debug!(
                    param = %rule.param,
                    kind = ?rule.kind,
                    "ignoring literal on non-static rule"
                );
            }
        }

        let placeholder = synthesize(&field.ty)?;
        Ok(self.encoder.encode(&field.ty, &placeholder)?)
    }

    fn index_rules<'r>(
        &self,
        schema: &[SchemaField],
        rules: &'r [EnforcementRule],
    ) -> Result<HashMap<&'r str, &'r EnforcementRule>> {
        let mut by_param = HashMap::with_capacity(rules.len());

        for rule in rules {
            if by_param.insert(rule.param.as_str(), rule).is_some() {
                match self.config.duplicate_rules {
                    DuplicatePolicy::LastWins => {
                        warn!(
                            param = %rule.param,
                            "duplicate enforcement rule, keeping the last one"
                        );
                    },
                    DuplicatePolicy::Reject => {
                        return Err(LayoutError::DuplicateRule(rule.param.clone()));
                    },
                }
            }
        }

        let declared: HashSet<&str> = schema.iter().map(|f| f.name.as_str()).collect();
        for rule in rules {
            if declared.contains(rule.param.as_str()) {
                continue;
            }
            match self.config.unknown_params {
                UnknownParamPolicy::Ignore => {
                    warn!(param = %rule.param, "rule names no declared parameter, ignoring");
                },
                UnknownParamPolicy::Reject => {
                    return Err(LayoutError::UnknownParam(rule.param.clone()));
                },
            }
        }
        by_param.retain(|param, _| declared.contains(param));

        // Only surviving rules need a literal; checked in schema order.
        for field in schema {
            if let Some(rule) = by_param.get(field.name.as_str())
                && rule.kind == EnforcementKind::Static
                && rule.literal.is_none()
            {
                return Err(LayoutError::MissingLiteral(rule.param.clone()));
            }
        }

        Ok(by_param)
    }
}
