//! Enforcement rules and their compiled byte layout.
//!
//! Field names on the wire follow the JSON the publish tooling and the
//! on-chain validator already exchange: a rule is `{param, type, data, min,
//! max}` and a compiled field adds `offset` and `size`, with `data` carrying
//! the literal bytes as hex.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use totems_proto::Value;

/// How the on-chain validator checks a field.
///
/// Fields of an action that no rule mentions are ignored by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum EnforcementKind {
    /// Must equal the account sending the transaction.
    Sender = 0,
    /// Must be present; content is unconstrained.
    Dynamic = 1,
    /// Must equal a literal fixed when the rule is written.
    Static = 2,
    /// Must equal the ticker of the totem being acted on.
    Totem = 3,
}

/// Caller-supplied requirement on one action parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnforcementRule {
    /// Parameter name, as declared in the action's struct
    pub param: String,

    /// Enforcement kind
    #[serde(rename = "type")]
    pub kind: EnforcementKind,

    /// Literal value; required for [`EnforcementKind::Static`], unused
    /// otherwise
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<Value>,

    /// Advisory lower bound for tooling that prompts for the value
    #[serde(rename = "min", default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,

    /// Advisory upper bound for tooling that prompts for the value
    #[serde(rename = "max", default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
}

impl EnforcementRule {
    fn new(param: impl Into<String>, kind: EnforcementKind) -> Self {
        Self { param: param.into(), kind, literal: None, lower_bound: None, upper_bound: None }
    }

    /// Field must equal the transaction sender.
    pub fn sender(param: impl Into<String>) -> Self {
        Self::new(param, EnforcementKind::Sender)
    }

    /// Field must be present with any value.
    pub fn dynamic(param: impl Into<String>) -> Self {
        Self::new(param, EnforcementKind::Dynamic)
    }

    /// Field must equal the totem ticker.
    pub fn totem(param: impl Into<String>) -> Self {
        Self::new(param, EnforcementKind::Totem)
    }

    /// Field must equal `literal`.
    pub fn fixed(param: impl Into<String>, literal: impl Into<Value>) -> Self {
        Self { literal: Some(literal.into()), ..Self::new(param, EnforcementKind::Static) }
    }

    /// Attach advisory bounds.
    #[must_use]
    pub fn with_bounds(mut self, lower: Option<f64>, upper: Option<f64>) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }
}

/// One enforced field's position in the encoded action data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedField {
    /// Parameter name
    pub param: String,

    /// Enforcement kind
    #[serde(rename = "type")]
    pub kind: EnforcementKind,

    /// Encoded literal for [`EnforcementKind::Static`], empty otherwise
    #[serde(rename = "data", with = "hex_bytes")]
    pub literal_bytes: Bytes,

    /// Byte offset from the start of the action data
    pub offset: usize,

    /// Encoded length of the field
    pub size: usize,

    /// Advisory lower bound, passed through from the rule
    #[serde(rename = "min", default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,

    /// Advisory upper bound, passed through from the rule
    #[serde(rename = "max", default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
}

impl SerializedField {
    /// Byte range `[offset, offset + size)` this field occupies.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.size
    }
}

/// Compiled required action: every enforced field of one contract action,
/// in the order the action's struct declares them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Contract account
    pub contract: String,

    /// Action name
    pub action: String,

    /// Enforced fields in schema declaration order
    pub fields: Vec<SerializedField>,

    /// Free-form description of why the action is required
    #[serde(rename = "purpose", default)]
    pub label: String,
}

impl Layout {
    /// Look up a compiled field by parameter name.
    pub fn field(&self, param: &str) -> Option<&SerializedField> {
        self.fields.iter().find(|f| f.param == param)
    }
}

/// A required action to compile: which action, which rules, and why.
///
/// This is also the manifest entry format read by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredActionSpec {
    /// Contract account
    pub contract: String,

    /// Action name
    pub action: String,

    /// Enforcement rules
    #[serde(rename = "fields", default)]
    pub rules: Vec<EnforcementRule>,

    /// Free-form description of why the action is required
    #[serde(rename = "purpose", default)]
    pub label: String,
}

mod hex_bytes {
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub(super) fn serialize<S: Serializer>(
        bytes: &Bytes,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Bytes, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex::decode(text).map(Bytes::from).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_use_wire_integers() {
        assert_eq!(serde_json::to_string(&EnforcementKind::Sender).unwrap(), "0");
        assert_eq!(serde_json::to_string(&EnforcementKind::Totem).unwrap(), "3");
        let kind: EnforcementKind = serde_json::from_str("2").unwrap();
        assert_eq!(kind, EnforcementKind::Static);
        assert!(serde_json::from_str::<EnforcementKind>("4").is_err());
    }

    #[test]
    fn rule_parses_tooling_json() {
        let rule: EnforcementRule =
            serde_json::from_str(r#"{ "param": "to", "type": 2, "data": "seller", "max": 10 }"#)
                .unwrap();
        assert_eq!(rule, EnforcementRule::fixed("to", "seller").with_bounds(None, Some(10.0)));
    }

    #[test]
    fn serialized_field_carries_hex_data() {
        let field = SerializedField {
            param: "to".into(),
            kind: EnforcementKind::Static,
            literal_bytes: Bytes::from_static(&[0xc2, 0xa3]),
            offset: 8,
            size: 2,
            lower_bound: None,
            upper_bound: None,
        };
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, r#"{"param":"to","type":2,"data":"c2a3","offset":8,"size":2}"#);
        let back: SerializedField = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
        assert_eq!(field.range(), 8..10);
    }
}
