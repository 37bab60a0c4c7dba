//! ABI document model.
//!
//! Mirrors the JSON shape returned by a node's `get_abi` endpoint. Only the
//! sections needed to locate an action's field list are modelled; everything
//! else in the document (tables, ricardian clauses, variants, ...) is ignored
//! on deserialization.

use serde::{Deserialize, Serialize};

/// Contract interface description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiDocument {
    /// ABI format version, e.g. `eosio::abi/1.2`
    #[serde(default)]
    pub version: String,

    /// Type aliases (`new_type_name` → `type`)
    #[serde(default)]
    pub types: Vec<AbiTypeDef>,

    /// Structured record definitions
    #[serde(default)]
    pub structs: Vec<AbiStruct>,

    /// Callable actions
    #[serde(default)]
    pub actions: Vec<AbiAction>,
}

/// Type alias entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiTypeDef {
    /// Alias being declared
    pub new_type_name: String,
    /// Type the alias stands for
    #[serde(rename = "type")]
    pub target: String,
}

/// Struct definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiStruct {
    /// Struct name
    pub name: String,
    /// Base struct whose fields precede this struct's own, empty if none
    #[serde(default)]
    pub base: String,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<AbiField>,
}

/// One declared struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiField {
    /// Field name
    pub name: String,
    /// ABI type string
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Action entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiAction {
    /// Action name
    pub name: String,
    /// Name of the struct holding the action's arguments
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Envelope returned by `get_abi`: `{ "account_name": ..., "abi": {...} }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAbiResponse {
    /// Contract account the ABI belongs to
    pub account_name: String,
    /// The ABI, absent if the account has no contract
    pub abi: Option<AbiDocument>,
}

impl AbiDocument {
    /// Find an action by name.
    pub fn action(&self, name: &str) -> Option<&AbiAction> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Find a struct by name.
    pub fn find_struct(&self, name: &str) -> Option<&AbiStruct> {
        self.structs.iter().find(|s| s.name == name)
    }

    /// Target of a type alias, if `name` is one.
    pub fn alias(&self, name: &str) -> Option<&str> {
        self.types.iter().find(|t| t.new_type_name == name).map(|t| t.target.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_node_abi_json() {
        let json = r#"{
            "version": "eosio::abi/1.2",
            "types": [{ "new_type_name": "account_name", "type": "name" }],
            "structs": [{
                "name": "transfer",
                "base": "",
                "fields": [
                    { "name": "from", "type": "name" },
                    { "name": "memo", "type": "string" }
                ]
            }],
            "actions": [{ "name": "transfer", "type": "transfer", "ricardian_contract": "" }],
            "tables": []
        }"#;

        let abi: AbiDocument = serde_json::from_str(json).unwrap();
        assert_eq!(abi.action("transfer").map(|a| a.type_name.as_str()), Some("transfer"));
        assert_eq!(abi.find_struct("transfer").map(|s| s.fields.len()), Some(2));
        assert_eq!(abi.alias("account_name"), Some("name"));
        assert!(abi.action("issue").is_none());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let abi: AbiDocument = serde_json::from_str("{}").unwrap();
        assert!(abi.actions.is_empty());
        assert!(abi.structs.is_empty());
    }
}
