//! Canonical placeholder values for fields whose value is unknown at layout
//! time.
//!
//! Placeholders only exist to advance the byte cursor, so each type maps to a
//! single fixed value and the resulting length is reproducible. Variable-length
//! types get their empty form.

use totems_proto::{TypeTag, Value};

use crate::error::{LayoutError, Result};

/// Account name used for unknown `name` fields.
pub const PLACEHOLDER_NAME: &str = "totems";

/// Asset used for unknown `asset` fields.
pub const PLACEHOLDER_ASSET: &str = "0.0000 TOTEM";

/// Symbol used for unknown `symbol` fields.
pub const PLACEHOLDER_SYMBOL: &str = "4,TOTEM";

/// Symbol code used for unknown `symbol_code` fields.
pub const PLACEHOLDER_SYMBOL_CODE: &str = "TOTEM";

/// Well-formed public key used for unknown `public_key` fields.
pub const PLACEHOLDER_PUBLIC_KEY: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";

/// Produce the placeholder for `ty`.
///
/// The list is closed: any type without an entry fails with
/// [`LayoutError::UnsupportedType`] rather than being guessed.
pub fn synthesize(ty: &TypeTag) -> Result<Value> {
    let value = match ty {
        TypeTag::Int8
        | TypeTag::Int16
        | TypeTag::Int32
        | TypeTag::Int64
        | TypeTag::Int128
        | TypeTag::Uint8
        | TypeTag::Uint16
        | TypeTag::Uint32
        | TypeTag::Uint64
        | TypeTag::Uint128
        | TypeTag::VarInt32
        | TypeTag::VarUint32
        | TypeTag::Float32
        | TypeTag::Float64
        | TypeTag::Float128
        | TypeTag::BlockTimestamp => Value::Int(0),
        TypeTag::Bool => Value::Bool(false),
        TypeTag::String => Value::Text(String::new()),
        TypeTag::Bytes => Value::Bytes(Vec::new()),
        TypeTag::Name => Value::from(PLACEHOLDER_NAME),
        TypeTag::Asset => Value::from(PLACEHOLDER_ASSET),
        TypeTag::Symbol => Value::from(PLACEHOLDER_SYMBOL),
        TypeTag::SymbolCode => Value::from(PLACEHOLDER_SYMBOL_CODE),
        TypeTag::PublicKey => Value::from(PLACEHOLDER_PUBLIC_KEY),
        TypeTag::Checksum160 | TypeTag::Checksum256 | TypeTag::Checksum512 => {
            let hex_len = ty.checksum_len().unwrap_or_default() * 2;
            Value::Text("0".repeat(hex_len))
        },
        TypeTag::TimePoint => Value::from("1970-01-01T00:00:00.000"),
        TypeTag::TimePointSec => Value::from("1970-01-01T00:00:00"),
        TypeTag::Sequence(inner) => {
            synthesize(inner)?;
            Value::List(Vec::new())
        },
        TypeTag::Unsupported(raw) => return Err(LayoutError::UnsupportedType(raw.clone())),
    };
    Ok(value)
}
