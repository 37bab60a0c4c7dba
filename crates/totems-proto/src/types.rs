//! ABI type vocabulary.
//!
//! Field types in an ABI document are free-form strings. We map them onto a
//! closed [`TypeTag`] as soon as a schema is resolved, so that every later
//! stage matches exhaustively instead of comparing strings. Anything outside
//! the vocabulary is kept verbatim in [`TypeTag::Unsupported`] and rejected by
//! whichever stage first needs to know its encoding.

use std::fmt;

/// ABI primitive or sequence type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `bool`
    Bool,
    /// `int8`
    Int8,
    /// `int16`
    Int16,
    /// `int32`
    Int32,
    /// `int64`
    Int64,
    /// `int128`
    Int128,
    /// `uint8`
    Uint8,
    /// `uint16`
    Uint16,
    /// `uint32`
    Uint32,
    /// `uint64`
    Uint64,
    /// `uint128`
    Uint128,
    /// `varint32` (zigzag LEB128)
    VarInt32,
    /// `varuint32` (LEB128)
    VarUint32,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `float128`
    Float128,
    /// `string`
    String,
    /// `bytes`
    Bytes,
    /// `name` (account name, packed into 64 bits)
    Name,
    /// `asset` (quantity + symbol)
    Asset,
    /// `symbol` (precision + code)
    Symbol,
    /// `symbol_code`
    SymbolCode,
    /// `checksum160`
    Checksum160,
    /// `checksum256`
    Checksum256,
    /// `checksum512`
    Checksum512,
    /// `public_key`
    PublicKey,
    /// `time_point` (microseconds since epoch)
    TimePoint,
    /// `time_point_sec` (seconds since epoch)
    TimePointSec,
    /// `block_timestamp_type` (half-second slots since 2000-01-01)
    BlockTimestamp,
    /// `T[]`
    Sequence(Box<TypeTag>),
    /// Any type string outside the vocabulary above.
    Unsupported(String),
}

impl TypeTag {
    /// Map an ABI type string onto the vocabulary.
    ///
    /// Never fails: unknown names become [`TypeTag::Unsupported`]. Optional
    /// (`T?`) and binary-extension (`T$`) markers are not part of the
    /// vocabulary because their encoded length depends on presence.
    pub fn parse(abi_type: &str) -> Self {
        if let Some(inner) = abi_type.strip_suffix("[]") {
            return Self::Sequence(Box::new(Self::parse(inner)));
        }

        match abi_type {
            "bool" => Self::Bool,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "int128" => Self::Int128,
            "uint8" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "uint128" => Self::Uint128,
            "varint32" => Self::VarInt32,
            "varuint32" => Self::VarUint32,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "float128" => Self::Float128,
            "string" => Self::String,
            "bytes" => Self::Bytes,
            "name" => Self::Name,
            "asset" => Self::Asset,
            "symbol" => Self::Symbol,
            "symbol_code" => Self::SymbolCode,
            "checksum160" => Self::Checksum160,
            "checksum256" => Self::Checksum256,
            "checksum512" => Self::Checksum512,
            "public_key" => Self::PublicKey,
            "time_point" => Self::TimePoint,
            "time_point_sec" => Self::TimePointSec,
            "block_timestamp_type" => Self::BlockTimestamp,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// Byte length of the checksum types, `None` for everything else.
    pub fn checksum_len(&self) -> Option<usize> {
        match self {
            Self::Checksum160 => Some(20),
            Self::Checksum256 => Some(32),
            Self::Checksum512 => Some(64),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Int128 => "int128",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Uint128 => "uint128",
            Self::VarInt32 => "varint32",
            Self::VarUint32 => "varuint32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Float128 => "float128",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Name => "name",
            Self::Asset => "asset",
            Self::Symbol => "symbol",
            Self::SymbolCode => "symbol_code",
            Self::Checksum160 => "checksum160",
            Self::Checksum256 => "checksum256",
            Self::Checksum512 => "checksum512",
            Self::PublicKey => "public_key",
            Self::TimePoint => "time_point",
            Self::TimePointSec => "time_point_sec",
            Self::BlockTimestamp => "block_timestamp_type",
            Self::Sequence(inner) => return write!(f, "{inner}[]"),
            Self::Unsupported(raw) => raw,
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_primitives() {
        assert_eq!(TypeTag::parse("name"), TypeTag::Name);
        assert_eq!(TypeTag::parse("block_timestamp_type"), TypeTag::BlockTimestamp);
        assert_eq!(TypeTag::parse("checksum256").checksum_len(), Some(32));
    }

    #[test]
    fn parse_nested_sequence() {
        let tag = TypeTag::parse("uint8[][]");
        assert_eq!(
            tag,
            TypeTag::Sequence(Box::new(TypeTag::Sequence(Box::new(TypeTag::Uint8))))
        );
        assert_eq!(tag.to_string(), "uint8[][]");
    }

    #[test]
    fn optional_and_extension_are_unsupported() {
        assert_eq!(TypeTag::parse("name?"), TypeTag::Unsupported("name?".into()));
        assert_eq!(TypeTag::parse("asset$"), TypeTag::Unsupported("asset$".into()));
    }

    #[test]
    fn display_round_trips_unknown_names() {
        assert_eq!(TypeTag::parse("extended_asset").to_string(), "extended_asset");
    }
}
