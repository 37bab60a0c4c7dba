//! Antelope binary encoding of single ABI fields.
//!
//! Action data on an Antelope chain is the fields of the action's struct
//! concatenated in declaration order with no padding and no framing. Scalars
//! are little-endian at their natural width; strings, byte strings and
//! sequences carry a LEB128 (`varuint32`) length prefix.
//!
//! The layout engine only ever needs one field at a time, so the entry point
//! here is [`FieldEncoder::encode`], which projects a [`Value`] onto the bytes
//! the chain would see for a field of the given [`TypeTag`].

mod asset;
mod key;
mod name;
mod time;

use bytes::{BufMut, Bytes, BytesMut};

pub use asset::{encode_asset, encode_symbol, encode_symbol_code};
pub use key::encode_public_key;
pub use name::encode_name;

use crate::{EncodeError, Result, TypeTag, Value};

/// Value→bytes projection for a single field.
///
/// The layout engine is generic over this trait so that alternative encoders
/// (or instrumented ones in tests) can be substituted.
pub trait FieldEncoder {
    /// Encode `value` as a field of type `ty`.
    fn encode(&self, ty: &TypeTag, value: &Value) -> Result<Bytes>;
}

/// Canonical Antelope (EOSIO) binary encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct AntelopeEncoder;

impl FieldEncoder for AntelopeEncoder {
    fn encode(&self, ty: &TypeTag, value: &Value) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        encode_into(ty, value, &mut buf)?;
        Ok(buf.freeze())
    }
}

/// Lowercase hex rendering of raw bytes.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

fn encode_into(ty: &TypeTag, value: &Value, buf: &mut BytesMut) -> Result<()> {
    match ty {
        TypeTag::Bool => match value {
            Value::Bool(b) => buf.put_u8(u8::from(*b)),
            other => return Err(mismatch(ty, "bool", other)),
        },
        TypeTag::Int8 => buf.put_i8(narrow(ty, integer(ty, value)?)?),
        TypeTag::Int16 => buf.put_i16_le(narrow(ty, integer(ty, value)?)?),
        TypeTag::Int32 => buf.put_i32_le(narrow(ty, integer(ty, value)?)?),
        TypeTag::Int64 => buf.put_i64_le(narrow(ty, integer(ty, value)?)?),
        TypeTag::Int128 => buf.put_i128_le(integer(ty, value)?),
        TypeTag::Uint8 => buf.put_u8(narrow(ty, integer(ty, value)?)?),
        TypeTag::Uint16 => buf.put_u16_le(narrow(ty, integer(ty, value)?)?),
        TypeTag::Uint32 => buf.put_u32_le(narrow(ty, integer(ty, value)?)?),
        TypeTag::Uint64 => buf.put_u64_le(narrow(ty, integer(ty, value)?)?),
        TypeTag::Uint128 => buf.put_u128_le(unsigned128(ty, value)?),
        TypeTag::VarUint32 => put_varuint32(buf, narrow(ty, integer(ty, value)?)?),
        TypeTag::VarInt32 => {
            let v: i32 = narrow(ty, integer(ty, value)?)?;
            put_varuint32(buf, ((v << 1) ^ (v >> 31)) as u32);
        },
        TypeTag::Float32 => buf.put_f32_le(float32(ty, value)?),
        TypeTag::Float64 => buf.put_f64_le(float(ty, value)?),
        TypeTag::Float128 => buf.put_slice(&float128(ty, value)?),
        TypeTag::String => {
            let s = text(ty, value)?;
            put_len(buf, ty, s.len())?;
            buf.put_slice(s.as_bytes());
        },
        TypeTag::Bytes => {
            let raw = byte_string(value).ok_or_else(|| mismatch(ty, "bytes or hex text", value))??;
            put_len(buf, ty, raw.len())?;
            buf.put_slice(&raw);
        },
        TypeTag::Name => buf.put_u64_le(encode_name(text(ty, value)?)?),
        TypeTag::Asset => encode_asset(text(ty, value)?, buf)?,
        TypeTag::Symbol => buf.put_u64_le(encode_symbol(text(ty, value)?)?),
        TypeTag::SymbolCode => buf.put_u64_le(encode_symbol_code(text(ty, value)?)?),
        TypeTag::Checksum160 | TypeTag::Checksum256 | TypeTag::Checksum512 => {
            let expected = ty.checksum_len().unwrap_or_default();
            let raw = byte_string(value)
                .ok_or_else(|| mismatch(ty, "hex text", value))?
                .map_err(|_| invalid_checksum(ty, expected))?;
            if raw.len() != expected {
                return Err(invalid_checksum(ty, expected));
            }
            buf.put_slice(&raw);
        },
        TypeTag::PublicKey => encode_public_key(text(ty, value)?, buf)?,
        TypeTag::TimePoint => buf.put_i64_le(time::time_point(ty, value)?),
        TypeTag::TimePointSec => buf.put_u32_le(time::time_point_sec(ty, value)?),
        TypeTag::BlockTimestamp => buf.put_u32_le(time::block_timestamp(ty, value)?),
        TypeTag::Sequence(inner) => {
            if let TypeTag::Unsupported(raw) = element_type(inner) {
                return Err(EncodeError::UnsupportedType(raw.clone()));
            }
            let Value::List(items) = value else {
                return Err(mismatch(ty, "list", value));
            };
            put_len(buf, ty, items.len())?;
            for item in items {
                encode_into(inner, item, buf)?;
            }
        },
        TypeTag::Unsupported(raw) => return Err(EncodeError::UnsupportedType(raw.clone())),
    }
    Ok(())
}

/// LEB128, seven bits per byte, high bit set on all but the last byte.
fn put_varuint32(buf: &mut BytesMut, mut v: u32) {
    loop {
        let byte = (v & 0x7f) as u8;
        v >>= 7;
        if v == 0 {
            buf.put_u8(byte);
            return;
        }
        buf.put_u8(byte | 0x80);
    }
}

fn put_len(buf: &mut BytesMut, ty: &TypeTag, len: usize) -> Result<()> {
    let len = u32::try_from(len).map_err(|_| EncodeError::OutOfRange {
        type_name: ty.to_string(),
        value: len.to_string(),
    })?;
    put_varuint32(buf, len);
    Ok(())
}

fn mismatch(ty: &TypeTag, expected: &'static str, found: &Value) -> EncodeError {
    EncodeError::TypeMismatch { type_name: ty.to_string(), expected, found: found.kind() }
}

fn invalid_checksum(ty: &TypeTag, expected: usize) -> EncodeError {
    EncodeError::InvalidChecksum { type_name: ty.to_string(), expected }
}

fn text<'a>(ty: &TypeTag, value: &'a Value) -> Result<&'a str> {
    match value {
        Value::Text(s) => Ok(s),
        other => Err(mismatch(ty, "text", other)),
    }
}

fn integer(ty: &TypeTag, value: &Value) -> Result<i128> {
    match value {
        Value::Int(v) => Ok(*v),
        Value::Text(s) => s.trim().parse().map_err(|_| EncodeError::OutOfRange {
            type_name: ty.to_string(),
            value: s.clone(),
        }),
        other => Err(mismatch(ty, "integer", other)),
    }
}

fn narrow<T: TryFrom<i128>>(ty: &TypeTag, v: i128) -> Result<T> {
    T::try_from(v)
        .map_err(|_| EncodeError::OutOfRange { type_name: ty.to_string(), value: v.to_string() })
}

fn unsigned128(ty: &TypeTag, value: &Value) -> Result<u128> {
    let out_of_range = |v: String| EncodeError::OutOfRange { type_name: ty.to_string(), value: v };
    match value {
        Value::Int(v) => u128::try_from(*v).map_err(|_| out_of_range(v.to_string())),
        Value::Text(s) => s.trim().parse().map_err(|_| out_of_range(s.clone())),
        other => Err(mismatch(ty, "integer", other)),
    }
}

fn float(ty: &TypeTag, value: &Value) -> Result<f64> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Int(v) => Ok(*v as f64),
        Value::Text(s) => s.trim().parse().map_err(|_| EncodeError::OutOfRange {
            type_name: ty.to_string(),
            value: s.clone(),
        }),
        other => Err(mismatch(ty, "number", other)),
    }
}

/// Rejects literals that overflow to infinity when narrowed.
fn float32(ty: &TypeTag, value: &Value) -> Result<f32> {
    let wide = float(ty, value)?;
    let narrow = wide as f32;
    if narrow.is_finite() || !wide.is_finite() {
        Ok(narrow)
    } else {
        Err(EncodeError::OutOfRange { type_name: ty.to_string(), value: wide.to_string() })
    }
}

/// Innermost element type of a possibly nested sequence.
fn element_type(ty: &TypeTag) -> &TypeTag {
    match ty {
        TypeTag::Sequence(inner) => element_type(inner),
        other => other,
    }
}

/// `float128` has no native Rust type; only zero and raw 16-byte hex are
/// accepted.
fn float128(ty: &TypeTag, value: &Value) -> Result<[u8; 16]> {
    match value {
        Value::Int(0) => Ok([0; 16]),
        Value::Float(v) if *v == 0.0 => Ok([0; 16]),
        Value::Text(s) => {
            let mut out = [0u8; 16];
            hex::decode_to_slice(s, &mut out).map_err(|e| EncodeError::InvalidHex(e.to_string()))?;
            Ok(out)
        },
        Value::Int(_) | Value::Float(_) => Err(EncodeError::OutOfRange {
            type_name: ty.to_string(),
            value: format!("{value:?}"),
        }),
        other => Err(mismatch(ty, "zero or 16-byte hex", other)),
    }
}

/// Raw bytes from a `Bytes` value or hex text. `None` if the value has
/// neither shape.
fn byte_string(value: &Value) -> Option<Result<Vec<u8>>> {
    match value {
        Value::Bytes(b) => Some(Ok(b.clone())),
        Value::Text(s) => Some(hex::decode(s).map_err(|e| EncodeError::InvalidHex(e.to_string()))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    fn enc(ty: &str, value: impl Into<Value>) -> Result<Bytes> {
        AntelopeEncoder.encode(&TypeTag::parse(ty), &value.into())
    }

    #[test]
    fn encodes_fixed_width_integers_little_endian() {
        assert_eq!(enc("uint16", 1u16).unwrap().as_ref(), hex!("0100"));
        assert_eq!(enc("int32", -2i32).unwrap().as_ref(), hex!("feffffff"));
        assert_eq!(enc("uint64", 1u64).unwrap().len(), 8);
        assert_eq!(enc("int128", 0i64).unwrap().len(), 16);
    }

    #[test]
    fn rejects_integers_out_of_range() {
        assert!(matches!(enc("uint8", 256u16), Err(EncodeError::OutOfRange { .. })));
        assert!(matches!(enc("uint32", -1i32), Err(EncodeError::OutOfRange { .. })));
    }

    #[test]
    fn varuint32_is_leb128() {
        assert_eq!(enc("varuint32", 0u32).unwrap().as_ref(), hex!("00"));
        assert_eq!(enc("varuint32", 127u32).unwrap().as_ref(), hex!("7f"));
        assert_eq!(enc("varuint32", 128u32).unwrap().as_ref(), hex!("8001"));
        assert_eq!(enc("varuint32", 300u32).unwrap().as_ref(), hex!("ac02"));
    }

    #[test]
    fn varint32_is_zigzag() {
        assert_eq!(enc("varint32", -1i32).unwrap().as_ref(), hex!("01"));
        assert_eq!(enc("varint32", 1i32).unwrap().as_ref(), hex!("02"));
    }

    #[test]
    fn string_is_length_prefixed() {
        let bytes = enc("string", "https://test.com").unwrap();
        insta::assert_snapshot!(to_hex(&bytes), @"1068747470733a2f2f746573742e636f6d");
        assert_eq!(enc("string", "").unwrap().as_ref(), hex!("00"));
    }

    #[test]
    fn bytes_accept_raw_and_hex() {
        assert_eq!(enc("bytes", vec![0xab, 0xcd]).unwrap().as_ref(), hex!("02abcd"));
        assert_eq!(enc("bytes", "abcd").unwrap().as_ref(), hex!("02abcd"));
        assert!(matches!(enc("bytes", "zz"), Err(EncodeError::InvalidHex(_))));
    }

    #[test]
    fn checksum_requires_exact_length() {
        assert_eq!(enc("checksum256", "0".repeat(64)).unwrap().len(), 32);
        assert!(matches!(
            enc("checksum160", "00"),
            Err(EncodeError::InvalidChecksum { expected: 20, .. })
        ));
    }

    #[test]
    fn sequences_prefix_their_count() {
        let list = Value::List(vec![Value::from(1u16), Value::from(2u16)]);
        assert_eq!(
            AntelopeEncoder.encode(&TypeTag::parse("uint16[]"), &list).unwrap().as_ref(),
            hex!("0201000200")
        );
        assert_eq!(
            AntelopeEncoder
                .encode(&TypeTag::parse("name[]"), &Value::List(vec![]))
                .unwrap()
                .as_ref(),
            hex!("00")
        );
    }

    #[test]
    fn sequence_of_unsupported_type_is_rejected_even_when_empty() {
        let err = AntelopeEncoder
            .encode(&TypeTag::parse("permission_level[]"), &Value::List(vec![]))
            .unwrap_err();
        assert!(matches!(err, EncodeError::UnsupportedType(t) if t == "permission_level"));
    }

    #[test]
    fn float32_overflow_is_out_of_range() {
        assert_eq!(enc("float32", 1.5).unwrap().as_ref(), 1.5f32.to_le_bytes());
        assert!(matches!(enc("float32", 1e300), Err(EncodeError::OutOfRange { .. })));
    }

    #[test]
    fn float128_accepts_zero_only_as_number() {
        assert_eq!(enc("float128", 0u8).unwrap().as_ref(), [0u8; 16]);
        assert!(matches!(enc("float128", 1.5), Err(EncodeError::OutOfRange { .. })));
    }

    #[test]
    fn shape_mismatch_is_reported() {
        assert!(matches!(
            enc("bool", "true"),
            Err(EncodeError::TypeMismatch { expected: "bool", found: "text", .. })
        ));
    }

    #[test]
    fn unsupported_type_is_rejected() {
        let err = enc("extended_asset", "x").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported dynamic field type: extended_asset");
    }
}
