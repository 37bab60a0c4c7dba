use bytes::{BufMut, BytesMut};

use crate::{EncodeError, Result};

const MAX_PRECISION: u8 = 18;
const MAX_CODE_LEN: usize = 7;
const MAX_AMOUNT: i64 = (1 << 62) - 1;

/// Pack a symbol code (`"TOTEM"`): up to seven uppercase letters, first
/// letter in the lowest byte.
pub fn encode_symbol_code(code: &str) -> Result<u64> {
    if code.is_empty() || code.len() > MAX_CODE_LEN {
        return Err(EncodeError::InvalidSymbol(code.to_string()));
    }

    let mut value = 0u64;
    for (i, c) in code.bytes().enumerate() {
        if !c.is_ascii_uppercase() {
            return Err(EncodeError::InvalidSymbol(code.to_string()));
        }
        value |= u64::from(c) << (8 * i);
    }
    Ok(value)
}

/// Pack a symbol (`"4,TOTEM"`): precision in the low byte, code above it.
pub fn encode_symbol(symbol: &str) -> Result<u64> {
    let invalid = || EncodeError::InvalidSymbol(symbol.to_string());
    let (precision, code) = symbol.split_once(',').ok_or_else(invalid)?;
    let precision: u8 = precision.trim().parse().map_err(|_| invalid())?;
    pack_symbol(precision, code.trim()).map_err(|_| invalid())
}

/// Encode an asset (`"1.0000 TOTEM"`) as a signed 64-bit amount followed by
/// its symbol. Precision is the number of digits after the decimal point.
pub fn encode_asset(asset: &str, buf: &mut BytesMut) -> Result<()> {
    let invalid = || EncodeError::InvalidAsset(asset.to_string());
    let (quantity, code) = asset.trim().split_once(' ').ok_or_else(invalid)?;

    let (negative, digits) = match quantity.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, quantity),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() || !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let precision = u8::try_from(fraction.len()).map_err(|_| invalid())?;
    let magnitude: i64 = format!("{whole}{fraction}").parse().map_err(|_| invalid())?;
    if magnitude > MAX_AMOUNT {
        return Err(invalid());
    }
    let amount = if negative { -magnitude } else { magnitude };

    let symbol = pack_symbol(precision, code.trim()).map_err(|_| invalid())?;
    buf.put_i64_le(amount);
    buf.put_u64_le(symbol);
    Ok(())
}

fn pack_symbol(precision: u8, code: &str) -> Result<u64> {
    if precision > MAX_PRECISION {
        return Err(EncodeError::InvalidSymbol(code.to_string()));
    }
    Ok((encode_symbol_code(code)? << 8) | u64::from(precision))
}
