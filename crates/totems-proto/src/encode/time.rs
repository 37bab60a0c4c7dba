use chrono::NaiveDateTime;

use crate::{EncodeError, Result, TypeTag, Value};

/// Block timestamps count half-second slots from 2000-01-01T00:00:00Z.
const BLOCK_TIMESTAMP_EPOCH_MS: i64 = 946_684_800_000;
const BLOCK_INTERVAL_MS: i64 = 500;

/// Microseconds since the Unix epoch.
pub(super) fn time_point(ty: &TypeTag, value: &Value) -> Result<i64> {
    match value {
        Value::Int(v) => i64::try_from(*v).map_err(|_| out_of_range(ty, v)),
        Value::Text(s) => Ok(parse(s)?.and_utc().timestamp_micros()),
        other => Err(mismatch(ty, other)),
    }
}

/// Seconds since the Unix epoch.
pub(super) fn time_point_sec(ty: &TypeTag, value: &Value) -> Result<u32> {
    match value {
        Value::Int(v) => u32::try_from(*v).map_err(|_| out_of_range(ty, v)),
        Value::Text(s) => u32::try_from(parse(s)?.and_utc().timestamp())
            .map_err(|_| EncodeError::InvalidTime(s.clone())),
        other => Err(mismatch(ty, other)),
    }
}

/// Slot number; integers are taken as a raw slot.
pub(super) fn block_timestamp(ty: &TypeTag, value: &Value) -> Result<u32> {
    match value {
        Value::Int(v) => u32::try_from(*v).map_err(|_| out_of_range(ty, v)),
        Value::Text(s) => {
            let ms = parse(s)?.and_utc().timestamp_millis() - BLOCK_TIMESTAMP_EPOCH_MS;
            u32::try_from(ms.div_euclid(BLOCK_INTERVAL_MS))
                .map_err(|_| EncodeError::InvalidTime(s.clone()))
        },
        other => Err(mismatch(ty, other)),
    }
}

/// ISO-8601 without offset, optionally suffixed `Z`, fractional seconds
/// optional.
fn parse(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.strip_suffix('Z').unwrap_or(s);
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|_| EncodeError::InvalidTime(s.to_string()))
}

fn out_of_range(ty: &TypeTag, v: &i128) -> EncodeError {
    EncodeError::OutOfRange { type_name: ty.to_string(), value: v.to_string() }
}

fn mismatch(ty: &TypeTag, found: &Value) -> EncodeError {
    EncodeError::TypeMismatch {
        type_name: ty.to_string(),
        expected: "integer or ISO-8601 text",
        found: found.kind(),
    }
}
