//! Text literals of every text-encoded ABI type.
//!
//! The first byte picks the type, the rest is the literal.

#![no_main]

use libfuzzer_sys::fuzz_target;
use totems_proto::{AntelopeEncoder, FieldEncoder, TypeTag, Value};

const TYPES: &[&str] = &[
    "name",
    "symbol",
    "symbol_code",
    "asset",
    "public_key",
    "checksum160",
    "checksum256",
    "checksum512",
    "time_point",
    "time_point_sec",
    "block_timestamp_type",
    "string",
    "bytes",
    "float128",
    "uint128",
];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    let ty = TypeTag::parse(TYPES[usize::from(selector) % TYPES.len()]);
    if let Ok(bytes) = AntelopeEncoder.encode(&ty, &Value::from(text)) {
        assert!(!bytes.is_empty());
    }
});
