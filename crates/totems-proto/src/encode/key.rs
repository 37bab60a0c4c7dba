use bytes::{BufMut, BytesMut};
use ripemd::{Digest, Ripemd160};

use crate::{EncodeError, Result};

const KEY_LEN: usize = 33;
const CHECKSUM_LEN: usize = 4;

const KEY_TYPE_K1: u8 = 0;
const KEY_TYPE_R1: u8 = 1;

/// Encode a public key as its one-byte curve tag followed by the 33-byte
/// compressed point.
///
/// Accepts the legacy `EOS…` form and the `PUB_K1_…` / `PUB_R1_…` forms.
/// The base58 payload carries a four-byte RIPEMD-160 checksum, which is
/// verified; the prefixed forms mix the curve name into the checksum.
pub fn encode_public_key(key: &str, buf: &mut BytesMut) -> Result<()> {
    let (key_type, point) = if let Some(rest) = key.strip_prefix("PUB_K1_") {
        (KEY_TYPE_K1, decode_checked(key, rest, b"K1")?)
    } else if let Some(rest) = key.strip_prefix("PUB_R1_") {
        (KEY_TYPE_R1, decode_checked(key, rest, b"R1")?)
    } else if let Some(rest) = key.strip_prefix("EOS") {
        (KEY_TYPE_K1, decode_checked(key, rest, b"")?)
    } else {
        return Err(EncodeError::InvalidPublicKey(key.to_string()));
    };

    buf.put_u8(key_type);
    buf.put_slice(&point);
    Ok(())
}

fn decode_checked(key: &str, encoded: &str, suffix: &[u8]) -> Result<[u8; KEY_LEN]> {
    let invalid = || EncodeError::InvalidPublicKey(key.to_string());

    let raw = bs58::decode(encoded).into_vec().map_err(|_| invalid())?;
    if raw.len() != KEY_LEN + CHECKSUM_LEN {
        return Err(invalid());
    }
    let (point, checksum) = raw.split_at(KEY_LEN);

    let mut hasher = Ripemd160::new();
    hasher.update(point);
    hasher.update(suffix);
    let digest = hasher.finalize();
    if digest[..CHECKSUM_LEN] != *checksum {
        return Err(invalid());
    }

    let mut out = [0u8; KEY_LEN];
    out.copy_from_slice(point);
    Ok(out)
}
