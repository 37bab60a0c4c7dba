use crate::{EncodeError, Result};

const MAX_NAME_LEN: usize = 13;

/// Pack an account name into its 64-bit form.
///
/// Each of the first twelve characters takes five bits, most significant
/// first; the optional thirteenth character takes the low four bits and so is
/// limited to `.1-5a-j`.
pub fn encode_name(s: &str) -> Result<u64> {
    if s.len() > MAX_NAME_LEN {
        return Err(EncodeError::InvalidName(s.to_string()));
    }

    let mut value = 0u64;
    for (i, c) in s.bytes().enumerate() {
        let symbol = char_to_symbol(c).ok_or_else(|| EncodeError::InvalidName(s.to_string()))?;
        if i < 12 {
            value |= u64::from(symbol & 0x1f) << (64 - 5 * (i + 1));
        } else {
            if symbol > 0x0f {
                return Err(EncodeError::InvalidName(s.to_string()));
            }
            value |= u64::from(symbol);
        }
    }
    Ok(value)
}

fn char_to_symbol(c: u8) -> Option<u8> {
    match c {
        b'a'..=b'z' => Some(c - b'a' + 6),
        b'1'..=b'5' => Some(c - b'1' + 1),
        b'.' => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_known_names() {
        assert_eq!(
            encode_name("seller").unwrap().to_le_bytes(),
            [0, 0, 0, 0, 0x5c, 0x15, 0xa3, 0xc2]
        );
        assert_eq!(encode_name("eosio").unwrap(), 0x5530_ea00_0000_0000);
        assert_eq!(encode_name("").unwrap(), 0);
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(encode_name("Seller").is_err());
        assert!(encode_name("sell6r").is_err());
        assert!(encode_name("a-b").is_err());
    }

    #[test]
    fn thirteenth_character_is_restricted() {
        assert!(encode_name("aaaaaaaaaaaaj").is_ok());
        assert!(encode_name("aaaaaaaaaaaak").is_err());
        assert!(encode_name("aaaaaaaaaaaaaa").is_err());
    }

    proptest::proptest! {
        #[test]
        fn dotless_names_pack_injectively(
            a in "[a-z1-5]{1,12}",
            b in "[a-z1-5]{1,12}",
        ) {
            let (x, y) = (encode_name(&a).unwrap(), encode_name(&b).unwrap());
            proptest::prop_assert_eq!(a == b, x == y);
        }
    }
}
