//! Text <-> Hex Conversion
//!
//! The UTF-8 pair treats a zero byte as a terminator in both directions.
//! The ASCII pair does not: embedded NULs survive encoding and decoding.

use crate::error::{SignerError, SignerResult};
use crate::utils::strip_hex_prefix;

/// UTF-8 encode `text` as `0x` hex, stopping at the first NUL
pub fn from_utf8(text: &str) -> String {
    let bytes: Vec<u8> = text.bytes().take_while(|b| *b != 0).collect();
    format!("0x{}", hex::encode(bytes))
}

/// Hex of each UTF-16 code unit, at least two digits each; NULs are kept
pub fn from_ascii(text: &str) -> String {
    let mut hex = String::with_capacity(2 + text.len() * 2);
    hex.push_str("0x");
    for unit in text.encode_utf16() {
        hex.push_str(&format!("{:02x}", unit));
    }
    hex
}

/// Decode hex to a UTF-8 string, stopping at the first zero byte
pub fn to_utf8(hex: &str) -> SignerResult<String> {
    let bytes = decode_pairs(hex)?;
    let terminated: Vec<u8> = bytes.into_iter().take_while(|b| *b != 0).collect();

    String::from_utf8(terminated).map_err(|e| {
        SignerError::decode_error(format!("'{}' is not valid UTF-8", hex)).with_details(e.to_string())
    })
}

/// Decode hex to one char per byte (Latin-1), zero bytes included
pub fn to_ascii(hex: &str) -> SignerResult<String> {
    let bytes = decode_pairs(hex)?;
    Ok(bytes.into_iter().map(char::from).collect())
}

fn decode_pairs(hex: &str) -> SignerResult<Vec<u8>> {
    let digits = strip_hex_prefix(hex);
    if digits.len() % 2 != 0 {
        return Err(SignerError::decode_error(format!(
            "'{}' has an odd number of hex digits",
            hex
        )));
    }

    hex::decode(digits).map_err(|e| {
        SignerError::decode_error(format!("'{}' is not valid hex", hex)).with_details(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_from_utf8() {
        assert_eq!(from_utf8("hello"), "0x68656c6c6f");
        assert_eq!(from_utf8("é"), "0xc3a9");
        assert_eq!(from_utf8(""), "0x");
    }

    #[test]
    fn test_from_utf8_stops_at_nul() {
        assert_eq!(from_utf8("ab\0cd"), "0x6162");
    }

    #[test]
    fn test_from_ascii_keeps_nul() {
        assert_eq!(from_ascii("ab\0cd"), "0x6162006364");
        assert_eq!(from_ascii("\n"), "0x0a");
    }

    #[test]
    fn test_from_ascii_wide_code_units() {
        // é is U+00E9, one code unit; € is U+20AC
        assert_eq!(from_ascii("é"), "0xe9");
        assert_eq!(from_ascii("€"), "0x20ac");
    }

    #[test]
    fn test_to_utf8() {
        assert_eq!(to_utf8("0x68656c6c6f").unwrap(), "hello");
        assert_eq!(to_utf8("68656c6c6f").unwrap(), "hello");
        assert_eq!(to_utf8("0xc3a9").unwrap(), "é");
    }

    #[test]
    fn test_to_utf8_stops_at_zero_byte() {
        assert_eq!(to_utf8("0x6162006364").unwrap(), "ab");
        // right-padded ABI strings decode cleanly
        assert_eq!(to_utf8("0x68690000000000").unwrap(), "hi");
    }

    #[test]
    fn test_to_utf8_errors() {
        assert!(to_utf8("0x686").unwrap_err().is(ErrorCode::DecodeError));
        assert!(to_utf8("0xc3").unwrap_err().is(ErrorCode::DecodeError));
        assert!(to_utf8("0xzz").unwrap_err().is(ErrorCode::DecodeError));
    }

    #[test]
    fn test_to_ascii_keeps_zero_bytes() {
        assert_eq!(to_ascii("0x6162006364").unwrap(), "ab\0cd");
        assert_eq!(to_ascii("0xe9").unwrap(), "é");
        assert!(to_ascii("0x616").is_err());
    }
}
