//! `to_hex` dispatch
//!
//! Arms are tried top to bottom:
//! 1. booleans become `0x1` / `0x0`
//! 2. big decimals go through the numeric codec
//! 3. JSON arrays and objects are serialised and UTF-8 encoded
//! 4. `-0x` text is re-rendered through the numeric codec
//! 5. `0x` text is returned as-is
//! 6. text that is not a finite number is ASCII encoded
//! 7. numbers and numeric text go through the numeric codec

use super::numeric::{decimal_to_hex, from_decimal};
use super::text::{from_ascii, from_utf8};
use crate::error::SignerResult;
use crate::types::{Amount, HexValue};
use bigdecimal::BigDecimal;
use serde_json::Value;

/// Render any supported value as a hex string
pub fn to_hex(value: impl Into<HexValue>) -> SignerResult<String> {
    hex_of(&value.into())
}

fn hex_of(value: &HexValue) -> SignerResult<String> {
    match value {
        HexValue::Bool(b) => decimal_to_hex(&BigDecimal::from(*b as u8)),
        HexValue::Decimal(d) => decimal_to_hex(d),
        HexValue::Structured(json) => structured_hex(json),
        HexValue::Text(s) if s.starts_with("-0x") => from_decimal(&Amount::Text(s.clone())),
        HexValue::Text(s) if s.starts_with("0x") => Ok(s.clone()),
        HexValue::Text(s) if !is_finite_number(s) => Ok(from_ascii(s)),
        HexValue::Text(s) => from_decimal(&Amount::Text(s.clone())),
        HexValue::Int(i) => from_decimal(&Amount::Int(*i)),
        HexValue::Float(f) => from_decimal(&Amount::Float(*f)),
    }
}

fn structured_hex(json: &Value) -> SignerResult<String> {
    match json {
        Value::Array(_) | Value::Object(_) => Ok(from_utf8(&serde_json::to_string(json)?)),
        Value::Null => decimal_to_hex(&BigDecimal::from(0u8)),
        Value::Bool(b) => hex_of(&HexValue::Bool(*b)),
        Value::String(s) => hex_of(&HexValue::Text(s.clone())),
        // Number's Display is its JSON text, which the decimal parser accepts
        Value::Number(n) => from_decimal(&Amount::Text(n.to_string())),
    }
}

/// Whether `text` reads as a finite number, the way `isFinite` coerces it
///
/// Surrounding whitespace is ignored and blank text counts as zero.
pub fn is_finite_number(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return true;
    }
    trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_booleans() {
        assert_eq!(to_hex(true).unwrap(), "0x1");
        assert_eq!(to_hex(false).unwrap(), "0x0");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(to_hex(0).unwrap(), "0x0");
        assert_eq!(to_hex(15).unwrap(), "0xf");
        assert_eq!(to_hex(-15).unwrap(), "-0xf");
        assert_eq!(to_hex(0.5).unwrap(), "0x0.8");
        assert_eq!(to_hex(BigDecimal::from_str("1000000000000000000").unwrap()).unwrap(), "0xde0b6b3a7640000");
    }

    #[test]
    fn test_hex_literals() {
        assert_eq!(to_hex("0xABCdef").unwrap(), "0xABCdef");
        assert_eq!(to_hex("0x").unwrap(), "0x");
        assert_eq!(to_hex("-0xFF").unwrap(), "-0xff");
    }

    #[test]
    fn test_text() {
        assert_eq!(to_hex("hello").unwrap(), "0x68656c6c6f");
        assert_eq!(to_hex("12abc").unwrap(), "0x3132616263");
        assert_eq!(to_hex("Infinity").unwrap(), from_ascii("Infinity"));
    }

    #[test]
    fn test_numeric_text() {
        assert_eq!(to_hex("255").unwrap(), "0xff");
        assert_eq!(to_hex("1e3").unwrap(), "0x3e8");
        assert_eq!(to_hex("").unwrap(), "0x0");
    }

    #[test]
    fn test_structured() {
        assert_eq!(
            to_hex(json!({ "a": 1 })).unwrap(),
            from_utf8(r#"{"a":1}"#)
        );
        assert_eq!(to_hex(json!([1, 2])).unwrap(), "0x5b312c325d");
        assert_eq!(to_hex(json!(null)).unwrap(), "0x0");
        assert_eq!(to_hex(json!(true)).unwrap(), "0x1");
        assert_eq!(to_hex(json!(255)).unwrap(), "0xff");
        assert_eq!(to_hex(json!("hi")).unwrap(), "0x6869");
    }

    #[test]
    fn test_structured_keeps_key_order() {
        assert_eq!(
            to_hex(json!({ "b": 1, "a": 2 })).unwrap(),
            from_utf8(r#"{"b":1,"a":2}"#)
        );
        let parsed: Value = serde_json::from_str(r#"{"to":"0x1","nonce":3,"data":[]}"#).unwrap();
        assert_eq!(
            to_hex(parsed).unwrap(),
            from_utf8(r#"{"to":"0x1","nonce":3,"data":[]}"#)
        );
    }

    #[test]
    fn test_extreme_exponents_fail() {
        assert!(to_hex("3e-4294967296").is_err());
        assert!(to_hex("1e4294967296").is_err());
        assert!(to_hex(BigDecimal::from_str("1e4294967296").unwrap()).is_err());
    }

    #[test]
    fn test_is_finite_number() {
        assert!(is_finite_number("12"));
        assert!(is_finite_number(" 1.5 "));
        assert!(is_finite_number("-3e5"));
        assert!(is_finite_number(""));
        assert!(!is_finite_number("inf"));
        assert!(!is_finite_number("NaN"));
        assert!(!is_finite_number("abc"));
    }
}
