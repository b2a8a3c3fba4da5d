//! Decimal <-> Hex Conversion
//!
//! Arbitrary-precision parsing of caller amounts and base-16 rendering.
//! Hex output is never zero-padded to an even digit count, and negative
//! values keep their sign outside the `0x` prefix (`-0xff`).

use crate::error::{SignerError, SignerResult};
use crate::types::Amount;
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};
use std::str::FromStr;

/// Hex places kept when rendering a non-integer
const HEX_FRACTION_DIGITS: usize = 20;

/// Largest power of ten a parsed amount may carry, either way
const MAX_EXPONENT: u64 = 10_000;

/// Parse any [`Amount`] into a big decimal
///
/// Falsy amounts are zero. Text with a `0x` / `-0x` prefix is read as a
/// base-16 magnitude; everything else is read as base-10.
pub fn to_big_decimal(value: &Amount) -> SignerResult<BigDecimal> {
    if value.is_falsy() {
        return Ok(BigDecimal::zero());
    }

    let number = match value {
        Amount::Decimal(d) => d.clone(),
        Amount::Int(i) => BigDecimal::new(BigInt::from(*i), 0),
        Amount::Float(f) => parse_float(*f)?,
        Amount::Text(s) => parse_text(s)?,
    };
    check_exponent(&number)?;
    Ok(number)
}

/// Render an amount as a `0x` hex quantity
pub fn from_decimal(value: &Amount) -> SignerResult<String> {
    let number = to_big_decimal(value)?;
    decimal_to_hex(&number)
}

/// `toDecimal`: nearest f64 of an amount
pub fn to_decimal(value: &Amount) -> SignerResult<f64> {
    let number = to_big_decimal(value)?;
    number
        .to_f64()
        .ok_or_else(|| SignerError::parse_error(format!("{} does not fit in f64", number)))
}

/// Hex rendering of an already-parsed big decimal
pub fn decimal_to_hex(number: &BigDecimal) -> SignerResult<String> {
    check_exponent(number)?;
    let digits = magnitude_hex(&number.abs())?;
    if number.sign() == Sign::Minus {
        Ok(format!("-0x{}", digits))
    } else {
        Ok(format!("0x{}", digits))
    }
}

/// Base-10 rendering in plain notation, trailing fractional zeros removed
pub fn to_plain_string(value: &BigDecimal) -> SignerResult<String> {
    let normalized = value.normalized();
    check_exponent(&normalized)?;
    let (digits, scale) = normalized.as_bigint_and_exponent();

    if scale <= 0 {
        return Ok((digits * pow10(scale)?).to_string());
    }

    let scale = usize::try_from(scale).map_err(|_| exponent_error(scale))?;
    let mut magnitude = digits.magnitude().to_string();
    if magnitude.len() <= scale {
        magnitude = format!("{}{}", "0".repeat(scale + 1 - magnitude.len()), magnitude);
    }

    let (whole, fraction) = magnitude.split_at(magnitude.len() - scale);
    let sign = if digits.sign() == Sign::Minus { "-" } else { "" };
    Ok(format!("{}{}.{}", sign, whole, fraction))
}

fn parse_float(value: f64) -> SignerResult<BigDecimal> {
    if !value.is_finite() {
        return Err(SignerError::parse_error(format!("{} is not a finite number", value)));
    }
    // Display gives the shortest string that round-trips, never exponent form
    Ok(BigDecimal::from_str(&value.to_string())?)
}

fn parse_text(text: &str) -> SignerResult<BigDecimal> {
    if let Some(digits) = text.strip_prefix("-0x") {
        return Ok(-parse_hex_magnitude(text, digits)?);
    }
    if let Some(digits) = text.strip_prefix("0x") {
        return parse_hex_magnitude(text, digits);
    }

    BigDecimal::from_str(text.trim()).map_err(|e| {
        SignerError::parse_error(format!("'{}' is not a valid base-10 number", text))
            .with_details(e.to_string())
    })
}

fn parse_hex_magnitude(literal: &str, digits: &str) -> SignerResult<BigDecimal> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SignerError::parse_error(format!(
            "'{}' is not a valid base-16 number",
            literal
        )));
    }

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| {
        SignerError::parse_error(format!("'{}' is not a valid base-16 number", literal))
    })?;
    Ok(BigDecimal::new(magnitude, 0))
}

/// Rejects amounts whose power of ten is out of range
fn check_exponent(number: &BigDecimal) -> SignerResult<()> {
    let (_, scale) = number.as_bigint_and_exponent();
    if scale.unsigned_abs() > MAX_EXPONENT {
        return Err(exponent_error(scale));
    }
    Ok(())
}

fn exponent_error(scale: i64) -> SignerError {
    SignerError::parse_error(format!(
        "Exponent {} is outside +/-{}",
        -i128::from(scale),
        MAX_EXPONENT
    ))
}

/// 10^|scale|
fn pow10(scale: i64) -> SignerResult<BigInt> {
    let exponent = u32::try_from(scale.unsigned_abs()).map_err(|_| exponent_error(scale))?;
    Ok(BigInt::from(10u32).pow(exponent))
}

/// Base-16 digits of a non-negative value, with a rounded fraction if any
fn magnitude_hex(magnitude: &BigDecimal) -> SignerResult<String> {
    let (digits, scale) = magnitude.as_bigint_and_exponent();

    if scale <= 0 {
        return Ok((digits * pow10(scale)?).to_str_radix(16));
    }

    let denominator = pow10(scale)?;
    let mut whole = &digits / &denominator;
    let remainder = &digits % &denominator;
    if remainder.is_zero() {
        return Ok(whole.to_str_radix(16));
    }

    // Fraction in units of 16^-20, rounded half-up
    let unit = BigInt::from(1u32) << (4 * HEX_FRACTION_DIGITS);
    let scaled = remainder * &unit;
    let mut fraction = &scaled / &denominator;
    if (&scaled % &denominator) * 2u32 >= denominator {
        fraction += 1u32;
    }
    if fraction == unit {
        whole += 1u32;
        fraction = BigInt::zero();
    }

    let whole_hex = whole.to_str_radix(16);
    if fraction.is_zero() {
        return Ok(whole_hex);
    }

    let fraction_hex = format!(
        "{:0>width$}",
        fraction.to_str_radix(16),
        width = HEX_FRACTION_DIGITS
    );
    Ok(format!("{}.{}", whole_hex, fraction_hex.trim_end_matches('0')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_to_big_decimal_falsy() {
        assert_eq!(to_big_decimal(&Amount::from(0)).unwrap(), dec("0"));
        assert_eq!(to_big_decimal(&Amount::from("")).unwrap(), dec("0"));
        assert_eq!(to_big_decimal(&Amount::Float(f64::NAN)).unwrap(), dec("0"));
    }

    #[test]
    fn test_to_big_decimal_hex() {
        assert_eq!(to_big_decimal(&Amount::from("0xff")).unwrap(), dec("255"));
        assert_eq!(to_big_decimal(&Amount::from("0xFF")).unwrap(), dec("255"));
        assert_eq!(to_big_decimal(&Amount::from("-0x1f")).unwrap(), dec("-31"));
    }

    #[test]
    fn test_to_big_decimal_decimal_strings() {
        assert_eq!(to_big_decimal(&Amount::from("12345")).unwrap(), dec("12345"));
        assert_eq!(to_big_decimal(&Amount::from("-1.5")).unwrap(), dec("-1.5"));
        assert_eq!(to_big_decimal(&Amount::from("1e18")).unwrap(), dec("1000000000000000000"));
        assert_eq!(to_big_decimal(&Amount::Float(0.1)).unwrap(), dec("0.1"));
    }

    #[test]
    fn test_to_big_decimal_passes_decimal_through() {
        let value = dec("123.456");
        assert_eq!(to_big_decimal(&Amount::from(&value)).unwrap(), value);
    }

    #[test]
    fn test_to_big_decimal_rejects_garbage() {
        assert!(to_big_decimal(&Amount::from("0x")).is_err());
        assert!(to_big_decimal(&Amount::from("0xzz")).is_err());
        assert!(to_big_decimal(&Amount::from("12abc")).is_err());
        assert!(to_big_decimal(&Amount::Float(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(from_decimal(&Amount::from(0)).unwrap(), "0x0");
        assert_eq!(from_decimal(&Amount::from(255)).unwrap(), "0xff");
        assert_eq!(from_decimal(&Amount::from(4096)).unwrap(), "0x1000");
        assert_eq!(from_decimal(&Amount::from(-255)).unwrap(), "-0xff");
        assert_eq!(from_decimal(&Amount::from("-0xff")).unwrap(), "-0xff");
        assert_eq!(from_decimal(&Amount::from("-0x0")).unwrap(), "0x0");
    }

    #[test]
    fn test_from_decimal_keeps_odd_digit_count() {
        assert_eq!(from_decimal(&Amount::from(1)).unwrap(), "0x1");
        assert_eq!(from_decimal(&Amount::from(21000)).unwrap(), "0x5208");
        assert_eq!(from_decimal(&Amount::from(4_000_000)).unwrap(), "0x3d0900");
    }

    #[test]
    fn test_from_decimal_big_values() {
        assert_eq!(
            from_decimal(&Amount::from("1000000000000000000")).unwrap(),
            "0xde0b6b3a7640000"
        );
        assert_eq!(
            from_decimal(&Amount::from(
                "115792089237316195423570985008687907853269984665640564039457584007913129639935"
            ))
            .unwrap(),
            format!("0x{}", "f".repeat(64))
        );
    }

    #[test]
    fn test_from_decimal_fractions() {
        assert_eq!(from_decimal(&Amount::Float(0.5)).unwrap(), "0x0.8");
        assert_eq!(from_decimal(&Amount::from("1.25")).unwrap(), "0x1.4");
        assert_eq!(from_decimal(&Amount::from("-2.5")).unwrap(), "-0x2.8");
        assert_eq!(
            from_decimal(&Amount::from("0.1")).unwrap(),
            "0x0.1999999999999999999a"
        );
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(to_decimal(&Amount::from("0x10")).unwrap(), 16.0);
        assert_eq!(to_decimal(&Amount::from("-1.5")).unwrap(), -1.5);
    }

    #[test]
    fn test_to_plain_string() {
        assert_eq!(to_plain_string(&dec("1e21")).unwrap(), "1000000000000000000000");
        assert_eq!(to_plain_string(&dec("0.000001")).unwrap(), "0.000001");
        assert_eq!(to_plain_string(&dec("-12.3400")).unwrap(), "-12.34");
        assert_eq!(to_plain_string(&dec("0")).unwrap(), "0");
        assert_eq!(to_plain_string(&dec("100")).unwrap(), "100");
    }

    #[test]
    fn test_exponent_out_of_range() {
        for text in ["1e4294967296", "3e-4294967296", "1e999999999", "-2e10001"] {
            let err = to_big_decimal(&Amount::from(text)).unwrap_err();
            assert!(err.is(ErrorCode::ParseError), "{} accepted", text);
            assert!(from_decimal(&Amount::from(text)).is_err());
        }

        let huge = dec("1e4294967296");
        assert!(to_big_decimal(&Amount::from(&huge)).is_err());
        assert!(decimal_to_hex(&huge).unwrap_err().is(ErrorCode::ParseError));
        assert!(to_plain_string(&huge).unwrap_err().is(ErrorCode::ParseError));
        assert!(decimal_to_hex(&dec("3e-4294967296")).is_err());
    }

    #[test]
    fn test_exponent_at_bound() {
        let hex = from_decimal(&Amount::from("1e10000")).unwrap();
        assert!(hex.starts_with("0x"));
        assert_eq!(to_big_decimal(&Amount::Text(hex)).unwrap(), dec("1e10000"));
        assert_eq!(from_decimal(&Amount::from("1e-10000")).unwrap(), "0x0");
    }
}
