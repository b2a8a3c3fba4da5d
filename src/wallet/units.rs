//! Ether Denominations
//!
//! The named-unit table and conversion of amounts to and from wei.

use crate::codec::{to_big_decimal, to_plain_string};
use crate::error::{SignerError, SignerResult};
use crate::types::Amount;
use bigdecimal::BigDecimal;
use num_traits::Zero;
use std::collections::HashMap;
use std::str::FromStr;

/// Unit assumed when the caller names none
pub const DEFAULT_UNIT: &str = "ether";

/// Denomination name to wei multiplier, in table order
///
/// Lookups lower-case the requested name first, so the capitalised
/// aliases are listed but never matched.
pub const UNIT_TABLE: [(&str, &str); 27] = [
    ("noether", "0"),
    ("wei", "1"),
    ("kwei", "1000"),
    ("Kwei", "1000"),
    ("babbage", "1000"),
    ("femtoether", "1000"),
    ("mwei", "1000000"),
    ("Mwei", "1000000"),
    ("lovelace", "1000000"),
    ("picoether", "1000000"),
    ("gwei", "1000000000"),
    ("Gwei", "1000000000"),
    ("shannon", "1000000000"),
    ("nanoether", "1000000000"),
    ("nano", "1000000000"),
    ("szabo", "1000000000000"),
    ("microether", "1000000000000"),
    ("micro", "1000000000000"),
    ("finney", "1000000000000000"),
    ("milliether", "1000000000000000"),
    ("milli", "1000000000000000"),
    ("ether", "1000000000000000000"),
    ("kether", "1000000000000000000000"),
    ("grand", "1000000000000000000000"),
    ("mether", "1000000000000000000000000"),
    ("gether", "1000000000000000000000000000"),
    ("tether", "1000000000000000000000000000000"),
];

lazy_static::lazy_static! {
    /// Name -> multiplier index over `UNIT_TABLE`
    static ref UNIT_INDEX: HashMap<&'static str, &'static str> =
        UNIT_TABLE.iter().copied().collect();
}

/// Every unit name, in table order
pub fn unit_names() -> impl Iterator<Item = &'static str> {
    UNIT_TABLE.iter().map(|(name, _)| *name)
}

/// Wei multiplier for a unit name (`ether` when absent or empty)
pub fn get_value_of_unit(unit: Option<&str>) -> SignerResult<BigDecimal> {
    let name = match unit {
        Some(u) if !u.is_empty() => u.to_lowercase(),
        _ => DEFAULT_UNIT.to_string(),
    };

    let multiplier = UNIT_INDEX.get(name.as_str()).ok_or_else(|| {
        SignerError::unknown_unit(format!(
            "This unit '{}' doesn't exist, please use one of the following units: {}",
            name,
            unit_names().collect::<Vec<_>>().join(", ")
        ))
    })?;

    Ok(BigDecimal::from_str(multiplier)?)
}

/// Convert an amount in `unit` into wei
///
/// A `Decimal` amount comes back as a `Decimal`; anything else comes back
/// as base-10 text.
pub fn to_wei(amount: impl Into<Amount>, unit: Option<&str>) -> SignerResult<Amount> {
    let amount = amount.into();
    let wei = to_big_decimal(&amount)? * get_value_of_unit(unit)?;
    mirror(&amount, wei)
}

/// Convert an amount of wei into `unit`
pub fn from_wei(amount: impl Into<Amount>, unit: Option<&str>) -> SignerResult<Amount> {
    let amount = amount.into();
    let multiplier = get_value_of_unit(unit)?;
    if multiplier.is_zero() {
        return Err(SignerError::invalid_input(format!(
            "Cannot convert wei into '{}', its multiplier is zero",
            unit.unwrap_or(DEFAULT_UNIT)
        )));
    }

    // Multipliers are powers of ten, so dividing only moves the decimal point
    let places = i64::try_from(multiplier.digits() - 1)
        .map_err(|_| SignerError::invalid_input("Unit multiplier out of range"))?;
    let (digits, scale) = to_big_decimal(&amount)?.into_bigint_and_exponent();
    mirror(&amount, BigDecimal::new(digits, scale + places))
}

fn mirror(input: &Amount, result: BigDecimal) -> SignerResult<Amount> {
    if input.is_decimal() {
        Ok(Amount::Decimal(result))
    } else {
        Ok(Amount::Text(to_plain_string(&result)?))
    }
}
