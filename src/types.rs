//! Shared types for ether-signer
//!
//! Data structures that cross module boundaries are defined here so the
//! codec, unit converter and transaction builder agree on one shape.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Numeric Input
// =============================================================================

/// A caller-supplied numeric value
///
/// `Decimal` is the arbitrary-precision form; conversions that receive one
/// hand one back, everything else comes back as a base-10 `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    Int(i128),
    Float(f64),
    Decimal(BigDecimal),
    /// Decimal string, or hex with a `0x` / `-0x` prefix
    Text(String),
}

impl Amount {
    /// Whether this is already an arbitrary-precision value
    pub fn is_decimal(&self) -> bool {
        matches!(self, Amount::Decimal(_))
    }

    /// Falsy inputs (0, NaN, "") are read as zero
    pub fn is_falsy(&self) -> bool {
        match self {
            Amount::Int(i) => *i == 0,
            Amount::Float(f) => *f == 0.0 || f.is_nan(),
            Amount::Text(s) => s.is_empty(),
            Amount::Decimal(_) => false,
        }
    }
}

macro_rules! amount_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Amount {
                fn from(value: $t) -> Self {
                    Amount::Int(value as i128)
                }
            }
        )*
    };
}

amount_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, usize, isize);

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        match i128::try_from(value) {
            Ok(v) => Amount::Int(v),
            Err(_) => Amount::Text(value.to_string()),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Float(value)
    }
}

impl From<f32> for Amount {
    fn from(value: f32) -> Self {
        Amount::Float(value as f64)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Amount::Text(value)
    }
}

impl From<&String> for Amount {
    fn from(value: &String) -> Self {
        Amount::Text(value.clone())
    }
}

impl From<BigDecimal> for Amount {
    fn from(value: BigDecimal) -> Self {
        Amount::Decimal(value)
    }
}

impl From<&BigDecimal> for Amount {
    fn from(value: &BigDecimal) -> Self {
        Amount::Decimal(value.clone())
    }
}

// =============================================================================
// Hex Dispatch Input
// =============================================================================

/// Input accepted by [`crate::codec::to_hex`]
///
/// The variant decides which codec handles the value; see `to_hex` for the
/// dispatch order.
#[derive(Debug, Clone, PartialEq)]
pub enum HexValue {
    Bool(bool),
    Int(i128),
    Float(f64),
    Decimal(BigDecimal),
    Text(String),
    Structured(serde_json::Value),
}

impl From<bool> for HexValue {
    fn from(value: bool) -> Self {
        HexValue::Bool(value)
    }
}

impl From<Amount> for HexValue {
    fn from(value: Amount) -> Self {
        match value {
            Amount::Int(i) => HexValue::Int(i),
            Amount::Float(f) => HexValue::Float(f),
            Amount::Decimal(d) => HexValue::Decimal(d),
            Amount::Text(s) => HexValue::Text(s),
        }
    }
}

macro_rules! hex_value_via_amount {
    ($($t:ty),*) => {
        $(
            impl From<$t> for HexValue {
                fn from(value: $t) -> Self {
                    Amount::from(value).into()
                }
            }
        )*
    };
}

hex_value_via_amount!(
    i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize, isize, f32, f64, &str, String,
    &String, BigDecimal, &BigDecimal
);

impl From<serde_json::Value> for HexValue {
    fn from(value: serde_json::Value) -> Self {
        HexValue::Structured(value)
    }
}

// =============================================================================
// Transaction Types
// =============================================================================

/// Unsigned legacy transaction fields, all quantities as hex strings
///
/// Lives only for the duration of one signing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransactionFields {
    pub nonce: u64,
    /// `None` for contract creation
    pub to: Option<String>,
    pub value: String,
    pub data: String,
    pub gas_price: String,
    pub gas_limit: String,
}

impl RawTransactionFields {
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}
