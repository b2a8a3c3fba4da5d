//! JSON and Hex Parsing Utilities
//!
//! Parsing helpers shared by the config loader, the contract binding and
//! the signer.

use crate::error::{SignerError, SignerResult};
use serde::de::DeserializeOwned;

/// Safely parse JSON string into a type
pub fn parse_json<T: DeserializeOwned>(json_str: &str) -> SignerResult<T> {
    serde_json::from_str(json_str)
        .map_err(|e| SignerError::parse_error(format!("JSON parse error: {}", e)))
}

/// Strip a single leading `0x`, if present
pub fn strip_hex_prefix(hex_str: &str) -> &str {
    hex_str.strip_prefix("0x").unwrap_or(hex_str)
}

/// Parse hex string to bytes safely; `"0x"` and `""` decode to no bytes
pub fn parse_hex_bytes(hex_str: &str) -> SignerResult<Vec<u8>> {
    hex::decode(strip_hex_prefix(hex_str))
        .map_err(|e| SignerError::parse_error(format!("Invalid hex '{}': {}", hex_str, e)))
}
