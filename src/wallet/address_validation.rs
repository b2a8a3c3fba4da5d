//! Address Validation
//!
//! Structural and mixed-case checksum (EIP-55) validation of account
//! addresses. The checksum only catches transcription typos; it proves
//! nothing about who controls the address.

use crate::error::{SignerError, SignerResult};
use crate::utils::crypto::{checksum_encode, digest_nibble, keccak256};

const ADDRESS_HEX_LEN: usize = 40;

fn strip_prefix(address: &str) -> &str {
    address.strip_prefix("0x").unwrap_or(address)
}

fn is_hex_body(body: &str) -> bool {
    body.len() == ADDRESS_HEX_LEN && body.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Whether `address` is a usable account address
///
/// All-lowercase and all-uppercase forms are accepted without a checksum;
/// mixed case must pass [`is_checksum_address`].
pub fn is_address(address: &str) -> bool {
    let body = strip_prefix(address);
    if !is_hex_body(body) {
        return false;
    }

    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }

    is_checksum_address(address)
}

/// Whether the letter case of `address` matches its keccak checksum
pub fn is_checksum_address(address: &str) -> bool {
    let body = strip_prefix(address);
    if !is_hex_body(body) {
        return false;
    }

    let digest = keccak256(body.to_ascii_lowercase().as_bytes());

    body.chars().enumerate().all(|(i, ch)| {
        if digest_nibble(&digest, i) > 7 {
            ch.to_ascii_uppercase() == ch
        } else {
            ch.to_ascii_lowercase() == ch
        }
    })
}

/// Normalise a valid address into its `0x` checksummed form
pub fn to_checksum_address(address: &str) -> SignerResult<String> {
    if !is_address(address) {
        return Err(SignerError::invalid_address(format!(
            "'{}' is not a valid address",
            address
        )));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(strip_prefix(address), &mut bytes)?;
    Ok(checksum_encode(&bytes))
}
