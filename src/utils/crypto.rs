//! Hash Primitives
//!
//! Keccak-256 helpers backing the address checksum and transaction hashes.

use tiny_keccak::{Hasher, Keccak};

/// Keccak256 hash (the Ethereum variant, not NIST SHA3-256)
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// Keccak256 digest as 64 lowercase hex characters, no prefix
pub fn keccak256_hex(data: &[u8]) -> String {
    hex::encode(keccak256(data))
}

/// Nibble `index` (0..64) of a 32-byte digest, high nibble first
pub fn digest_nibble(digest: &[u8; 32], index: usize) -> u8 {
    let byte = digest[index / 2];
    if index % 2 == 0 {
        byte >> 4
    } else {
        byte & 0x0f
    }
}

/// Convert raw address bytes to checksummed Ethereum address
pub fn checksum_encode(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut result = String::from("0x");
    for (i, ch) in lower.chars().enumerate() {
        if digest_nibble(&hash, i) > 7 {
            result.push(ch.to_ascii_uppercase());
        } else {
            result.push(ch);
        }
    }

    result
}
