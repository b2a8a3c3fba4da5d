//! Signing Keys
//!
//! SECURITY: key bytes live in a `Zeroizing` buffer and are wiped on drop.
//! `Debug` never prints them.

use crate::error::{SignerError, SignerResult};
use crate::utils::strip_hex_prefix;
use ethers_signers::{LocalWallet, Signer};
use std::fmt;
use zeroize::Zeroizing;

const KEY_LEN: usize = 32;

/// A secp256k1 private key
#[derive(Clone)]
pub struct PrivateKey(Zeroizing<[u8; KEY_LEN]>);

impl PrivateKey {
    /// Parse 64 hex chars, with or without a `0x` prefix
    pub fn from_hex(key_hex: &str) -> SignerResult<Self> {
        // Decoded bytes are copied into the zeroizing buffer, then wiped here
        let decoded = Zeroizing::new(hex::decode(strip_hex_prefix(key_hex.trim())).map_err(
            |_| SignerError::invalid_private_key("Private key is not valid hex"),
        )?);
        Self::from_bytes(&decoded)
    }

    /// Take a key from raw bytes; must be a valid non-zero scalar
    pub fn from_bytes(bytes: &[u8]) -> SignerResult<Self> {
        if bytes.len() != KEY_LEN {
            return Err(SignerError::invalid_private_key(format!(
                "Private key must be {} bytes, got {}",
                KEY_LEN,
                bytes.len()
            )));
        }

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        key.copy_from_slice(bytes);
        let key = PrivateKey(key);
        key.wallet()?;
        Ok(key)
    }

    /// The raw key bytes
    pub fn expose_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Signing wallet for this key (no chain id bound)
    pub fn wallet(&self) -> SignerResult<LocalWallet> {
        LocalWallet::from_bytes(&self.0[..])
            .map_err(|e| SignerError::invalid_private_key(format!("Invalid private key: {}", e)))
    }

    /// Lower-case `0x` address controlled by this key
    pub fn address(&self) -> SignerResult<String> {
        let wallet = self.wallet()?;
        Ok(format!("0x{}", hex::encode(wallet.address().as_bytes())))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}
