//! Transaction Signer
//!
//! The boundary between assembled fields and signed bytes. Signing and RLP
//! serialisation are delegated to `ethers`; the builder only depends on
//! the [`TransactionSigner`] trait.

use crate::config::SignerConfig;
use crate::error::{SignerError, SignerResult};
use crate::types::RawTransactionFields;
use crate::utils::{keccak256_hex, parse_hex_bytes, strip_hex_prefix};
use crate::wallet::PrivateKey;
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{Address, TransactionRequest, U256};
use ethers_signers::Signer;

/// Errors raised while turning fields into a signed transaction
#[derive(Debug, Clone, thiserror::Error)]
pub enum SignError {
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Signing error: {0}")]
    Signing(String),
}

impl From<SignError> for SignerError {
    fn from(e: SignError) -> Self {
        match e {
            SignError::InvalidField { .. } => SignerError::invalid_input(e.to_string()),
            SignError::Signing(_) => SignerError::signing_failed(e.to_string()),
        }
    }
}

/// Signs assembled transaction fields with a private key
pub trait TransactionSigner {
    /// Serialised signed transaction bytes
    fn sign(&self, fields: &RawTransactionFields, key: &PrivateKey) -> SignerResult<Vec<u8>>;
}

// =============================================================================
// Ethers Signer
// =============================================================================

/// Legacy transactions, with EIP-155 replay protection unless `chain_id` is 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthersSigner {
    pub chain_id: u64,
}

impl EthersSigner {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }

    pub fn from_config(config: &SignerConfig) -> Self {
        Self::new(config.chain_id)
    }

    /// The unsigned request these fields describe
    pub fn request(&self, fields: &RawTransactionFields) -> Result<TransactionRequest, SignError> {
        let mut tx = TransactionRequest::new()
            .nonce(fields.nonce)
            .value(quantity("value", &fields.value)?)
            .gas(quantity("gasLimit", &fields.gas_limit)?)
            .gas_price(quantity("gasPrice", &fields.gas_price)?)
            .data(parse_hex_bytes(&fields.data).map_err(|e| SignError::InvalidField {
                field: "data",
                reason: e.message,
            })?);

        if self.chain_id != 0 {
            tx = tx.chain_id(self.chain_id);
        }
        if let Some(to) = &fields.to {
            tx = tx.to(recipient(to)?);
        }

        Ok(tx)
    }
}

impl TransactionSigner for EthersSigner {
    fn sign(&self, fields: &RawTransactionFields, key: &PrivateKey) -> SignerResult<Vec<u8>> {
        let wallet = key.wallet()?;
        let typed_tx: TypedTransaction = self.request(fields)?.into();

        // Chain 0: sign the six-field sighash, v stays 27/28
        let signature = if self.chain_id == 0 {
            wallet.sign_hash(typed_tx.sighash())
        } else {
            wallet
                .with_chain_id(self.chain_id)
                .sign_transaction_sync(&typed_tx)
        }
        .map_err(|e| SignError::Signing(e.to_string()))?;

        Ok(typed_tx.rlp_signed(&signature).to_vec())
    }
}

/// Keccak-256 of a signed raw transaction, `0x` prefixed
pub fn transaction_hash(raw_tx: &str) -> SignerResult<String> {
    let bytes = parse_hex_bytes(raw_tx)?;
    if bytes.is_empty() {
        return Err(SignerError::invalid_input("Raw transaction is empty"));
    }
    Ok(format!("0x{}", keccak256_hex(&bytes)))
}

/// Hex quantity to U256; rejects signs and fractions
fn quantity(field: &'static str, value: &str) -> Result<U256, SignError> {
    let invalid = |reason: &str| SignError::InvalidField {
        field,
        reason: format!("'{}' {}", value, reason),
    };

    if value.starts_with('-') {
        return Err(invalid("is negative"));
    }
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| invalid("is not a 0x hex quantity"))?;
    if digits.is_empty() {
        return Ok(U256::zero());
    }

    U256::from_str_radix(digits, 16).map_err(|_| invalid("is not a whole hex number below 2^256"))
}

fn recipient(to: &str) -> Result<Address, SignError> {
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(strip_hex_prefix(to), &mut bytes).map_err(|e| SignError::InvalidField {
        field: "to",
        reason: e.to_string(),
    })?;
    Ok(Address::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use ethers_core::types::NameOrAddress;

    fn fields() -> RawTransactionFields {
        RawTransactionFields {
            nonce: 9,
            to: Some("0x3535353535353535353535353535353535353535".to_string()),
            value: "0xde0b6b3a7640000".to_string(),
            data: "0x".to_string(),
            gas_price: "0x4a817c800".to_string(),
            gas_limit: "0x5208".to_string(),
        }
    }

    #[test]
    fn test_request_fields() {
        let tx = EthersSigner::new(1).request(&fields()).unwrap();
        assert_eq!(tx.nonce, Some(U256::from(9)));
        assert_eq!(tx.gas, Some(U256::from(21000)));
        assert_eq!(tx.gas_price, Some(U256::from(20_000_000_000u64)));
        assert_eq!(tx.value, Some(U256::from(1_000_000_000_000_000_000u64)));
        assert_eq!(
            tx.to,
            Some(NameOrAddress::Address(Address::from([0x35u8; 20])))
        );
    }

    #[test]
    fn test_eip155_vector() {
        // EIP-155 example: nonce 9, 20 gwei, 21000 gas, 1 ether to 0x3535..., chain 1
        let key = PrivateKey::from_hex(
            "4646464646464646464646464646464646464646464646464646464646464646",
        )
        .unwrap();
        let raw = EthersSigner::new(1).sign(&fields(), &key).unwrap();
        assert_eq!(
            hex::encode(raw),
            "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
        );
    }

    #[test]
    fn test_chain_zero_signs_without_replay_protection() {
        let key = PrivateKey::from_hex(
            "4646464646464646464646464646464646464646464646464646464646464646",
        )
        .unwrap();
        let signer = EthersSigner::new(0);
        assert!(signer.request(&fields()).unwrap().chain_id.is_none());

        let raw = signer.sign(&fields(), &key).unwrap();
        let (tx, signature) =
            TypedTransaction::decode_signed(&ethers_core::utils::rlp::Rlp::new(&raw)).unwrap();

        assert!(signature.v == 27 || signature.v == 28);
        assert!(tx.chain_id().is_none());
        let sender = signature.recover(tx.sighash()).unwrap();
        assert_eq!(format!("0x{}", hex::encode(sender.as_bytes())), key.address().unwrap());
    }

    #[test]
    fn test_contract_creation_has_no_recipient() {
        let mut creation = fields();
        creation.to = None;
        let tx = EthersSigner::new(1).request(&creation).unwrap();
        assert!(tx.to.is_none());
    }

    #[test]
    fn test_rejects_bad_quantities() {
        let signer = EthersSigner::new(1);

        let mut negative = fields();
        negative.value = "-0x1".to_string();
        assert!(signer.request(&negative).is_err());

        let mut fraction = fields();
        fraction.value = "0x0.8".to_string();
        assert!(signer.request(&fraction).is_err());

        let mut bad_to = fields();
        bad_to.to = Some("0x1234".to_string());
        let err: SignerError = signer.request(&bad_to).unwrap_err().into();
        assert!(err.is(ErrorCode::InvalidInput));
    }

    #[test]
    fn test_empty_quantity_is_zero() {
        assert_eq!(quantity("value", "0x").unwrap(), U256::zero());
    }

    #[test]
    fn test_transaction_hash() {
        // keccak-256 of the single byte 0x00
        assert_eq!(
            transaction_hash("0x00").unwrap(),
            "0xbc36789e7a1e281436464229828f817d6612f7b477d66591ff96a9e064bcc98a"
        );
        assert!(transaction_hash("0x").unwrap_err().is(ErrorCode::InvalidInput));
    }
}
