//! Transaction Builder
//!
//! Assembles the field set of transfers, deployments and contract calls and
//! hands it to a [`TransactionSigner`]. All quantities are normalised through
//! `to_hex` before they reach the signer.

use super::signer::{EthersSigner, TransactionSigner};
use crate::codec::to_hex;
use crate::config::SignerConfig;
use crate::contract::CallEncoder;
use crate::error::{SignerError, SignerResult};
use crate::types::{HexValue, RawTransactionFields};
use crate::wallet::{is_address, PrivateKey};
use crate::{log_debug, log_info};

/// Empty calldata of a plain transfer
const EMPTY_DATA: &str = "0x";

// =============================================================================
// Gas Configuration
// =============================================================================

/// Gas price and limit applied to every built transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasConfig {
    gas_price: String,
    gas_limit: String,
}

impl GasConfig {
    pub fn new(gas_price: impl Into<HexValue>, gas_limit: impl Into<HexValue>) -> SignerResult<Self> {
        Ok(Self {
            gas_price: to_hex(gas_price)?,
            gas_limit: to_hex(gas_limit)?,
        })
    }

    pub fn from_config(config: &SignerConfig) -> SignerResult<Self> {
        Self::new(config.gas_price.as_str(), config.gas_limit)
    }

    /// Hex gas price
    pub fn gas_price(&self) -> &str {
        &self.gas_price
    }

    /// Hex gas limit
    pub fn gas_limit(&self) -> &str {
        &self.gas_limit
    }

    pub fn set_gas_price(&mut self, gas_price: impl Into<HexValue>) -> SignerResult<()> {
        self.gas_price = to_hex(gas_price)?;
        Ok(())
    }

    pub fn set_gas_limit(&mut self, gas_limit: impl Into<HexValue>) -> SignerResult<()> {
        self.gas_limit = to_hex(gas_limit)?;
        Ok(())
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds and signs transactions for one sender key
pub struct TransactionBuilder<S: TransactionSigner> {
    gas: GasConfig,
    contract: Option<Box<dyn CallEncoder>>,
    key: PrivateKey,
    signer: S,
}

impl TransactionBuilder<EthersSigner> {
    /// Ethers-backed builder with chain id and gas taken from `config`
    pub fn from_config(config: &SignerConfig, key: PrivateKey) -> SignerResult<Self> {
        Ok(Self::new(EthersSigner::from_config(config), key, GasConfig::from_config(config)?))
    }
}

impl<S: TransactionSigner> TransactionBuilder<S> {
    pub fn new(signer: S, key: PrivateKey, gas: GasConfig) -> Self {
        Self {
            gas,
            contract: None,
            key,
            signer,
        }
    }

    /// Bind the contract used by contract calls
    pub fn with_contract(mut self, contract: impl CallEncoder + 'static) -> Self {
        self.contract = Some(Box::new(contract));
        self
    }

    pub fn gas(&self) -> &GasConfig {
        &self.gas
    }

    pub fn set_gas_price(&mut self, gas_price: impl Into<HexValue>) -> SignerResult<()> {
        self.gas.set_gas_price(gas_price)
    }

    pub fn set_gas_limit(&mut self, gas_limit: impl Into<HexValue>) -> SignerResult<()> {
        self.gas.set_gas_limit(gas_limit)
    }

    /// Sender address of the held key
    pub fn address(&self) -> SignerResult<String> {
        self.key.address()
    }

    // -------------------------------------------------------------------------
    // Transfers
    // -------------------------------------------------------------------------

    /// Fields of a plain value transfer
    pub fn transfer_fields(
        &self,
        nonce: u64,
        to: &str,
        value: impl Into<HexValue>,
    ) -> SignerResult<RawTransactionFields> {
        if !is_address(to) {
            return Err(SignerError::invalid_address("To is not valid address.").with_details(to));
        }

        Ok(self.fields(nonce, Some(to.to_string()), to_hex(value)?, EMPTY_DATA.to_string()))
    }

    /// Signed raw transfer, `0x` hex
    pub fn build_transfer(&self, nonce: u64, to: &str, value: impl Into<HexValue>) -> SignerResult<String> {
        let fields = self.transfer_fields(nonce, to, value)?;
        self.sign(&fields)
    }

    // -------------------------------------------------------------------------
    // Deployments
    // -------------------------------------------------------------------------

    /// Fields of a contract creation
    pub fn deployment_fields(
        &self,
        encoder: &dyn CallEncoder,
        constructor_args: &[String],
        nonce: u64,
    ) -> SignerResult<RawTransactionFields> {
        let data = encoder.encode_deployment(constructor_args)?;
        Ok(self.fields(nonce, None, to_hex(0)?, format!("0x{}", hex::encode(data))))
    }

    pub fn build_deployment(
        &self,
        encoder: &dyn CallEncoder,
        constructor_args: &[String],
        nonce: u64,
    ) -> SignerResult<String> {
        let fields = self.deployment_fields(encoder, constructor_args, nonce)?;
        self.sign(&fields)
    }

    // -------------------------------------------------------------------------
    // Contract calls
    // -------------------------------------------------------------------------

    /// Fields of a call on the bound contract, sent to `to`
    pub fn contract_call_fields(
        &self,
        method: &str,
        args: &[String],
        to: &str,
        nonce: u64,
        value: impl Into<HexValue>,
    ) -> SignerResult<RawTransactionFields> {
        let contract = self
            .contract
            .as_deref()
            .filter(|contract| contract.address().is_some())
            .ok_or_else(|| {
                SignerError::missing_contract_address("No deployed contract is bound to this builder")
            })?;

        let data = contract.encode_call(method, args)?;
        Ok(self.fields(nonce, Some(to.to_string()), to_hex(value)?, format!("0x{}", hex::encode(data))))
    }

    pub fn build_contract_call(
        &self,
        method: &str,
        args: &[String],
        to: &str,
        nonce: u64,
        value: impl Into<HexValue>,
    ) -> SignerResult<String> {
        let fields = self.contract_call_fields(method, args, to, nonce, value)?;
        self.sign(&fields)
    }

    fn fields(&self, nonce: u64, to: Option<String>, value: String, data: String) -> RawTransactionFields {
        RawTransactionFields {
            nonce,
            to,
            value,
            data,
            gas_price: self.gas.gas_price.clone(),
            gas_limit: self.gas.gas_limit.clone(),
        }
    }

    fn sign(&self, fields: &RawTransactionFields) -> SignerResult<String> {
        log_debug!(
            "tx::builder",
            "Assembled transaction fields",
            nonce = fields.nonce,
            to = fields.to.as_deref().unwrap_or("<create>"),
            value = fields.value,
            data = fields.data,
            gas_price = fields.gas_price,
            gas_limit = fields.gas_limit
        );

        let raw = format!("0x{}", hex::encode(self.signer.sign(fields, &self.key)?));

        log_info!(
            "tx::builder",
            "Signed transaction",
            nonce = fields.nonce,
            contract_creation = fields.is_contract_creation(),
            raw_tx = raw
        );
        Ok(raw)
    }
}
