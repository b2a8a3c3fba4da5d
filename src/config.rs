//! Signer Configuration
//!
//! Chain id, default gas settings and log level. Every field has a default,
//! so an empty JSON object is a complete config.

use crate::codec::to_big_decimal;
use crate::error::{SignerError, SignerResult};
use crate::log_warn;
use crate::types::Amount;
use crate::utils::logging::{self, LogLevel};
use crate::utils::parse_json;
use num_traits::Signed;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Mainnet
pub const DEFAULT_CHAIN_ID: u64 = 1;
/// 20 gwei
pub const DEFAULT_GAS_PRICE: &str = "20000000000";
pub const DEFAULT_GAS_LIMIT: u64 = 4_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignerConfig {
    /// EIP-155 chain id used when signing; 0 signs without replay protection
    pub chain_id: u64,
    /// Wei per gas, decimal or `0x` hex
    pub gas_price: String,
    pub gas_limit: u64,
    pub log_level: LogLevel,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            gas_price: DEFAULT_GAS_PRICE.to_string(),
            gas_limit: DEFAULT_GAS_LIMIT,
            log_level: LogLevel::Info,
        }
    }
}

impl SignerConfig {
    /// Parse and validate a JSON config document
    pub fn from_json_str(json: &str) -> SignerResult<Self> {
        let config: SignerConfig = parse_json(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> SignerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> SignerResult<()> {
        if self.gas_limit == 0 {
            return Err(SignerError::invalid_input("gasLimit must be non-zero"));
        }

        let gas_price = to_big_decimal(&Amount::from(&self.gas_price)).map_err(|e| {
            SignerError::invalid_input(format!("gasPrice '{}' is not a number", self.gas_price))
                .with_details(e.message)
        })?;
        if gas_price.is_negative() {
            return Err(SignerError::invalid_input("gasPrice must not be negative"));
        }

        Ok(())
    }
}

// =============================================================================
// Global Instance
// =============================================================================

static SIGNER_CONFIG: OnceLock<SignerConfig> = OnceLock::new();

/// Install the process-wide config and apply its log level
///
/// Returns false if a config was already installed; the first one wins.
pub fn init_signer_config(config: SignerConfig) -> bool {
    let level = config.log_level;
    let installed = SIGNER_CONFIG.set(config).is_ok();
    if installed {
        logging::set_max_level(level);
    } else {
        log_warn!("config", "Signer config already installed, ignoring new one");
    }
    installed
}

/// The process-wide config (defaults if none was installed)
pub fn signer_config() -> &'static SignerConfig {
    SIGNER_CONFIG.get_or_init(SignerConfig::default)
}
