//! Ether Signer Library
//!
//! Offline preparation of Ethereum transactions.
//!
//! # Architecture
//!
//! This crate provides:
//! - **codec**: decimal, text and structured values <-> `0x` hex
//! - **wallet**: ether denominations, address checksums, private keys
//! - **tx**: transaction field assembly and the signer boundary
//! - **contract**: ABI call encoding and `solc` compilation artifacts
//! - **config**: chain id, gas defaults and log level
//!
//! # Security
//!
//! Private keys are held in `zeroize` buffers and are never printed by
//! `Debug` or by the structured logger.
//!
//! # Example
//!
//! ```rust,ignore
//! use ether_signer::{PrivateKey, SignerConfig, TransactionBuilder};
//!
//! let key = PrivateKey::from_hex(key_hex)?;
//! let builder = TransactionBuilder::from_config(&SignerConfig::default(), key)?;
//! let raw = builder.build_transfer(0, "0x01BF9878a7099b2203838f3a8E7652Ad7B127A26", ether_signer::to_wei(1, None)?)?;
//! ```

pub mod codec;
pub mod config;
pub mod contract;
pub mod error;
pub mod tx;
pub mod types;
pub mod utils;
pub mod wallet;

// Re-export key types for convenience
pub use config::{init_signer_config, signer_config, SignerConfig};
pub use error::{ErrorCode, SignerError, SignerResult};
pub use types::*;

// Re-export the codec and unit conversions
pub use codec::{
    from_ascii, from_decimal, from_utf8, pad_left, pad_right, to_ascii, to_big_decimal,
    to_decimal, to_hex, to_utf8,
};
pub use wallet::{
    from_wei, get_value_of_unit, is_address, is_checksum_address, to_checksum_address, to_wei,
    PrivateKey,
};

// Re-export transaction building
pub use contract::{CallEncoder, ContractArtifact, ContractBinding};
pub use tx::{
    transaction_hash, EthersSigner, GasConfig, TransactionBuilder, TransactionSigner,
};

pub use utils::crypto::keccak256;
