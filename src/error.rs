//! Unified error types for ether-signer
//!
//! Every codec, validator and builder failure is reported as a
//! [`SignerError`] carrying a categorising [`ErrorCode`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all conversion, validation and signing operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl SignerError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, msg)
    }

    pub fn decode_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DecodeError, msg)
    }

    pub fn unknown_unit(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnknownUnit, msg)
    }

    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAddress, msg)
    }

    pub fn invalid_private_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPrivateKey, msg)
    }

    pub fn missing_contract_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingContractAddress, msg)
    }

    pub fn compile_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::CompileError, msg)
    }

    pub fn missing_abi(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingAbi, msg)
    }

    pub fn missing_bytecode(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingBytecode, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn encoding_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::EncodingError, msg)
    }

    pub fn signing_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::SigningFailed, msg)
    }

    /// True when this error carries the given code
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }
}

impl fmt::Display for SignerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for SignerError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Codec errors
    ParseError,
    DecodeError,
    UnknownUnit,

    // Input errors
    InvalidInput,
    InvalidAddress,
    InvalidPrivateKey,
    MissingContractAddress,

    // Compiler collaborator
    CompileError,
    MissingAbi,
    MissingBytecode,

    // Encoding / signing collaborators
    EncodingError,
    SigningFailed,

    // Wrapped third-party errors
    JsonError,
    HexError,
    Io,
}

/// Result type alias for ether-signer operations
pub type SignerResult<T> = Result<T, SignerError>;

// Conversions from common error types

impl From<serde_json::Error> for SignerError {
    fn from(e: serde_json::Error) -> Self {
        SignerError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for SignerError {
    fn from(e: hex::FromHexError) -> Self {
        SignerError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<std::io::Error> for SignerError {
    fn from(e: std::io::Error) -> Self {
        SignerError::new(ErrorCode::Io, e.to_string())
    }
}

impl From<bigdecimal::ParseBigDecimalError> for SignerError {
    fn from(e: bigdecimal::ParseBigDecimalError) -> Self {
        SignerError::new(ErrorCode::ParseError, format!("Invalid decimal number: {}", e))
    }
}

impl From<ethers_core::abi::Error> for SignerError {
    fn from(e: ethers_core::abi::Error) -> Self {
        SignerError::new(ErrorCode::EncodingError, format!("ABI error: {}", e))
    }
}
