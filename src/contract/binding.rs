//! Contract Call Encoding
//!
//! Turns a method name plus string arguments into calldata, and a set of
//! constructor arguments into deployment data, using a JSON ABI.

use super::artifact::ContractArtifact;
use crate::error::{SignerError, SignerResult};
use crate::utils::{parse_hex_bytes, strip_hex_prefix};
use crate::wallet::is_address;
use ethers_core::abi::token::{LenientTokenizer, Tokenizer};
use ethers_core::abi::{Abi, Param, ParamType, Token};

/// Encodes calls and deployments for one contract
///
/// Implemented by [`ContractBinding`]; the transaction builder only sees
/// this trait, so tests can substitute a recording encoder.
pub trait CallEncoder {
    /// Deployed address, if the contract has one
    fn address(&self) -> Option<&str>;

    /// Calldata for `method(args...)`
    fn encode_call(&self, method: &str, args: &[String]) -> SignerResult<Vec<u8>>;

    /// Creation bytecode followed by the encoded constructor arguments
    fn encode_deployment(&self, args: &[String]) -> SignerResult<Vec<u8>>;
}

/// A contract ABI, optionally with bytecode and a deployed address
#[derive(Debug, Clone)]
pub struct ContractBinding {
    abi: Abi,
    bytecode: Option<Vec<u8>>,
    address: Option<String>,
}

impl ContractBinding {
    pub fn new(abi: Abi) -> Self {
        Self {
            abi,
            bytecode: None,
            address: None,
        }
    }

    /// Parse a JSON ABI document
    pub fn from_abi_json(json: &str) -> SignerResult<Self> {
        let abi: Abi = serde_json::from_str(json)?;
        Ok(Self::new(abi))
    }

    /// Binding for a compiled artifact (bytecode included when present)
    pub fn from_artifact(artifact: &ContractArtifact) -> SignerResult<Self> {
        let abi: Abi = serde_json::from_value(artifact.abi.clone())?;
        let binding = Self::new(abi);
        match artifact.bytecode.as_deref() {
            Some(code) => binding.with_bytecode(code),
            None => Ok(binding),
        }
    }

    /// Attach creation bytecode (hex, `0x` optional)
    pub fn with_bytecode(mut self, bytecode_hex: &str) -> SignerResult<Self> {
        self.bytecode = Some(parse_hex_bytes(bytecode_hex)?);
        Ok(self)
    }

    /// Bind to a deployed address
    pub fn at(mut self, address: &str) -> SignerResult<Self> {
        if !is_address(address) {
            return Err(SignerError::invalid_address(format!(
                "Contract address '{}' is not valid",
                address
            )));
        }
        self.address = Some(address.to_string());
        Ok(self)
    }

    pub fn abi(&self) -> &Abi {
        &self.abi
    }
}

impl CallEncoder for ContractBinding {
    fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    fn encode_call(&self, method: &str, args: &[String]) -> SignerResult<Vec<u8>> {
        // Overloads are told apart by argument count
        let function = self
            .abi
            .functions_by_name(method)?
            .iter()
            .find(|f| f.inputs.len() == args.len())
            .ok_or_else(|| {
                SignerError::encoding_error(format!(
                    "No overload of '{}' takes {} arguments",
                    method,
                    args.len()
                ))
            })?;

        let tokens = tokenize_args(&function.inputs, args)?;
        Ok(function.encode_input(&tokens)?)
    }

    fn encode_deployment(&self, args: &[String]) -> SignerResult<Vec<u8>> {
        let bytecode = self
            .bytecode
            .clone()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| SignerError::missing_bytecode("Contract has no bytecode to deploy"))?;

        match self.abi.constructor() {
            Some(constructor) => {
                let tokens = tokenize_args(&constructor.inputs, args)?;
                Ok(constructor.encode_input(bytecode, &tokens)?)
            }
            None if args.is_empty() => Ok(bytecode),
            None => Err(SignerError::encoding_error(format!(
                "Contract has no constructor but {} arguments were given",
                args.len()
            ))),
        }
    }
}

fn tokenize_args(params: &[Param], args: &[String]) -> SignerResult<Vec<Token>> {
    if params.len() != args.len() {
        return Err(SignerError::encoding_error(format!(
            "Expected {} arguments, got {}",
            params.len(),
            args.len()
        )));
    }

    params
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            let value = match param.kind {
                ParamType::Address => strip_hex_prefix(arg),
                _ => arg.as_str(),
            };
            LenientTokenizer::tokenize(&param.kind, value).map_err(|e| {
                SignerError::encoding_error(format!(
                    "Argument '{}' is not a valid {}",
                    param.name, param.kind
                ))
                .with_details(e.to_string())
            })
        })
        .collect()
}
