//! Solidity Compilation
//!
//! Runs an external compiler, pulls one contract's ABI and bytecode out of
//! its combined JSON output and persists them as a [`ContractArtifact`].

use super::artifact::ContractArtifact;
use crate::error::{SignerError, SignerResult};
use crate::{log_debug, log_error, log_info};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What to compile
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Solidity source file
    pub source: PathBuf,
    /// A second source the first one imports
    pub import: Option<PathBuf>,
    /// Contract to extract from the output
    pub contract_name: String,
    /// Abstract contracts and interfaces have no bytecode
    pub interface_only: bool,
}

impl CompileRequest {
    pub fn new(source: impl Into<PathBuf>, contract_name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            import: None,
            contract_name: contract_name.into(),
            interface_only: false,
        }
    }

    pub fn with_import(mut self, import: impl Into<PathBuf>) -> Self {
        self.import = Some(import.into());
        self
    }

    pub fn interface_only(mut self) -> Self {
        self.interface_only = true;
        self
    }
}

/// A Solidity compiler producing combined JSON output
pub trait SolidityCompiler {
    fn compile(&self, request: &CompileRequest) -> SignerResult<Value>;
}

/// The `solc` command-line compiler
#[derive(Debug, Clone)]
pub struct SolcCli {
    program: PathBuf,
}

impl SolcCli {
    /// Use `solc` from `PATH`
    pub fn new() -> Self {
        Self::with_program("solc")
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SolcCli {
    fn default() -> Self {
        Self::new()
    }
}

impl SolidityCompiler for SolcCli {
    fn compile(&self, request: &CompileRequest) -> SignerResult<Value> {
        let mut command = Command::new(&self.program);
        command.arg("--combined-json").arg("abi,bin").arg(&request.source);
        if let Some(import) = &request.import {
            command.arg(import);
        }

        let output = command.output().map_err(|e| {
            SignerError::compile_error(format!("Failed to run {}", self.program.display()))
                .with_details(e.to_string())
        })?;

        if !output.status.success() {
            log_error!(
                "contract::compiler",
                "solc exited with failure",
                source = request.source.display(),
                status = output.status
            );
            return Err(SignerError::compile_error(format!(
                "Compiling {} failed",
                request.source.display()
            ))
            .with_details(String::from_utf8_lossy(&output.stderr).trim().to_string()));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

/// Pick one contract's artifact out of combined compiler output
///
/// The contract entry is keyed by its bare name or `<unit>:<name>`; ABI is
/// read from `abi` or `interface`, bytecode from `bin` or `bytecode`.
pub fn extract_artifact(
    output: &Value,
    contract_name: &str,
    interface_only: bool,
) -> SignerResult<ContractArtifact> {
    let errors = compiler_errors(output);
    if !errors.is_empty() {
        return Err(SignerError::compile_error(format!(
            "Compiler reported {} error(s)",
            errors.len()
        ))
        .with_details(errors.join("\n")));
    }

    let suffix = format!(":{}", contract_name);
    let entry = output
        .get("contracts")
        .and_then(Value::as_object)
        .and_then(|contracts| {
            contracts
                .iter()
                .find(|(key, _)| key.as_str() == contract_name || key.ends_with(&suffix))
                .map(|(_, entry)| entry)
        })
        .ok_or_else(|| {
            SignerError::compile_error(format!(
                "Contract '{}' not found in compiler output",
                contract_name
            ))
        })?;

    let abi = field(entry, &["abi", "interface"])
        .map(parse_abi)
        .transpose()?
        .ok_or_else(|| SignerError::missing_abi("compile abi is null, check sol file"))?;

    let bytecode = if interface_only {
        None
    } else {
        let code = field(entry, &["bin", "bytecode"])
            .and_then(Value::as_str)
            .filter(|code| !code.is_empty())
            .ok_or_else(|| {
                SignerError::missing_bytecode("compile bytecode is null, check sol file")
            })?;
        Some(format!("0x{}", code.trim_start_matches("0x")))
    };

    Ok(ContractArtifact { abi, bytecode })
}

/// Compile, extract and write the artifact; returns the artifact path
///
/// Without an explicit `output` the artifact lands next to the source as
/// `<source>.json`.
pub fn compile_contract(
    compiler: &dyn SolidityCompiler,
    request: &CompileRequest,
    output: Option<&Path>,
) -> SignerResult<PathBuf> {
    log_info!(
        "contract::compiler",
        "Compiling contract",
        source = request.source.display(),
        contract_name = request.contract_name
    );

    let compiled = compiler.compile(request)?;
    let artifact = extract_artifact(&compiled, &request.contract_name, request.interface_only)?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!("{}.json", request.source.display())),
    };
    artifact.write_to(&path)?;

    log_debug!(
        "contract::compiler",
        "Artifact written",
        interface_only = artifact.is_interface(),
        bytecode = artifact.bytecode.as_deref().unwrap_or("")
    );
    log_info!(
        "contract::compiler",
        "Compiled contract",
        source = request.source.display(),
        artifact = path.display()
    );
    Ok(path)
}

/// First non-null, non-empty field among `names`
fn field<'a>(entry: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| entry.get(*name))
        .find(|value| !value.is_null() && value.as_str() != Some(""))
}

/// ABI may arrive as a JSON array or as a string holding one
fn parse_abi(raw: &Value) -> SignerResult<Value> {
    match raw {
        Value::String(text) => Ok(serde_json::from_str(text)?),
        other => Ok(other.clone()),
    }
}

/// Error messages in compiler output; warnings are ignored
fn compiler_errors(output: &Value) -> Vec<String> {
    let Some(entries) = output.get("errors").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(message) if !message.contains("Warning:") => Some(message.clone()),
            Value::Object(_) => {
                let severity = entry.get("severity").and_then(Value::as_str).unwrap_or("error");
                if severity == "error" {
                    let message = entry
                        .get("formattedMessage")
                        .or_else(|| entry.get("message"))
                        .and_then(Value::as_str)
                        .unwrap_or("unknown compiler error");
                    Some(message.to_string())
                } else {
                    None
                }
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    struct FixedOutput(Value);

    impl SolidityCompiler for FixedOutput {
        fn compile(&self, _request: &CompileRequest) -> SignerResult<Value> {
            Ok(self.0.clone())
        }
    }

    fn combined_output() -> Value {
        json!({
            "contracts": {
                "contracts/Wallet.sol:Wallet": {
                    "abi": [{ "type": "function", "name": "pause", "inputs": [], "outputs": [] }],
                    "bin": "6080604052"
                },
                "contracts/Wallet.sol:Token": {
                    "abi": "[]",
                    "bin": ""
                }
            }
        })
    }

    #[test]
    fn test_extract_by_suffix() {
        let artifact = extract_artifact(&combined_output(), "Wallet", false).unwrap();
        assert_eq!(artifact.bytecode.as_deref(), Some("0x6080604052"));
        assert!(artifact.abi.is_array());
    }

    #[test]
    fn test_extract_legacy_field_names() {
        let output = json!({
            "contracts": {
                ":Relay": { "interface": "[{\"type\":\"fallback\"}]", "bytecode": "60ff" }
            }
        });
        let artifact = extract_artifact(&output, "Relay", false).unwrap();
        assert_eq!(artifact.abi, json!([{ "type": "fallback" }]));
        assert_eq!(artifact.bytecode.as_deref(), Some("0x60ff"));
    }

    #[test]
    fn test_interface_only_skips_bytecode() {
        let artifact = extract_artifact(&combined_output(), "Token", true).unwrap();
        assert!(artifact.bytecode.is_none());
        assert_eq!(artifact.abi, json!([]));
    }

    #[test]
    fn test_missing_bytecode() {
        let err = extract_artifact(&combined_output(), "Token", false).unwrap_err();
        assert!(err.is(ErrorCode::MissingBytecode));
    }

    #[test]
    fn test_missing_abi() {
        let output = json!({ "contracts": { ":Empty": { "bin": "00" } } });
        let err = extract_artifact(&output, "Empty", false).unwrap_err();
        assert!(err.is(ErrorCode::MissingAbi));
    }

    #[test]
    fn test_compiler_errors() {
        let output = json!({
            "errors": [":3:5: ParserError: Expected ';'"],
            "contracts": {}
        });
        let err = extract_artifact(&output, "Wallet", false).unwrap_err();
        assert!(err.is(ErrorCode::CompileError));
        assert!(err.details.unwrap().contains("ParserError"));
    }

    #[test]
    fn test_warnings_are_not_errors() {
        let mut output = combined_output();
        output["errors"] = json!([
            ":1:1: Warning: Source file does not specify required compiler version!",
            { "severity": "warning", "message": "Unused local variable." }
        ]);
        assert!(extract_artifact(&output, "Wallet", false).is_ok());
    }

    #[test]
    fn test_unknown_contract() {
        let err = extract_artifact(&combined_output(), "Vault", false).unwrap_err();
        assert!(err.is(ErrorCode::CompileError));
    }

    #[test]
    fn test_compile_contract_writes_artifact() {
        let dir = std::env::temp_dir();
        let output = dir.join(format!("Wallet-{}.json", std::process::id()));
        let request = CompileRequest::new(dir.join("Wallet.sol"), "Wallet");

        let path = compile_contract(&FixedOutput(combined_output()), &request, Some(output.as_path())).unwrap();
        let artifact = ContractArtifact::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(path, output);
        assert_eq!(artifact.bytecode.as_deref(), Some("0x6080604052"));
    }

    #[test]
    fn test_default_artifact_path() {
        let source = std::env::temp_dir().join(format!("Iface-{}.sol", std::process::id()));
        let request = CompileRequest::new(&source, "Token").interface_only();

        let path = compile_contract(&FixedOutput(combined_output()), &request, None).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(path, PathBuf::from(format!("{}.json", source.display())));
    }

    #[test]
    fn test_missing_program() {
        let compiler = SolcCli::with_program("/nonexistent/solc-binary");
        let request = CompileRequest::new("x.sol", "X").with_import("y.sol");
        assert_eq!(request.import, Some(PathBuf::from("y.sol")));

        let err = compiler.compile(&request).unwrap_err();
        assert!(err.is(ErrorCode::CompileError));
    }
}
