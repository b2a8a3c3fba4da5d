//! Compiled contract artifact, persisted as JSON

use crate::error::SignerResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// ABI plus (unless interface-only) `0x` creation bytecode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractArtifact {
    pub abi: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytecode: Option<String>,
}

impl ContractArtifact {
    /// Whether this artifact can only be called, not deployed
    pub fn is_interface(&self) -> bool {
        self.bytecode.is_none()
    }

    pub fn to_json(&self) -> SignerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> SignerResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> SignerResult<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interface_omits_bytecode() {
        let artifact = ContractArtifact {
            abi: json!([]),
            bytecode: None,
        };
        assert!(artifact.is_interface());
        assert!(!artifact.to_json().unwrap().contains("bytecode"));
    }

    #[test]
    fn test_write_and_load() {
        let path = std::env::temp_dir().join(format!("artifact-{}.json", std::process::id()));
        let artifact = ContractArtifact {
            abi: json!([{ "type": "function", "name": "pause", "inputs": [], "outputs": [] }]),
            bytecode: Some("0x6080".to_string()),
        };

        artifact.write_to(&path).unwrap();
        let loaded = ContractArtifact::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, artifact);
    }
}
