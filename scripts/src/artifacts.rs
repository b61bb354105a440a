//! Contract compilation artifacts: an ABI plus creation bytecode

use std::{fs, path::Path};

use alloy::{hex, primitives::Bytes};
use serde::{Deserialize, Serialize};

use crate::{constants::JSON_EXTENSION, errors::ScriptError, utils::read_json};

/// A compilation artifact, in the shape emitted by Hardhat & Foundry
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// The name of the contract
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_name: Option<String>,
    /// The JSON ABI
    pub abi: serde_json::Value,
    /// The hex-encoded creation bytecode, with or without a `0x` prefix.
    ///
    /// Empty for Stylus programs, which are not deployed from EVM creation code.
    #[serde(default)]
    pub bytecode: String,
}

impl Artifact {
    /// An artifact carrying only an ABI
    pub fn abi_only(contract_name: &str, abi: serde_json::Value) -> Self {
        Self {
            contract_name: Some(contract_name.to_string()),
            abi,
            bytecode: String::new(),
        }
    }

    /// Whether the artifact carries EVM creation bytecode
    pub fn has_bytecode(&self) -> bool {
        !self.bytecode.trim_start_matches("0x").is_empty()
    }

    /// Decodes the creation bytecode
    pub fn creation_code(&self) -> Result<Bytes, ScriptError> {
        if !self.has_bytecode() {
            return Err(ScriptError::ArtifactParsing(String::from(
                "artifact has no creation bytecode",
            )));
        }

        hex::decode(&self.bytecode)
            .map(Bytes::from)
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
    }
}

/// Loads an artifact from a JSON file
pub fn load_artifact(path: &Path) -> Result<Artifact, ScriptError> {
    let artifact: Artifact = read_json(path)?;
    if !artifact.abi.is_array() {
        return Err(ScriptError::ArtifactParsing(format!(
            "{}: abi is not an array",
            path.display()
        )));
    }
    Ok(artifact)
}

/// Lists the contracts with an artifact in `<abi_dir>/<networkish>/`, sorted by name
pub fn available_contracts(abi_dir: &Path, networkish: &str) -> Result<Vec<String>, ScriptError> {
    let network_dir = abi_dir.join(networkish);
    if !network_dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&network_dir)
        .map_err(|e| ScriptError::ReadFile(format!("{}: {}", network_dir.display(), e)))?;

    let mut contracts: Vec<String> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension()? != JSON_EXTENSION {
                return None;
            }
            Some(path.file_stem()?.to_string_lossy().into_owned())
        })
        .collect();

    contracts.sort();
    Ok(contracts)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;
    use crate::utils::write_json_pretty;

    #[test]
    fn test_creation_code() {
        let prefixed = Artifact {
            bytecode: "0x6080".to_string(),
            ..Default::default()
        };
        let bare = Artifact {
            bytecode: "6080".to_string(),
            ..Default::default()
        };

        assert_eq!(prefixed.creation_code().unwrap(), Bytes::from(vec![0x60, 0x80]));
        assert_eq!(bare.creation_code().unwrap(), Bytes::from(vec![0x60, 0x80]));
        assert!(Artifact::abi_only("eHKD", json!([])).creation_code().is_err());
    }

    #[test]
    fn test_load_artifact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("RentalEscrow.json");
        write_json_pretty(
            &path,
            &json!({ "contractName": "RentalEscrow", "abi": [], "bytecode": "0x00" }),
        )
        .unwrap();

        let artifact = load_artifact(&path).unwrap();
        assert_eq!(artifact.contract_name.as_deref(), Some("RentalEscrow"));
        assert!(artifact.has_bytecode());

        write_json_pretty(&path, &json!({ "abi": {} })).unwrap();
        assert!(matches!(load_artifact(&path), Err(ScriptError::ArtifactParsing(_))));
    }

    #[test]
    fn test_available_contracts() {
        let dir = tempdir().unwrap();
        let network_dir = dir.path().join("sepolia");
        fs::create_dir_all(&network_dir).unwrap();
        fs::write(network_dir.join("eHKD.json"), "{}").unwrap();
        fs::write(network_dir.join("RentalEscrow.json"), "{}").unwrap();
        fs::write(network_dir.join("README.md"), "").unwrap();

        assert_eq!(
            available_contracts(dir.path(), "sepolia").unwrap(),
            vec!["RentalEscrow".to_string(), "eHKD".to_string()]
        );
        assert!(available_contracts(dir.path(), "devnet").unwrap().is_empty());
    }
}
