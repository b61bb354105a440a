//! The per-chain deployment journal.
//!
//! Each chain gets a `chain-<id>` directory under the deployments directory, holding:
//! - `deployed_addresses.json`, mapping future IDs (`<Module>#<Contract>`) to addresses
//! - `journal.jsonl`, one JSON object per executed step
//! - `artifacts/<futureId>.json`, the artifact of every contract a future resolved to

use std::{
    collections::BTreeMap,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    artifacts::Artifact,
    constants::{
        ARTIFACTS_DIR, CHAIN_DIR_PREFIX, DEPLOYED_ADDRESSES_FILE, JOURNAL_FILE, JSON_EXTENSION,
    },
    errors::ScriptError,
    utils::{create_parent_dir, read_json, write_json_pretty},
};

/// The journal entry type of a confirmed deployment or call
pub const TRANSACTION_CONFIRM: &str = "TRANSACTION_CONFIRM";

/// The journal entry type of a contract resolved at an existing address
pub const CONTRACT_AT: &str = "CONTRACT_AT_EXECUTION_STATE_INITIALIZE";

/// The receipt of a journaled transaction
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JournalReceipt {
    /// The created contract, for deployments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
    /// The block the transaction was included in
    pub block_number: u64,
    /// The transaction hash, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<B256>,
}

/// A single line of the journal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// The future this entry belongs to
    pub future_id: String,
    /// The kind of entry
    #[serde(rename = "type")]
    pub kind: String,
    /// The transaction receipt, for confirmed transactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<JournalReceipt>,
}

/// Builds the future ID of a contract within a module
pub fn future_id(module: &str, contract: &str) -> String {
    format!("{module}#{contract}")
}

/// A handle to the deployment journal of a single chain
#[derive(Clone, Debug)]
pub struct Journal {
    /// The `chain-<id>` directory
    dir: PathBuf,
}

impl Journal {
    /// The journal of the given chain under the deployments directory
    pub fn for_chain(deployments_dir: &Path, chain_id: u64) -> Self {
        Self {
            dir: deployments_dir.join(format!("{CHAIN_DIR_PREFIX}{chain_id}")),
        }
    }

    /// The `chain-<id>` directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The path of `deployed_addresses.json`
    pub fn deployed_addresses_path(&self) -> PathBuf {
        self.dir.join(DEPLOYED_ADDRESSES_FILE)
    }

    /// The path of `journal.jsonl`
    pub fn journal_path(&self) -> PathBuf {
        self.dir.join(JOURNAL_FILE)
    }

    /// The path of the artifact stored for a future
    pub fn artifact_path(&self, future_id: &str) -> PathBuf {
        self.dir
            .join(ARTIFACTS_DIR)
            .join(format!("{future_id}.{JSON_EXTENSION}"))
    }

    // -----------
    // | READING |
    // -----------

    /// Reads the future ID -> address map. A missing file is an empty map.
    pub fn deployed_addresses(&self) -> Result<BTreeMap<String, Address>, ScriptError> {
        let path = self.deployed_addresses_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        read_json(&path)
    }

    /// The address a future resolved to, if it has been executed
    pub fn deployed_address(&self, future_id: &str) -> Result<Option<Address>, ScriptError> {
        Ok(self.deployed_addresses()?.get(future_id).copied())
    }

    /// Reads every entry of the journal, skipping lines that aren't JSON objects
    pub fn entries(&self) -> Result<Vec<JournalEntry>, ScriptError> {
        let path = self.journal_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| ScriptError::ReadFile(format!("{}: {}", path.display(), e)))?;

        contents
            .lines()
            .filter(|line| line.starts_with('{'))
            .map(|line| serde_json::from_str(line).map_err(|e| ScriptError::Serde(e.to_string())))
            .collect()
    }

    /// Finds the first receipt journaled for the future that created the given address
    pub fn find_deployment_receipt(
        &self,
        future_id: &str,
        address: Address,
    ) -> Result<Option<JournalReceipt>, ScriptError> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|entry| entry.future_id == future_id)
            .filter_map(|entry| entry.receipt)
            .find(|receipt| receipt.contract_address == Some(address)))
    }

    /// Whether a confirmed transaction has been journaled for the future
    pub fn is_confirmed(&self, future_id: &str) -> Result<bool, ScriptError> {
        Ok(self
            .entries()?
            .iter()
            .any(|entry| entry.future_id == future_id && entry.receipt.is_some()))
    }

    // -----------
    // | WRITING |
    // -----------

    /// Records a confirmed deployment: appends its receipt, maps the future to the
    /// created address, and stores the contract's artifact
    pub fn record_deployment(
        &self,
        future_id: &str,
        address: Address,
        block_number: u64,
        transaction_hash: Option<B256>,
        artifact: &Artifact,
    ) -> Result<(), ScriptError> {
        self.append(&JournalEntry {
            future_id: future_id.to_string(),
            kind: TRANSACTION_CONFIRM.to_string(),
            receipt: Some(JournalReceipt {
                contract_address: Some(address),
                block_number,
                transaction_hash,
            }),
        })?;
        self.set_deployed_address(future_id, address)?;
        write_json_pretty(&self.artifact_path(future_id), artifact)?;

        info!("journaled {future_id} at {address:#x}");
        Ok(())
    }

    /// Records a contract resolved at an existing address, such as a proxy viewed
    /// through its implementation's ABI
    pub fn record_contract_at(
        &self,
        future_id: &str,
        address: Address,
        artifact: &Artifact,
    ) -> Result<(), ScriptError> {
        self.append(&JournalEntry {
            future_id: future_id.to_string(),
            kind: CONTRACT_AT.to_string(),
            receipt: None,
        })?;
        self.set_deployed_address(future_id, address)?;
        write_json_pretty(&self.artifact_path(future_id), artifact)
    }

    /// Records a confirmed contract call
    pub fn record_call(
        &self,
        future_id: &str,
        block_number: u64,
        transaction_hash: B256,
    ) -> Result<(), ScriptError> {
        self.append(&JournalEntry {
            future_id: future_id.to_string(),
            kind: TRANSACTION_CONFIRM.to_string(),
            receipt: Some(JournalReceipt {
                contract_address: None,
                block_number,
                transaction_hash: Some(transaction_hash),
            }),
        })?;

        info!("journaled {future_id}");
        Ok(())
    }

    /// Appends a line to the journal
    fn append(&self, entry: &JournalEntry) -> Result<(), ScriptError> {
        let path = self.journal_path();
        create_parent_dir(&path)?;

        let line = serde_json::to_string(entry).map_err(|e| ScriptError::Serde(e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| ScriptError::WriteFile(format!("{}: {}", path.display(), e)))?;

        writeln!(file, "{line}")
            .map_err(|e| ScriptError::WriteFile(format!("{}: {}", path.display(), e)))
    }

    /// Maps a future to an address in `deployed_addresses.json`
    fn set_deployed_address(&self, future_id: &str, address: Address) -> Result<(), ScriptError> {
        let mut addresses = self.deployed_addresses()?;
        addresses.insert(future_id.to_string(), address);
        write_json_pretty(&self.deployed_addresses_path(), &addresses)
    }
}
