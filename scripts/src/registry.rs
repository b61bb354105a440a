//! Updates the project registry from the deployment journals.
//!
//! The registry holds, per network, a `deployed/<networkish>/<name>.json` record of
//! every module's headline contract and an `abi/<networkish>/<name>.json` copy of its
//! artifact.

use std::{fs, path::Path};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    constants::{
        ABI_DIR, DEPLOYED_DIR, FUTURE_ID_SEPARATOR, JSON_EXTENSION, MODULE_SUFFIX,
        PROXY_CONTRACT_NAME, PROXY_MODULE_SUFFIX,
    },
    errors::ScriptError,
    journal::{future_id, Journal},
    networks::ChainId,
    utils::{create_parent_dir, write_json_pretty},
};

/// A contract's entry in the registry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeployedRecord {
    /// The contract's address
    pub address: Address,
    /// The block the contract was deployed in
    pub block_number: u64,
}

/// Splits a future ID into its module & contract names
fn split_future_id(key: &str) -> Option<(&str, &str)> {
    key.split_once(FUTURE_ID_SEPARATOR)
}

/// Whether a `deployed_addresses.json` key is published to the registry: either the
/// contract a module is named after, or a proxy
pub fn is_selected_key(key: &str) -> bool {
    if key.ends_with(PROXY_CONTRACT_NAME) {
        return true;
    }

    match split_future_id(key) {
        Some((module, contract)) => module == format!("{contract}{MODULE_SUFFIX}"),
        None => false,
    }
}

/// The registry name of a selected key.
///
/// `RentalEscrowProxyModule#TransparentUpgradeableProxy` is published as
/// `RentalEscrow`, `eHKDModule#eHKD` as `eHKD`.
pub fn output_name(key: &str) -> String {
    let proxy_suffix = format!("{PROXY_MODULE_SUFFIX}{FUTURE_ID_SEPARATOR}{PROXY_CONTRACT_NAME}");
    if let Some(name) = key.strip_suffix(&proxy_suffix) {
        return name.to_string();
    }

    match split_future_id(key) {
        Some((_, contract)) => contract.to_string(),
        None => key.to_string(),
    }
}

/// The future whose artifact is published as a registry entry's ABI.
///
/// Keyed by the registry name rather than the key's contract, so a proxy entry gets
/// the ABI of `<name>Module#<name>`, the implementation's ABI at the proxy's address.
pub fn abi_source_id(name: &str) -> String {
    future_id(&format!("{name}{MODULE_SUFFIX}"), name)
}

/// Updates the registry from the journal of every configured chain.
///
/// Chains without a deployment are skipped, as are chains whose journal can't be read.
pub fn update_deployed(deployments_dir: &Path, registry_dir: &Path) -> Result<(), ScriptError> {
    for chain in ChainId::ALL {
        let journal = Journal::for_chain(deployments_dir, chain.id());
        if !journal.deployed_addresses_path().exists() {
            info!("no deployments on {chain}, skipping");
            continue;
        }

        match update_chain(&journal, chain, registry_dir) {
            Ok(names) => info!("updated {} registry entries on {chain}", names.len()),
            Err(e) => warn!("failed to update registry for {chain}: {e}"),
        }
    }

    Ok(())
}

/// Publishes the selected deployments of a single chain, returning the registry names
/// written
pub fn update_chain(
    journal: &Journal,
    chain: ChainId,
    registry_dir: &Path,
) -> Result<Vec<String>, ScriptError> {
    let networkish = chain.networkish();
    let deployed_addresses = journal.deployed_addresses()?;
    let mut written = Vec::new();

    for (key, address) in deployed_addresses.iter().filter(|(k, _)| is_selected_key(k)) {
        let Some(receipt) = journal.find_deployment_receipt(key, *address)? else {
            warn!("no deployment receipt for {key} at {address:#x}, skipping");
            continue;
        };

        let name = output_name(key);
        let record = DeployedRecord {
            address: *address,
            block_number: receipt.block_number,
        };

        let record_path = registry_dir
            .join(DEPLOYED_DIR)
            .join(networkish)
            .join(format!("{name}.{JSON_EXTENSION}"));
        write_json_pretty(&record_path, &record)?;

        let artifact_path = journal.artifact_path(&abi_source_id(&name));
        if artifact_path.exists() {
            let abi_path = registry_dir
                .join(ABI_DIR)
                .join(networkish)
                .join(format!("{name}.{JSON_EXTENSION}"));
            create_parent_dir(&abi_path)?;
            fs::copy(&artifact_path, &abi_path)
                .map_err(|e| ScriptError::WriteFile(format!("{}: {}", abi_path.display(), e)))?;
        }

        info!("{name} on {networkish}: {address:#x} (block {})", record.block_number);
        written.push(name);
    }

    Ok(written)
}
