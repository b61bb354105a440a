//! Read-only checks against the live Sepolia deployment.
//!
//! These need a Sepolia RPC endpoint in `SEPOLIA_RPC_URL` & only run with `--sepolia`.

use std::path::Path;

use alloy::primitives::{address, Address};
use eyre::Result;
use scripts::{
    constants::{DEPLOYED_DIR, JSON_EXTENSION, RENTAL_ESCROW_CONTRACT_NAME},
    networks::ChainId,
    registry::DeployedRecord,
    utils::{read_json, setup_read_client},
};

use crate::{test_inventory::RentalEscrow, utils::assert_eq_result};

/// An account the Sepolia rental escrow was initialized with
const SEPOLIA_WHITELISTED_ACCOUNT: Address = address!("0d60dc9a98da360e5cd5b6a2d7bf421a8afddb0b");

/// Reads the Sepolia rental escrow's address from the registry
pub(crate) fn sepolia_escrow_address(registry_dir: &Path) -> Result<Address> {
    let path = registry_dir
        .join(DEPLOYED_DIR)
        .join(ChainId::EthSepolia.networkish())
        .join(format!("{RENTAL_ESCROW_CONTRACT_NAME}.{JSON_EXTENSION}"));
    let record: DeployedRecord = read_json(&path)?;
    Ok(record.address)
}

/// Checks that the initializer's whitelist took effect on Sepolia
pub(crate) async fn check_sepolia_whitelist(registry_dir: &Path) -> Result<()> {
    let client = setup_read_client(&ChainId::EthSepolia.rpc_url()?)?;
    let escrow = RentalEscrow::new(sepolia_escrow_address(registry_dir)?, client);

    let whitelisted = escrow.isWhitelisted(SEPOLIA_WHITELISTED_ACCOUNT).call().await?;
    assert_eq_result(whitelisted, true, "initializer whitelisted on sepolia")
}
