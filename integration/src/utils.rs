//! Utilities for running integration tests

use std::{collections::BTreeMap, path::Path, str::FromStr};

use alloy::{
    contract::{CallBuilder, CallDecoder},
    network::{Ethereum, TransactionBuilder},
    primitives::{Address, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
    sol_types::decode_revert_reason,
    transports::http::reqwest::Url,
};
use eyre::{eyre, Result};
use scripts::{journal::future_id, utils::read_json};

use crate::constants::{MOCK_ERC20_DECIMALS, TEST_ACCOUNT_FUNDING};

/// Sets up a client signing with the given key
pub(crate) fn setup_client(priv_key: &str, rpc_url: &str) -> Result<(DynProvider, Address)> {
    let signer = PrivateKeySigner::from_str(priv_key)?;
    let address = signer.address();
    let provider = ProviderBuilder::new()
        .wallet(signer)
        .connect_http(Url::parse(rpc_url)?);
    Ok((DynProvider::new(provider), address))
}

/// Reads the future ID -> address map of a `deployed_addresses.json`
pub(crate) fn read_deployments(path: &Path) -> Result<BTreeMap<String, Address>> {
    Ok(read_json(path)?)
}

/// Looks up the address a module's contract resolved to
pub(crate) fn deployed_address(
    deployments: &BTreeMap<String, Address>,
    module: &str,
    contract: &str,
) -> Result<Address> {
    let key = future_id(module, contract);
    deployments
        .get(&key)
        .copied()
        .ok_or_else(|| eyre!("{key} not found in deployments file"))
}

/// An account created for a test, along with a client signing with its key
#[derive(Clone)]
pub(crate) struct TestAccount {
    /// The account's address
    pub(crate) address: Address,
    /// A client signing with the account's key
    pub(crate) client: DynProvider,
}

/// Creates a fresh account funded with ETH for gas
pub(crate) async fn funded_account(funder: &DynProvider, rpc_url: &str) -> Result<TestAccount> {
    let signer = PrivateKeySigner::random();
    let address = signer.address();

    let tx = TransactionRequest::default()
        .with_to(address)
        .with_value(U256::from(TEST_ACCOUNT_FUNDING));
    let receipt = funder.send_transaction(tx).await?.get_receipt().await?;
    if !receipt.status() {
        return Err(eyre!("funding {address:#x} failed"));
    }

    let client = ProviderBuilder::new()
        .wallet(signer)
        .connect_http(Url::parse(rpc_url)?);
    Ok(TestAccount {
        address,
        client: DynProvider::new(client),
    })
}

/// Converts whole tokens into base units of the mock ERC20
pub(crate) fn units(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(MOCK_ERC20_DECIMALS))
}

// ----------------
// | TRANSACTIONS |
// ----------------

/// Sends a transaction & waits for it to succeed
pub(crate) async fn send_tx<P: Provider, D: CallDecoder>(
    tx: CallBuilder<P, D, Ethereum>,
) -> Result<TransactionReceipt> {
    let receipt = tx.send().await?.get_receipt().await?;
    if !receipt.status() {
        return Err(eyre!(
            "transaction {:#x} reverted",
            receipt.transaction_hash
        ));
    }
    Ok(receipt)
}

/// Simulates a transaction from the given sender, asserting that it reverts with
/// exactly the given message
pub(crate) async fn assert_revert<P: Provider, D: CallDecoder>(
    tx: CallBuilder<P, D, Ethereum>,
    from: Address,
    expected: &[u8],
) -> Result<()> {
    let expected = String::from_utf8_lossy(expected);
    let err = match tx.from(from).call().await {
        Ok(_) => return Err(eyre!("expected revert \"{expected}\", but the call succeeded")),
        Err(err) => err,
    };

    let reason = err
        .as_revert_data()
        .and_then(|data| decode_revert_reason(&data))
        .ok_or_else(|| eyre!("expected revert \"{expected}\", got {err}"))?;

    if reason != expected {
        return Err(eyre!("expected revert \"{expected}\", got \"{reason}\""));
    }
    Ok(())
}

/// Asserts that two values are equal, returning an error otherwise
pub(crate) fn assert_eq_result<T: PartialEq + std::fmt::Debug>(
    actual: T,
    expected: T,
    what: &str,
) -> Result<()> {
    if actual != expected {
        return Err(eyre!("{what}: expected {expected:?}, got {actual:?}"));
    }
    Ok(())
}
