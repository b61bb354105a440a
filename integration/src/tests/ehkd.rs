//! Integration tests for the eHKD stablecoin

use alloy::primitives::{Address, U256};
use contracts_common::constants::{
    EHKD_DECIMALS, EHKD_NAME, EHKD_SYMBOL, INSUFFICIENT_BALANCE_ERROR_MESSAGE,
    INVALID_VERSION_ERROR_MESSAGE, NOT_ADMIN_ERROR_MESSAGE, ZERO_ADDRESS_ERROR_MESSAGE,
};
use eyre::Result;
use tracing::info;

use crate::{
    integration_test,
    test_inventory::{Ehkd, TestArgs},
    utils::{assert_eq_result, assert_revert, funded_account, send_tx},
};

/// Tests the token's metadata & the supply minted to the vault on initialization
async fn test_ehkd_initialized(args: TestArgs) -> Result<()> {
    let ehkd = args.ehkd();

    assert_eq_result(ehkd.name().call().await?, EHKD_NAME.to_string(), "name")?;
    assert_eq_result(ehkd.symbol().call().await?, EHKD_SYMBOL.to_string(), "symbol")?;
    assert_eq_result(ehkd.decimals().call().await?, EHKD_DECIMALS, "decimals")?;

    let admin = ehkd.admin().call().await?;
    let vault = ehkd.tokenVault().call().await?;
    if admin == Address::ZERO || vault == Address::ZERO {
        return Err(eyre::eyre!("admin & vault must be set on initialization"));
    }

    // Nothing is ever minted outside of the vault
    assert_eq_result(
        ehkd.balanceOf(vault).call().await?,
        ehkd.totalSupply().call().await?,
        "vault balance",
    )?;

    let outsider = funded_account(&args.client, &args.rpc_url).await?;
    let outsider_ehkd = Ehkd::new(args.ehkd_address, outsider.client.clone());
    assert_revert(
        outsider_ehkd.initialize(outsider.address, outsider.address, U256::from(1)),
        outsider.address,
        INVALID_VERSION_ERROR_MESSAGE,
    )
    .await
}
integration_test!(test_ehkd_initialized);

/// Tests that the admin-only methods reject everyone else
async fn test_ehkd_admin_only(args: TestArgs) -> Result<()> {
    let outsider = funded_account(&args.client, &args.rpc_url).await?;
    let ehkd = Ehkd::new(args.ehkd_address, outsider.client.clone());

    assert_revert(ehkd.mint(U256::from(1)), outsider.address, NOT_ADMIN_ERROR_MESSAGE).await?;
    assert_revert(ehkd.burn(U256::from(1)), outsider.address, NOT_ADMIN_ERROR_MESSAGE).await?;
    assert_revert(
        ehkd.setTokenVault(outsider.address),
        outsider.address,
        NOT_ADMIN_ERROR_MESSAGE,
    )
    .await?;
    assert_revert(
        ehkd.transferAdmin(outsider.address),
        outsider.address,
        NOT_ADMIN_ERROR_MESSAGE,
    )
    .await
}
integration_test!(test_ehkd_admin_only);

/// Tests minting & burning against the vault, when the deployer administers the token
async fn test_ehkd_mint_burn(args: TestArgs) -> Result<()> {
    let ehkd = args.ehkd();
    if ehkd.admin().call().await? != args.deployer {
        info!("deployer is not the eHKD admin, skipping");
        return Ok(());
    }

    let vault = ehkd.tokenVault().call().await?;
    let supply = ehkd.totalSupply().call().await?;
    let vault_balance = ehkd.balanceOf(vault).call().await?;
    let amount = U256::from(1_000_000u64);

    send_tx(ehkd.mint(amount)).await?;
    assert_eq_result(ehkd.totalSupply().call().await?, supply + amount, "supply after mint")?;
    assert_eq_result(
        ehkd.balanceOf(vault).call().await?,
        vault_balance + amount,
        "vault balance after mint",
    )?;

    send_tx(ehkd.burn(amount)).await?;
    assert_eq_result(ehkd.totalSupply().call().await?, supply, "supply after burn")?;
    assert_eq_result(ehkd.balanceOf(vault).call().await?, vault_balance, "vault balance after burn")?;

    // Burning is bounded by the vault's balance
    assert_revert(
        ehkd.burn(vault_balance + U256::from(1)),
        args.deployer,
        INSUFFICIENT_BALANCE_ERROR_MESSAGE,
    )
    .await?;

    assert_revert(ehkd.setTokenVault(Address::ZERO), args.deployer, ZERO_ADDRESS_ERROR_MESSAGE)
        .await?;
    assert_revert(ehkd.transferAdmin(Address::ZERO), args.deployer, ZERO_ADDRESS_ERROR_MESSAGE)
        .await
}
integration_test!(test_ehkd_mint_burn);
