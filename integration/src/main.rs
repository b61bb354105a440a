//! Integration tests for the rental escrow & eHKD programs.
//! These assume that a devnet is already running locally, with the contracts deployed.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

use clap::Parser;
use cli::Cli;
use colored::Colorize;
use eyre::{eyre, Result};
use test_inventory::{IntegrationTest, TestArgs};
use utils::{deployed_address, read_deployments, setup_client};

mod cli;
mod constants;
mod remote;
mod test_inventory;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let Cli {
        test,
        deployments_file,
        priv_key,
        rpc_url,
        sepolia,
        registry_dir,
    } = Cli::parse();

    if sepolia {
        remote::check_sepolia_whitelist(&registry_dir).await?;
        println!("{} check_sepolia_whitelist", "PASSED".green().bold());
        return Ok(());
    }

    let (client, deployer) = setup_client(&priv_key, &rpc_url)?;
    let deployments = read_deployments(&deployments_file)?;

    let args = TestArgs {
        client,
        deployer,
        rpc_url,
        rental_escrow_address: deployed_address(&deployments, "RentalEscrowModule", "RentalEscrow")?,
        rental_escrow_proxy_admin_address: deployed_address(
            &deployments,
            "RentalEscrowProxyModule",
            "ProxyAdmin",
        )?,
        ehkd_address: deployed_address(&deployments, "eHKDModule", "eHKD")?,
        erc20_mock_address: deployed_address(&deployments, "ERC20MockModule", "ERC20Mock")?,
        dummy_upgrade_target_address: deployed_address(
            &deployments,
            "DummyUpgradeTargetModule",
            "DummyUpgradeTarget",
        )?,
    };

    let mut failures = 0;
    for IntegrationTest { name, test_fn } in inventory::iter::<IntegrationTest> {
        if test.as_deref().is_some_and(|t| t != *name) {
            continue;
        }

        match test_fn(args.clone()).await {
            Ok(()) => println!("{} {name}", "PASSED".green().bold()),
            Err(e) => {
                failures += 1;
                println!("{} {name}: {e}", "FAILED".red().bold());
            },
        }
    }

    if failures > 0 {
        return Err(eyre!("{failures} integration test(s) failed"));
    }
    Ok(())
}
