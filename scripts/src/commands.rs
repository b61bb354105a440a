//! Implementations of the various deploy scripts

use alloy::{
    hex,
    primitives::{Address, Bytes},
    providers::Provider,
};
use tracing::info;

use crate::{
    artifacts::{available_contracts, load_artifact},
    cli::{
        DeployModuleArgs, DeployStylusArgs, EstimateDeploymentFeeArgs, ScriptConfig, UpgradeArgs,
    },
    constants::{ABI_DIR, JSON_EXTENSION},
    errors::ScriptError,
    fee::{self, format_eth},
    journal::Journal,
    modules::{
        deploy_contract, run_ehkd_module, run_rental_escrow_module,
        run_rental_escrow_upgrade_module, upgrade_proxy, DeploymentModule, EhkdParams,
        ImplementationSource, ModuleContext, ModuleParameters, RentalEscrowParams,
    },
    networks::{is_supported_networkish, ChainId, SUPPORTED_NETWORKISH},
    registry,
    utils::{parse_address, setup_read_client, DeployerClient},
};

/// Resolves the configured chain the client is connected to
async fn connected_chain(client: &DeployerClient) -> Result<ChainId, ScriptError> {
    let id = client
        .provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    ChainId::try_from(id)
}

/// Builds & deploys a single Stylus program, journaling it under its standalone future ID
pub async fn deploy_stylus(args: DeployStylusArgs, config: &ScriptConfig) -> Result<(), ScriptError> {
    let (client, rpc_url, priv_key) = config.signing_client()?;
    let chain = connected_chain(&client).await?;

    let ctx = ModuleContext {
        client: &client,
        chain,
        journal: Journal::for_chain(&config.deployments_path, chain.id()),
        rpc_url,
        priv_key,
        proxy_artifact_path: config.proxy_artifact.clone(),
        registry_dir: config.registry_path.clone(),
    };

    let name = args.contract.contract_name();
    let id = args.contract.standalone_future_id();
    let address = deploy_contract(&ctx, &id, &ImplementationSource::Stylus(args.contract)).await?;

    info!("{name} deployed on {chain} at {address:#x}");
    Ok(())
}

/// Executes a deployment module against the connected chain
pub async fn deploy_module(args: DeployModuleArgs, config: &ScriptConfig) -> Result<(), ScriptError> {
    let parameters = ModuleParameters::load(args.parameters.as_deref())?;
    let module_name = args.module.module_name();

    let (client, rpc_url, priv_key) = config.signing_client()?;
    let chain = connected_chain(&client).await?;
    info!("executing {module_name} on {chain}");

    let ctx = ModuleContext {
        client: &client,
        chain,
        journal: Journal::for_chain(&config.deployments_path, chain.id()),
        rpc_url,
        priv_key,
        proxy_artifact_path: config.proxy_artifact.clone(),
        registry_dir: config.registry_path.clone(),
    };

    let source = match args.implementation_artifact {
        Some(path) => ImplementationSource::Artifact(path),
        None => ImplementationSource::Stylus(args.module.stylus_contract()),
    };

    let deployment = match args.module {
        DeploymentModule::RentalEscrow => {
            let params: RentalEscrowParams = parameters.for_module(&module_name)?;
            run_rental_escrow_module(&ctx, &params, &source).await?
        }
        DeploymentModule::RentalEscrowUpgrade => {
            run_rental_escrow_upgrade_module(&ctx, &source).await?
        }
        DeploymentModule::Ehkd => {
            let params: EhkdParams = parameters.for_module(&module_name)?;
            run_ehkd_module(&ctx, &params, &source).await?
        }
    };

    info!(
        "{module_name} complete: proxy {:#x}, admin {:#x}, implementation {:#x}",
        deployment.proxy, deployment.proxy_admin, deployment.implementation
    );
    Ok(())
}

/// Upgrades a proxy through its admin, optionally calling the new implementation
pub async fn upgrade(args: UpgradeArgs, config: &ScriptConfig) -> Result<(), ScriptError> {
    let proxy_admin = parse_address(&args.proxy_admin)?;
    let proxy = parse_address(&args.proxy)?;
    let implementation = parse_address(&args.implementation)?;

    let calldata = match args.calldata {
        Some(calldata) => Bytes::from(
            hex::decode(calldata).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?,
        ),
        None => Bytes::new(),
    };

    let (client, _, _) = config.signing_client()?;
    let receipt = upgrade_proxy(&client, proxy_admin, proxy, implementation, calldata).await?;
    if !receipt.status() {
        return Err(ScriptError::ContractInteraction(String::from("upgradeAndCall reverted")));
    }

    info!("proxy {proxy:#x} upgraded to {implementation:#x}");
    Ok(())
}

/// Estimates the fee of deploying a registered contract.
///
/// Unsupported networks & unknown contracts are reported, not treated as failures.
pub async fn estimate_deployment_fee(
    args: EstimateDeploymentFeeArgs,
    config: &ScriptConfig,
) -> Result<(), ScriptError> {
    let EstimateDeploymentFeeArgs {
        networkish,
        contract,
        from,
    } = args;

    if !is_supported_networkish(&networkish) {
        println!("unsupported network (\"{networkish}\"),");
        println!("currently supported: [{}]", SUPPORTED_NETWORKISH.join(","));
        return Ok(());
    }

    let abi_dir = config.registry_path.join(ABI_DIR);
    let contracts_available = available_contracts(&abi_dir, &networkish)?;
    if !contracts_available.contains(&contract) {
        println!("contract not found (\"{contract}\"),");
        println!("available contracts: [{}]", contracts_available.join(","));
        return Ok(());
    }

    let artifact = load_artifact(
        &abi_dir
            .join(&networkish)
            .join(format!("{contract}.{JSON_EXTENSION}")),
    )?;
    if !artifact.has_bytecode() {
        println!("contract artifact not found (networkish: {networkish}, contract: {contract})");
        return Ok(());
    }

    let from = resolve_from(from.as_deref())?;
    let rpc_url = match &config.rpc_url {
        Some(url) => url.clone(),
        None => networkish.parse::<ChainId>()?.rpc_url()?,
    };
    let provider = setup_read_client(&rpc_url)?;

    let estimate = fee::estimate_deployment_fee(&provider, &artifact, from).await?;
    let (Some(gas_price), Some(cost)) = (estimate.gas_price, estimate.cost_wei()) else {
        println!("gas price not fetched");
        return Ok(());
    };

    println!("estimated gas: {}", estimate.gas);
    println!("current gas price: {gas_price}");
    println!("Estimated cost: {} ETH", format_eth(cost));
    Ok(())
}

/// The address to estimate from
fn resolve_from(from: Option<&str>) -> Result<Address, ScriptError> {
    let from = from.ok_or_else(|| {
        ScriptError::ClientInitialization(String::from("no deployer address given"))
    })?;
    parse_address(from)
}

/// Publishes every chain's deployments to the registry
pub fn update_deployed(config: &ScriptConfig) -> Result<(), ScriptError> {
    registry::update_deployed(&config.deployments_path, &config.registry_path)
}
