//! Deployment modules: fixed recipes of deployments & calls, journaled per chain.
//!
//! Every step is keyed by a future ID. A future already present in the chain's
//! journal is not executed again, so a module interrupted midway can be re-run.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, B256, U256},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use clap::ValueEnum;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use tracing::info;

use crate::{
    artifacts::{load_artifact, Artifact},
    constants::{
        EHKD_CONTRACT_NAME, MODULE_SUFFIX, NUM_BYTES_ADDRESS, NUM_BYTES_STORAGE_SLOT,
        PROXY_ADMIN_CONTRACT_NAME, PROXY_ADMIN_STORAGE_SLOT, PROXY_CONTRACT_NAME,
        PROXY_MODULE_SUFFIX, RENTAL_ESCROW_CONTRACT_NAME, RENTAL_ESCROW_UPGRADE_MODULE_NAME,
    },
    errors::ScriptError,
    journal::{future_id, Journal},
    networks::ChainId,
    solidity::{
        dummy_upgrade_target_artifact, ehkd_artifact, erc20_mock_artifact, proxy_admin_artifact,
        proxy_constructor_args, rental_escrow_artifact, IEhkd, IProxyAdmin, IRentalEscrow,
    },
    tokens::base_tokens,
    types::StylusContract,
    utils::{build_stylus_contract, deploy_stylus_contract, read_json, DeployerClient},
};

/// The deployment modules
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeploymentModule {
    /// Deploys the rental escrow behind a proxy & initializes it
    RentalEscrow,
    /// Upgrades the proxied rental escrow to a new implementation
    RentalEscrowUpgrade,
    /// Deploys the eHKD stablecoin behind a proxy & initializes it
    Ehkd,
}

impl DeploymentModule {
    /// The module's name, used as the prefix of its future IDs & as its key in the
    /// parameters file
    pub fn module_name(&self) -> String {
        match self {
            DeploymentModule::RentalEscrow => format!("{RENTAL_ESCROW_CONTRACT_NAME}{MODULE_SUFFIX}"),
            DeploymentModule::RentalEscrowUpgrade => RENTAL_ESCROW_UPGRADE_MODULE_NAME.to_string(),
            DeploymentModule::Ehkd => format!("{EHKD_CONTRACT_NAME}{MODULE_SUFFIX}"),
        }
    }

    /// The Stylus program implementing the module's contract
    pub fn stylus_contract(&self) -> StylusContract {
        match self {
            DeploymentModule::RentalEscrow | DeploymentModule::RentalEscrowUpgrade => {
                StylusContract::RentalEscrow
            }
            DeploymentModule::Ehkd => StylusContract::Ehkd,
        }
    }
}

// --------------
// | PARAMETERS |
// --------------

/// The parameters file, shaped `{ "<ModuleName>": { "<param>": value } }`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ModuleParameters(serde_json::Map<String, serde_json::Value>);

impl ModuleParameters {
    /// Loads the parameters file, or no parameters if no file is given
    pub fn load(path: Option<&Path>) -> Result<Self, ScriptError> {
        match path {
            Some(path) => read_json(path),
            None => Ok(Self::default()),
        }
    }

    /// The parameters of the given module, defaulted where absent
    pub fn for_module<T: DeserializeOwned + Default>(
        &self,
        module_name: &str,
    ) -> Result<T, ScriptError> {
        match self.0.get(module_name) {
            Some(params) => serde_json::from_value(params.clone())
                .map_err(|e| ScriptError::Serde(format!("{module_name} parameters: {e}"))),
            None => Ok(T::default()),
        }
    }
}

/// The parameters of the rental escrow module
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct RentalEscrowParams {
    /// Accounts to whitelist besides the deployer
    #[serde(rename = "_whitelisted", default)]
    pub whitelisted: Vec<Address>,
    /// Tokens to whitelist, the network's base tokens if absent
    #[serde(rename = "_whitelistedTokens", default)]
    pub whitelisted_tokens: Option<Vec<Address>>,
}

impl RentalEscrowParams {
    /// The tokens to whitelist, falling back to the base tokens of the network
    pub fn resolve_whitelisted_tokens(
        &self,
        networkish: &str,
        registry_dir: &Path,
    ) -> Result<Vec<Address>, ScriptError> {
        match &self.whitelisted_tokens {
            Some(tokens) => Ok(tokens.clone()),
            None => Ok(base_tokens(networkish, registry_dir)?
                .into_iter()
                .map(|token| token.address)
                .collect()),
        }
    }
}

/// The parameters of the eHKD module
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct EhkdParams {
    /// The account allowed to mint, burn & manage the vault
    #[serde(rename = "_admin", default)]
    pub admin: Address,
    /// The account holding the minted supply
    #[serde(rename = "_tokenVault", default)]
    pub token_vault: Address,
    /// The initial supply, minted into the vault
    #[serde(rename = "mintAmount", default, deserialize_with = "deserialize_amount")]
    pub mint_amount: U256,
}

impl EhkdParams {
    /// Rejects zero addresses, which `initialize` would revert on
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.admin.is_zero() {
            return Err(ScriptError::CalldataConstruction(String::from("_admin is the zero address")));
        }
        if self.token_vault.is_zero() {
            return Err(ScriptError::CalldataConstruction(String::from(
                "_tokenVault is the zero address",
            )));
        }
        Ok(())
    }
}

/// Deserializes an amount given as a JSON number or as a decimal or `0x` hex string
fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(u64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(U256::from(n)),
        Amount::Text(s) => U256::from_str(s.trim()).map_err(serde::de::Error::custom),
    }
}

// ---------------
// | DEPLOYMENTS |
// ---------------

/// Where a module's implementation contract comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImplementationSource {
    /// A Stylus program, compiled & deployed through `cargo stylus`
    Stylus(StylusContract),
    /// An EVM artifact carrying creation bytecode
    Artifact(PathBuf),
}

/// The addresses resolved by a proxy module
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProxyDeployment {
    /// The implementation behind the proxy
    pub implementation: Address,
    /// The `TransparentUpgradeableProxy`
    pub proxy: Address,
    /// The `ProxyAdmin` the proxy deployed in its constructor
    pub proxy_admin: Address,
}

/// Everything a module needs to execute against a chain
pub struct ModuleContext<'a> {
    /// The signing client
    pub client: &'a DeployerClient,
    /// The chain being deployed to
    pub chain: ChainId,
    /// The chain's journal
    pub journal: Journal,
    /// The RPC URL, passed on to `cargo stylus`
    pub rpc_url: &'a str,
    /// The deployer's private key, passed on to `cargo stylus`
    pub priv_key: &'a str,
    /// The path of the `TransparentUpgradeableProxy` artifact
    pub proxy_artifact_path: PathBuf,
    /// The registry directory, read for the network's base tokens
    pub registry_dir: PathBuf,
}

/// The ABI-only artifact journaled for a Stylus program
pub fn stylus_artifact(contract: StylusContract) -> Artifact {
    let name = contract.contract_name();
    match contract {
        StylusContract::RentalEscrow => rental_escrow_artifact(name),
        StylusContract::Ehkd => ehkd_artifact(name),
        StylusContract::DummyErc20 => erc20_mock_artifact(name),
        StylusContract::DummyUpgradeTarget => dummy_upgrade_target_artifact(name),
    }
}

/// Extracts the `ProxyAdmin` address from the value of the EIP-1967 admin slot
pub fn proxy_admin_from_slot(slot_value: U256) -> Address {
    let bytes = slot_value.to_be_bytes::<NUM_BYTES_STORAGE_SLOT>();
    Address::from_slice(&bytes[NUM_BYTES_STORAGE_SLOT - NUM_BYTES_ADDRESS..])
}

/// Fails unless the receipt reports success, returning its block number & hash
fn confirmed(receipt: &TransactionReceipt, future_id: &str) -> Result<(u64, B256), ScriptError> {
    if !receipt.status() {
        return Err(ScriptError::ContractInteraction(format!("{future_id} reverted")));
    }
    let block_number = receipt.block_number.ok_or_else(|| {
        ScriptError::ContractInteraction(format!("{future_id}: receipt has no block number"))
    })?;
    Ok((block_number, receipt.transaction_hash))
}

/// Deploys EVM creation code, returning the created address & its receipt
async fn deploy_creation_code(
    client: &DeployerClient,
    creation_code: Bytes,
    future_id: &str,
) -> Result<(Address, u64, B256), ScriptError> {
    let tx = TransactionRequest::default()
        .with_from(client.deployer)
        .with_deploy_code(creation_code);

    let receipt = client
        .provider
        .send_transaction(tx)
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    let (block_number, tx_hash) = confirmed(&receipt, future_id)?;
    let address = receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!("{future_id}: receipt has no contract address"))
    })?;
    Ok((address, block_number, tx_hash))
}

/// Deploys a contract under the given future ID, unless the journal already holds it
pub async fn deploy_contract(
    ctx: &ModuleContext<'_>,
    future_id: &str,
    source: &ImplementationSource,
) -> Result<Address, ScriptError> {
    if let Some(address) = ctx.journal.deployed_address(future_id)? {
        info!("{future_id} already deployed at {address:#x}");
        return Ok(address);
    }

    match source {
        ImplementationSource::Stylus(contract) => {
            let wasm_file_path = build_stylus_contract(*contract)?;
            let address = deploy_stylus_contract(
                &wasm_file_path,
                *contract,
                ctx.rpc_url,
                ctx.priv_key,
                ctx.client,
            )
            .await?;

            let block_number = ctx
                .client
                .provider
                .get_block_number()
                .await
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

            ctx.journal
                .record_deployment(future_id, address, block_number, None, &stylus_artifact(*contract))?;
            Ok(address)
        }
        ImplementationSource::Artifact(path) => {
            let artifact = load_artifact(path)?;
            let (address, block_number, tx_hash) =
                deploy_creation_code(ctx.client, artifact.creation_code()?, future_id).await?;

            ctx.journal
                .record_deployment(future_id, address, block_number, Some(tx_hash), &artifact)?;
            Ok(address)
        }
    }
}

/// Deploys a contract's implementation behind a `TransparentUpgradeableProxy` owned by
/// the deployer, and resolves the `ProxyAdmin` it creates
pub async fn deploy_proxy_module(
    ctx: &ModuleContext<'_>,
    contract_name: &str,
    source: &ImplementationSource,
) -> Result<ProxyDeployment, ScriptError> {
    let module = format!("{contract_name}{PROXY_MODULE_SUFFIX}");

    let implementation_id = future_id(&module, contract_name);
    let implementation = deploy_contract(ctx, &implementation_id, source).await?;

    let proxy_id = future_id(&module, PROXY_CONTRACT_NAME);
    let proxy = match ctx.journal.deployed_address(&proxy_id)? {
        Some(proxy) => proxy,
        None => {
            let proxy_artifact = load_artifact(&ctx.proxy_artifact_path)?;
            let mut creation_code = proxy_artifact.creation_code()?.to_vec();
            creation_code.extend(proxy_constructor_args(
                implementation,
                ctx.client.deployer,
                Bytes::new(),
            ));

            let (proxy, block_number, tx_hash) =
                deploy_creation_code(ctx.client, creation_code.into(), &proxy_id).await?;
            ctx.journal.record_deployment(
                &proxy_id,
                proxy,
                block_number,
                Some(tx_hash),
                &proxy_artifact,
            )?;
            proxy
        }
    };

    let proxy_admin_id = future_id(&module, PROXY_ADMIN_CONTRACT_NAME);
    let proxy_admin = match ctx.journal.deployed_address(&proxy_admin_id)? {
        Some(proxy_admin) => proxy_admin,
        None => {
            let slot = U256::from_str(PROXY_ADMIN_STORAGE_SLOT)
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
            let slot_value = ctx
                .client
                .provider
                .get_storage_at(proxy, slot)
                .await
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

            let proxy_admin = proxy_admin_from_slot(slot_value);
            ctx.journal.record_contract_at(
                &proxy_admin_id,
                proxy_admin,
                &proxy_admin_artifact(PROXY_ADMIN_CONTRACT_NAME),
            )?;
            proxy_admin
        }
    };

    info!("{contract_name} proxy at {proxy:#x}, admin at {proxy_admin:#x}");
    Ok(ProxyDeployment {
        implementation,
        proxy,
        proxy_admin,
    })
}

/// Resolves the proxy under the module's contract name, journaling it with the
/// implementation's ABI
fn record_proxied_contract(
    ctx: &ModuleContext<'_>,
    module: &str,
    contract_name: &str,
    proxy: Address,
    source: &ImplementationSource,
) -> Result<(), ScriptError> {
    let id = future_id(module, contract_name);
    if ctx.journal.deployed_address(&id)?.is_some() {
        return Ok(());
    }

    let artifact = match source {
        ImplementationSource::Stylus(contract) => stylus_artifact(*contract),
        ImplementationSource::Artifact(path) => load_artifact(path)?,
    };
    ctx.journal.record_contract_at(&id, proxy, &artifact)
}

/// Deploys the proxied rental escrow & initializes its whitelists
pub async fn run_rental_escrow_module(
    ctx: &ModuleContext<'_>,
    params: &RentalEscrowParams,
    source: &ImplementationSource,
) -> Result<ProxyDeployment, ScriptError> {
    let module = DeploymentModule::RentalEscrow.module_name();
    let deployment = deploy_proxy_module(ctx, RENTAL_ESCROW_CONTRACT_NAME, source).await?;
    record_proxied_contract(ctx, &module, RENTAL_ESCROW_CONTRACT_NAME, deployment.proxy, source)?;

    let call_id = format!("{}.initialize", future_id(&module, RENTAL_ESCROW_CONTRACT_NAME));
    if ctx.journal.is_confirmed(&call_id)? {
        info!("{call_id} already executed");
        return Ok(deployment);
    }

    let whitelisted_tokens =
        params.resolve_whitelisted_tokens(ctx.chain.networkish(), &ctx.registry_dir)?;
    info!(
        "initializing rental escrow with {} whitelisted accounts, {} whitelisted tokens",
        params.whitelisted.len(),
        whitelisted_tokens.len()
    );

    let escrow = IRentalEscrow::new(deployment.proxy, ctx.client.provider.clone());
    let receipt = escrow
        .initialize(params.whitelisted.clone(), whitelisted_tokens)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    let (block_number, tx_hash) = confirmed(&receipt, &call_id)?;
    ctx.journal.record_call(&call_id, block_number, tx_hash)?;
    Ok(deployment)
}

/// Deploys a new rental escrow implementation & points the proxy recorded by the
/// rental escrow module at it
pub async fn run_rental_escrow_upgrade_module(
    ctx: &ModuleContext<'_>,
    source: &ImplementationSource,
) -> Result<ProxyDeployment, ScriptError> {
    let proxy_module = format!("{RENTAL_ESCROW_CONTRACT_NAME}{PROXY_MODULE_SUFFIX}");
    let proxy_id = future_id(&proxy_module, PROXY_CONTRACT_NAME);
    let proxy_admin_id = future_id(&proxy_module, PROXY_ADMIN_CONTRACT_NAME);

    let proxy = ctx
        .journal
        .deployed_address(&proxy_id)?
        .ok_or(ScriptError::MissingFuture(proxy_id))?;
    let proxy_admin = ctx
        .journal
        .deployed_address(&proxy_admin_id)?
        .ok_or(ScriptError::MissingFuture(proxy_admin_id))?;

    let implementation_id = future_id(RENTAL_ESCROW_UPGRADE_MODULE_NAME, RENTAL_ESCROW_CONTRACT_NAME);
    let implementation = deploy_contract(ctx, &implementation_id, source).await?;

    let call_id = format!(
        "{}.upgradeAndCall",
        future_id(RENTAL_ESCROW_UPGRADE_MODULE_NAME, PROXY_ADMIN_CONTRACT_NAME)
    );
    if !ctx.journal.is_confirmed(&call_id)? {
        let receipt = upgrade_proxy(ctx.client, proxy_admin, proxy, implementation, Bytes::new())
            .await?;
        let (block_number, tx_hash) = confirmed(&receipt, &call_id)?;
        ctx.journal.record_call(&call_id, block_number, tx_hash)?;
    }

    info!("rental escrow proxy {proxy:#x} now points at {implementation:#x}");
    Ok(ProxyDeployment {
        implementation,
        proxy,
        proxy_admin,
    })
}

/// Deploys the proxied eHKD stablecoin & initializes it, minting the initial supply
/// into the vault
pub async fn run_ehkd_module(
    ctx: &ModuleContext<'_>,
    params: &EhkdParams,
    source: &ImplementationSource,
) -> Result<ProxyDeployment, ScriptError> {
    params.validate()?;

    let module = DeploymentModule::Ehkd.module_name();
    let deployment = deploy_proxy_module(ctx, EHKD_CONTRACT_NAME, source).await?;
    record_proxied_contract(ctx, &module, EHKD_CONTRACT_NAME, deployment.proxy, source)?;

    let call_id = format!("{}.initialize", future_id(&module, EHKD_CONTRACT_NAME));
    if ctx.journal.is_confirmed(&call_id)? {
        info!("{call_id} already executed");
        return Ok(deployment);
    }

    let ehkd = IEhkd::new(deployment.proxy, ctx.client.provider.clone());
    let receipt = ehkd
        .initialize(params.admin, params.token_vault, params.mint_amount)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    let (block_number, tx_hash) = confirmed(&receipt, &call_id)?;
    ctx.journal.record_call(&call_id, block_number, tx_hash)?;
    Ok(deployment)
}

/// Calls `ProxyAdmin.upgradeAndCall` as the deployer, who owns the admin
pub async fn upgrade_proxy(
    client: &DeployerClient,
    proxy_admin: Address,
    proxy: Address,
    implementation: Address,
    calldata: Bytes,
) -> Result<TransactionReceipt, ScriptError> {
    let admin = IProxyAdmin::new(proxy_admin, client.provider.clone());
    admin
        .upgradeAndCall(proxy, implementation, calldata)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
}
