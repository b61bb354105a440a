//! Utilities for the deploy scripts.

use std::{
    env, fs, iter,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
    str::FromStr,
};

use alloy::{
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use itertools::Itertools;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, warn};

use crate::{
    constants::{
        BUILD_COMMAND, CARGO_COMMAND, DEPLOY_COMMAND, MANIFEST_DIR_ENV_VAR,
        NIGHTLY_TOOLCHAIN_SELECTOR, RELEASE_PATH_SEGMENT, SIZE_OPTIMIZATION_FLAG, STYLUS_COMMAND,
        STYLUS_CONTRACTS_CRATE_NAME, TARGET_PATH_SEGMENT, WASM_EXTENSION, WASM_OPT_COMMAND,
        WASM_TARGET_TRIPLE, Z_FLAGS,
    },
    errors::ScriptError,
    types::StylusContract,
};

/// An RPC client that signs with the deployer's key
#[derive(Clone)]
pub struct DeployerClient {
    /// The signing provider
    pub provider: DynProvider,
    /// The deployer's address
    pub deployer: Address,
}

/// Sets up a signing client from the private key and RPC url
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<DeployerClient, ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let deployer = signer.address();

    let url = parse_rpc_url(rpc_url)?;
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);

    Ok(DeployerClient {
        provider: DynProvider::new(provider),
        deployer,
    })
}

/// Sets up a read-only client, for calls that don't need a signature
pub fn setup_read_client(rpc_url: &str) -> Result<DynProvider, ScriptError> {
    let url = parse_rpc_url(rpc_url)?;
    let provider = ProviderBuilder::new().connect_http(url);
    Ok(DynProvider::new(provider))
}

/// Parses an RPC url
fn parse_rpc_url(rpc_url: &str) -> Result<Url, ScriptError> {
    Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))
}

/// Parses a hex address given on the command line or in a parameters file
pub fn parse_address(address: &str) -> Result<Address, ScriptError> {
    Address::from_str(address).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
}

// --------
// | JSON |
// --------

/// Reads & deserializes a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ScriptError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ScriptError::ReadFile(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| ScriptError::Serde(format!("{}: {}", path.display(), e)))
}

/// Serializes a value into a JSON file, pretty-printed with a two-space indent,
/// creating parent directories as needed
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), ScriptError> {
    create_parent_dir(path)?;
    let contents =
        serde_json::to_string_pretty(value).map_err(|e| ScriptError::Serde(e.to_string()))?;
    fs::write(path, contents)
        .map_err(|e| ScriptError::WriteFile(format!("{}: {}", path.display(), e)))
}

/// Creates the parent directory of the given path, if it doesn't exist
pub fn create_parent_dir(path: &Path) -> Result<(), ScriptError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| ScriptError::WriteFile(format!("{}: {}", parent.display(), e)))?;
    }
    Ok(())
}

// ----------
// | STYLUS |
// ----------

/// Runs the command, failing with the given message if it exits unsuccessfully
fn command_success_or(mut cmd: Command, err_msg: &str) -> Result<Output, ScriptError> {
    let output = cmd
        .output()
        .map_err(|e| ScriptError::ContractCompilation(e.to_string()))?;

    if !output.status.success() {
        return Err(ScriptError::ContractCompilation(String::from(err_msg)));
    }
    Ok(output)
}

/// Compiles the given Stylus contract to WASM and optimizes the resulting binary,
/// returning the path to the optimized WASM file.
///
/// Assumes that `cargo`, the `nightly` toolchain, and `wasm-opt` are locally available.
pub fn build_stylus_contract(contract: StylusContract) -> Result<PathBuf, ScriptError> {
    let current_dir = PathBuf::from(
        env::var(MANIFEST_DIR_ENV_VAR)
            .map_err(|e| ScriptError::ContractCompilation(e.to_string()))?,
    );
    let workspace_path = current_dir
        .parent()
        .ok_or(ScriptError::ContractCompilation(String::from(
            "Could not find contracts directory",
        )))?;

    let mut build_cmd = Command::new(CARGO_COMMAND);
    build_cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    // Use the nightly toolchain, this allows us to use the -Z flags below
    build_cmd.arg(NIGHTLY_TOOLCHAIN_SELECTOR);
    build_cmd.arg("-C");
    build_cmd.arg(workspace_path);
    build_cmd.arg(BUILD_COMMAND);
    build_cmd.arg("-r");
    build_cmd.arg("-p");
    build_cmd.arg(STYLUS_CONTRACTS_CRATE_NAME);
    // Exactly one contract feature is enabled, selecting the entrypoint
    build_cmd.arg("--features");
    build_cmd.arg(contract.to_string());
    build_cmd.arg("--target");
    build_cmd.arg(WASM_TARGET_TRIPLE);
    // Set the Z flags, used to optimize the resulting binary size.
    // See constants.rs for the list of flags.
    let z_flags = iter::repeat("-Z")
        .take(Z_FLAGS.len())
        .interleave_shortest(Z_FLAGS);
    build_cmd.args(z_flags);

    command_success_or(build_cmd, "Failed to build contract WASM")?;

    let wasm_file_path = workspace_path
        .join(TARGET_PATH_SEGMENT)
        .join(WASM_TARGET_TRIPLE)
        .join(RELEASE_PATH_SEGMENT)
        .join(STYLUS_CONTRACTS_CRATE_NAME.replace('-', "_"))
        .with_extension(WASM_EXTENSION);

    if !wasm_file_path.exists() {
        return Err(ScriptError::ContractCompilation(String::from(
            "Could not find contract WASM file",
        )));
    }

    let opt_wasm_file_path = wasm_file_path.with_extension("opt.wasm");

    let mut opt_cmd = Command::new(WASM_OPT_COMMAND);
    opt_cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    opt_cmd.arg(&wasm_file_path);
    opt_cmd.arg("-o");
    opt_cmd.arg(&opt_wasm_file_path);
    opt_cmd.arg(SIZE_OPTIMIZATION_FLAG);

    command_success_or(opt_cmd, "Failed to optimize contract WASM")?;

    Ok(opt_wasm_file_path)
}

/// Deploys & activates an optimized Stylus WASM file through `cargo stylus`,
/// returning the address of the deployed program
pub async fn deploy_stylus_contract(
    wasm_file_path: &Path,
    contract: StylusContract,
    rpc_url: &str,
    priv_key: &str,
    client: &DeployerClient,
) -> Result<Address, ScriptError> {
    if contract.is_test_contract() {
        warn!(
            "Deploying `{}` - THIS SHOULD ONLY BE DONE FOR TESTING",
            contract
        );
    }

    // Get expected deployment address, in case the deploy output can't be parsed
    let deployer_nonce = client
        .provider
        .get_transaction_count(client.deployer)
        .await
        .map_err(|e| ScriptError::NonceFetching(e.to_string()))?;
    let predicted_address = client.deployer.create(deployer_nonce);

    let mut deploy_cmd = Command::new(CARGO_COMMAND);
    deploy_cmd.stderr(Stdio::inherit());
    deploy_cmd.arg(STYLUS_COMMAND);
    deploy_cmd.arg(DEPLOY_COMMAND);
    deploy_cmd.arg("--no-verify");
    deploy_cmd.arg("--wasm-file");
    deploy_cmd.arg(wasm_file_path);
    deploy_cmd.arg("-e");
    deploy_cmd.arg(rpc_url);
    deploy_cmd.arg("--private-key");
    deploy_cmd.arg(priv_key);

    let output = command_success_or(deploy_cmd, "Failed to deploy Stylus contract")?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    info!("{}", stdout);

    let deployed_address = parse_deployed_address(&stdout).unwrap_or_else(|| {
        warn!("could not parse deployed address from `cargo stylus` output, using predicted address");
        predicted_address
    });

    info!("{} deployed at {:#x}", contract, deployed_address);
    Ok(deployed_address)
}

/// Finds the address `cargo stylus deploy` reports the program was deployed at
pub fn parse_deployed_address(output: &str) -> Option<Address> {
    output
        .lines()
        .filter(|line| line.contains("deployed code at address"))
        .find_map(|line| {
            let start = line.find("0x")?;
            line.get(start..start + 42)
                .and_then(|hex| Address::from_str(hex).ok())
        })
}
