//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{deploy_module, deploy_stylus, estimate_deployment_fee, update_deployed, upgrade},
    constants::{DEFAULT_PROXY_ARTIFACT_PATH, DEPLOYER_ADDRESS_ENV_VAR},
    errors::ScriptError,
    modules::DeploymentModule,
    types::StylusContract,
    utils::{setup_client, DeployerClient},
};

/// Deploys, upgrades & bookkeeps the rental escrow & eHKD contracts
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PKEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Directory holding the per-chain deployment journals
    #[arg(long, default_value = "deployments")]
    pub deployments_path: PathBuf,

    /// Directory holding the `deployed/` & `abi/` registries
    #[arg(long, default_value = ".")]
    pub registry_path: PathBuf,

    /// Path to the `TransparentUpgradeableProxy` compilation artifact
    #[arg(long, default_value = DEFAULT_PROXY_ARTIFACT_PATH)]
    pub proxy_artifact: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Splits the CLI into its command & the configuration shared by all commands
    pub fn into_parts(self) -> (Command, ScriptConfig) {
        let Cli {
            priv_key,
            rpc_url,
            deployments_path,
            registry_path,
            proxy_artifact,
            command,
        } = self;

        (
            command,
            ScriptConfig {
                priv_key,
                rpc_url,
                deployments_path,
                registry_path,
                proxy_artifact,
            },
        )
    }
}

/// The configuration shared by all commands
#[derive(Clone, Debug)]
pub struct ScriptConfig {
    /// Private key of the deployer
    pub priv_key: Option<String>,
    /// Network RPC URL
    pub rpc_url: Option<String>,
    /// Directory holding the per-chain deployment journals
    pub deployments_path: PathBuf,
    /// Directory holding the `deployed/` & `abi/` registries
    pub registry_path: PathBuf,
    /// Path to the `TransparentUpgradeableProxy` compilation artifact
    pub proxy_artifact: PathBuf,
}

impl ScriptConfig {
    /// Sets up a signing client, returning it along with the RPC URL & private key.
    ///
    /// Only commands that send transactions call this.
    pub fn signing_client(&self) -> Result<(DeployerClient, &str, &str), ScriptError> {
        let priv_key = self.priv_key.as_deref().ok_or_else(|| {
            ScriptError::ClientInitialization(String::from("missing private key (--priv-key or PKEY)"))
        })?;
        let rpc_url = self.rpc_url.as_deref().ok_or_else(|| {
            ScriptError::ClientInitialization(String::from("missing RPC URL (--rpc-url or RPC_URL)"))
        })?;

        let client = setup_client(priv_key, rpc_url)?;
        Ok((client, rpc_url, priv_key))
    }
}

/// The scripts' commands
#[derive(Subcommand)]
pub enum Command {
    /// Build & deploy a single Stylus program
    DeployStylus(DeployStylusArgs),
    /// Execute a deployment module
    DeployModule(DeployModuleArgs),
    /// Upgrade a proxy's implementation
    Upgrade(UpgradeArgs),
    /// Estimate the fee of deploying a registered contract
    EstimateDeploymentFee(EstimateDeploymentFeeArgs),
    /// Publish the journaled deployments of every chain to the registry
    UpdateDeployed,
}

impl Command {
    /// Runs the command
    pub async fn run(self, config: &ScriptConfig) -> Result<(), ScriptError> {
        match self {
            Command::DeployStylus(args) => deploy_stylus(args, config).await,
            Command::DeployModule(args) => deploy_module(args, config).await,
            Command::Upgrade(args) => upgrade(args, config).await,
            Command::EstimateDeploymentFee(args) => estimate_deployment_fee(args, config).await,
            Command::UpdateDeployed => update_deployed(config),
        }
    }
}

/// Deploy a Stylus contract
#[derive(Args)]
pub struct DeployStylusArgs {
    /// The Stylus contract to deploy
    #[arg(short, long)]
    pub contract: StylusContract,
}

/// Execute a deployment module.
///
/// Steps already present in the chain's journal are skipped.
#[derive(Args)]
pub struct DeployModuleArgs {
    /// The module to execute
    #[arg(short, long)]
    pub module: DeploymentModule,

    /// JSON file of module parameters, shaped `{ "<ModuleName>": { "<param>": value } }`
    #[arg(long)]
    pub parameters: Option<PathBuf>,

    /// EVM artifact to deploy as the implementation, instead of the module's Stylus
    /// program
    #[arg(long)]
    pub implementation_artifact: Option<PathBuf>,
}

/// Upgrade a proxy's implementation
#[derive(Args)]
pub struct UpgradeArgs {
    /// Address of the proxy admin contract
    #[arg(long)]
    pub proxy_admin: String,

    /// Address of the proxy contract
    #[arg(long)]
    pub proxy: String,

    /// Address of the new implementation contract
    #[arg(short, long)]
    pub implementation: String,

    /// Optional calldata, in hex form, with which to
    /// call the implementation contract when upgrading
    #[arg(short, long)]
    pub calldata: Option<String>,
}

/// Estimate the fee of deploying a contract from the `abi/` registry
#[derive(Args)]
pub struct EstimateDeploymentFeeArgs {
    /// The network to estimate on
    #[arg(short, long)]
    pub networkish: String,

    /// The contract's name in the registry
    #[arg(short, long)]
    pub contract: String,

    /// The address the deployment would be sent from
    #[arg(long, env = DEPLOYER_ADDRESS_ENV_VAR)]
    pub from: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_offline_commands_need_no_key() {
        let cli = Cli::try_parse_from(["scripts", "update-deployed"]).unwrap();
        let (command, config) = cli.into_parts();
        assert!(matches!(command, Command::UpdateDeployed));
        assert_eq!(config.deployments_path, PathBuf::from("deployments"));
        assert_eq!(config.registry_path, PathBuf::from("."));

        let cli = Cli::try_parse_from([
            "scripts",
            "estimate-deployment-fee",
            "-n",
            "scrollSepolia",
            "-c",
            "RentalEscrow",
        ])
        .unwrap();
        let (command, _) = cli.into_parts();
        match command {
            Command::EstimateDeploymentFee(args) => {
                assert_eq!(args.networkish, "scrollSepolia");
                assert_eq!(args.contract, "RentalEscrow");
            }
            _ => panic!("expected estimate-deployment-fee"),
        }
    }

    #[test]
    fn test_deploy_module_args() {
        let cli = Cli::try_parse_from([
            "scripts",
            "-p",
            "0x01",
            "-r",
            "http://localhost:8547",
            "deploy-module",
            "--module",
            "rental-escrow-upgrade",
            "--parameters",
            "params.json",
        ])
        .unwrap();

        let (command, config) = cli.into_parts();
        assert_eq!(config.priv_key.as_deref(), Some("0x01"));
        match command {
            Command::DeployModule(args) => {
                assert_eq!(args.module, DeploymentModule::RentalEscrowUpgrade);
                assert_eq!(args.parameters, Some(PathBuf::from("params.json")));
                assert!(args.implementation_artifact.is_none());
            }
            _ => panic!("expected deploy-module"),
        }
    }

    #[test]
    fn test_signing_client_requires_key() {
        let config = ScriptConfig {
            priv_key: None,
            rpc_url: Some(String::from("http://localhost:8547")),
            deployments_path: PathBuf::from("deployments"),
            registry_path: PathBuf::from("."),
            proxy_artifact: PathBuf::from(DEFAULT_PROXY_ARTIFACT_PATH),
        };
        assert!(matches!(
            config.signing_client(),
            Err(ScriptError::ClientInitialization(_))
        ));
    }
}
