//! Definition of the CLI arguments for integration tests

use std::path::PathBuf;

use clap::Parser;

use crate::constants::{
    DEFAULT_DEPLOYMENTS_FILE, DEFAULT_DEVNET_HOSTPORT, DEFAULT_DEVNET_PKEY, DEFAULT_REGISTRY_DIR,
};

/// CLI tool for running integration tests against a running devnet node.
///
/// Assumes that the contracts invoked in the tests have already been deployed to the devnet.
#[derive(Parser)]
pub(crate) struct Cli {
    /// Test to run, all tests are run if omitted
    #[arg(short, long)]
    pub(crate) test: Option<String>,

    /// Path to the devnet's `deployed_addresses.json`
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_FILE)]
    pub(crate) deployments_file: PathBuf,

    /// Devnet private key, defaults to default Nitro devnet private key
    #[arg(short, long, env = "PKEY", default_value = DEFAULT_DEVNET_PKEY)]
    pub(crate) priv_key: String,

    /// Devnet RPC URL, defaults to default Nitro devnet hostport
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_DEVNET_HOSTPORT)]
    pub(crate) rpc_url: String,

    /// Run the read-only checks against the Sepolia deployment instead of the devnet tests
    #[arg(long)]
    pub(crate) sepolia: bool,

    /// Root of the registry holding `deployed/<networkish>/<name>.json`
    #[arg(long, default_value = DEFAULT_REGISTRY_DIR)]
    pub(crate) registry_dir: PathBuf,
}
