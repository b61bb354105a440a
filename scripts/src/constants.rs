//! Constants used in the deploy scripts

// ---------------
// | PROXY SETUP |
// ---------------

/// The default path of the TransparentUpgradeableProxy compilation artifact
///
/// Compiled from https://github.com/OpenZeppelin/openzeppelin-contracts/blob/v5.0.0/contracts/proxy/transparent/TransparentUpgradeableProxy.sol
pub const DEFAULT_PROXY_ARTIFACT_PATH: &str = "artifacts/TransparentUpgradeableProxy.json";

/// The storage slot containing the proxy admin contract address in the upgradeable proxy.
///
/// This is specified in EIP1967: https://eips.ethereum.org/EIPS/eip-1967#admin-address
pub const PROXY_ADMIN_STORAGE_SLOT: &str =
    "0xb53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6103";

/// The number of bytes stored in a single storage slot
pub const NUM_BYTES_STORAGE_SLOT: usize = 32;

/// The number of bytes in an Ethereum address
pub const NUM_BYTES_ADDRESS: usize = 20;

// ------------------
// | CONTRACT NAMES |
// ------------------

/// The name of the rental escrow contract
pub const RENTAL_ESCROW_CONTRACT_NAME: &str = "RentalEscrow";

/// The name of the eHKD stablecoin contract
pub const EHKD_CONTRACT_NAME: &str = "eHKD";

/// The name of the mock ERC20 contract
pub const ERC20_MOCK_CONTRACT_NAME: &str = "ERC20Mock";

/// The name of the dummy upgrade target contract
pub const DUMMY_UPGRADE_TARGET_CONTRACT_NAME: &str = "DummyUpgradeTarget";

/// The name of the upgradeable proxy contract
pub const PROXY_CONTRACT_NAME: &str = "TransparentUpgradeableProxy";

/// The name of the proxy admin contract, deployed by the proxy's constructor
pub const PROXY_ADMIN_CONTRACT_NAME: &str = "ProxyAdmin";

/// The suffix of every deployment module name
pub const MODULE_SUFFIX: &str = "Module";

/// The suffix of the proxy module wrapping a contract
pub const PROXY_MODULE_SUFFIX: &str = "ProxyModule";

/// The suffix of the module journaling a standalone `deploy-stylus` run of a proxied contract
pub const STYLUS_MODULE_SUFFIX: &str = "StylusModule";

/// The name of the module upgrading the rental escrow
pub const RENTAL_ESCROW_UPGRADE_MODULE_NAME: &str = "RentalEscrowUpgradeModule";

/// The separator between a module name & a contract name in a future ID
pub const FUTURE_ID_SEPARATOR: char = '#';

// --------------------
// | DEPLOYMENT FILES |
// --------------------

/// The prefix of the per-chain directory in the deployments directory
pub const CHAIN_DIR_PREFIX: &str = "chain-";

/// The file mapping future IDs to deployed addresses
pub const DEPLOYED_ADDRESSES_FILE: &str = "deployed_addresses.json";

/// The append-only deployment journal
pub const JOURNAL_FILE: &str = "journal.jsonl";

/// The directory holding the artifact of every deployed future
pub const ARTIFACTS_DIR: &str = "artifacts";

/// The registry directory holding `{address, blockNumber}` per contract
pub const DEPLOYED_DIR: &str = "deployed";

/// The registry directory holding the artifact per contract
pub const ABI_DIR: &str = "abi";

/// The extension of JSON files
pub const JSON_EXTENSION: &str = "json";

// -------------------
// | STYLUS BUILDING |
// -------------------

/// The name of the environment variable pointing to the directory containing
/// the project manifest
pub const MANIFEST_DIR_ENV_VAR: &str = "CARGO_MANIFEST_DIR";

/// The name of the crate in this workspace in which the Stylus contracts
/// are defined
pub const STYLUS_CONTRACTS_CRATE_NAME: &str = "contracts-stylus";

/// The name of the Cargo command
pub const CARGO_COMMAND: &str = "cargo";

/// The name of the build command
pub const BUILD_COMMAND: &str = "build";

/// The target triple for the WASM build target
pub const WASM_TARGET_TRIPLE: &str = "wasm32-unknown-unknown";

/// The nightly toolchain selector
pub const NIGHTLY_TOOLCHAIN_SELECTOR: &str = "+nightly";

/// Nightly Z flags to add to build command
pub const Z_FLAGS: [&str; 3] = [
    "unstable-options",
    "build-std=std,panic_abort",
    "build-std-features=panic_immediate_abort",
];

/// The name of the target directory
pub const TARGET_PATH_SEGMENT: &str = "target";

/// The name of the release directory
pub const RELEASE_PATH_SEGMENT: &str = "release";

/// The extension a built WASM file
pub const WASM_EXTENSION: &str = "wasm";

/// The name of the `wasm-opt` command
pub const WASM_OPT_COMMAND: &str = "wasm-opt";

/// The most aggressive size optimization flag for the `wasm-opt` command
pub const SIZE_OPTIMIZATION_FLAG: &str = "-Oz";

/// The name of the stylus command
pub const STYLUS_COMMAND: &str = "stylus";

/// The name of the deploy command
pub const DEPLOY_COMMAND: &str = "deploy";

// -------
// | FEE |
// -------

/// The number of wei in one ether
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// The number of decimals in one ether
pub const ETH_DECIMALS: usize = 18;

/// The environment variable holding the default deployer address for fee estimation
pub const DEPLOYER_ADDRESS_ENV_VAR: &str = "DEPLOYER_ADDRESS";
