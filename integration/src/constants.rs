//! Constants used in the integration tests

/// The default hostport that the Nitro devnet L2 node runs on
pub(crate) const DEFAULT_DEVNET_HOSTPORT: &str = "http://localhost:8547";

/// The default private key that the Nitro devnet is seeded with
pub(crate) const DEFAULT_DEVNET_PKEY: &str =
    "0xb6b15c8cb491557369f3c7d2c287b053eb229daa9c22138887752191c9520659";

/// The default path of the devnet's `deployed_addresses.json`
pub(crate) const DEFAULT_DEPLOYMENTS_FILE: &str = "deployments/chain-412346/deployed_addresses.json";

/// The default registry root, the workspace root
pub(crate) const DEFAULT_REGISTRY_DIR: &str = ".";

/// The ETH sent to each test account to pay for gas, in wei
pub(crate) const TEST_ACCOUNT_FUNDING: u128 = 1_000_000_000_000_000_000;

/// The decimals of the mock ERC20 token
pub(crate) const MOCK_ERC20_DECIMALS: u8 = 18;

/// The amount of mock ERC20 tokens minted to each counterparty, in whole tokens
pub(crate) const MINT_AMOUNT: u64 = 1_000_000;
