//! The networks the contracts are deployed to

use std::{
    env,
    fmt::{self, Display},
    str::FromStr,
};

use crate::errors::ScriptError;

/// The name of a network, as used in the registry's directory layout
pub type Networkish = &'static str;

/// The networks fee estimation is supported on
pub const SUPPORTED_NETWORKISH: [Networkish; 2] = ["sepolia", "devnet"];

/// The RPC URL of a locally running Nitro devnet
pub const DEFAULT_DEVNET_RPC_URL: &str = "http://localhost:8547";

/// The chains the contracts are deployed to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChainId {
    /// Ethereum Sepolia
    EthSepolia,
    /// Scroll Sepolia
    ScrollSepolia,
    /// The local Nitro devnet
    Devnet,
}

impl ChainId {
    /// Every configured chain
    pub const ALL: [ChainId; 3] = [ChainId::EthSepolia, ChainId::ScrollSepolia, ChainId::Devnet];

    /// The numeric chain ID
    pub fn id(&self) -> u64 {
        match self {
            ChainId::EthSepolia => 11155111,
            ChainId::ScrollSepolia => 534351,
            ChainId::Devnet => 412346,
        }
    }

    /// The network name of the chain
    pub fn networkish(&self) -> Networkish {
        match self {
            ChainId::EthSepolia => "sepolia",
            ChainId::ScrollSepolia => "scrollSepolia",
            ChainId::Devnet => "devnet",
        }
    }

    /// The environment variable holding the chain's RPC URL
    pub fn rpc_url_env_var(&self) -> &'static str {
        match self {
            ChainId::EthSepolia => "SEPOLIA_RPC_URL",
            ChainId::ScrollSepolia => "SCROLL_SEPOLIA_RPC_URL",
            ChainId::Devnet => "DEVNET_RPC_URL",
        }
    }

    /// Reads the chain's RPC URL from the environment.
    ///
    /// Only the devnet has a default.
    pub fn rpc_url(&self) -> Result<String, ScriptError> {
        match (env::var(self.rpc_url_env_var()), self) {
            (Ok(url), _) => Ok(url),
            (Err(_), ChainId::Devnet) => Ok(DEFAULT_DEVNET_RPC_URL.to_string()),
            (Err(e), _) => Err(ScriptError::ClientInitialization(format!(
                "{}: {}",
                self.rpc_url_env_var(),
                e
            ))),
        }
    }
}

impl TryFrom<u64> for ChainId {
    type Error = ScriptError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        ChainId::ALL
            .into_iter()
            .find(|chain| chain.id() == id)
            .ok_or(ScriptError::UnsupportedChainId(id))
    }
}

impl FromStr for ChainId {
    type Err = ScriptError;

    fn from_str(networkish: &str) -> Result<Self, Self::Err> {
        ChainId::ALL
            .into_iter()
            .find(|chain| chain.networkish() == networkish)
            .ok_or_else(|| ScriptError::UnsupportedNetwork(networkish.to_string()))
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.networkish(), self.id())
    }
}

/// Maps a numeric chain ID to its network name
pub fn chain_id_to_networkish(id: u64) -> Result<Networkish, ScriptError> {
    ChainId::try_from(id).map(|chain| chain.networkish())
}

/// Whether fee estimation is supported on the network
pub fn is_supported_networkish(networkish: &str) -> bool {
    SUPPORTED_NETWORKISH.contains(&networkish)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_round_trip() {
        for chain in ChainId::ALL {
            assert_eq!(ChainId::try_from(chain.id()).unwrap(), chain);
            assert_eq!(chain.networkish().parse::<ChainId>().unwrap(), chain);
        }
    }

    #[test]
    fn test_networkish_names() {
        assert_eq!(chain_id_to_networkish(11155111).unwrap(), "sepolia");
        assert_eq!(chain_id_to_networkish(534351).unwrap(), "scrollSepolia");
        assert_eq!(chain_id_to_networkish(412346).unwrap(), "devnet");
    }

    #[test]
    fn test_unsupported_chain_id() {
        let err = chain_id_to_networkish(1).unwrap_err();
        assert_eq!(err.to_string(), "unsupported chain id: 1");
    }

    #[test]
    fn test_supported_networkish() {
        assert!(is_supported_networkish("sepolia"));
        assert!(is_supported_networkish("devnet"));
        assert!(!is_supported_networkish("scrollSepolia"));
        assert!(!is_supported_networkish("mainnet"));
    }
}
