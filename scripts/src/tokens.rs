//! The base tokens deals may be denominated in, per network

use std::{
    fmt::{self, Display},
    path::Path,
};

use alloy::primitives::Address;

use crate::{
    constants::{DEPLOYED_DIR, EHKD_CONTRACT_NAME, JSON_EXTENSION},
    errors::ScriptError,
    registry::DeployedRecord,
    utils::read_json,
};

/// The decimals of the eHKD stablecoin
const EHKD_DECIMALS: u8 = 6;

/// The symbols of the base tokens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseTokenSymbol {
    /// The eHKD stablecoin
    EHkd,
}

impl Display for BaseTokenSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseTokenSymbol::EHkd => write!(f, "{}", EHKD_CONTRACT_NAME),
        }
    }
}

/// A token whitelisted in the rental escrow by default
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseToken {
    /// The token's address
    pub address: Address,
    /// The token's decimals
    pub decimals: u8,
    /// The token's symbol
    pub symbol: BaseTokenSymbol,
}

/// Reads the base tokens of a network from the registry.
///
/// A network whose registry holds no eHKD deployment has no base tokens.
pub fn base_tokens(networkish: &str, registry_dir: &Path) -> Result<Vec<BaseToken>, ScriptError> {
    let ehkd_path = registry_dir
        .join(DEPLOYED_DIR)
        .join(networkish)
        .join(EHKD_CONTRACT_NAME)
        .with_extension(JSON_EXTENSION);

    if !ehkd_path.exists() {
        return Ok(Vec::new());
    }

    let record: DeployedRecord = read_json(&ehkd_path)?;
    Ok(vec![BaseToken {
        address: record.address,
        decimals: EHKD_DECIMALS,
        symbol: BaseTokenSymbol::EHkd,
    }])
}
