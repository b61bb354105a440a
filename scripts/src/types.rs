//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use clap::ValueEnum;

use crate::{
    constants::{
        DUMMY_UPGRADE_TARGET_CONTRACT_NAME, EHKD_CONTRACT_NAME, ERC20_MOCK_CONTRACT_NAME,
        MODULE_SUFFIX, RENTAL_ESCROW_CONTRACT_NAME, STYLUS_MODULE_SUFFIX,
    },
    journal::future_id,
};

/// The possible Stylus contracts to deploy
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum StylusContract {
    /// The rental escrow contract
    RentalEscrow,
    /// The eHKD stablecoin contract
    Ehkd,
    /// The mock ERC20 contract
    DummyErc20,
    /// The dummy upgrade target contract
    DummyUpgradeTarget,
}

impl StylusContract {
    /// The contract name used in future IDs & the registry
    pub fn contract_name(&self) -> &'static str {
        match self {
            StylusContract::RentalEscrow => RENTAL_ESCROW_CONTRACT_NAME,
            StylusContract::Ehkd => EHKD_CONTRACT_NAME,
            StylusContract::DummyErc20 => ERC20_MOCK_CONTRACT_NAME,
            StylusContract::DummyUpgradeTarget => DUMMY_UPGRADE_TARGET_CONTRACT_NAME,
        }
    }

    /// Whether the contract only exists for testing
    pub fn is_test_contract(&self) -> bool {
        matches!(
            self,
            StylusContract::DummyErc20 | StylusContract::DummyUpgradeTarget
        )
    }

    /// The future ID a standalone `deploy-stylus` run journals the contract under.
    ///
    /// `<C>Module#<C>` belongs to the proxy for contracts with a deployment
    /// module, so those are journaled under `<C>StylusModule#<C>` instead.
    pub fn standalone_future_id(&self) -> String {
        let name = self.contract_name();
        let suffix = if self.is_test_contract() { MODULE_SUFFIX } else { STYLUS_MODULE_SUFFIX };
        future_id(&format!("{name}{suffix}"), name)
    }
}

/// Displays the cargo feature of the `contracts-stylus` crate selecting the contract
impl Display for StylusContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StylusContract::RentalEscrow => write!(f, "rental-escrow"),
            StylusContract::Ehkd => write!(f, "ehkd"),
            StylusContract::DummyErc20 => write!(f, "dummy-erc20"),
            StylusContract::DummyUpgradeTarget => write!(f, "dummy-upgrade-target"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_future_ids() {
        assert_eq!(
            StylusContract::RentalEscrow.standalone_future_id(),
            "RentalEscrowStylusModule#RentalEscrow"
        );
        assert_eq!(StylusContract::Ehkd.standalone_future_id(), "eHKDStylusModule#eHKD");
        // The integration harness reads test contracts from `<C>Module#<C>`
        assert_eq!(StylusContract::DummyErc20.standalone_future_id(), "ERC20MockModule#ERC20Mock");
        assert_eq!(
            StylusContract::DummyUpgradeTarget.standalone_future_id(),
            "DummyUpgradeTargetModule#DummyUpgradeTarget"
        );
    }
}
