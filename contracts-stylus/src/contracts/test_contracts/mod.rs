//! Testing contracts deployed to the devnet by the integration tests

#[cfg(feature = "dummy-erc20")]
mod dummy_erc20;

#[cfg(feature = "dummy-upgrade-target")]
mod dummy_upgrade_target;

#[cfg(all(feature = "export-abi", feature = "dummy-erc20"))]
pub use dummy_erc20::print_from_args;

#[cfg(all(feature = "export-abi", feature = "dummy-upgrade-target"))]
pub use dummy_upgrade_target::print_from_args;
