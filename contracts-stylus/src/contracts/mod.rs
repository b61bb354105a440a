//! Rental escrow & stablecoin smart contracts

mod components;

#[cfg(feature = "rental-escrow")]
mod rental_escrow;

#[cfg(feature = "ehkd")]
mod ehkd;

#[cfg(any(feature = "dummy-erc20", feature = "dummy-upgrade-target"))]
mod test_contracts;

#[cfg(all(feature = "export-abi", feature = "rental-escrow"))]
pub use rental_escrow::print_from_args;

#[cfg(all(feature = "export-abi", feature = "ehkd"))]
pub use ehkd::print_from_args;

#[cfg(all(
    feature = "export-abi",
    any(feature = "dummy-erc20", feature = "dummy-upgrade-target")
))]
pub use test_contracts::print_from_args;
