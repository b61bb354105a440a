//! Various utilities used throughout the contracts,
//! including constants, ABI interfaces, and call helpers

#![cfg(feature = "rental-escrow")]

pub mod constants;
pub mod helpers;
pub mod solidity;
