//! Mirrors OpenZeppelin's `Initializable` contract for protected initialization:
//! https://github.com/OpenZeppelin/openzeppelin-contracts/blob/v5.0.0/contracts/proxy/utils/Initializable.sol
//!
//! But made significantly simpler because the functions defined here are not modifiers, as in Solidity.

use alloc::{vec, vec::Vec};
use contracts_common::constants::INVALID_VERSION_ERROR_MESSAGE;
use stylus_sdk::{alloy_primitives::U64, prelude::*, storage::StorageU64};

#[storage]
pub struct Initializable {
    /// The version that this contract has been initialized to.
    /// This is used to prevent re-initialization, but allow for extra
    /// initialization steps to be added in future versions.
    ///
    /// This is particularly relevant for contracts that sit behind a proxy,
    /// where `initialize` stands in for a constructor.
    initialized: StorageU64,
}

impl Initializable {
    /// Initializes this contract with the given version, reverting
    /// if it has already been initialized to this version or a later one.
    pub fn _initialize(&mut self, version: u64) -> Result<(), Vec<u8>> {
        let version = U64::from_limbs([version]);
        if self.initialized.get() >= version {
            return Err(INVALID_VERSION_ERROR_MESSAGE.to_vec());
        }

        self.initialized.set(version);
        Ok(())
    }
}
