//! A mock ERC20 token implementation used in integration testing.
//!
//! THIS IS NOT MEANT TO BE DEPLOYED AS A PRODUCTION CONTRACT.

use alloc::{string::String, vec, vec::Vec};
use contracts_core::token;
use stylus_sdk::{
    alloy_primitives::{Address, U256},
    prelude::*,
};

use crate::contracts::components::{erc20::Erc20, initializable::Initializable};

/// The version `initialize` marks the mock as initialized to
const MOCK_VERSION: u64 = 1;

#[storage]
#[entrypoint]
pub struct DummyErc20Contract {
    /// The ERC20 ledger
    #[borrow]
    erc20: Erc20,

    /// Guards `initialize`
    initializable: Initializable,
}

#[public]
#[inherit(Erc20)]
impl DummyErc20Contract {
    pub fn initialize(&mut self, name: String, symbol: String, decimals: u8) -> Result<(), Vec<u8>> {
        self.initializable._initialize(MOCK_VERSION)?;
        self.erc20._set_metadata(&name, &symbol, decimals);
        Ok(())
    }

    /// Mints tokens to any address, on behalf of anyone
    pub fn mint(&mut self, to: Address, amount: U256) -> Result<(), Vec<u8>> {
        token::mint(&mut self.erc20, to, amount)?;
        Ok(())
    }
}
