//! An ERC20 storage component, inherited by the eHKD stablecoin & the mock token.
//!
//! The ledger rules themselves live in `contracts_core::token`; this component
//! only binds them to Stylus storage and exposes the standard ERC20 interface.
//!
//! Adapted from https://github.com/OffchainLabs/stylus-sdk-rs/tree/stylus/examples/erc20

use alloc::{string::String, vec, vec::Vec};
use contracts_common::backends::Erc20Backend;
use contracts_core::token;
use stylus_sdk::{
    alloy_primitives::{Address, U256, U8},
    alloy_sol_types::SolEvent,
    evm, msg,
    prelude::*,
    storage::{StorageMap, StorageString, StorageU256, StorageU8},
};

#[storage]
pub struct Erc20 {
    /// Maps users to balances
    balances: StorageMap<Address, StorageU256>,
    /// Maps owners to the amounts their spenders may move
    allowances: StorageMap<Address, StorageMap<Address, StorageU256>>,
    /// The total supply of the token
    total_supply: StorageU256,
    /// The token name
    name: StorageString,
    /// The token symbol
    symbol: StorageString,
    /// The number of decimals in one whole token
    decimals: StorageU8,
}

impl Erc20 {
    /// Sets the token metadata, meant to be called once from an initializer
    pub fn _set_metadata(&mut self, name: &str, symbol: &str, decimals: u8) {
        self.name.set_str(name);
        self.symbol.set_str(symbol);
        self.decimals.set(U8::from(decimals));
    }
}

#[public]
impl Erc20 {
    pub fn name(&self) -> Result<String, Vec<u8>> {
        Ok(self.name.get_string())
    }

    pub fn symbol(&self) -> Result<String, Vec<u8>> {
        Ok(self.symbol.get_string())
    }

    pub fn decimals(&self) -> Result<u8, Vec<u8>> {
        Ok(self.decimals.get().to())
    }

    pub fn total_supply(&self) -> Result<U256, Vec<u8>> {
        Ok(self.total_supply.get())
    }

    pub fn balance_of(&self, account: Address) -> Result<U256, Vec<u8>> {
        Ok(self.balances.get(account))
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> Result<U256, Vec<u8>> {
        Ok(self.allowances.getter(owner).get(spender))
    }

    pub fn transfer(&mut self, to: Address, value: U256) -> Result<bool, Vec<u8>> {
        token::transfer(self, msg::sender(), to, value)?;
        Ok(true)
    }

    pub fn approve(&mut self, spender: Address, value: U256) -> Result<bool, Vec<u8>> {
        token::approve(self, msg::sender(), spender, value)?;
        Ok(true)
    }

    pub fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Vec<u8>> {
        token::transfer_from(self, msg::sender(), from, to, value)?;
        Ok(true)
    }
}

impl Erc20Backend for Erc20 {
    fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(account)
    }

    fn set_balance(&mut self, account: Address, balance: U256) {
        self.balances.insert(account, balance);
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.getter(owner).get(spender)
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, value: U256) {
        self.allowances.setter(owner).insert(spender, value);
    }

    fn total_supply(&self) -> U256 {
        self.total_supply.get()
    }

    fn set_total_supply(&mut self, supply: U256) {
        self.total_supply.set(supply);
    }

    fn emit<E: SolEvent>(&mut self, event: E) {
        evm::log(event);
    }
}
