//! "Backends" representing functionality that is either delegated to
//! contract storage & external calls, or to in-memory Rust code in tests.
//!
//! This abstraction exists primarly to enable mocks for testing.

use alloc::vec::Vec;
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolEvent;

use crate::types::{Deal, DealId};

/// The storage, token custody, and logging used by the escrow state machine
pub trait EscrowBackend {
    /// Loads a deal, if it has been opened
    fn deal(&self, id: DealId) -> Option<Deal>;
    /// Stores a deal
    fn set_deal(&mut self, id: DealId, deal: Deal);

    /// The number of deals opened so far, which is also the next deal ID
    fn deal_counter(&self) -> U256;
    /// Overwrites the deal counter
    fn set_deal_counter(&mut self, counter: U256);

    /// Whether the account may administer the whitelists
    fn is_whitelisted(&self, account: Address) -> bool;
    /// Adds or removes an account from the whitelist
    fn set_whitelisted(&mut self, account: Address, whitelisted: bool);

    /// Whether deals may be denominated in the token
    fn is_token_whitelisted(&self, token: Address) -> bool;
    /// Adds or removes a token from the token whitelist
    fn set_token_whitelisted(&mut self, token: Address, whitelisted: bool);

    /// Moves `amount` of `token` from `from` into escrow custody,
    /// returning the revert data of the token on failure
    fn transfer_in(&mut self, token: Address, from: Address, amount: U256) -> Result<(), Vec<u8>>;
    /// Moves `amount` of `token` out of escrow custody to `to`,
    /// returning the revert data of the token on failure
    fn transfer_out(&mut self, token: Address, to: Address, amount: U256) -> Result<(), Vec<u8>>;

    /// Emits an event
    fn emit<E: SolEvent>(&mut self, event: E);
}

/// The storage and logging used by the ERC20 ledger
pub trait Erc20Backend {
    /// The balance of an account
    fn balance_of(&self, account: Address) -> U256;
    /// Overwrites the balance of an account
    fn set_balance(&mut self, account: Address, balance: U256);

    /// The amount `spender` may move on behalf of `owner`
    fn allowance(&self, owner: Address, spender: Address) -> U256;
    /// Overwrites an allowance
    fn set_allowance(&mut self, owner: Address, spender: Address, value: U256);

    /// The total supply of the token
    fn total_supply(&self) -> U256;
    /// Overwrites the total supply
    fn set_total_supply(&mut self, supply: U256);

    /// Emits an event
    fn emit<E: SolEvent>(&mut self, event: E);
}

/// The admin & vault storage layered over the ledger by the eHKD stablecoin
pub trait EhkdBackend: Erc20Backend {
    /// The account allowed to mint, burn, and reassign roles
    fn admin(&self) -> Address;
    /// Overwrites the admin
    fn set_admin(&mut self, admin: Address);

    /// The account that receives minted tokens and from which tokens are burned
    fn token_vault(&self) -> Address;
    /// Overwrites the token vault
    fn set_token_vault(&mut self, vault: Address);
}
