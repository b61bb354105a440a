//! The rental escrow contract, holding rental deposits in whitelisted ERC20 tokens.
//!
//! The deal lifecycle is implemented in `contracts_core::escrow`; this contract
//! provides its storage, token custody & event logging, and exposes it over the ABI.

use alloc::{vec, vec::Vec};
use contracts_common::{
    backends::EscrowBackend,
    constants::{INITIAL_VERSION, TOKEN_TRANSFER_FAILED_ERROR_MESSAGE},
    types::{Deal, DealId, DealTuple},
};
use contracts_core::escrow;
use stylus_sdk::{
    alloy_primitives::{Address, U256},
    alloy_sol_types::SolEvent,
    call::Call,
    contract, evm, msg,
    prelude::*,
    storage::{StorageAddress, StorageBool, StorageMap, StorageU256},
};

use crate::{
    contracts::components::initializable::Initializable,
    utils::{helpers::map_call_error, solidity::IERC20},
};

/// A deal as laid out in storage
#[storage]
pub struct StoredDeal {
    initiator: StorageAddress,
    counterparty: StorageAddress,
    token: StorageAddress,
    requested_amount: StorageU256,
    settled_amount: StorageU256,
    released_amount: StorageU256,
    retrieved_amount: StorageU256,
    is_fully_settled: StorageBool,
    can_initiator_release_funds: StorageBool,
    is_open: StorageBool,
}

#[storage]
#[entrypoint]
pub struct RentalEscrowContract {
    /// Guards `initialize`, which stands in for a constructor behind the proxy
    initializable: Initializable,

    /// All deals opened so far, keyed by ID
    deals: StorageMap<U256, StoredDeal>,

    /// The number of deals opened so far, which is also the next deal ID
    deal_counter: StorageU256,

    /// Accounts allowed to administer the whitelists
    whitelist: StorageMap<Address, StorageBool>,

    /// Tokens that deals may be denominated in
    token_whitelist: StorageMap<Address, StorageBool>,
}

#[public]
impl RentalEscrowContract {
    // ------------------
    // | INITIALIZATION |
    // ------------------

    /// Whitelists the caller along with the given accounts & tokens
    pub fn initialize(
        &mut self,
        whitelisted: Vec<Address>,
        whitelisted_tokens: Vec<Address>,
    ) -> Result<(), Vec<u8>> {
        self.initializable._initialize(INITIAL_VERSION)?;
        escrow::initialize(self, msg::sender(), &whitelisted, &whitelisted_tokens);
        Ok(())
    }

    // -------------
    // | WHITELIST |
    // -------------

    pub fn set_whitelisted(&mut self, account: Address, whitelisted: bool) -> Result<(), Vec<u8>> {
        escrow::set_whitelisted(self, msg::sender(), account, whitelisted)?;
        Ok(())
    }

    pub fn set_token_whitelisted(
        &mut self,
        token: Address,
        whitelisted: bool,
    ) -> Result<(), Vec<u8>> {
        escrow::set_token_whitelisted(self, msg::sender(), token, whitelisted)?;
        Ok(())
    }

    pub fn is_whitelisted(&self, account: Address) -> Result<bool, Vec<u8>> {
        Ok(self.whitelist.get(account))
    }

    pub fn is_token_whitelisted(&self, token: Address) -> Result<bool, Vec<u8>> {
        Ok(self.token_whitelist.get(token))
    }

    // -------------
    // | LIFECYCLE |
    // -------------

    /// Opens a deal with the caller as initiator, returning the new deal's ID
    pub fn open_deal(
        &mut self,
        counterparty: Address,
        token: Address,
        requested_amount: U256,
    ) -> Result<U256, Vec<u8>> {
        let deal_id = escrow::open_deal(self, msg::sender(), counterparty, token, requested_amount)?;
        Ok(deal_id)
    }

    /// Pulls `amount` of `token` from the caller into escrow.
    /// The caller must have approved the escrow beforehand.
    pub fn fund_deal(&mut self, deal_id: U256, token: Address, amount: U256) -> Result<(), Vec<u8>> {
        escrow::fund_deal(self, msg::sender(), deal_id, token, amount)?;
        Ok(())
    }

    pub fn set_can_initiator_release_funds(
        &mut self,
        deal_id: U256,
        allowed: bool,
    ) -> Result<(), Vec<u8>> {
        escrow::set_can_initiator_release_funds(self, msg::sender(), deal_id, allowed)?;
        Ok(())
    }

    pub fn release_funds(
        &mut self,
        deal_id: U256,
        token: Address,
        amount: U256,
    ) -> Result<(), Vec<u8>> {
        escrow::release_funds(self, msg::sender(), deal_id, token, amount)?;
        Ok(())
    }

    pub fn close_deal(&mut self, deal_id: U256) -> Result<(), Vec<u8>> {
        escrow::close_deal(self, msg::sender(), deal_id)?;
        Ok(())
    }

    pub fn retrieve_funds(
        &mut self,
        deal_id: U256,
        token: Address,
        amount: U256,
    ) -> Result<(), Vec<u8>> {
        escrow::retrieve_funds(self, msg::sender(), deal_id, token, amount)?;
        Ok(())
    }

    // ---------
    // | VIEWS |
    // ---------

    pub fn get_deal_counter(&self) -> Result<U256, Vec<u8>> {
        Ok(self.deal_counter.get())
    }

    pub fn get_deal(&self, deal_id: U256) -> Result<DealTuple, Vec<u8>> {
        Ok(escrow::load_deal(self, deal_id)?.abi_tuple())
    }

    pub fn get_released_amount(&self, deal_id: U256) -> Result<U256, Vec<u8>> {
        Ok(escrow::load_deal(self, deal_id)?.released_amount)
    }

    pub fn get_retrieved_amount(&self, deal_id: U256) -> Result<U256, Vec<u8>> {
        Ok(escrow::load_deal(self, deal_id)?.retrieved_amount)
    }

    pub fn can_initiator_release_funds(&self, deal_id: U256) -> Result<bool, Vec<u8>> {
        Ok(escrow::load_deal(self, deal_id)?.can_initiator_release_funds)
    }
}

impl EscrowBackend for RentalEscrowContract {
    fn deal(&self, id: DealId) -> Option<Deal> {
        // Deal IDs are assigned contiguously from zero
        if id >= self.deal_counter.get() {
            return None;
        }

        let stored = self.deals.getter(id);
        Some(Deal {
            initiator: stored.initiator.get(),
            counterparty: stored.counterparty.get(),
            token: stored.token.get(),
            requested_amount: stored.requested_amount.get(),
            settled_amount: stored.settled_amount.get(),
            released_amount: stored.released_amount.get(),
            retrieved_amount: stored.retrieved_amount.get(),
            is_fully_settled: stored.is_fully_settled.get(),
            can_initiator_release_funds: stored.can_initiator_release_funds.get(),
            is_open: stored.is_open.get(),
        })
    }

    fn set_deal(&mut self, id: DealId, deal: Deal) {
        let mut stored = self.deals.setter(id);
        stored.initiator.set(deal.initiator);
        stored.counterparty.set(deal.counterparty);
        stored.token.set(deal.token);
        stored.requested_amount.set(deal.requested_amount);
        stored.settled_amount.set(deal.settled_amount);
        stored.released_amount.set(deal.released_amount);
        stored.retrieved_amount.set(deal.retrieved_amount);
        stored.is_fully_settled.set(deal.is_fully_settled);
        stored.can_initiator_release_funds.set(deal.can_initiator_release_funds);
        stored.is_open.set(deal.is_open);
    }

    fn deal_counter(&self) -> U256 {
        self.deal_counter.get()
    }

    fn set_deal_counter(&mut self, counter: U256) {
        self.deal_counter.set(counter);
    }

    fn is_whitelisted(&self, account: Address) -> bool {
        self.whitelist.get(account)
    }

    fn set_whitelisted(&mut self, account: Address, whitelisted: bool) {
        self.whitelist.insert(account, whitelisted);
    }

    fn is_token_whitelisted(&self, token: Address) -> bool {
        self.token_whitelist.get(token)
    }

    fn set_token_whitelisted(&mut self, token: Address, whitelisted: bool) {
        self.token_whitelist.insert(token, whitelisted);
    }

    fn transfer_in(&mut self, token: Address, from: Address, amount: U256) -> Result<(), Vec<u8>> {
        let escrow_address = contract::address();
        let success = IERC20::new(token)
            .transfer_from(Call::new_in(self), from, escrow_address, amount)
            .map_err(map_call_error)?;

        if !success {
            return Err(TOKEN_TRANSFER_FAILED_ERROR_MESSAGE.to_vec());
        }
        Ok(())
    }

    fn transfer_out(&mut self, token: Address, to: Address, amount: U256) -> Result<(), Vec<u8>> {
        let success = IERC20::new(token)
            .transfer(Call::new_in(self), to, amount)
            .map_err(map_call_error)?;

        if !success {
            return Err(TOKEN_TRANSFER_FAILED_ERROR_MESSAGE.to_vec());
        }
        Ok(())
    }

    fn emit<E: SolEvent>(&mut self, event: E) {
        evm::log(event);
    }
}
