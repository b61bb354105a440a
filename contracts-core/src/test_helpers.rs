//! In-memory backends for testing the escrow & token logic

use std::collections::{HashMap, HashSet};

use alloy_primitives::{address, Address, LogData, U256};
use alloy_sol_types::SolEvent;
use contracts_common::{
    backends::{EhkdBackend, Erc20Backend, EscrowBackend},
    constants::INSUFFICIENT_BALANCE_ERROR_MESSAGE,
    types::{Deal, DealId},
};

/// An escrow backed by hash maps, with a multi-token ledger standing in for
/// the token contracts it calls
#[derive(Default)]
pub struct MockEscrow {
    /// Deals by ID
    pub deals: HashMap<DealId, Deal>,
    /// The deal counter
    pub counter: U256,
    /// Whitelisted accounts
    pub whitelist: HashSet<Address>,
    /// Whitelisted tokens
    pub token_whitelist: HashSet<Address>,
    /// Token balances, keyed by (token, holder)
    pub balances: HashMap<(Address, Address), U256>,
    /// Every event emitted, in order
    pub events: Vec<LogData>,
}

impl MockEscrow {
    /// The address the mock escrow holds custody under
    pub const ESCROW: Address = address!("0000000000000000000000000000000000e5c000");
    /// The account that deploys & initializes the escrow
    pub const DEPLOYER: Address = address!("0000000000000000000000000000000000000d00");
    /// The initiator of most test deals
    pub const MAKER: Address = address!("0000000000000000000000000000000000000a01");
    /// An initiator unrelated to the default deal
    pub const OTHER_MAKER: Address = address!("0000000000000000000000000000000000000a02");
    /// The counterparty of most test deals
    pub const TAKER: Address = address!("0000000000000000000000000000000000000b01");
    /// A counterparty unrelated to the default deal
    pub const OTHER_TAKER: Address = address!("0000000000000000000000000000000000000b02");
    /// A whitelisted token
    pub const TOKEN_A: Address = address!("000000000000000000000000000000000000c0a0");
    /// A second whitelisted token
    pub const TOKEN_B: Address = address!("000000000000000000000000000000000000c0b0");
    /// A token that is never whitelisted by `setup`
    pub const TOKEN_C: Address = address!("000000000000000000000000000000000000c0c0");

    /// Creates an empty escrow
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `token` to `holder`
    pub fn mint(&mut self, token: Address, holder: Address, amount: U256) {
        *self.balances.entry((token, holder)).or_default() += amount;
    }

    /// The balance of `holder` in `token`
    pub fn balance(&self, token: Address, holder: Address) -> U256 {
        self.balances.get(&(token, holder)).copied().unwrap_or_default()
    }

    /// The amount of `token` held by the escrow
    pub fn custody(&self, token: Address) -> U256 {
        self.balance(token, Self::ESCROW)
    }

    /// Moves tokens between two holders, failing like an ERC20 would
    fn move_tokens(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), Vec<u8>> {
        let from_balance = self.balance(token, from);
        if from_balance < amount {
            return Err(INSUFFICIENT_BALANCE_ERROR_MESSAGE.to_vec());
        }

        self.balances.insert((token, from), from_balance - amount);
        self.mint(token, to, amount);
        Ok(())
    }
}

impl EscrowBackend for MockEscrow {
    fn deal(&self, id: DealId) -> Option<Deal> {
        self.deals.get(&id).copied()
    }

    fn set_deal(&mut self, id: DealId, deal: Deal) {
        self.deals.insert(id, deal);
    }

    fn deal_counter(&self) -> U256 {
        self.counter
    }

    fn set_deal_counter(&mut self, counter: U256) {
        self.counter = counter;
    }

    fn is_whitelisted(&self, account: Address) -> bool {
        self.whitelist.contains(&account)
    }

    fn set_whitelisted(&mut self, account: Address, whitelisted: bool) {
        if whitelisted {
            self.whitelist.insert(account);
        } else {
            self.whitelist.remove(&account);
        }
    }

    fn is_token_whitelisted(&self, token: Address) -> bool {
        self.token_whitelist.contains(&token)
    }

    fn set_token_whitelisted(&mut self, token: Address, whitelisted: bool) {
        if whitelisted {
            self.token_whitelist.insert(token);
        } else {
            self.token_whitelist.remove(&token);
        }
    }

    fn transfer_in(&mut self, token: Address, from: Address, amount: U256) -> Result<(), Vec<u8>> {
        self.move_tokens(token, from, Self::ESCROW, amount)
    }

    fn transfer_out(&mut self, token: Address, to: Address, amount: U256) -> Result<(), Vec<u8>> {
        self.move_tokens(token, Self::ESCROW, to, amount)
    }

    fn emit<E: SolEvent>(&mut self, event: E) {
        self.events.push(event.encode_log_data());
    }
}

/// A single ERC20 ledger, with the eHKD roles
#[derive(Default)]
pub struct MockErc20 {
    /// Balances by holder
    pub balances: HashMap<Address, U256>,
    /// Allowances keyed by (owner, spender)
    pub allowances: HashMap<(Address, Address), U256>,
    /// The total supply
    pub supply: U256,
    /// The eHKD admin
    pub admin: Address,
    /// The eHKD token vault
    pub vault: Address,
    /// Every event emitted, in order
    pub events: Vec<LogData>,
}

impl Erc20Backend for MockErc20 {
    fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    fn set_balance(&mut self, account: Address, balance: U256) {
        self.balances.insert(account, balance);
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).copied().unwrap_or_default()
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, value: U256) {
        self.allowances.insert((owner, spender), value);
    }

    fn total_supply(&self) -> U256 {
        self.supply
    }

    fn set_total_supply(&mut self, supply: U256) {
        self.supply = supply;
    }

    fn emit<E: SolEvent>(&mut self, event: E) {
        self.events.push(event.encode_log_data());
    }
}

impl EhkdBackend for MockErc20 {
    fn admin(&self) -> Address {
        self.admin
    }

    fn set_admin(&mut self, admin: Address) {
        self.admin = admin;
    }

    fn token_vault(&self) -> Address {
        self.vault
    }

    fn set_token_vault(&mut self, vault: Address) {
        self.vault = vault;
    }
}
