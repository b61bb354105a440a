//! The eHKD stablecoin: an ERC20 whose supply is minted into, and burned from,
//! a token vault controlled by an admin

use alloc::{vec, vec::Vec};
use contracts_common::{
    backends::{EhkdBackend, Erc20Backend},
    constants::{EHKD_DECIMALS, EHKD_NAME, EHKD_SYMBOL, INITIAL_VERSION},
};
use contracts_core::token;
use stylus_sdk::{
    alloy_primitives::{Address, U256},
    alloy_sol_types::SolEvent,
    msg,
    prelude::*,
    storage::StorageAddress,
};

use crate::contracts::components::{erc20::Erc20, initializable::Initializable};

#[storage]
#[entrypoint]
pub struct EhkdContract {
    /// The ERC20 ledger
    #[borrow]
    erc20: Erc20,

    /// Guards `initialize`, which stands in for a constructor behind the proxy
    initializable: Initializable,

    /// The account allowed to mint, burn, and reassign roles
    admin: StorageAddress,

    /// The account that receives minted tokens and from which tokens are burned
    token_vault: StorageAddress,
}

#[public]
#[inherit(Erc20)]
impl EhkdContract {
    /// Sets the admin & vault, and mints `mint_amount` into the vault
    pub fn initialize(
        &mut self,
        admin: Address,
        token_vault: Address,
        mint_amount: U256,
    ) -> Result<(), Vec<u8>> {
        self.initializable._initialize(INITIAL_VERSION)?;
        self.erc20._set_metadata(EHKD_NAME, EHKD_SYMBOL, EHKD_DECIMALS);
        token::initialize_ehkd(self, admin, token_vault, mint_amount)?;
        Ok(())
    }

    pub fn admin(&self) -> Result<Address, Vec<u8>> {
        Ok(self.admin.get())
    }

    pub fn token_vault(&self) -> Result<Address, Vec<u8>> {
        Ok(self.token_vault.get())
    }

    pub fn mint(&mut self, amount: U256) -> Result<(), Vec<u8>> {
        token::mint_to_vault(self, msg::sender(), amount)?;
        Ok(())
    }

    pub fn burn(&mut self, amount: U256) -> Result<(), Vec<u8>> {
        token::burn_from_vault(self, msg::sender(), amount)?;
        Ok(())
    }

    pub fn set_token_vault(&mut self, new_vault: Address) -> Result<(), Vec<u8>> {
        token::set_token_vault(self, msg::sender(), new_vault)?;
        Ok(())
    }

    pub fn transfer_admin(&mut self, new_admin: Address) -> Result<(), Vec<u8>> {
        token::transfer_admin(self, msg::sender(), new_admin)?;
        Ok(())
    }
}

// The ledger is delegated to the inherited component

impl Erc20Backend for EhkdContract {
    fn balance_of(&self, account: Address) -> U256 {
        Erc20Backend::balance_of(&self.erc20, account)
    }

    fn set_balance(&mut self, account: Address, balance: U256) {
        self.erc20.set_balance(account, balance);
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        Erc20Backend::allowance(&self.erc20, owner, spender)
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, value: U256) {
        self.erc20.set_allowance(owner, spender, value);
    }

    fn total_supply(&self) -> U256 {
        Erc20Backend::total_supply(&self.erc20)
    }

    fn set_total_supply(&mut self, supply: U256) {
        self.erc20.set_total_supply(supply);
    }

    fn emit<E: SolEvent>(&mut self, event: E) {
        self.erc20.emit(event);
    }
}

impl EhkdBackend for EhkdContract {
    fn admin(&self) -> Address {
        self.admin.get()
    }

    fn set_admin(&mut self, admin: Address) {
        self.admin.set(admin);
    }

    fn token_vault(&self) -> Address {
        self.token_vault.get()
    }

    fn set_token_vault(&mut self, vault: Address) {
        self.token_vault.set(vault);
    }
}
