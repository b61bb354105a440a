//! The ERC20 ledger, and the eHKD stablecoin's admin operations layered over it

use alloy_primitives::{Address, U256};
use contracts_common::{
    backends::{EhkdBackend, Erc20Backend},
    solidity::{AdminTransferred, Approval, TokenVaultChanged, Transfer},
};

use crate::errors::TokenError;

// ----------
// | LEDGER |
// ----------

/// Moves `value` from `from` to `to`
pub fn transfer<B: Erc20Backend>(
    backend: &mut B,
    from: Address,
    to: Address,
    value: U256,
) -> Result<(), TokenError> {
    if to == Address::ZERO {
        return Err(TokenError::ZeroAddress);
    }

    let from_balance = backend.balance_of(from);
    if from_balance < value {
        return Err(TokenError::InsufficientBalance);
    }

    let from_balance = from_balance - value;
    let to_balance = if from == to { from_balance } else { backend.balance_of(to) };
    let to_balance = to_balance.checked_add(value).ok_or(TokenError::Overflow)?;
    backend.set_balance(from, from_balance);
    backend.set_balance(to, to_balance);

    backend.emit(Transfer { from, to, value });
    Ok(())
}

/// Sets the amount `spender` may move on behalf of `owner`
pub fn approve<B: Erc20Backend>(
    backend: &mut B,
    owner: Address,
    spender: Address,
    value: U256,
) -> Result<(), TokenError> {
    if spender == Address::ZERO {
        return Err(TokenError::ZeroAddress);
    }

    backend.set_allowance(owner, spender, value);
    backend.emit(Approval {
        owner,
        spender,
        value,
    });
    Ok(())
}

/// Moves `value` from `from` to `to` on behalf of `spender`, consuming its allowance.
///
/// An allowance of `U256::MAX` is never decremented.
pub fn transfer_from<B: Erc20Backend>(
    backend: &mut B,
    spender: Address,
    from: Address,
    to: Address,
    value: U256,
) -> Result<(), TokenError> {
    let allowance = backend.allowance(from, spender);
    if allowance < value {
        return Err(TokenError::InsufficientAllowance);
    }

    if allowance != U256::MAX {
        backend.set_allowance(from, spender, allowance - value);
    }

    transfer(backend, from, to, value)
}

/// Creates `value` new tokens for `to`
pub fn mint<B: Erc20Backend>(backend: &mut B, to: Address, value: U256) -> Result<(), TokenError> {
    if to == Address::ZERO {
        return Err(TokenError::ZeroAddress);
    }

    // Balances never exceed the supply, so a checked supply bounds every balance
    let supply = backend.total_supply().checked_add(value).ok_or(TokenError::Overflow)?;
    let balance = backend.balance_of(to).checked_add(value).ok_or(TokenError::Overflow)?;
    backend.set_total_supply(supply);
    backend.set_balance(to, balance);

    backend.emit(Transfer {
        from: Address::ZERO,
        to,
        value,
    });
    Ok(())
}

/// Destroys `value` tokens held by `from`
pub fn burn<B: Erc20Backend>(
    backend: &mut B,
    from: Address,
    value: U256,
) -> Result<(), TokenError> {
    let balance = backend.balance_of(from);
    if balance < value {
        return Err(TokenError::InsufficientBalance);
    }

    backend.set_balance(from, balance - value);
    let supply = backend.total_supply();
    backend.set_total_supply(supply - value);

    backend.emit(Transfer {
        from,
        to: Address::ZERO,
        value,
    });
    Ok(())
}

// --------
// | EHKD |
// --------

/// Assigns the admin & vault, and mints the initial supply into the vault.
///
/// Guarding against re-initialization is left to the caller.
pub fn initialize_ehkd<B: EhkdBackend>(
    backend: &mut B,
    admin: Address,
    token_vault: Address,
    mint_amount: U256,
) -> Result<(), TokenError> {
    if admin == Address::ZERO || token_vault == Address::ZERO {
        return Err(TokenError::ZeroAddress);
    }

    backend.set_admin(admin);
    backend.set_token_vault(token_vault);
    mint(backend, token_vault, mint_amount)
}

/// Mints `amount` into the token vault
pub fn mint_to_vault<B: EhkdBackend>(
    backend: &mut B,
    caller: Address,
    amount: U256,
) -> Result<(), TokenError> {
    assert_admin(backend, caller)?;
    let vault = backend.token_vault();
    mint(backend, vault, amount)
}

/// Burns `amount` out of the token vault
pub fn burn_from_vault<B: EhkdBackend>(
    backend: &mut B,
    caller: Address,
    amount: U256,
) -> Result<(), TokenError> {
    assert_admin(backend, caller)?;
    let vault = backend.token_vault();
    burn(backend, vault, amount)
}

/// Points minting & burning at a new vault. Existing vault balances are not moved.
pub fn set_token_vault<B: EhkdBackend>(
    backend: &mut B,
    caller: Address,
    new_vault: Address,
) -> Result<(), TokenError> {
    assert_admin(backend, caller)?;
    if new_vault == Address::ZERO {
        return Err(TokenError::ZeroAddress);
    }

    let previous_vault = backend.token_vault();
    backend.set_token_vault(new_vault);
    backend.emit(TokenVaultChanged {
        previous_vault,
        new_vault,
    });
    Ok(())
}

/// Hands the admin role to `new_admin`
pub fn transfer_admin<B: EhkdBackend>(
    backend: &mut B,
    caller: Address,
    new_admin: Address,
) -> Result<(), TokenError> {
    assert_admin(backend, caller)?;
    if new_admin == Address::ZERO {
        return Err(TokenError::ZeroAddress);
    }

    backend.set_admin(new_admin);
    backend.emit(AdminTransferred {
        previous_admin: caller,
        new_admin,
    });
    Ok(())
}

/// Fails unless the caller is the admin
fn assert_admin<B: EhkdBackend>(backend: &B, caller: Address) -> Result<(), TokenError> {
    if caller == backend.admin() {
        Ok(())
    } else {
        Err(TokenError::NotAdmin)
    }
}
