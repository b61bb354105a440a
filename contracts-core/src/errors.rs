//! Errors stemming from escrow & token operations

use alloc::vec::Vec;
use contracts_common::constants::{
    DEAL_CLOSED_ERROR_MESSAGE, DEAL_NOT_FOUND_ERROR_MESSAGE, DEAL_STILL_ACTIVE_ERROR_MESSAGE,
    FUND_EXCEEDS_REQUESTED_ERROR_MESSAGE, INCORRECT_TOKEN_ERROR_MESSAGE,
    INSUFFICIENT_ALLOWANCE_ERROR_MESSAGE, INSUFFICIENT_BALANCE_ERROR_MESSAGE,
    INVALID_COUNTERPARTY_ERROR_MESSAGE, NOT_ADMIN_ERROR_MESSAGE, NOT_WHITELISTED_ERROR_MESSAGE,
    NO_SETTLED_AMOUNT_ERROR_MESSAGE, NO_SETTLED_AMOUNT_REMAINING_ERROR_MESSAGE,
    ONLY_MAKER_CLOSE_ERROR_MESSAGE, ONLY_MAKER_RELEASE_ERROR_MESSAGE,
    ONLY_TAKER_APPROVE_ERROR_MESSAGE, ONLY_TAKER_FUND_ERROR_MESSAGE,
    ONLY_TAKER_RETRIEVE_ERROR_MESSAGE, OVERFLOW_ERROR_MESSAGE, RELEASE_EXCEEDS_REQUESTED_ERROR_MESSAGE,
    RELEASE_EXCEEDS_SETTLED_ERROR_MESSAGE, RELEASE_NOT_APPROVED_ERROR_MESSAGE,
    RETRIEVE_EXCEEDS_SETTLED_ERROR_MESSAGE, TOKEN_NOT_WHITELISTED_ERROR_MESSAGE,
    ZERO_ADDRESS_ERROR_MESSAGE, ZERO_AMOUNT_ERROR_MESSAGE,
};

/// Errors that can occur when driving a deal through its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscrowError {
    /// The deal ID has not been assigned
    DealNotFound,
    /// The caller is not on the account whitelist
    NotWhitelisted,
    /// The counterparty is the zero address or the initiator
    InvalidCounterparty,
    /// A zero amount was requested or moved
    ZeroAmount,
    /// The token is not on the token whitelist
    TokenNotWhitelisted,
    /// The token differs from the deal's token
    IncorrectToken,
    /// Someone other than the initiator tried to close the deal
    OnlyMakerCanClose,
    /// Someone other than the counterparty tried to fund the deal
    OnlyTakerCanFund,
    /// Someone other than the counterparty tried to change release approval
    OnlyTakerCanApprove,
    /// Someone other than the initiator tried to release funds
    OnlyMakerCanRelease,
    /// Someone other than the counterparty tried to retrieve funds
    OnlyTakerCanRetrieve,
    /// Funding would exceed the requested amount
    FundExceedsRequested,
    /// Release approval was granted before anything was funded
    NoSettledAmount,
    /// The counterparty has not approved releasing funds
    ReleaseNotApproved,
    /// A release would exceed the requested amount
    ReleaseExceedsRequested,
    /// A release would exceed what is still held for the deal
    ReleaseExceedsSettled,
    /// Funds were retrieved before the deal was closed
    DealStillActive,
    /// The operation requires an open deal
    DealClosed,
    /// A retrieval would exceed what is still held for the deal
    RetrieveExceedsSettled,
    /// Nothing is left to retrieve
    NoSettledAmountRemaining,
    /// The token contract reverted, carrying its revert data
    TokenTransfer(Vec<u8>),
}

impl EscrowError {
    /// The revert data the contract returns for this error
    pub fn revert_data(&self) -> &[u8] {
        match self {
            EscrowError::DealNotFound => DEAL_NOT_FOUND_ERROR_MESSAGE,
            EscrowError::NotWhitelisted => NOT_WHITELISTED_ERROR_MESSAGE,
            EscrowError::InvalidCounterparty => INVALID_COUNTERPARTY_ERROR_MESSAGE,
            EscrowError::ZeroAmount => ZERO_AMOUNT_ERROR_MESSAGE,
            EscrowError::TokenNotWhitelisted => TOKEN_NOT_WHITELISTED_ERROR_MESSAGE,
            EscrowError::IncorrectToken => INCORRECT_TOKEN_ERROR_MESSAGE,
            EscrowError::OnlyMakerCanClose => ONLY_MAKER_CLOSE_ERROR_MESSAGE,
            EscrowError::OnlyTakerCanFund => ONLY_TAKER_FUND_ERROR_MESSAGE,
            EscrowError::OnlyTakerCanApprove => ONLY_TAKER_APPROVE_ERROR_MESSAGE,
            EscrowError::OnlyMakerCanRelease => ONLY_MAKER_RELEASE_ERROR_MESSAGE,
            EscrowError::OnlyTakerCanRetrieve => ONLY_TAKER_RETRIEVE_ERROR_MESSAGE,
            EscrowError::FundExceedsRequested => FUND_EXCEEDS_REQUESTED_ERROR_MESSAGE,
            EscrowError::NoSettledAmount => NO_SETTLED_AMOUNT_ERROR_MESSAGE,
            EscrowError::ReleaseNotApproved => RELEASE_NOT_APPROVED_ERROR_MESSAGE,
            EscrowError::ReleaseExceedsRequested => RELEASE_EXCEEDS_REQUESTED_ERROR_MESSAGE,
            EscrowError::ReleaseExceedsSettled => RELEASE_EXCEEDS_SETTLED_ERROR_MESSAGE,
            EscrowError::DealStillActive => DEAL_STILL_ACTIVE_ERROR_MESSAGE,
            EscrowError::DealClosed => DEAL_CLOSED_ERROR_MESSAGE,
            EscrowError::RetrieveExceedsSettled => RETRIEVE_EXCEEDS_SETTLED_ERROR_MESSAGE,
            EscrowError::NoSettledAmountRemaining => NO_SETTLED_AMOUNT_REMAINING_ERROR_MESSAGE,
            EscrowError::TokenTransfer(data) => data,
        }
    }
}

impl From<EscrowError> for Vec<u8> {
    fn from(err: EscrowError) -> Vec<u8> {
        match err {
            EscrowError::TokenTransfer(data) => data,
            other => other.revert_data().to_vec(),
        }
    }
}

/// Errors that can occur when moving tokens on the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// The debited balance is too small
    InsufficientBalance,
    /// The spender's allowance is too small
    InsufficientAllowance,
    /// Tokens were sent to, or approved for, the zero address
    ZeroAddress,
    /// The caller is not the token admin
    NotAdmin,
    /// A balance or the total supply would exceed `U256::MAX`
    Overflow,
}

impl TokenError {
    /// The revert data the contract returns for this error
    pub fn revert_data(&self) -> &'static [u8] {
        match self {
            TokenError::InsufficientBalance => INSUFFICIENT_BALANCE_ERROR_MESSAGE,
            TokenError::InsufficientAllowance => INSUFFICIENT_ALLOWANCE_ERROR_MESSAGE,
            TokenError::ZeroAddress => ZERO_ADDRESS_ERROR_MESSAGE,
            TokenError::NotAdmin => NOT_ADMIN_ERROR_MESSAGE,
            TokenError::Overflow => OVERFLOW_ERROR_MESSAGE,
        }
    }
}

impl From<TokenError> for Vec<u8> {
    fn from(err: TokenError) -> Vec<u8> {
        err.revert_data().to_vec()
    }
}
