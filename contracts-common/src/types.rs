//! Common types used throughout the escrow & token contracts

use alloy_primitives::{Address, U256};

/// The identifier of an escrow deal, assigned from an incrementing counter
pub type DealId = U256;

/// The ABI layout of a deal returned by `getDeal`:
/// (initiator, counterparty, token, requestedAmount, settledAmount, releasedAmount,
/// isFullySettled, canInitiatorReleaseFunds, isFullyReleased, isOpen)
///
/// The retrieved amount is served by `getRetrievedAmount` alone.
pub type DealTuple = (Address, Address, Address, U256, U256, U256, bool, bool, bool, bool);

/// A single rental-deposit agreement tracked by the escrow contract
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deal {
    /// The account that opened the deal (the "maker")
    pub initiator: Address,
    /// The account designated to fund the deal (the "taker")
    pub counterparty: Address,
    /// The whitelisted token the deal is denominated in
    pub token: Address,
    /// The amount the initiator requested
    pub requested_amount: U256,
    /// The amount the counterparty has funded so far
    pub settled_amount: U256,
    /// The amount released to the initiator so far
    pub released_amount: U256,
    /// The amount retrieved by the counterparty after closing
    pub retrieved_amount: U256,
    /// Whether the settled amount has reached the requested amount
    pub is_fully_settled: bool,
    /// Whether the counterparty has allowed the initiator to release funds
    pub can_initiator_release_funds: bool,
    /// Whether the deal is still open
    pub is_open: bool,
}

impl Deal {
    /// Opens a new deal with nothing settled
    pub fn open(initiator: Address, counterparty: Address, token: Address, amount: U256) -> Self {
        Self {
            initiator,
            counterparty,
            token,
            requested_amount: amount,
            is_open: true,
            ..Default::default()
        }
    }

    /// Whether everything requested has been released to the initiator
    pub fn is_fully_released(&self) -> bool {
        !self.requested_amount.is_zero() && self.released_amount == self.requested_amount
    }

    /// The deal in its `getDeal` ABI layout
    pub fn abi_tuple(&self) -> DealTuple {
        (
            self.initiator,
            self.counterparty,
            self.token,
            self.requested_amount,
            self.settled_amount,
            self.released_amount,
            self.is_fully_settled,
            self.can_initiator_release_funds,
            self.is_fully_released(),
            self.is_open,
        )
    }

    /// The amount the counterparty may still fund
    pub fn remaining_requested(&self) -> U256 {
        self.requested_amount.saturating_sub(self.settled_amount)
    }

    /// The amount still held in escrow for this deal
    pub fn remaining_settled(&self) -> U256 {
        self.settled_amount
            .saturating_sub(self.released_amount)
            .saturating_sub(self.retrieved_amount)
    }
}
