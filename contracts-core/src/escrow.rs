//! The rental escrow state machine.
//!
//! A deal is opened by its initiator (the "maker") against a counterparty (the "taker").
//! The taker funds the deal in the whitelisted token it was opened with, may allow
//! the maker to release funds to itself, and after the maker closes the deal,
//! retrieves whatever was neither released nor retrieved before.
//!
//! All methods follow checks-effects-interactions: the deal is written back
//! before any token moves. If the token call fails, the deal is restored, so the
//! backend holds no partial effects even where the failure does not revert.

use alloy_primitives::{Address, U256};
use contracts_common::{
    backends::EscrowBackend,
    solidity::{
        DealClosed, DealFunded, DealOpened, FundReleaseApprovalChanged, FundsReleased,
        FundsRetrieved, TokenWhitelistUpdated, WhitelistUpdated,
    },
    types::{Deal, DealId},
};

use crate::errors::EscrowError;

// ------------------
// | INITIALIZATION |
// ------------------

/// Whitelists the deployer along with the given accounts and tokens.
///
/// Emits one `WhitelistUpdated` per account, the caller first, then one
/// `TokenWhitelistUpdated` per token.
pub fn initialize<B: EscrowBackend>(
    backend: &mut B,
    caller: Address,
    whitelisted: &[Address],
    whitelisted_tokens: &[Address],
) {
    for account in core::iter::once(&caller).chain(whitelisted) {
        backend.set_whitelisted(*account, true);
        backend.emit(WhitelistUpdated {
            account: *account,
            whitelisted: true,
        });
    }

    for token in whitelisted_tokens {
        backend.set_token_whitelisted(*token, true);
        backend.emit(TokenWhitelistUpdated {
            token: *token,
            whitelisted: true,
        });
    }
}

// -------------
// | WHITELIST |
// -------------

/// Adds or removes an account from the whitelist
pub fn set_whitelisted<B: EscrowBackend>(
    backend: &mut B,
    caller: Address,
    account: Address,
    whitelisted: bool,
) -> Result<(), EscrowError> {
    assert_whitelisted(backend, caller)?;
    backend.set_whitelisted(account, whitelisted);
    backend.emit(WhitelistUpdated {
        account,
        whitelisted,
    });
    Ok(())
}

/// Adds or removes a token from the token whitelist
pub fn set_token_whitelisted<B: EscrowBackend>(
    backend: &mut B,
    caller: Address,
    token: Address,
    whitelisted: bool,
) -> Result<(), EscrowError> {
    assert_whitelisted(backend, caller)?;
    backend.set_token_whitelisted(token, whitelisted);
    backend.emit(TokenWhitelistUpdated { token, whitelisted });
    Ok(())
}

// -------------
// | LIFECYCLE |
// -------------

/// Opens a new deal, returning its ID
pub fn open_deal<B: EscrowBackend>(
    backend: &mut B,
    caller: Address,
    counterparty: Address,
    token: Address,
    requested_amount: U256,
) -> Result<DealId, EscrowError> {
    if !backend.is_token_whitelisted(token) {
        return Err(EscrowError::TokenNotWhitelisted);
    }
    if counterparty == Address::ZERO || counterparty == caller {
        return Err(EscrowError::InvalidCounterparty);
    }
    if requested_amount.is_zero() {
        return Err(EscrowError::ZeroAmount);
    }

    let deal_id = backend.deal_counter();
    backend.set_deal(
        deal_id,
        Deal::open(caller, counterparty, token, requested_amount),
    );
    backend.set_deal_counter(deal_id + U256::from(1));

    backend.emit(DealOpened {
        deal_id,
        initiator: caller,
        counterparty,
        token,
        requested_amount,
    });

    Ok(deal_id)
}

/// Funds a deal on behalf of its counterparty, pulling `amount` of `token` into escrow
pub fn fund_deal<B: EscrowBackend>(
    backend: &mut B,
    caller: Address,
    deal_id: DealId,
    token: Address,
    amount: U256,
) -> Result<(), EscrowError> {
    let mut deal = load_deal(backend, deal_id)?;

    if caller != deal.counterparty {
        return Err(EscrowError::OnlyTakerCanFund);
    }
    if !deal.is_open {
        return Err(EscrowError::DealClosed);
    }
    if !backend.is_token_whitelisted(token) {
        return Err(EscrowError::TokenNotWhitelisted);
    }
    if token != deal.token {
        return Err(EscrowError::IncorrectToken);
    }
    if amount > deal.remaining_requested() {
        return Err(EscrowError::FundExceedsRequested);
    }
    if amount.is_zero() {
        return Err(EscrowError::ZeroAmount);
    }

    let before = deal;
    deal.settled_amount += amount;
    deal.is_fully_settled = deal.settled_amount == deal.requested_amount;
    backend.set_deal(deal_id, deal);

    let transfer = backend.transfer_in(token, caller, amount);
    restore_on_failure(backend, deal_id, before, transfer)?;

    backend.emit(DealFunded {
        deal_id,
        counterparty: caller,
        amount,
        is_fully_settled: deal.is_fully_settled,
    });

    Ok(())
}

/// Allows or disallows the initiator to release funds, on behalf of the counterparty
pub fn set_can_initiator_release_funds<B: EscrowBackend>(
    backend: &mut B,
    caller: Address,
    deal_id: DealId,
    allowed: bool,
) -> Result<(), EscrowError> {
    let mut deal = load_deal(backend, deal_id)?;

    if caller != deal.counterparty {
        return Err(EscrowError::OnlyTakerCanApprove);
    }
    if allowed && deal.settled_amount.is_zero() {
        return Err(EscrowError::NoSettledAmount);
    }

    deal.can_initiator_release_funds = allowed;
    backend.set_deal(deal_id, deal);

    backend.emit(FundReleaseApprovalChanged { deal_id, allowed });

    Ok(())
}

/// Releases `amount` of the settled funds to the initiator
pub fn release_funds<B: EscrowBackend>(
    backend: &mut B,
    caller: Address,
    deal_id: DealId,
    token: Address,
    amount: U256,
) -> Result<(), EscrowError> {
    let mut deal = load_deal(backend, deal_id)?;

    if caller != deal.initiator {
        return Err(EscrowError::OnlyMakerCanRelease);
    }
    if !deal.is_open {
        return Err(EscrowError::DealClosed);
    }
    if !deal.can_initiator_release_funds {
        return Err(EscrowError::ReleaseNotApproved);
    }
    if token != deal.token {
        return Err(EscrowError::IncorrectToken);
    }
    if amount > deal.requested_amount.saturating_sub(deal.released_amount) {
        return Err(EscrowError::ReleaseExceedsRequested);
    }
    if amount > deal.remaining_settled() {
        return Err(EscrowError::ReleaseExceedsSettled);
    }
    if amount.is_zero() {
        return Err(EscrowError::ZeroAmount);
    }

    let before = deal;
    deal.released_amount += amount;
    backend.set_deal(deal_id, deal);

    let transfer = backend.transfer_out(token, caller, amount);
    restore_on_failure(backend, deal_id, before, transfer)?;

    backend.emit(FundsReleased {
        deal_id,
        initiator: caller,
        amount,
    });

    Ok(())
}

/// Closes a deal on behalf of its initiator, after which the
/// counterparty may retrieve the unreleased funds
pub fn close_deal<B: EscrowBackend>(
    backend: &mut B,
    caller: Address,
    deal_id: DealId,
) -> Result<(), EscrowError> {
    let mut deal = load_deal(backend, deal_id)?;

    if caller != deal.initiator {
        return Err(EscrowError::OnlyMakerCanClose);
    }
    if !deal.is_open {
        return Err(EscrowError::DealClosed);
    }

    deal.is_open = false;
    backend.set_deal(deal_id, deal);

    backend.emit(DealClosed { deal_id });

    Ok(())
}

/// Returns `amount` of the unreleased funds of a closed deal to its counterparty
pub fn retrieve_funds<B: EscrowBackend>(
    backend: &mut B,
    caller: Address,
    deal_id: DealId,
    token: Address,
    amount: U256,
) -> Result<(), EscrowError> {
    let mut deal = load_deal(backend, deal_id)?;

    if caller != deal.counterparty {
        return Err(EscrowError::OnlyTakerCanRetrieve);
    }
    if deal.is_open {
        return Err(EscrowError::DealStillActive);
    }
    if token != deal.token {
        return Err(EscrowError::IncorrectToken);
    }

    let remaining = deal.remaining_settled();
    if remaining.is_zero() {
        return Err(EscrowError::NoSettledAmountRemaining);
    }
    if amount > remaining {
        return Err(EscrowError::RetrieveExceedsSettled);
    }
    if amount.is_zero() {
        return Err(EscrowError::ZeroAmount);
    }

    let before = deal;
    deal.retrieved_amount += amount;
    backend.set_deal(deal_id, deal);

    let transfer = backend.transfer_out(token, caller, amount);
    restore_on_failure(backend, deal_id, before, transfer)?;

    backend.emit(FundsRetrieved {
        deal_id,
        counterparty: caller,
        amount,
    });

    Ok(())
}

/// Writes `before` back over a deal whose token movement failed
fn restore_on_failure<B: EscrowBackend>(
    backend: &mut B,
    deal_id: DealId,
    before: Deal,
    transfer: Result<(), alloc::vec::Vec<u8>>,
) -> Result<(), EscrowError> {
    transfer.map_err(|revert| {
        backend.set_deal(deal_id, before);
        EscrowError::TokenTransfer(revert)
    })
}

// ---------
// | VIEWS |
// ---------

/// Loads a deal, failing if its ID has not been assigned
pub fn load_deal<B: EscrowBackend>(backend: &B, deal_id: DealId) -> Result<Deal, EscrowError> {
    backend.deal(deal_id).ok_or(EscrowError::DealNotFound)
}

// -----------
// | HELPERS |
// -----------

/// Fails unless the caller is on the account whitelist
fn assert_whitelisted<B: EscrowBackend>(backend: &B, caller: Address) -> Result<(), EscrowError> {
    if backend.is_whitelisted(caller) {
        Ok(())
    } else {
        Err(EscrowError::NotWhitelisted)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, U256};
    use alloy_sol_types::SolEvent;
    use contracts_common::backends::EscrowBackend;

    use super::*;
    use crate::{errors::EscrowError, test_helpers::MockEscrow};

    /// The deal ID assigned to the first deal
    const FIRST_DEAL: U256 = U256::ZERO;

    /// Scales a whole-token amount to 18 decimals
    fn units(whole: u64) -> U256 {
        U256::from(whole) * U256::from(10).pow(U256::from(18))
    }

    /// Sets up an escrow with tokens A & B whitelisted, and the taker
    /// holding a large balance of both
    fn setup() -> MockEscrow {
        let mut escrow = MockEscrow::new();
        initialize(
            &mut escrow,
            MockEscrow::DEPLOYER,
            &[],
            &[MockEscrow::TOKEN_A, MockEscrow::TOKEN_B],
        );
        escrow.mint(MockEscrow::TOKEN_A, MockEscrow::TAKER, units(1_000_000));
        escrow.mint(MockEscrow::TOKEN_B, MockEscrow::TAKER, units(1_000_000));
        escrow.mint(MockEscrow::TOKEN_A, MockEscrow::OTHER_TAKER, units(1_000_000));
        escrow
    }

    /// Opens a 32,000 token A deal between the maker & taker
    fn open_default_deal(escrow: &mut MockEscrow) -> U256 {
        open_deal(
            escrow,
            MockEscrow::MAKER,
            MockEscrow::TAKER,
            MockEscrow::TOKEN_A,
            units(32_000),
        )
        .unwrap()
    }

    /// Opens and fully funds the default deal, and approves fund release
    fn funded_and_approved(escrow: &mut MockEscrow) -> U256 {
        let id = open_default_deal(escrow);
        fund_deal(escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(32_000)).unwrap();
        set_can_initiator_release_funds(escrow, MockEscrow::TAKER, id, true).unwrap();
        id
    }

    #[test]
    fn test_initialize_whitelists() {
        let escrow = setup();

        assert!(escrow.is_whitelisted(MockEscrow::DEPLOYER));
        assert!(!escrow.is_whitelisted(MockEscrow::MAKER));
        assert!(escrow.is_token_whitelisted(MockEscrow::TOKEN_A));
        assert!(escrow.is_token_whitelisted(MockEscrow::TOKEN_B));
        assert!(!escrow.is_token_whitelisted(MockEscrow::TOKEN_C));
        assert_eq!(escrow.deal_counter(), U256::ZERO);
    }

    #[test]
    fn test_initialize_events() {
        let mut escrow = MockEscrow::new();
        initialize(
            &mut escrow,
            MockEscrow::DEPLOYER,
            &[MockEscrow::MAKER, MockEscrow::OTHER_MAKER],
            &[MockEscrow::TOKEN_A],
        );

        // The deployer & two accounts, then one token
        assert_eq!(escrow.events.len(), 4);
        assert_eq!(escrow.events[0].topics()[0], WhitelistUpdated::SIGNATURE_HASH);
        assert_eq!(escrow.events[2].topics()[0], WhitelistUpdated::SIGNATURE_HASH);
        assert_eq!(escrow.events[3].topics()[0], TokenWhitelistUpdated::SIGNATURE_HASH);
    }

    #[test]
    fn test_deal_abi_layout() {
        let mut escrow = setup();
        let id = funded_and_approved(&mut escrow);

        let (
            initiator,
            _,
            token,
            requested,
            settled,
            released,
            fully_settled,
            approved,
            fully_released,
            open,
        ) = load_deal(&escrow, id).unwrap().abi_tuple();
        assert_eq!(initiator, MockEscrow::MAKER);
        assert_eq!(token, MockEscrow::TOKEN_A);
        assert_eq!(requested, units(32_000));
        assert_eq!(settled, units(32_000));
        assert!(released.is_zero());
        assert!(fully_settled && approved && open);
        assert!(!fully_released);

        release_funds(&mut escrow, MockEscrow::MAKER, id, MockEscrow::TOKEN_A, units(32_000))
            .unwrap();
        assert!(load_deal(&escrow, id).unwrap().abi_tuple().8);
    }

    #[test]
    fn test_whitelist_admin() {
        let mut escrow = setup();

        assert_eq!(
            set_token_whitelisted(&mut escrow, MockEscrow::MAKER, MockEscrow::TOKEN_C, true),
            Err(EscrowError::NotWhitelisted)
        );

        set_whitelisted(&mut escrow, MockEscrow::DEPLOYER, MockEscrow::MAKER, true).unwrap();
        set_token_whitelisted(&mut escrow, MockEscrow::MAKER, MockEscrow::TOKEN_C, true).unwrap();
        assert!(escrow.is_token_whitelisted(MockEscrow::TOKEN_C));

        set_whitelisted(&mut escrow, MockEscrow::MAKER, MockEscrow::MAKER, false).unwrap();
        assert!(!escrow.is_whitelisted(MockEscrow::MAKER));
    }

    #[test]
    fn test_open_deal() {
        let mut escrow = setup();
        let id = open_default_deal(&mut escrow);

        assert_eq!(id, FIRST_DEAL);
        assert_eq!(escrow.deal_counter(), U256::from(1));

        let deal = load_deal(&escrow, id).unwrap();
        assert_eq!(deal.initiator, MockEscrow::MAKER);
        assert_eq!(deal.counterparty, MockEscrow::TAKER);
        assert_eq!(deal.token, MockEscrow::TOKEN_A);
        assert_eq!(deal.requested_amount, units(32_000));
        assert_eq!(deal.settled_amount, U256::ZERO);
        assert_eq!(deal.released_amount, U256::ZERO);
        assert!(!deal.is_fully_settled);
        assert!(!deal.can_initiator_release_funds);
        assert!(deal.is_open);

        let second = open_default_deal(&mut escrow);
        assert_eq!(second, U256::from(1));
    }

    #[test]
    fn test_open_deal_validation() {
        let mut escrow = setup();

        let res = open_deal(
            &mut escrow,
            MockEscrow::MAKER,
            MockEscrow::TAKER,
            MockEscrow::TOKEN_C,
            units(1),
        );
        assert_eq!(res, Err(EscrowError::TokenNotWhitelisted));

        let res = open_deal(
            &mut escrow,
            MockEscrow::MAKER,
            Address::ZERO,
            MockEscrow::TOKEN_A,
            units(1),
        );
        assert_eq!(res, Err(EscrowError::InvalidCounterparty));

        let res = open_deal(
            &mut escrow,
            MockEscrow::MAKER,
            MockEscrow::MAKER,
            MockEscrow::TOKEN_A,
            units(1),
        );
        assert_eq!(res, Err(EscrowError::InvalidCounterparty));

        let res = open_deal(
            &mut escrow,
            MockEscrow::MAKER,
            MockEscrow::TAKER,
            MockEscrow::TOKEN_A,
            U256::ZERO,
        );
        assert_eq!(res, Err(EscrowError::ZeroAmount));
        assert_eq!(escrow.deal_counter(), U256::ZERO);
    }

    #[test]
    fn test_unknown_deal() {
        let mut escrow = setup();
        assert_eq!(
            close_deal(&mut escrow, MockEscrow::MAKER, U256::from(7)),
            Err(EscrowError::DealNotFound)
        );
    }

    #[test]
    fn test_only_maker_can_close() {
        let mut escrow = setup();
        let id = open_default_deal(&mut escrow);

        assert_eq!(
            close_deal(&mut escrow, MockEscrow::OTHER_MAKER, id),
            Err(EscrowError::OnlyMakerCanClose)
        );
        assert_eq!(
            close_deal(&mut escrow, MockEscrow::TAKER, id),
            Err(EscrowError::OnlyMakerCanClose)
        );

        close_deal(&mut escrow, MockEscrow::MAKER, id).unwrap();
        assert!(!load_deal(&escrow, id).unwrap().is_open);
        assert_eq!(
            close_deal(&mut escrow, MockEscrow::MAKER, id),
            Err(EscrowError::DealClosed)
        );
    }

    #[test]
    fn test_fund_deal_in_tranches() {
        let mut escrow = setup();
        let id = open_default_deal(&mut escrow);

        fund_deal(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(15_000)).unwrap();
        let deal = load_deal(&escrow, id).unwrap();
        assert_eq!(deal.settled_amount, units(15_000));
        assert!(!deal.is_fully_settled);

        fund_deal(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(15_000)).unwrap();
        assert_eq!(
            fund_deal(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(15_000)),
            Err(EscrowError::FundExceedsRequested)
        );
        let deal = load_deal(&escrow, id).unwrap();
        assert_eq!(deal.settled_amount, units(30_000));
        assert!(!deal.is_fully_settled);

        fund_deal(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(2_000)).unwrap();
        let deal = load_deal(&escrow, id).unwrap();
        assert!(deal.is_fully_settled);
        assert_eq!(escrow.custody(MockEscrow::TOKEN_A), units(32_000));
        assert_eq!(
            escrow.balance(MockEscrow::TOKEN_A, MockEscrow::TAKER),
            units(1_000_000 - 32_000)
        );
    }

    #[test]
    fn test_fund_deal_rejections() {
        let mut escrow = setup();
        let id = open_default_deal(&mut escrow);

        assert_eq!(
            fund_deal(&mut escrow, MockEscrow::OTHER_TAKER, id, MockEscrow::TOKEN_A, units(1)),
            Err(EscrowError::OnlyTakerCanFund)
        );
        assert_eq!(
            fund_deal(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_B, units(1)),
            Err(EscrowError::IncorrectToken)
        );
        // The whitelist check comes before the token match
        assert_eq!(
            fund_deal(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_C, units(1)),
            Err(EscrowError::TokenNotWhitelisted)
        );
        assert_eq!(
            fund_deal(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, U256::ZERO),
            Err(EscrowError::ZeroAmount)
        );

        close_deal(&mut escrow, MockEscrow::MAKER, id).unwrap();
        assert_eq!(
            fund_deal(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(1)),
            Err(EscrowError::DealClosed)
        );
        assert!(escrow.custody(MockEscrow::TOKEN_A).is_zero());
    }

    #[test]
    fn test_fund_propagates_token_revert() {
        let mut escrow = setup();
        let id = open_deal(
            &mut escrow,
            MockEscrow::MAKER,
            MockEscrow::OTHER_MAKER,
            MockEscrow::TOKEN_B,
            units(10),
        )
        .unwrap();

        // The other maker holds no token B
        let events = escrow.events.len();
        let res = fund_deal(&mut escrow, MockEscrow::OTHER_MAKER, id, MockEscrow::TOKEN_B, units(5));
        assert_eq!(
            res.map_err(|e| e.revert_data().to_vec()),
            Err(b"insufficient balance".to_vec())
        );

        let deal = load_deal(&escrow, id).unwrap();
        assert!(deal.settled_amount.is_zero());
        assert!(!deal.is_fully_settled);
        assert!(deal.is_open);
        assert!(escrow.custody(MockEscrow::TOKEN_B).is_zero());
        assert_eq!(escrow.events.len(), events);
    }

    #[test]
    fn test_retrieve_propagates_token_revert() {
        let mut escrow = setup();
        let id = funded_and_approved(&mut escrow);
        close_deal(&mut escrow, MockEscrow::MAKER, id).unwrap();

        // Drain custody behind the escrow's back
        escrow.balances.insert((MockEscrow::TOKEN_A, MockEscrow::ESCROW), U256::ZERO);
        assert!(matches!(
            retrieve_funds(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(1)),
            Err(EscrowError::TokenTransfer(_))
        ));
        assert!(load_deal(&escrow, id).unwrap().retrieved_amount.is_zero());
    }

    #[test]
    fn test_release_approval() {
        let mut escrow = setup();
        let id = open_default_deal(&mut escrow);

        assert_eq!(
            set_can_initiator_release_funds(&mut escrow, MockEscrow::TAKER, id, true),
            Err(EscrowError::NoSettledAmount)
        );
        // Revoking is always allowed
        set_can_initiator_release_funds(&mut escrow, MockEscrow::TAKER, id, false).unwrap();

        fund_deal(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(1)).unwrap();
        assert_eq!(
            set_can_initiator_release_funds(&mut escrow, MockEscrow::OTHER_TAKER, id, true),
            Err(EscrowError::OnlyTakerCanApprove)
        );
        assert_eq!(
            set_can_initiator_release_funds(&mut escrow, MockEscrow::MAKER, id, true),
            Err(EscrowError::OnlyTakerCanApprove)
        );

        set_can_initiator_release_funds(&mut escrow, MockEscrow::TAKER, id, true).unwrap();
        assert!(load_deal(&escrow, id).unwrap().can_initiator_release_funds);
    }

    #[test]
    fn test_release_funds() {
        let mut escrow = setup();
        let id = open_default_deal(&mut escrow);
        fund_deal(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(32_000)).unwrap();

        assert_eq!(
            release_funds(&mut escrow, MockEscrow::MAKER, id, MockEscrow::TOKEN_A, units(10_000)),
            Err(EscrowError::ReleaseNotApproved)
        );

        set_can_initiator_release_funds(&mut escrow, MockEscrow::TAKER, id, true).unwrap();
        assert_eq!(
            release_funds(
                &mut escrow,
                MockEscrow::OTHER_MAKER,
                id,
                MockEscrow::TOKEN_A,
                units(10_000)
            ),
            Err(EscrowError::OnlyMakerCanRelease)
        );
        assert_eq!(
            release_funds(&mut escrow, MockEscrow::MAKER, id, MockEscrow::TOKEN_A, units(100_000)),
            Err(EscrowError::ReleaseExceedsRequested)
        );

        for released in [10_000, 20_000, 30_000] {
            release_funds(&mut escrow, MockEscrow::MAKER, id, MockEscrow::TOKEN_A, units(10_000))
                .unwrap();
            assert_eq!(load_deal(&escrow, id).unwrap().released_amount, units(released));
        }

        assert_eq!(
            release_funds(&mut escrow, MockEscrow::MAKER, id, MockEscrow::TOKEN_A, units(10_000)),
            Err(EscrowError::ReleaseExceedsRequested)
        );
        assert_eq!(
            escrow.balance(MockEscrow::TOKEN_A, MockEscrow::MAKER),
            units(30_000)
        );
        assert_eq!(escrow.custody(MockEscrow::TOKEN_A), units(2_000));
    }

    #[test]
    fn test_release_bounded_by_settled() {
        let mut escrow = setup();
        let id = open_default_deal(&mut escrow);
        fund_deal(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(5_000)).unwrap();
        set_can_initiator_release_funds(&mut escrow, MockEscrow::TAKER, id, true).unwrap();

        assert_eq!(
            release_funds(&mut escrow, MockEscrow::MAKER, id, MockEscrow::TOKEN_A, units(6_000)),
            Err(EscrowError::ReleaseExceedsSettled)
        );
        assert_eq!(
            release_funds(&mut escrow, MockEscrow::MAKER, id, MockEscrow::TOKEN_B, units(1_000)),
            Err(EscrowError::IncorrectToken)
        );
        release_funds(&mut escrow, MockEscrow::MAKER, id, MockEscrow::TOKEN_A, units(5_000))
            .unwrap();
    }

    #[test]
    fn test_release_after_close() {
        let mut escrow = setup();
        let id = funded_and_approved(&mut escrow);
        close_deal(&mut escrow, MockEscrow::MAKER, id).unwrap();

        assert_eq!(
            release_funds(&mut escrow, MockEscrow::MAKER, id, MockEscrow::TOKEN_A, units(1)),
            Err(EscrowError::DealClosed)
        );
    }

    #[test]
    fn test_retrieve_funds() {
        let mut escrow = setup();
        let id = funded_and_approved(&mut escrow);
        release_funds(&mut escrow, MockEscrow::MAKER, id, MockEscrow::TOKEN_A, units(30_000))
            .unwrap();

        assert_eq!(
            retrieve_funds(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(1_000)),
            Err(EscrowError::DealStillActive)
        );

        close_deal(&mut escrow, MockEscrow::MAKER, id).unwrap();
        assert_eq!(
            retrieve_funds(
                &mut escrow,
                MockEscrow::OTHER_TAKER,
                id,
                MockEscrow::TOKEN_A,
                units(1_000)
            ),
            Err(EscrowError::OnlyTakerCanRetrieve)
        );
        assert_eq!(
            retrieve_funds(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_B, units(1_000)),
            Err(EscrowError::IncorrectToken)
        );
        assert_eq!(
            retrieve_funds(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(10_000)),
            Err(EscrowError::RetrieveExceedsSettled)
        );

        retrieve_funds(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(1_000))
            .unwrap();
        retrieve_funds(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(1_000))
            .unwrap();
        assert_eq!(
            retrieve_funds(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(1_000)),
            Err(EscrowError::NoSettledAmountRemaining)
        );

        let deal = load_deal(&escrow, id).unwrap();
        assert_eq!(deal.retrieved_amount, units(2_000));
        assert!(deal.remaining_settled().is_zero());
        assert!(escrow.custody(MockEscrow::TOKEN_A).is_zero());
        assert_eq!(
            escrow.balance(MockEscrow::TOKEN_A, MockEscrow::TAKER),
            units(1_000_000 - 30_000)
        );
    }

    #[test]
    fn test_retrieve_unfunded_deal() {
        let mut escrow = setup();
        let id = open_default_deal(&mut escrow);
        close_deal(&mut escrow, MockEscrow::MAKER, id).unwrap();

        assert_eq!(
            retrieve_funds(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(1)),
            Err(EscrowError::NoSettledAmountRemaining)
        );
    }

    #[test]
    fn test_custody_matches_deals() {
        let mut escrow = setup();
        let first = funded_and_approved(&mut escrow);
        let second = open_deal(
            &mut escrow,
            MockEscrow::OTHER_MAKER,
            MockEscrow::TAKER,
            MockEscrow::TOKEN_A,
            units(8_000),
        )
        .unwrap();
        fund_deal(&mut escrow, MockEscrow::TAKER, second, MockEscrow::TOKEN_A, units(3_000))
            .unwrap();
        release_funds(&mut escrow, MockEscrow::MAKER, first, MockEscrow::TOKEN_A, units(2_000))
            .unwrap();

        let held: U256 = [first, second]
            .into_iter()
            .map(|id| load_deal(&escrow, id).unwrap().remaining_settled())
            .fold(U256::ZERO, |acc, x| acc + x);
        assert_eq!(held, escrow.custody(MockEscrow::TOKEN_A));
        assert_eq!(held, units(33_000));
    }

    #[test]
    fn test_one_event_per_operation() {
        let mut escrow = setup();
        let before = escrow.events.len();

        let id = open_default_deal(&mut escrow);
        fund_deal(&mut escrow, MockEscrow::TAKER, id, MockEscrow::TOKEN_A, units(1)).unwrap();
        let _ = fund_deal(&mut escrow, MockEscrow::OTHER_TAKER, id, MockEscrow::TOKEN_A, units(1));
        close_deal(&mut escrow, MockEscrow::MAKER, id).unwrap();

        assert_eq!(escrow.events.len() - before, 3);
    }
}
