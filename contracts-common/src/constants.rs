//! Constants shared between the contracts, the scripts, and the tests

// ----------------------
// | ESCROW REVERT DATA |
// ----------------------

/// The revert message when anyone other than the initiator closes a deal
pub const ONLY_MAKER_CLOSE_ERROR_MESSAGE: &[u8] = b"Only designated maker can close the deal";

/// The revert message when anyone other than the counterparty funds a deal
pub const ONLY_TAKER_FUND_ERROR_MESSAGE: &[u8] = b"Only designated taker can fund the deal";

/// The revert message when a deal is funded, released, or retrieved
/// with a token other than the one it was opened with
pub const INCORRECT_TOKEN_ERROR_MESSAGE: &[u8] = b"Incorrect token";

/// The revert message when a token that is not whitelisted is used
pub const TOKEN_NOT_WHITELISTED_ERROR_MESSAGE: &[u8] = b"Token is not whitelisted";

/// The revert message when funding would exceed the requested amount
pub const FUND_EXCEEDS_REQUESTED_ERROR_MESSAGE: &[u8] =
    b"Amount exceeds remaining requested amount";

/// The revert message when anyone other than the counterparty
/// changes the fund release approval
pub const ONLY_TAKER_APPROVE_ERROR_MESSAGE: &[u8] =
    b"Only designated taker can approve fund release";

/// The revert message when fund release is approved on an unfunded deal
pub const NO_SETTLED_AMOUNT_ERROR_MESSAGE: &[u8] = b"No settled amount to release";

/// The revert message when the initiator releases funds without approval
pub const RELEASE_NOT_APPROVED_ERROR_MESSAGE: &[u8] = b"Fund release not approved by taker";

/// The revert message when anyone other than the initiator releases funds
pub const ONLY_MAKER_RELEASE_ERROR_MESSAGE: &[u8] =
    b"Only designated maker can call to release funds";

/// The revert message when a release would exceed the requested amount
pub const RELEASE_EXCEEDS_REQUESTED_ERROR_MESSAGE: &[u8] =
    b"Cannot release amount higher than remaining requested amount";

/// The revert message when a release would exceed the funds held for the deal
pub const RELEASE_EXCEEDS_SETTLED_ERROR_MESSAGE: &[u8] =
    b"Cannot release amount higher than remaining settled amount";

/// The revert message when funds are retrieved from an open deal
pub const DEAL_STILL_ACTIVE_ERROR_MESSAGE: &[u8] = b"Deal is still active";

/// The revert message when an open-only operation is applied to a closed deal
pub const DEAL_CLOSED_ERROR_MESSAGE: &[u8] = b"Deal is closed";

/// The revert message when anyone other than the counterparty retrieves funds
pub const ONLY_TAKER_RETRIEVE_ERROR_MESSAGE: &[u8] =
    b"Only designated taker can call to retrieve funds";

/// The revert message when a retrieval would exceed the remaining settled amount
pub const RETRIEVE_EXCEEDS_SETTLED_ERROR_MESSAGE: &[u8] =
    b"Cannot retrieve amount higher than remaining settled amount";

/// The revert message when there is nothing left to retrieve
pub const NO_SETTLED_AMOUNT_REMAINING_ERROR_MESSAGE: &[u8] = b"No settled amount remaining";

/// The revert message when a deal ID has not been assigned
pub const DEAL_NOT_FOUND_ERROR_MESSAGE: &[u8] = b"Deal does not exist";

/// The revert message when a whitelist-only method is called by anyone else
pub const NOT_WHITELISTED_ERROR_MESSAGE: &[u8] = b"Caller is not whitelisted";

/// The revert message when a deal is opened with the zero address
/// or the initiator as counterparty
pub const INVALID_COUNTERPARTY_ERROR_MESSAGE: &[u8] = b"Invalid counterparty";

/// The revert message when a zero amount is requested, funded, released or retrieved
pub const ZERO_AMOUNT_ERROR_MESSAGE: &[u8] = b"Amount must be positive";

// ---------------------
// | TOKEN REVERT DATA |
// ---------------------

/// The revert message when a balance cannot cover a debit
pub const INSUFFICIENT_BALANCE_ERROR_MESSAGE: &[u8] = b"insufficient balance";

/// The revert message when an allowance cannot cover a `transferFrom`
pub const INSUFFICIENT_ALLOWANCE_ERROR_MESSAGE: &[u8] = b"insufficient allowance";

/// The revert message when an admin-only method is called by anyone else
pub const NOT_ADMIN_ERROR_MESSAGE: &[u8] = b"not admin";

/// The revert message when an address is attempted to be set to the zero address
pub const ZERO_ADDRESS_ERROR_MESSAGE: &[u8] = b"zero address";

/// The revert message when a mint or transfer would overflow a balance or the supply
pub const OVERFLOW_ERROR_MESSAGE: &[u8] = b"arithmetic overflow";

/// The revert message when a token call returns `false` or garbled data
pub const TOKEN_TRANSFER_FAILED_ERROR_MESSAGE: &[u8] = b"token transfer failed";

/// The revert message when attempting to initialize a contract to a past version
pub const INVALID_VERSION_ERROR_MESSAGE: &[u8] = b"invalid version";

// ------------------
// | TOKEN METADATA |
// ------------------

/// The name of the eHKD stablecoin
pub const EHKD_NAME: &str = "eHKD";

/// The symbol of the eHKD stablecoin
pub const EHKD_SYMBOL: &str = "eHKD";

/// The number of decimals of the eHKD stablecoin
pub const EHKD_DECIMALS: u8 = 6;

/// The version to which contracts are initialized on first deployment
pub const INITIAL_VERSION: u64 = 1;
