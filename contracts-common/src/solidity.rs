//! Solidity type definitions used throughout the project

#![allow(missing_docs)]

use alloy_sol_types::sol;

sol! {
    // ----------
    // | EVENTS |
    // ----------

    // ERC20 events
    event Transfer(address indexed from, address indexed to, uint256 value);
    event Approval(address indexed owner, address indexed spender, uint256 value);

    // eHKD events
    event AdminTransferred(address indexed previous_admin, address indexed new_admin);
    event TokenVaultChanged(address indexed previous_vault, address indexed new_vault);

    // Escrow events
    event DealOpened(uint256 indexed deal_id, address indexed initiator, address indexed counterparty, address token, uint256 requested_amount);
    event DealFunded(uint256 indexed deal_id, address indexed counterparty, uint256 amount, bool is_fully_settled);
    event FundReleaseApprovalChanged(uint256 indexed deal_id, bool allowed);
    event FundsReleased(uint256 indexed deal_id, address indexed initiator, uint256 amount);
    event DealClosed(uint256 indexed deal_id);
    event FundsRetrieved(uint256 indexed deal_id, address indexed counterparty, uint256 amount);
    event WhitelistUpdated(address indexed account, bool whitelisted);
    event TokenWhitelistUpdated(address indexed token, bool whitelisted);
}
