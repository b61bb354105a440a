//! Solidity interfaces of the deployed contracts.
//!
//! The ABIs of the Stylus programs double as the artifacts journaled for them, since
//! their creation code is WASM rather than EVM bytecode.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use alloy::{
    primitives::{Address, Bytes},
    sol,
    sol_types::SolValue,
};

use crate::artifacts::Artifact;

sol! {
    #[sol(rpc, abi)]
    interface IRentalEscrow {
        event DealOpened(uint256 indexed dealId, address indexed initiator, address indexed counterparty, address token, uint256 requestedAmount);
        event DealFunded(uint256 indexed dealId, address indexed counterparty, uint256 amount, bool isFullySettled);
        event FundReleaseApprovalChanged(uint256 indexed dealId, bool allowed);
        event FundsReleased(uint256 indexed dealId, address indexed initiator, uint256 amount);
        event DealClosed(uint256 indexed dealId);
        event FundsRetrieved(uint256 indexed dealId, address indexed counterparty, uint256 amount);
        event WhitelistUpdated(address indexed account, bool whitelisted);
        event TokenWhitelistUpdated(address indexed token, bool whitelisted);

        function initialize(address[] whitelisted, address[] whitelistedTokens) external;
        function setWhitelisted(address account, bool whitelisted) external;
        function setTokenWhitelisted(address token, bool whitelisted) external;
        function isWhitelisted(address account) external view returns (bool);
        function isTokenWhitelisted(address token) external view returns (bool);

        function openDeal(address counterparty, address token, uint256 requestedAmount) external returns (uint256);
        function fundDeal(uint256 dealId, address token, uint256 amount) external;
        function setCanInitiatorReleaseFunds(uint256 dealId, bool allowed) external;
        function releaseFunds(uint256 dealId, address token, uint256 amount) external;
        function closeDeal(uint256 dealId) external;
        function retrieveFunds(uint256 dealId, address token, uint256 amount) external;

        function getDealCounter() external view returns (uint256);
        function getDeal(uint256 dealId) external view returns (address initiator, address counterparty, address token, uint256 requestedAmount, uint256 settledAmount, uint256 releasedAmount, bool isFullySettled, bool canInitiatorReleaseFunds, bool isFullyReleased, bool isOpen);
        function getReleasedAmount(uint256 dealId) external view returns (uint256);
        function getRetrievedAmount(uint256 dealId) external view returns (uint256);
        function canInitiatorReleaseFunds(uint256 dealId) external view returns (bool);
    }

    #[sol(rpc, abi)]
    interface IEhkd {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);
        event AdminTransferred(address indexed previousAdmin, address indexed newAdmin);
        event TokenVaultChanged(address indexed previousVault, address indexed newVault);

        function initialize(address admin, address tokenVault, uint256 mintAmount) external;
        function admin() external view returns (address);
        function tokenVault() external view returns (address);
        function mint(uint256 amount) external;
        function burn(uint256 amount) external;
        function setTokenVault(address newVault) external;
        function transferAdmin(address newAdmin) external;

        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function transfer(address to, uint256 value) external returns (bool);
        function approve(address spender, uint256 value) external returns (bool);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
    }

    #[sol(rpc, abi)]
    interface IErc20Mock {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);

        function initialize(string name, string symbol, uint8 decimals) external;
        function mint(address to, uint256 amount) external;

        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function transfer(address to, uint256 value) external returns (bool);
        function approve(address spender, uint256 value) external returns (bool);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
    }

    #[sol(rpc, abi)]
    interface IDummyUpgradeTarget {
        function isDummyUpgradeTarget() external view returns (bool);
    }

    #[sol(rpc, abi)]
    interface IProxyAdmin {
        function owner() external view returns (address);
        function upgradeAndCall(address proxy, address implementation, bytes data) external payable;
    }
}

/// ABI-encodes the `TransparentUpgradeableProxy(logic, initialOwner, data)` constructor
/// arguments
pub fn proxy_constructor_args(implementation: Address, owner: Address, data: Bytes) -> Vec<u8> {
    (implementation, owner, data).abi_encode_params()
}

/// Builds an ABI-only artifact from a `sol!` interface's JSON ABI
fn artifact_from_abi(contract_name: &str, abi: &alloy::json_abi::JsonAbi) -> Artifact {
    // A `JsonAbi` always serializes to an array of items
    let abi = serde_json::to_value(abi).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()));
    Artifact::abi_only(contract_name, abi)
}

/// The ABI-only artifact of the rental escrow program
pub fn rental_escrow_artifact(contract_name: &str) -> Artifact {
    artifact_from_abi(contract_name, &IRentalEscrow::abi::contract())
}

/// The ABI-only artifact of the eHKD program
pub fn ehkd_artifact(contract_name: &str) -> Artifact {
    artifact_from_abi(contract_name, &IEhkd::abi::contract())
}

/// The ABI-only artifact of the mock ERC20 program
pub fn erc20_mock_artifact(contract_name: &str) -> Artifact {
    artifact_from_abi(contract_name, &IErc20Mock::abi::contract())
}

/// The ABI-only artifact of the dummy upgrade target program
pub fn dummy_upgrade_target_artifact(contract_name: &str) -> Artifact {
    artifact_from_abi(contract_name, &IDummyUpgradeTarget::abi::contract())
}

/// The ABI-only artifact of the proxy admin deployed by the proxy's constructor
pub fn proxy_admin_artifact(contract_name: &str) -> Artifact {
    artifact_from_abi(contract_name, &IProxyAdmin::abi::contract())
}
