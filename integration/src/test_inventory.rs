//! Defines types and utilities for managing the inventory of integration tests

use std::{future::Future, pin::Pin};

use alloy::{
    network::Ethereum,
    primitives::Address,
    providers::DynProvider,
};
use eyre::Result;
use scripts::solidity::{
    IDummyUpgradeTarget::IDummyUpgradeTargetInstance, IEhkd::IEhkdInstance,
    IErc20Mock::IErc20MockInstance, IProxyAdmin::IProxyAdminInstance,
    IRentalEscrow::IRentalEscrowInstance,
};

/// A rental escrow instance using the default generics
pub type RentalEscrow = IRentalEscrowInstance<DynProvider, Ethereum>;
/// An eHKD instance using the default generics
pub type Ehkd = IEhkdInstance<DynProvider, Ethereum>;
/// A mock ERC20 instance using the default generics
pub type Erc20Mock = IErc20MockInstance<DynProvider, Ethereum>;
/// A proxy admin instance using the default generics
pub type ProxyAdmin = IProxyAdminInstance<DynProvider, Ethereum>;
/// A dummy upgrade target instance using the default generics
pub type DummyUpgradeTarget = IDummyUpgradeTargetInstance<DynProvider, Ethereum>;

/// The arguments provided to each integration test
#[derive(Clone)]
pub struct TestArgs {
    /// The RPC client, signing with the devnet's funded key
    pub client: DynProvider,
    /// The address of the funded key, which deployed the contracts
    pub deployer: Address,
    /// The RPC URL, for setting up clients of fresh test accounts
    pub rpc_url: String,
    /// The address of the rental escrow proxy
    pub rental_escrow_address: Address,
    /// The address of the rental escrow proxy admin
    pub rental_escrow_proxy_admin_address: Address,
    /// The address of the eHKD proxy
    pub ehkd_address: Address,
    /// The address of the mock ERC20 contract
    pub erc20_mock_address: Address,
    /// The address of the dummy upgrade target contract
    pub dummy_upgrade_target_address: Address,
}

impl TestArgs {
    /// The rental escrow, called by the deployer
    pub fn rental_escrow(&self) -> RentalEscrow {
        RentalEscrow::new(self.rental_escrow_address, self.client.clone())
    }

    /// The eHKD token, called by the deployer
    pub fn ehkd(&self) -> Ehkd {
        Ehkd::new(self.ehkd_address, self.client.clone())
    }

    /// The mock ERC20, called by the deployer
    pub fn erc20_mock(&self) -> Erc20Mock {
        Erc20Mock::new(self.erc20_mock_address, self.client.clone())
    }

    /// The rental escrow's proxy admin, called by the deployer
    pub fn proxy_admin(&self) -> ProxyAdmin {
        ProxyAdmin::new(self.rental_escrow_proxy_admin_address, self.client.clone())
    }
}

/// The signature of an integration test
type TestFn = fn(TestArgs) -> Pin<Box<dyn Future<Output = Result<()>>>>;

/// A struct representing an integration test
pub struct IntegrationTest {
    /// The name of the test
    pub name: &'static str,
    /// The test function
    pub test_fn: TestFn,
}

// Collect the integration tests into an iterable
inventory::collect!(IntegrationTest);

/// Macro to register an integration test
#[macro_export]
macro_rules! integration_test {
    ($test_fn:ident) => {
        inventory::submit!($crate::test_inventory::IntegrationTest {
            name: stringify!($test_fn),
            test_fn: move |args| std::boxed::Box::pin($test_fn(args)),
        });
    };
}
