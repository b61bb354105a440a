//! A dummy contract intended to be used as an upgrade target for testing purposes.

use alloc::{vec, vec::Vec};
use stylus_sdk::prelude::*;

/// A contract used as an upgrade target for testing purposes.
#[storage]
#[entrypoint]
pub struct DummyUpgradeTargetContract {}

#[public]
impl DummyUpgradeTargetContract {
    /// Simply returns `true`.
    ///
    /// In the upgrade tests, this is used to check whether the proxy in question
    /// has been pointed at this contract
    pub fn is_dummy_upgrade_target(&self) -> Result<bool, Vec<u8>> {
        Ok(true)
    }
}
