//! Deployment fee estimation

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, U256},
    providers::{DynProvider, Provider},
    rpc::types::TransactionRequest,
};
use tracing::warn;

use crate::{
    artifacts::Artifact,
    constants::{ETH_DECIMALS, WEI_PER_ETH},
    errors::ScriptError,
};

/// The result of estimating a contract deployment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeEstimate {
    /// The gas the creation transaction is estimated to use
    pub gas: u64,
    /// The current gas price in wei, if the node reported one
    pub gas_price: Option<u128>,
}

impl FeeEstimate {
    /// The estimated cost in wei
    pub fn cost_wei(&self) -> Option<U256> {
        self.gas_price.map(|price| estimate_cost_wei(self.gas, price))
    }
}

/// The cost of `gas` units at `price` wei per unit
pub fn estimate_cost_wei(gas: u64, price: u128) -> U256 {
    U256::from(gas) * U256::from(price)
}

/// Formats a wei amount in ETH, exactly, without trailing zeros
pub fn format_eth(wei: U256) -> String {
    let wei_per_eth = U256::from(WEI_PER_ETH);
    let whole = wei / wei_per_eth;
    let fraction = wei % wei_per_eth;

    if fraction.is_zero() {
        return whole.to_string();
    }

    let fraction = format!("{:0>width$}", fraction.to_string(), width = ETH_DECIMALS);
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

/// Estimates the gas & fetches the gas price for deploying the artifact's creation
/// code from `from`
pub async fn estimate_deployment_fee(
    provider: &DynProvider,
    artifact: &Artifact,
    from: Address,
) -> Result<FeeEstimate, ScriptError> {
    let tx = TransactionRequest::default()
        .with_from(from)
        .with_deploy_code(artifact.creation_code()?);

    let gas = provider
        .estimate_gas(tx)
        .await
        .map_err(|e| ScriptError::FeeEstimation(e.to_string()))?;

    let gas_price = match provider.get_gas_price().await {
        Ok(price) => Some(price),
        Err(e) => {
            warn!("failed to fetch gas price: {e}");
            None
        }
    };

    Ok(FeeEstimate { gas, gas_price })
}
