//! Composable contract "components" that other smart contracts can inherit for common functionality

pub mod erc20;
pub mod initializable;
