//! Scripts for deploying, upgrading, and bookkeeping the rental escrow & eHKD contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
mod commands;
pub mod constants;
pub mod errors;
pub mod fee;
pub mod journal;
pub mod modules;
pub mod networks;
pub mod registry;
pub mod solidity;
pub mod tokens;
pub mod types;
pub mod utils;
