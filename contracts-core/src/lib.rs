//! Core smart contract functionality, defined agnostically of running in the Stylus VM

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod errors;
pub mod escrow;
pub mod token;

#[cfg(test)]
mod test_helpers;
