//! Stylus contracts for the rental escrow & the eHKD stablecoin.
//!
//! Exactly one contract is compiled into the entrypoint, selected by cargo feature.

#![cfg_attr(not(feature = "export-abi"), no_main)]
#![cfg_attr(not(feature = "export-abi"), no_std)]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOC: mini_alloc::MiniAlloc = mini_alloc::MiniAlloc::INIT;

mod contracts;
mod utils;

#[cfg(feature = "export-abi")]
pub use contracts::print_from_args;
