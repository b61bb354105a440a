//! Miscellaneous helper functions for the contracts.

use alloc::vec::Vec;

use super::constants::CALL_RETDATA_DECODING_ERROR_MESSAGE;

/// Maps an error returned from an external contract call to a `Vec<u8>`,
/// which is the expected return type of external contract methods.
///
/// Revert data from the callee is propagated as-is.
pub fn map_call_error(e: stylus_sdk::call::Error) -> Vec<u8> {
    match e {
        stylus_sdk::call::Error::Revert(msg) => msg,
        stylus_sdk::call::Error::AbiDecodingFailed(_) => {
            CALL_RETDATA_DECODING_ERROR_MESSAGE.to_vec()
        }
    }
}
