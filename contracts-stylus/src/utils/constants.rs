//! Constants used by the Stylus contracts

/// The revert message when failing to decode the data
/// returned by an external contract call
pub const CALL_RETDATA_DECODING_ERROR_MESSAGE: &[u8] = b"error decoding retdata";
