//! Definitions of errors that can occur during the execution of the contract management scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the contract management scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error reading a file (journal, registry entry, parameters, artifact)
    ReadFile(String),
    /// Error writing a file
    WriteFile(String),
    /// Error parsing a compilation artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error fetching the nonce of the deployer
    NonceFetching(String),
    /// Error constructing calldata for a contract method
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error compiling a Stylus contract
    ContractCompilation(String),
    /// Error de/serializing JSON
    Serde(String),
    /// Error estimating gas or fetching the gas price
    FeeEstimation(String),
    /// A chain ID that no network is configured for
    UnsupportedChainId(u64),
    /// A network name that no chain is configured for
    UnsupportedNetwork(String),
    /// A deployment module was missing an earlier future
    MissingFuture(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ReadFile(s) => write!(f, "error reading file: {}", s),
            ScriptError::WriteFile(s) => write!(f, "error writing file: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::NonceFetching(s) => write!(f, "error fetching nonce: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::ContractCompilation(s) => write!(f, "error compiling contract: {}", s),
            ScriptError::Serde(s) => write!(f, "error de/serializing: {}", s),
            ScriptError::FeeEstimation(s) => write!(f, "error estimating fee: {}", s),
            ScriptError::UnsupportedChainId(id) => write!(f, "unsupported chain id: {}", id),
            ScriptError::UnsupportedNetwork(s) => write!(f, "unsupported network: {}", s),
            ScriptError::MissingFuture(s) => {
                write!(f, "future {} not found in the deployment journal", s)
            }
        }
    }
}

impl Error for ScriptError {}
