//! Prints the Solidity interface of the contract selected by cargo feature

#[cfg(feature = "export-abi")]
fn main() {
    contracts_stylus::print_from_args();
}
