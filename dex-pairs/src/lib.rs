//! DEX factory pair-address dumper library.
//!
//! Fetches the pair-creation logs of the Uniswap V1, Uniswap V2 and
//! SushiSwap factories from a JSON-RPC endpoint and writes the created
//! pair addresses as newline-delimited text files.

pub mod config;
pub mod fetcher;
pub mod output;
pub mod source;
