//! Error types for factory lookup and log decoding.

/// Errors produced while resolving factories or decoding their logs.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// A log did not match the expected event layout.
    #[error("failed to decode {event} log: {source}")]
    Decode {
        /// Name of the event the log was decoded as.
        event: &'static str,
        /// Underlying ABI decoding error.
        #[source]
        source: alloy::sol_types::Error,
    },

    /// A factory name that is not one of the known factories.
    #[error("unknown factory `{0}` (expected uniswap-v1, uniswap-v2 or sushiswap)")]
    UnknownFactory(String),
}
