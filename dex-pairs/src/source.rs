//! The log-query capability the fetcher is written against.
//!
//! [`RpcSource`] backs it with an alloy [`Provider`]; tests plug in an
//! in-memory source instead.

use std::future::Future;

use alloy::primitives::{Address, B256};
use alloy::providers::Provider;
use alloy::rpc::types::{Filter, Log};
use anyhow::{Context, Result};

/// A single `eth_getLogs` request: one contract, one event, one block range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogQuery {
    /// Emitting contract.
    pub address: Address,
    /// Event signature hash matched against `topic0`.
    pub topic0: B256,
    /// First block, inclusive.
    pub from_block: u64,
    /// Last block, inclusive.
    pub to_block: u64,
}

impl LogQuery {
    /// Build the JSON-RPC filter for this query.
    #[must_use]
    pub fn to_filter(&self) -> Filter {
        Filter::new()
            .address(self.address)
            .event_signature(self.topic0)
            .from_block(self.from_block)
            .to_block(self.to_block)
    }
}

/// Something that can report the chain head and return logs for a query.
pub trait LogSource {
    /// Current chain head.
    fn block_number(&self) -> impl Future<Output = Result<u64>>;

    /// All logs matching `query`, in the order the backend returns them.
    fn logs(&self, query: &LogQuery) -> impl Future<Output = Result<Vec<Log>>>;
}

/// [`LogSource`] over a JSON-RPC provider. Each query is a single
/// `eth_getLogs` call covering the whole range.
#[derive(Debug, Clone)]
pub struct RpcSource<P> {
    provider: P,
}

impl<P> RpcSource<P> {
    /// Wrap `provider`.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: Provider> LogSource for RpcSource<P> {
    async fn block_number(&self) -> Result<u64> {
        self.provider
            .get_block_number()
            .await
            .context("eth_blockNumber failed")
    }

    async fn logs(&self, query: &LogQuery) -> Result<Vec<Log>> {
        self.provider
            .get_logs(&query.to_filter())
            .await
            .with_context(|| {
                format!(
                    "eth_getLogs failed for {} over blocks {}..={}",
                    query.address, query.from_block, query.to_block
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;
    use alloy::rpc::types::FilterBlockOption;

    use super::*;

    #[test]
    fn filter_carries_range() {
        let query = LogQuery {
            address: address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
            topic0: B256::repeat_byte(0x11),
            from_block: 10_000_835,
            to_block: 20_000_000,
        };
        let filter = query.to_filter();

        assert_eq!(filter.get_from_block(), Some(10_000_835));
        assert_eq!(filter.get_to_block(), Some(20_000_000));
        assert!(matches!(filter.block_option, FilterBlockOption::Range { .. }));
    }
}
