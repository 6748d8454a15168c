//! Known factory deployments and the event each one emits on pair creation.
//!
//! Uniswap V2 and SushiSwap share the `PairCreated` interface; Uniswap V1
//! emits `NewExchange` with both fields indexed.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, B256, address};
use alloy::rpc::types::Log;
use alloy::sol_types::SolEvent;

use crate::bindings::{IUniswapV1Factory, IUniswapV2Factory};
use crate::error::FactoryError;

/// The pair-creation event layout a factory emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventShape {
    /// `NewExchange(address indexed token, address indexed exchange)`.
    NewExchange,
    /// `PairCreated(address indexed token0, address indexed token1, address pair, uint256)`.
    PairCreated,
}

impl EventShape {
    /// Event name as declared in the contract ABI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NewExchange => "NewExchange",
            Self::PairCreated => "PairCreated",
        }
    }

    /// Keccak-256 hash of the event signature (`topic0`).
    #[must_use]
    pub const fn signature_hash(self) -> B256 {
        match self {
            Self::NewExchange => IUniswapV1Factory::NewExchange::SIGNATURE_HASH,
            Self::PairCreated => IUniswapV2Factory::PairCreated::SIGNATURE_HASH,
        }
    }

    /// Decode `log` and return the address of the exchange or pair it created.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Decode`] if the log's topics or data do not
    /// match this event.
    pub fn created_address(self, log: &Log) -> Result<Address, FactoryError> {
        let decoded = match self {
            Self::NewExchange => log
                .log_decode::<IUniswapV1Factory::NewExchange>()
                .map(|l| l.inner.data.exchange),
            Self::PairCreated => log
                .log_decode::<IUniswapV2Factory::PairCreated>()
                .map(|l| l.inner.data.pair),
        };
        decoded.map_err(|source| FactoryError::Decode {
            event: self.name(),
            source,
        })
    }
}

/// Everything needed to query a factory's pair history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryDescriptor {
    /// Factory contract address.
    pub address: Address,
    /// Event emitted for every created exchange or pair.
    pub event: EventShape,
    /// Block the factory was deployed at; no earlier block can hold its logs.
    pub deployment_block: u64,
    /// File name the pair list is written to.
    pub output_file: &'static str,
}

/// The factories whose pair lists can be dumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factory {
    /// Uniswap V1 exchange factory.
    UniswapV1,
    /// Uniswap V2 pair factory.
    UniswapV2,
    /// SushiSwap pair factory (Uniswap V2 fork).
    Sushiswap,
}

const UNISWAP_V1_FACTORY: Address = address!("c0a47dFe034B400B47bDaD5FecDa2621de6c4d95");
const UNISWAP_V2_FACTORY: Address = address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");
const SUSHISWAP_FACTORY: Address = address!("C0AEe478e3658e2610c5F7A4A2E1777cE9e4f2Ac");

impl Factory {
    /// All known factories, in dump order.
    pub const ALL: &[Self] = &[Self::UniswapV1, Self::UniswapV2, Self::Sushiswap];

    /// Command-line name of the factory.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UniswapV1 => "uniswap-v1",
            Self::UniswapV2 => "uniswap-v2",
            Self::Sushiswap => "sushiswap",
        }
    }

    /// Returns the deployment constants for this factory.
    #[must_use]
    pub const fn descriptor(self) -> FactoryDescriptor {
        match self {
            Self::UniswapV1 => FactoryDescriptor {
                address: UNISWAP_V1_FACTORY,
                event: EventShape::NewExchange,
                deployment_block: 0x0065_224d,
                output_file: "v1pairs.csv",
            },
            Self::UniswapV2 => FactoryDescriptor {
                address: UNISWAP_V2_FACTORY,
                event: EventShape::PairCreated,
                deployment_block: 0x0098_99c3,
                output_file: "v2pairs.csv",
            },
            Self::Sushiswap => FactoryDescriptor {
                address: SUSHISWAP_FACTORY,
                event: EventShape::PairCreated,
                deployment_block: 0x00a4_b4f5,
                output_file: "sushipairs.csv",
            },
        }
    }

    /// Look up a [`Factory`] by its command-line name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().find(|f| f.name() == name).copied()
    }
}

impl fmt::Display for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Factory {
    type Err = FactoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| FactoryError::UnknownFactory(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{LogData, U256};

    use super::*;

    fn rpc_log(address: Address, data: LogData) -> Log {
        Log {
            inner: alloy::primitives::Log { address, data },
            ..Default::default()
        }
    }

    #[test]
    fn deployment_blocks_match_known_deploys() {
        assert_eq!(Factory::UniswapV1.descriptor().deployment_block, 6_627_917);
        assert_eq!(Factory::UniswapV2.descriptor().deployment_block, 10_000_835);
        assert_eq!(Factory::Sushiswap.descriptor().deployment_block, 10_794_229);
    }

    #[test]
    fn v2_and_sushi_share_the_pair_created_shape() {
        let v2 = Factory::UniswapV2.descriptor();
        let sushi = Factory::Sushiswap.descriptor();
        assert_eq!(v2.event, sushi.event);
        assert_ne!(v2.address, sushi.address);
        assert_ne!(v2.output_file, sushi.output_file);
    }

    #[test]
    fn signature_hashes_match_abi_signatures() {
        assert_eq!(
            EventShape::NewExchange.signature_hash(),
            alloy::primitives::keccak256("NewExchange(address,address)"),
        );
        assert_eq!(
            EventShape::PairCreated.signature_hash(),
            alloy::primitives::keccak256("PairCreated(address,address,address,uint256)"),
        );
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for factory in Factory::ALL {
            assert_eq!(factory.name().parse::<Factory>().ok(), Some(*factory));
        }
        assert!(matches!(
            "uniswap-v3".parse::<Factory>(),
            Err(FactoryError::UnknownFactory(name)) if name == "uniswap-v3"
        ));
    }

    #[test]
    fn extracts_exchange_from_new_exchange() {
        let token = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let exchange = address!("1111111111111111111111111111111111111111");
        let event = IUniswapV1Factory::NewExchange { token, exchange };
        let log = rpc_log(UNISWAP_V1_FACTORY, event.encode_log_data());

        let got = EventShape::NewExchange.created_address(&log).ok();
        assert_eq!(got, Some(exchange));
    }

    #[test]
    fn extracts_pair_from_pair_created() {
        let pair = address!("3333333333333333333333333333333333333333");
        let event = IUniswapV2Factory::PairCreated {
            token0: address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            token1: address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
            pair,
            allPairsLength: U256::from(1),
        };
        let log = rpc_log(UNISWAP_V2_FACTORY, event.encode_log_data());

        let got = EventShape::PairCreated.created_address(&log).ok();
        assert_eq!(got, Some(pair));
    }

    #[test]
    fn wrong_event_is_a_decode_error() {
        let event = IUniswapV1Factory::NewExchange {
            token: Address::ZERO,
            exchange: Address::ZERO,
        };
        let log = rpc_log(UNISWAP_V2_FACTORY, event.encode_log_data());

        let err = EventShape::PairCreated.created_address(&log);
        assert!(
            matches!(err, Err(FactoryError::Decode { event: "PairCreated", .. })),
            "expected decode error, got {err:?}"
        );
    }

    #[test]
    fn factory_addresses_render_checksummed() {
        assert_eq!(
            Factory::UniswapV2.descriptor().address.to_checksum(None),
            "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"
        );
    }
}
