//! Factory descriptors and event bindings for the Uniswap V1, Uniswap V2
//! and SushiSwap factory contracts on Ethereum mainnet.
//!
//! Each [`Factory`] resolves to a [`FactoryDescriptor`] carrying the
//! contract address, the pair-creation event it emits, the block it was
//! deployed at and the file its pair list is dumped to. The
//! [`EventShape`] of a descriptor knows how to pull the created
//! exchange/pair address out of a raw RPC log.
//!
//! ```
//! use dex_factories::Factory;
//!
//! let v2 = Factory::UniswapV2.descriptor();
//! assert_eq!(v2.deployment_block, 10_000_835);
//! assert_eq!(v2.output_file, "v2pairs.csv");
//! ```

pub mod bindings;
pub mod error;
pub mod factories;

pub use error::FactoryError;
pub use factories::{EventShape, Factory, FactoryDescriptor};
