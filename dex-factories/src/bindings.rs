//! Solidity event bindings generated with [`alloy::sol!`].
//!
//! Only the pair-creation events are bound; nothing here calls the
//! factory contracts.

#![allow(missing_docs)]

use alloy::sol;

sol! {
    /// Uniswap V1 factory. Both event fields are indexed topics.
    interface IUniswapV1Factory {
        event NewExchange(address indexed token, address indexed exchange);
    }

    /// Uniswap V2 factory, shared by the SushiSwap fork.
    interface IUniswapV2Factory {
        event PairCreated(
            address indexed token0,
            address indexed token1,
            address pair,
            uint256 allPairsLength
        );
    }
}
