//! Chain adapter abstractions.
//!
//! This module contains:
//! - The `ChainAdapter` and `Wallet` traits consumed by the engine
//! - The `FeeEstimator` capability, implemented once per chain family

mod estimator;
mod traits;

pub use estimator::{AccountFeeEstimator, EvmFeeEstimator, FeeEstimator, UtxoFeeEstimator};
pub use traits::{ChainAdapter, Wallet};
