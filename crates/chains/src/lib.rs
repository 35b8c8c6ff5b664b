//! Satchel Chains Crate
//!
//! Chain-side building blocks of the send flow: identifiers, the normalized
//! fee model, the chain adapter interface and the registry/dispatcher that
//! sits in front of the adapters.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   SendRequest    |  (asset, account, destination, amount)
//! +------------------+
//!          |
//!          v
//! +------------------+     +----------------------+
//! |  FeeDispatcher   | --> | ChainAdapterRegistry |  (chain id -> adapter,
//! +------------------+     +----------------------+   family -> estimator)
//!          |
//!          v
//! +------------------+
//! |   FeeEstimator   |  (account / EVM / UTXO request shape)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   ChainAdapter   |  (external: node / indexer calls)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   FeeEstimate    |  (slow / average / fast, base units)
//! +------------------+
//! ```

pub mod adapter;
pub mod constants;
pub mod errors;
pub mod models;
pub mod registry;

pub use adapter::{ChainAdapter, FeeEstimator, Wallet};
pub use errors::{AdapterError, ChainError, ErrorClass};
pub use models::{
    AccountId, Asset, AssetId, ChainFamily, ChainId, ChainNamespace, ChainSpecificFee,
    EvmFeeParams, FeeDataRequest, FeeEstimate, FeeSpeed, FeeTier, SendRequest, UtxoFeeParams,
};
pub use registry::{ChainAdapterRegistry, EstimateFees, FeeDispatcher};
