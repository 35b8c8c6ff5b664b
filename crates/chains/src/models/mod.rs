//! Chain data models
//!
//! - `chain_id` - CAIP-2 chain identity and the chain family it belongs to
//! - `asset` - CAIP-19 assets, CAIP-10 accounts and asset metadata
//! - `fees` - Normalized fee estimate (speed tiers)
//! - `request` - Send request and the chain-shaped fee request parameters
//! - `units` - Human/base unit conversion

mod asset;
mod chain_id;
mod fees;
mod request;
pub mod units;

pub use asset::{AccountId, Asset, AssetId};
pub use chain_id::{ChainFamily, ChainId, ChainNamespace};
pub use fees::{ChainSpecificFee, FeeEstimate, FeeSpeed, FeeTier};
pub use request::{EvmFeeParams, FeeDataRequest, SendRequest, UtxoFeeParams};
