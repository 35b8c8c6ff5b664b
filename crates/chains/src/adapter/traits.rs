//! Chain adapter and wallet trait definitions.
//!
//! Adapters are implemented outside this crate (one per chain, talking to
//! nodes and indexers). This crate only consumes them.

use async_trait::async_trait;

use crate::errors::AdapterError;
use crate::models::{ChainFamily, ChainId, FeeDataRequest, FeeEstimate};

/// A connected hardware or software wallet.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Stable identifier of the wallet device or session.
    fn id(&self) -> &str;

    /// Reference of the EVM chain the wallet is currently switched to
    /// (the decimal `eip155` chain id), if it is an EVM wallet.
    async fn evm_chain_reference(&self) -> Option<String> {
        None
    }
}

/// Trait for chain adapters.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use satchel_chains::adapter::{ChainAdapter, Wallet};
///
/// struct CosmosAdapter {
///     chain_id: ChainId,
/// }
///
/// #[async_trait]
/// impl ChainAdapter for CosmosAdapter {
///     fn chain_id(&self) -> &ChainId {
///         &self.chain_id
///     }
///
///     async fn get_fee_data(&self, request: FeeDataRequest) -> Result<FeeEstimate, AdapterError> {
///         // query the node's gas prices
///     }
///
///     async fn get_address(&self, wallet: &dyn Wallet) -> Result<String, AdapterError> {
///         // derive the bech32 address from the wallet
///     }
/// }
/// ```
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// Chain this adapter serves. Used as the registry key.
    fn chain_id(&self) -> &ChainId;

    /// Fee request family. Defaults to the family of the chain namespace.
    fn family(&self) -> ChainFamily {
        self.chain_id().family()
    }

    /// Estimate fees for a transaction shaped by `request`.
    ///
    /// Fees are returned in base units of the chain's fee asset.
    async fn get_fee_data(&self, request: FeeDataRequest) -> Result<FeeEstimate, AdapterError>;

    /// Address of the wallet's account on this chain.
    async fn get_address(&self, wallet: &dyn Wallet) -> Result<String, AdapterError>;
}
