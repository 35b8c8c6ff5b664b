//! Fee estimation dispatcher.
//!
//! The dispatcher is the boundary between the send flow and the adapters:
//! 1. Check a wallet is connected
//! 2. Resolve adapter and family estimator from the registry
//! 3. Shape the request and call the adapter
//! 4. Reject malformed estimates
//!
//! Every failure leaves this module as a [`ChainError`]. There are no retries
//! here; the caller re-triggers on the next input change.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use log::{debug, info, warn};

use super::registry::ChainAdapterRegistry;
use crate::adapter::Wallet;
use crate::errors::ChainError;
use crate::models::{ChainId, FeeEstimate, SendRequest};

/// Anything able to turn a send request into a fee estimate.
///
/// Implemented by [`FeeDispatcher`]; the scheduler depends on this trait so
/// it can be driven by mocks.
#[async_trait]
pub trait EstimateFees: Send + Sync {
    async fn estimate_fees(&self, request: &SendRequest) -> Result<FeeEstimate, ChainError>;
}

/// Dispatches fee estimation and address queries to chain adapters.
pub struct FeeDispatcher {
    registry: Arc<ChainAdapterRegistry>,
    wallet: RwLock<Option<Arc<dyn Wallet>>>,
}

impl FeeDispatcher {
    pub fn new(registry: Arc<ChainAdapterRegistry>) -> Self {
        Self {
            registry,
            wallet: RwLock::new(None),
        }
    }

    /// Create a dispatcher with a wallet already connected.
    pub fn with_wallet(registry: Arc<ChainAdapterRegistry>, wallet: Arc<dyn Wallet>) -> Self {
        Self {
            registry,
            wallet: RwLock::new(Some(wallet)),
        }
    }

    fn read_wallet(&self) -> RwLockReadGuard<'_, Option<Arc<dyn Wallet>>> {
        self.wallet.read().unwrap_or_else(|poisoned| {
            warn!("Dispatcher wallet lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_wallet(&self) -> RwLockWriteGuard<'_, Option<Arc<dyn Wallet>>> {
        self.wallet.write().unwrap_or_else(|poisoned| {
            warn!("Dispatcher wallet lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn connect_wallet(&self, wallet: Arc<dyn Wallet>) {
        info!("Wallet '{}' connected", wallet.id());
        *self.write_wallet() = Some(wallet);
    }

    pub fn disconnect_wallet(&self) {
        if let Some(wallet) = self.write_wallet().take() {
            info!("Wallet '{}' disconnected", wallet.id());
        }
    }

    pub fn wallet(&self) -> Option<Arc<dyn Wallet>> {
        self.read_wallet().clone()
    }

    pub fn registry(&self) -> &Arc<ChainAdapterRegistry> {
        &self.registry
    }

    /// Address of the connected wallet on `chain_id`.
    pub async fn sender_address(&self, chain_id: &ChainId) -> Result<String, ChainError> {
        let wallet = self.wallet().ok_or(ChainError::NoWalletConnected)?;
        let adapter = self.registry.get(chain_id)?;

        adapter
            .get_address(wallet.as_ref())
            .await
            .map_err(|e| ChainError::AddressUnavailable {
                chain: chain_id.clone(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl EstimateFees for FeeDispatcher {
    async fn estimate_fees(&self, request: &SendRequest) -> Result<FeeEstimate, ChainError> {
        if self.wallet().is_none() {
            return Err(ChainError::NoWalletConnected);
        }

        let chain_id = request.asset.chain_id();
        let (adapter, estimator) = self.registry.resolve(chain_id)?;

        let estimate = estimator.estimate(adapter.as_ref(), request).await?;

        if let Some(speed) = estimate.negative_tier() {
            warn!("Adapter for {} returned a negative {} fee", chain_id, speed);
            return Err(ChainError::EstimationFailed {
                chain: chain_id.clone(),
                message: format!("negative {} fee", speed),
            });
        }

        debug!(
            "Estimated fees on {}: fast tier {} base units",
            chain_id,
            estimate.fast_fee()
        );
        Ok(estimate)
    }
}
