//! Explicitly constructed registry of chain adapters.
//!
//! The registry is built once by the application and handed to the engine.
//! It maps chain identifiers to adapters and chain families to the
//! [`FeeEstimator`] that shapes their fee requests.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use crate::adapter::{
    AccountFeeEstimator, ChainAdapter, EvmFeeEstimator, FeeEstimator, UtxoFeeEstimator, Wallet,
};
use crate::errors::ChainError;
use crate::models::{ChainFamily, ChainId, ChainNamespace};

/// Registry of chain adapters keyed by chain id.
pub struct ChainAdapterRegistry {
    adapters: HashMap<ChainId, Arc<dyn ChainAdapter>>,
    estimators: HashMap<ChainFamily, Arc<dyn FeeEstimator>>,
}

impl ChainAdapterRegistry {
    /// Create an empty registry with the built-in estimator for every family.
    pub fn new() -> Self {
        let mut estimators: HashMap<ChainFamily, Arc<dyn FeeEstimator>> = HashMap::new();
        estimators.insert(ChainFamily::Account, Arc::new(AccountFeeEstimator));
        estimators.insert(ChainFamily::Evm, Arc::new(EvmFeeEstimator));
        estimators.insert(ChainFamily::Utxo, Arc::new(UtxoFeeEstimator));

        Self {
            adapters: HashMap::new(),
            estimators,
        }
    }

    /// Create a registry holding the given adapters.
    pub fn with_adapters(adapters: Vec<Arc<dyn ChainAdapter>>) -> Self {
        let mut registry = Self::new();
        for adapter in adapters {
            registry.register(adapter);
        }
        registry
    }

    /// Register an adapter, replacing any adapter already serving its chain.
    pub fn register(&mut self, adapter: Arc<dyn ChainAdapter>) -> Option<Arc<dyn ChainAdapter>> {
        let chain_id = adapter.chain_id().clone();
        debug!("Registering {:?} adapter for {}", adapter.family(), chain_id);

        let previous = self.adapters.insert(chain_id.clone(), adapter);
        if previous.is_some() {
            warn!("Replaced existing adapter for {}", chain_id);
        }
        previous
    }

    /// Override the estimator used for a chain family.
    pub fn with_estimator(mut self, estimator: Arc<dyn FeeEstimator>) -> Self {
        self.estimators.insert(estimator.family(), estimator);
        self
    }

    /// Adapter serving `chain_id`.
    pub fn get(&self, chain_id: &ChainId) -> Result<&Arc<dyn ChainAdapter>, ChainError> {
        self.adapters
            .get(chain_id)
            .ok_or_else(|| ChainError::UnsupportedChain(chain_id.clone()))
    }

    /// Adapter and estimator for `chain_id`, looked up together.
    pub fn resolve(
        &self,
        chain_id: &ChainId,
    ) -> Result<(&Arc<dyn ChainAdapter>, &Arc<dyn FeeEstimator>), ChainError> {
        let adapter = self.get(chain_id)?;
        let estimator = self
            .estimators
            .get(&adapter.family())
            .ok_or_else(|| ChainError::UnsupportedChain(chain_id.clone()))?;
        Ok((adapter, estimator))
    }

    /// Every registered chain, sorted for stable output.
    pub fn chain_ids(&self) -> Vec<ChainId> {
        let mut ids: Vec<ChainId> = self.adapters.keys().cloned().collect();
        ids.sort_by_key(|id| id.to_string());
        ids
    }

    /// Registered EVM chains.
    pub fn supported_evm_chain_ids(&self) -> Vec<ChainId> {
        self.chain_ids()
            .into_iter()
            .filter(|id| id.namespace() == ChainNamespace::Eip155)
            .collect()
    }

    /// The registered EVM chain the wallet is currently connected to.
    pub async fn connected_evm_chain_id(&self, wallet: &dyn Wallet) -> Option<ChainId> {
        let reference = wallet.evm_chain_reference().await?;
        self.supported_evm_chain_ids()
            .into_iter()
            .find(|id| id.reference() == reference)
    }
}

impl Default for ChainAdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
