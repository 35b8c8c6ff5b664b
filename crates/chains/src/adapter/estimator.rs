//! Per-family fee estimators.
//!
//! Each chain family shapes the fee request differently. The registry picks
//! the estimator for an adapter's family once per dispatch; callers never
//! branch on the chain themselves.

use async_trait::async_trait;
use log::debug;

use super::traits::ChainAdapter;
use crate::errors::ChainError;
use crate::models::units::to_base_units;
use crate::models::{
    ChainFamily, EvmFeeParams, FeeDataRequest, FeeEstimate, SendRequest, UtxoFeeParams,
};

/// Capability interface implemented once per chain family.
#[async_trait]
pub trait FeeEstimator: Send + Sync {
    fn family(&self) -> ChainFamily;

    /// Shape the adapter parameters for `request`.
    fn build_request(&self, request: &SendRequest) -> Result<FeeDataRequest, ChainError>;

    /// Build the parameters and call the adapter, normalizing its failures.
    async fn estimate(
        &self,
        adapter: &dyn ChainAdapter,
        request: &SendRequest,
    ) -> Result<FeeEstimate, ChainError> {
        let params = self.build_request(request)?;
        debug!(
            "Requesting {:?} fee data on {} (send max: {})",
            self.family(),
            adapter.chain_id(),
            params.is_send_max()
        );

        adapter
            .get_fee_data(params)
            .await
            .map_err(|e| ChainError::from_adapter(adapter.chain_id(), e))
    }
}

fn base_value(request: &SendRequest) -> Result<String, ChainError> {
    Ok(to_base_units(request.amount, request.asset.precision)?.to_string())
}

/// Account-model chains (Cosmos SDK). The fee does not depend on the
/// transaction, so nothing but the chain is sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccountFeeEstimator;

#[async_trait]
impl FeeEstimator for AccountFeeEstimator {
    fn family(&self) -> ChainFamily {
        ChainFamily::Account
    }

    fn build_request(&self, _request: &SendRequest) -> Result<FeeDataRequest, ChainError> {
        Ok(FeeDataRequest::Account)
    }
}

/// EVM chains. Token transfers carry the contract address.
#[derive(Debug, Default, Clone, Copy)]
pub struct EvmFeeEstimator;

#[async_trait]
impl FeeEstimator for EvmFeeEstimator {
    fn family(&self) -> ChainFamily {
        ChainFamily::Evm
    }

    fn build_request(&self, request: &SendRequest) -> Result<FeeDataRequest, ChainError> {
        Ok(FeeDataRequest::Evm(EvmFeeParams {
            to: request.to.clone(),
            value: base_value(request)?,
            from: request.account_id.account().to_string(),
            contract_address: request
                .asset
                .asset_id
                .contract_address()
                .map(str::to_string),
            send_max: request.send_max,
        }))
    }
}

/// UTXO chains. Inputs are selected from the account public key.
#[derive(Debug, Default, Clone, Copy)]
pub struct UtxoFeeEstimator;

#[async_trait]
impl FeeEstimator for UtxoFeeEstimator {
    fn family(&self) -> ChainFamily {
        ChainFamily::Utxo
    }

    fn build_request(&self, request: &SendRequest) -> Result<FeeDataRequest, ChainError> {
        Ok(FeeDataRequest::Utxo(UtxoFeeParams {
            to: request.to.clone(),
            value: base_value(request)?,
            pubkey: request.account_id.account().to_string(),
            send_max: request.send_max,
        }))
    }
}
