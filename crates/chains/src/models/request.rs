use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::asset::{AccountId, Asset};

/// A send attempt as the form sees it. Built fresh for every estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    /// Destination address
    pub to: String,
    pub account_id: AccountId,
    pub asset: Asset,
    /// Amount in human units of `asset`
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub send_max: bool,
}

/// Fee request parameters for EVM chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmFeeParams {
    pub to: String,
    /// Amount in base units, integral
    pub value: String,
    /// Sender address
    pub from: String,
    /// Token contract for ERC-20 transfers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    pub send_max: bool,
}

/// Fee request parameters for UTXO chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoFeeParams {
    pub to: String,
    /// Amount in base units, integral
    pub value: String,
    /// Account-level public key the inputs are selected from
    pub pubkey: String,
    pub send_max: bool,
}

/// Chain-shaped parameters handed to [`ChainAdapter::get_fee_data`](crate::adapter::ChainAdapter::get_fee_data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "camelCase")]
pub enum FeeDataRequest {
    /// Account-model chains price transactions without any detail.
    Account,
    Evm(EvmFeeParams),
    Utxo(UtxoFeeParams),
}

impl FeeDataRequest {
    pub fn is_send_max(&self) -> bool {
        match self {
            Self::Account => false,
            Self::Evm(params) => params.send_max,
            Self::Utxo(params) => params.send_max,
        }
    }
}
