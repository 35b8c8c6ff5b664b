use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use satchel_chains::{AccountId, AssetId};
use serde::{Deserialize, Serialize};

/// Selects the balance of one asset held by one account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceFilter {
    pub asset_id: AssetId,
    pub account_id: AccountId,
}

impl BalanceFilter {
    pub fn new(asset_id: AssetId, account_id: AccountId) -> Self {
        Self {
            asset_id,
            account_id,
        }
    }
}

/// Latest market price of an asset in the user's fiat currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub price: Decimal,
    pub currency: String,
    pub as_of: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(price: Decimal, currency: impl Into<String>, as_of: DateTime<Utc>) -> Self {
        Self {
            price,
            currency: currency.into(),
            as_of,
        }
    }
}
