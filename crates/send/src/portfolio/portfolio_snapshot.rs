use std::collections::HashMap;

use log::warn;
use rust_decimal::Decimal;
use satchel_chains::models::units::from_base_units;
use satchel_chains::{AccountId, Asset, AssetId, ChainId};

use super::portfolio_model::{BalanceFilter, PriceQuote};
use super::portfolio_traits::PortfolioSelectors;

/// In-memory portfolio, built up front and read by the send flow.
#[derive(Debug, Clone, Default)]
pub struct PortfolioSnapshot {
    assets: HashMap<AssetId, Asset>,
    fee_assets: HashMap<ChainId, AssetId>,
    balances: HashMap<BalanceFilter, Decimal>,
    prices: HashMap<AssetId, PriceQuote>,
}

impl PortfolioSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.assets.insert(asset.asset_id.clone(), asset);
        self
    }

    /// Register `asset` as the fee asset of its chain.
    pub fn with_fee_asset(mut self, asset: Asset) -> Self {
        self.fee_assets
            .insert(asset.chain_id().clone(), asset.asset_id.clone());
        self.with_asset(asset)
    }

    /// Set a balance, given in base units.
    pub fn with_balance(mut self, asset_id: AssetId, account_id: AccountId, base: Decimal) -> Self {
        self.balances
            .insert(BalanceFilter::new(asset_id, account_id), base);
        self
    }

    pub fn with_price(mut self, asset_id: AssetId, quote: PriceQuote) -> Self {
        self.prices.insert(asset_id, quote);
        self
    }

    pub fn asset(&self, asset_id: &AssetId) -> Option<&Asset> {
        self.assets.get(asset_id)
    }
}

impl PortfolioSelectors for PortfolioSnapshot {
    fn crypto_balance(&self, filter: &BalanceFilter) -> Decimal {
        self.balances.get(filter).copied().unwrap_or(Decimal::ZERO)
    }

    fn crypto_human_balance(&self, filter: &BalanceFilter) -> Decimal {
        let Some(asset) = self.assets.get(&filter.asset_id) else {
            return Decimal::ZERO;
        };
        from_base_units(self.crypto_balance(filter), asset.precision).unwrap_or_else(|e| {
            warn!("Cannot scale balance of {}: {}", filter.asset_id, e);
            Decimal::ZERO
        })
    }

    fn fiat_balance(&self, filter: &BalanceFilter) -> Decimal {
        self.market_price(&filter.asset_id)
            .and_then(|quote| self.crypto_human_balance(filter).checked_mul(quote.price))
            .unwrap_or(Decimal::ZERO)
    }

    fn market_price(&self, asset_id: &AssetId) -> Option<PriceQuote> {
        self.prices.get(asset_id).cloned()
    }

    fn fee_asset(&self, asset_id: &AssetId) -> Option<Asset> {
        self.fee_assets
            .get(asset_id.chain_id())
            .and_then(|fee_asset_id| self.assets.get(fee_asset_id))
            .cloned()
    }
}
