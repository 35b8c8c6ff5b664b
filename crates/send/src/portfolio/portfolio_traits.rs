use rust_decimal::Decimal;
use satchel_chains::{Asset, AssetId};

use super::portfolio_model::{BalanceFilter, PriceQuote};

/// Synchronous, read-only view of the portfolio.
///
/// Missing balances read as zero.
pub trait PortfolioSelectors: Send + Sync {
    /// Balance in base units.
    fn crypto_balance(&self, filter: &BalanceFilter) -> Decimal;

    /// Balance in human units.
    fn crypto_human_balance(&self, filter: &BalanceFilter) -> Decimal;

    /// Balance valued in fiat. Zero when no price is known.
    fn fiat_balance(&self, filter: &BalanceFilter) -> Decimal;

    fn market_price(&self, asset_id: &AssetId) -> Option<PriceQuote>;

    /// The asset paying network fees on the chain of `asset_id`.
    fn fee_asset(&self, asset_id: &AssetId) -> Option<Asset>;
}
