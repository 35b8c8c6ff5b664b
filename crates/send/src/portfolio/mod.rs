//! Read-only portfolio selectors the send flow reads balances and prices from.

mod portfolio_model;
mod portfolio_snapshot;
mod portfolio_traits;

pub use portfolio_model::{BalanceFilter, PriceQuote};
pub use portfolio_snapshot::PortfolioSnapshot;
pub use portfolio_traits::PortfolioSelectors;
