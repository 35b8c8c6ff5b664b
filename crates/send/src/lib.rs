//! Satchel Send Crate
//!
//! Amount step of the send flow: the user types an amount in crypto or fiat,
//! a debounced fee estimation runs against the chain adapter, and the amount
//! is validated against the asset balance and the fee asset balance.
//!
//! # Flow
//!
//! ```text
//!   keystroke / send max
//!          |
//!          v
//! +------------------+     +--------------------+
//! |   SendDetails    | --> | PortfolioSelectors |  (balances, prices, fee asset)
//! +------------------+     +--------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |   FeeScheduler   | --> |  FeeDispatcher   |  (satchel-chains)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! |  validate_amount |  -> ValidationState on the SendForm
//! +------------------+
//! ```

pub mod amount;
pub mod config;
pub mod errors;
pub mod estimation;
pub mod portfolio;
pub mod send;
pub mod validation;

pub use amount::{AmountField, AmountPair};
pub use config::SendConfig;
pub use errors::{ConfigError, Result, SendError};
pub use estimation::{DebounceEdge, FeeScheduler, SchedulerConfig};
pub use portfolio::{BalanceFilter, PortfolioSelectors, PortfolioSnapshot, PriceQuote};
pub use send::{SendConfirmation, SendDetails, SendForm};
pub use validation::{AmountFieldError, ValidationOutcome, ValidationState};
