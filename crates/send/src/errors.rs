//! Error types for the send flow.
//!
//! [`SendError`] is the taxonomy the form works with. Chain-side failures
//! arrive as [`ChainError`] and are folded into it; configuration problems
//! are reported separately through [`ConfigError`].

use satchel_chains::{ChainError, ErrorClass};
use thiserror::Error;

/// Type alias for Result using [`SendError`].
pub type Result<T> = std::result::Result<T, SendError>;

/// Errors that can occur while preparing a send.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("No wallet connected")]
    NoWalletConnected,

    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    #[error("Fee estimation failed: {0}")]
    EstimationFailed(String),

    /// The amount (plus fee, for native assets) exceeds the balance.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// The fee asset balance cannot pay the network fee.
    #[error("Not enough {symbol} to cover the network fee")]
    InsufficientNativeGas { symbol: String },

    #[error("{0}")]
    GeneralError(String),
}

impl SendError {
    pub fn class(&self) -> ErrorClass {
        match self {
            SendError::InsufficientFunds | SendError::InsufficientNativeGas { .. } => {
                ErrorClass::UserRecoverable
            }
            SendError::EstimationFailed(_) | SendError::GeneralError(_) => ErrorClass::Transient,
            SendError::NoWalletConnected | SendError::UnsupportedChain(_) => {
                ErrorClass::Precondition
            }
        }
    }

    /// Log this error at the level its class calls for.
    pub(crate) fn log(&self, context: &str) {
        log::log!(self.class().log_level(), "{}: {}", context, self);
    }
}

impl From<ChainError> for SendError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::NoWalletConnected => SendError::NoWalletConnected,
            ChainError::UnsupportedChain(chain) => SendError::UnsupportedChain(chain.to_string()),
            ChainError::InsufficientFunds { .. } => SendError::InsufficientFunds,
            e @ ChainError::EstimationFailed { .. } => SendError::EstimationFailed(e.to_string()),
            e => SendError::GeneralError(e.to_string()),
        }
    }
}

/// Errors raised while loading [`SendConfig`](crate::config::SendConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
