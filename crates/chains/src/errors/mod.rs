//! Error types and classification for chain adapter operations.
//!
//! This module provides:
//! - [`AdapterError`]: what a chain adapter implementation may return
//! - [`ChainError`]: the normalized error produced at the dispatcher boundary
//! - [`ErrorClass`]: classification deciding how a failure is surfaced

mod class;

pub use class::ErrorClass;

use thiserror::Error;

use crate::models::ChainId;

/// Errors raised by a chain adapter implementation.
///
/// Adapters talk to nodes, indexers and wallets; whatever goes wrong there is
/// reported through this type and normalized by the dispatcher into a
/// [`ChainError`]. Adapters never surface raw transport errors to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The node rejected the simulated transaction because the sender cannot
    /// pay for it.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// An RPC or indexer call failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The wallet could not produce the requested data (address, pubkey).
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Anything else the adapter wants to report.
    #[error("{0}")]
    Other(String),
}

/// Errors that can occur while estimating fees or resolving addresses.
///
/// Each variant is classified into an [`ErrorClass`] via [`class`](Self::class).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// No wallet is connected, so no sender can be derived.
    #[error("No wallet connected")]
    NoWalletConnected,

    /// No adapter is registered for the chain.
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(ChainId),

    /// The adapter call failed.
    #[error("Fee estimation failed on {chain}: {message}")]
    EstimationFailed {
        /// Chain the estimation was issued against
        chain: ChainId,
        /// Normalized failure description
        message: String,
    },

    /// The adapter reported that the sender cannot fund the transaction.
    #[error("Insufficient funds on {chain}")]
    InsufficientFunds {
        /// Chain the estimation was issued against
        chain: ChainId,
    },

    /// The address query against the wallet failed.
    #[error("Address unavailable on {chain}: {message}")]
    AddressUnavailable {
        /// Chain the address was requested for
        chain: ChainId,
        /// Normalized failure description
        message: String,
    },

    /// The amount cannot be represented in base units.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// An identifier (chain, asset, account) could not be parsed.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

impl ChainError {
    /// Normalize an adapter failure for the given chain.
    ///
    /// Insufficient funds keeps its identity; every other adapter failure
    /// becomes [`ChainError::EstimationFailed`].
    pub fn from_adapter(chain: &ChainId, error: AdapterError) -> Self {
        match error {
            AdapterError::InsufficientFunds => Self::InsufficientFunds {
                chain: chain.clone(),
            },
            other => Self::EstimationFailed {
                chain: chain.clone(),
                message: other.to_string(),
            },
        }
    }

    /// Returns the surfacing classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use satchel_chains::errors::{ChainError, ErrorClass};
    ///
    /// assert_eq!(ChainError::NoWalletConnected.class(), ErrorClass::Precondition);
    /// ```
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InsufficientFunds { .. } | Self::InvalidAmount(_) => ErrorClass::UserRecoverable,

            Self::EstimationFailed { .. } | Self::AddressUnavailable { .. } => {
                ErrorClass::Transient
            }

            Self::NoWalletConnected | Self::UnsupportedChain(_) | Self::InvalidIdentifier(_) => {
                ErrorClass::Precondition
            }
        }
    }

    /// True when the failure means the sender cannot fund the transaction.
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::InsufficientFunds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ETHEREUM_MAINNET;

    fn eth() -> ChainId {
        ETHEREUM_MAINNET.parse().unwrap()
    }

    #[test]
    fn test_adapter_insufficient_funds_is_preserved() {
        let error = ChainError::from_adapter(&eth(), AdapterError::InsufficientFunds);
        assert!(error.is_insufficient_funds());
        assert_eq!(error.class(), ErrorClass::UserRecoverable);
    }

    #[test]
    fn test_adapter_rpc_failure_becomes_estimation_failed() {
        let error = ChainError::from_adapter(&eth(), AdapterError::Rpc("timeout".to_string()));
        assert_eq!(
            error,
            ChainError::EstimationFailed {
                chain: eth(),
                message: "RPC error: timeout".to_string(),
            }
        );
        assert_eq!(error.class(), ErrorClass::Transient);
    }

    #[test]
    fn test_wiring_errors_are_preconditions() {
        assert_eq!(ChainError::NoWalletConnected.class(), ErrorClass::Precondition);
        assert_eq!(
            ChainError::UnsupportedChain(eth()).class(),
            ErrorClass::Precondition
        );
        assert_eq!(ErrorClass::Precondition.log_level(), log::Level::Error);
    }

    #[test]
    fn test_error_display() {
        let error = ChainError::UnsupportedChain(eth());
        assert_eq!(format!("{}", error), "Unsupported chain: eip155:1");

        let error = ChainError::EstimationFailed {
            chain: eth(),
            message: "nonce too low".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Fee estimation failed on eip155:1: nonce too low"
        );
    }
}
