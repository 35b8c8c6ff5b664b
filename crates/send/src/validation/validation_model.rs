use std::collections::BTreeMap;

use rust_decimal::Decimal;
use satchel_chains::FeeEstimate;
use serde::{Deserialize, Serialize};

use crate::errors::SendError;

pub const INSUFFICIENT_FUNDS_MESSAGE: &str = "common.insufficientFunds";
pub const GENERAL_ERROR_MESSAGE: &str = "common.generalError";
pub const NOT_ENOUGH_NATIVE_TOKEN_MESSAGE: &str = "modals.send.errors.notEnoughNativeToken";

/// An amount that passed every balance check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAmount {
    /// Human units of the asset being sent
    pub crypto_amount: Decimal,
    pub estimate: FeeEstimate,
}

/// How a settled validation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ValidationOutcome {
    Valid,
    InsufficientFunds,
    #[serde(rename_all = "camelCase")]
    InsufficientNativeGas { asset_symbol: String },
    GeneralError,
}

impl ValidationOutcome {
    /// Message shown under the amount field for this outcome.
    pub fn field_error(&self) -> AmountFieldError {
        match self {
            Self::Valid => AmountFieldError::None,
            Self::InsufficientFunds => AmountFieldError::message(INSUFFICIENT_FUNDS_MESSAGE),
            Self::InsufficientNativeGas { asset_symbol } => AmountFieldError::MessageWithParams {
                message: NOT_ENOUGH_NATIVE_TOKEN_MESSAGE.to_string(),
                params: BTreeMap::from([("asset".to_string(), asset_symbol.clone())]),
            },
            Self::GeneralError => AmountFieldError::message(GENERAL_ERROR_MESSAGE),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl From<&SendError> for ValidationOutcome {
    fn from(err: &SendError) -> Self {
        match err {
            SendError::InsufficientFunds => Self::InsufficientFunds,
            SendError::InsufficientNativeGas { symbol } => Self::InsufficientNativeGas {
                asset_symbol: symbol.clone(),
            },
            _ => Self::GeneralError,
        }
    }
}

impl<T> From<&Result<T, SendError>> for ValidationOutcome {
    fn from(result: &Result<T, SendError>) -> Self {
        match result {
            Ok(_) => Self::Valid,
            Err(err) => err.into(),
        }
    }
}

/// Validation state of the amount field.
///
/// `Idle` until the first input, `Estimating` while a fee estimation is in
/// flight, `Settled` once its result has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "result", rename_all = "camelCase")]
pub enum ValidationState {
    #[default]
    Idle,
    Estimating,
    Settled(ValidationOutcome),
}

impl ValidationState {
    pub fn is_estimating(&self) -> bool {
        matches!(self, Self::Estimating)
    }

    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        match self {
            Self::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Error attached to the amount field.
///
/// `None` serializes as an empty string, which is what the form shows when
/// the amount is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "FieldErrorRepr", into = "FieldErrorRepr")]
pub enum AmountFieldError {
    #[default]
    None,
    Message(String),
    MessageWithParams {
        message: String,
        params: BTreeMap<String, String>,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FieldErrorRepr {
    Message(String),
    MessageWithParams {
        message: String,
        params: BTreeMap<String, String>,
    },
    Null(()),
}

impl From<FieldErrorRepr> for AmountFieldError {
    fn from(repr: FieldErrorRepr) -> Self {
        match repr {
            FieldErrorRepr::Message(message) if message.is_empty() => Self::None,
            FieldErrorRepr::Message(message) => Self::Message(message),
            FieldErrorRepr::MessageWithParams { message, params } => {
                Self::MessageWithParams { message, params }
            }
            FieldErrorRepr::Null(()) => Self::None,
        }
    }
}

impl From<AmountFieldError> for FieldErrorRepr {
    fn from(error: AmountFieldError) -> Self {
        match error {
            AmountFieldError::None => Self::Message(String::new()),
            AmountFieldError::Message(message) => Self::Message(message),
            AmountFieldError::MessageWithParams { message, params } => {
                Self::MessageWithParams { message, params }
            }
        }
    }
}

impl AmountFieldError {
    pub fn message(message: &str) -> Self {
        Self::Message(message.to_string())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
