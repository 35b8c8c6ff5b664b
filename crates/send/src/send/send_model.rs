use rust_decimal::Decimal;
use satchel_chains::{AccountId, Asset, FeeEstimate, FeeSpeed, FeeTier, SendRequest};
use serde::Serialize;

use crate::amount::AmountField;
use crate::validation::{AmountFieldError, ValidationOutcome, ValidationState};

/// State of the send form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendForm {
    pub asset: Asset,
    pub account_id: AccountId,
    /// Destination address
    pub address: String,
    pub crypto_amount: String,
    pub fiat_amount: String,
    pub active_field: AmountField,
    pub amount_field_error: AmountFieldError,
    pub estimated_fees: Option<FeeEstimate>,
    pub send_max: bool,
    pub validation: ValidationState,
}

impl SendForm {
    pub fn new(asset: Asset, account_id: AccountId, address: impl Into<String>) -> Self {
        Self {
            asset,
            account_id,
            address: address.into(),
            crypto_amount: String::new(),
            fiat_amount: String::new(),
            active_field: AmountField::Crypto,
            amount_field_error: AmountFieldError::None,
            estimated_fees: None,
            send_max: false,
            validation: ValidationState::Idle,
        }
    }

    pub fn amount(&self, field: AmountField) -> &str {
        match field {
            AmountField::Crypto => &self.crypto_amount,
            AmountField::Fiat => &self.fiat_amount,
        }
    }

    pub(crate) fn set_amount(&mut self, field: AmountField, value: String) {
        match field {
            AmountField::Crypto => self.crypto_amount = value,
            AmountField::Fiat => self.fiat_amount = value,
        }
    }

    /// True while a fee estimation is in flight.
    pub fn is_loading(&self) -> bool {
        self.validation.is_estimating()
    }

    pub(crate) fn settle(&mut self, outcome: ValidationOutcome) {
        self.amount_field_error = outcome.field_error();
        self.validation = ValidationState::Settled(outcome);
    }

    pub(crate) fn send_request(&self, amount: Decimal, send_max: bool) -> SendRequest {
        SendRequest {
            to: self.address.clone(),
            account_id: self.account_id.clone(),
            asset: self.asset.clone(),
            amount,
            send_max,
        }
    }
}

/// Summary shown on the confirmation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendConfirmation {
    pub from: String,
    pub to: String,
    pub asset: Asset,
    pub crypto_amount: String,
    pub fiat_amount: String,
    pub fee_speed: FeeSpeed,
    pub fee: FeeTier,
    pub send_max: bool,
}
