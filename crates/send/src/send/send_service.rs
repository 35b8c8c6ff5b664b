use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use satchel_chains::{AccountId, Asset, ChainId, FeeDispatcher};

use super::send_max::{optimistic_amount, plan_send_max, SendMaxAmount, SendMaxInput};
use super::send_model::{SendConfirmation, SendForm};
use crate::amount::{format_crypto, parse_amount, AmountField, AmountPair};
use crate::config::SendConfig;
use crate::errors::{Result, SendError};
use crate::estimation::{EstimationTicket, FeeScheduler};
use crate::portfolio::{BalanceFilter, PortfolioSelectors};
use crate::validation::{
    validate_amount, AmountFieldError, ValidatedAmount, ValidationInput, ValidationOutcome,
    ValidationState,
};

struct Balances {
    /// Human units of the asset being sent
    balance: Decimal,
    fiat_balance: Decimal,
    /// Base units of the fee asset
    native_balance: Decimal,
    price: Option<Decimal>,
}

/// Controller behind the amount step of the send form.
///
/// Input handlers may be called concurrently from overlapping UI events.
/// Form state is only ever locked between awaits, and a fee estimation result
/// is applied only while its ticket is still the scheduler's latest.
pub struct SendDetails {
    config: SendConfig,
    dispatcher: Arc<FeeDispatcher>,
    portfolio: Arc<dyn PortfolioSelectors>,
    scheduler: FeeScheduler,
    fee_asset: Asset,
    form: Mutex<SendForm>,
}

impl SendDetails {
    pub fn new(
        config: SendConfig,
        dispatcher: Arc<FeeDispatcher>,
        portfolio: Arc<dyn PortfolioSelectors>,
        form: SendForm,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|e| SendError::GeneralError(e.to_string()))?;

        let fee_asset = portfolio
            .fee_asset(&form.asset.asset_id)
            .ok_or_else(|| SendError::UnsupportedChain(form.asset.chain_id().to_string()))?;
        let scheduler = FeeScheduler::new(dispatcher.clone(), config.scheduler_config());

        debug!(
            "Send form opened for {} (fees paid in {})",
            form.asset.symbol, fee_asset.symbol
        );

        Ok(Self {
            config,
            dispatcher,
            portfolio,
            scheduler,
            fee_asset,
            form: Mutex::new(form),
        })
    }

    fn lock_form(&self) -> MutexGuard<'_, SendForm> {
        self.form.lock().unwrap_or_else(|poisoned| {
            warn!("Send form lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn snapshot(&self) -> SendForm {
        self.lock_form().clone()
    }

    pub fn validation_state(&self) -> ValidationState {
        self.lock_form().validation.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_form().is_loading()
    }

    pub fn fee_asset(&self) -> &Asset {
        &self.fee_asset
    }

    pub fn scheduler(&self) -> &FeeScheduler {
        &self.scheduler
    }

    pub fn set_address(&self, address: impl Into<String>) {
        self.lock_form().address = address.into();
    }

    /// Balance of the asset being sent, in human units and in fiat.
    pub fn available_balance(&self) -> AmountPair {
        let (asset, account_id) = {
            let form = self.lock_form();
            (form.asset.clone(), form.account_id.clone())
        };
        let balances = self.balances(&asset, &account_id);
        AmountPair {
            crypto: balances.balance,
            fiat: Some(balances.fiat_balance),
        }
    }

    /// Switch which amount field the user types into.
    pub fn toggle_currency(&self) -> AmountField {
        let mut form = self.lock_form();
        form.active_field = form.active_field.other();
        form.active_field
    }

    /// Apply a keystroke in the active amount field.
    ///
    /// Updates both amounts synchronously, then waits for the debounced fee
    /// estimation and validates against it. Returns the validation state once
    /// this call is done; a superseded call leaves the form untouched.
    pub async fn handle_input_change(&self, input: &str) -> ValidationState {
        let (ticket, request) = {
            let mut form = self.lock_form();
            form.send_max = false;
            let field = form.active_field;
            form.set_amount(field, input.to_string());

            if input.trim().is_empty() {
                self.scheduler.cancel_all();
                form.set_amount(field.other(), String::new());
                form.amount_field_error = AmountFieldError::None;
                form.validation = ValidationState::Idle;
                return form.validation.clone();
            }

            let crypto_amount = match self.derive_amounts(&mut form, field, input) {
                Ok(amount) => amount,
                Err(e) => {
                    self.scheduler.cancel_all();
                    e.log("Amount input rejected");
                    form.set_amount(field.other(), String::new());
                    form.settle(ValidationOutcome::from(&e));
                    return form.validation.clone();
                }
            };

            form.validation = ValidationState::Estimating;
            let request = form.send_request(crypto_amount, false);
            (self.scheduler.schedule(request.clone()), request)
        };

        let Some(estimate) = self.scheduler.resolve(&ticket).await else {
            return self.validation_state();
        };

        let balances = self.balances(&request.asset, &request.account_id);
        let validation = validate_amount(
            &ValidationInput {
                crypto_amount: request.amount,
                balance: balances.balance,
                native_balance: balances.native_balance,
                asset: &request.asset,
                fee_asset: &self.fee_asset,
                fee_speed: self.config.fee_speed,
            },
            estimate,
        );
        self.commit(&ticket, validation)
    }

    /// Fill in the maximum sendable amount.
    ///
    /// Only a native asset send is flagged as send-max, both on the form and
    /// in the fee request.
    pub async fn handle_send_max(&self) -> ValidationState {
        let (ticket, asset, account_id) = {
            let mut form = self.lock_form();
            let asset = form.asset.clone();
            let account_id = form.account_id.clone();
            let balances = self.balances(&asset, &account_id);
            let input = self.send_max_input(&asset, &balances);

            // Tokens estimate an ordinary transfer of the whole balance.
            form.send_max = input.is_native();
            form.amount_field_error = AmountFieldError::None;
            form.validation = ValidationState::Estimating;
            if let Some(amount) = optimistic_amount(&input) {
                self.apply_amount(&mut form, amount);
            }

            self.scheduler.cancel_all();
            let request = form.send_request(balances.balance, form.send_max);
            (self.scheduler.dispatch_now(request), asset, account_id)
        };

        let Some(estimate) = self.scheduler.resolve(&ticket).await else {
            return self.validation_state();
        };

        let balances = self.balances(&asset, &account_id);
        let plan = plan_send_max(&self.send_max_input(&asset, &balances), estimate);

        let mut form = self.lock_form();
        if !self.scheduler.is_current(&ticket) {
            return form.validation.clone();
        }
        if let Some(amount) = plan.amount {
            self.apply_amount(&mut form, amount);
        }
        if let Some(estimate) = plan.estimate {
            form.estimated_fees = Some(estimate);
        }
        if let Err(e) = &plan.result {
            e.log("Send max rejected");
        }
        form.settle(ValidationOutcome::from(&plan.result));
        form.validation.clone()
    }

    /// Advance to confirmation. Only a validated amount can proceed.
    pub async fn handle_next(&self) -> Result<SendConfirmation> {
        let form = self.snapshot();

        match form.validation.outcome() {
            Some(ValidationOutcome::Valid) => {}
            Some(ValidationOutcome::InsufficientFunds) => return Err(SendError::InsufficientFunds),
            Some(ValidationOutcome::InsufficientNativeGas { asset_symbol }) => {
                return Err(SendError::InsufficientNativeGas {
                    symbol: asset_symbol.clone(),
                })
            }
            _ => {
                return Err(SendError::GeneralError(
                    "amount has not been validated".to_string(),
                ))
            }
        }

        let estimate = form
            .estimated_fees
            .as_ref()
            .ok_or_else(|| SendError::GeneralError("no fee estimate".to_string()))?;

        let from = self
            .dispatcher
            .sender_address(form.asset.chain_id())
            .await
            .map_err(|e| {
                let err = SendError::from(e);
                err.log("Sender address lookup failed");
                err
            })?;

        Ok(SendConfirmation {
            from,
            fee: estimate.tier(self.config.fee_speed).clone(),
            fee_speed: self.config.fee_speed,
            to: form.address,
            asset: form.asset,
            crypto_amount: form.crypto_amount,
            fiat_amount: form.fiat_amount,
            send_max: form.send_max,
        })
    }

    /// Registered EVM chains.
    pub fn supported_evm_chain_ids(&self) -> Vec<ChainId> {
        self.dispatcher.registry().supported_evm_chain_ids()
    }

    /// The registered EVM chain the connected wallet is on.
    pub async fn connected_evm_chain_id(&self) -> Option<ChainId> {
        let wallet = self.dispatcher.wallet()?;
        self.dispatcher
            .registry()
            .connected_evm_chain_id(wallet.as_ref())
            .await
    }

    /// Cancel pending estimations. Call when the form is dismissed.
    pub fn teardown(&self) {
        self.scheduler.cancel_all();
        let mut form = self.lock_form();
        if form.is_loading() {
            form.validation = ValidationState::Idle;
        }
        debug!("Send form for {} torn down", form.asset.symbol);
    }

    fn derive_amounts(&self, form: &mut SendForm, field: AmountField, input: &str) -> Result<Decimal> {
        let value = parse_amount(input).ok_or_else(|| {
            SendError::GeneralError(format!("'{}' is not a valid amount", input.trim()))
        })?;
        let price = self.price(&form.asset);
        let pair = AmountPair::from_input(field, value, price).ok_or_else(|| {
            SendError::GeneralError(format!("no market price for {}", form.asset.symbol))
        })?;

        match field {
            AmountField::Crypto => {
                form.fiat_amount = pair
                    .fiat
                    .map(|fiat| self.config.format_fiat(fiat))
                    .unwrap_or_default();
                Ok(pair.crypto)
            }
            AmountField::Fiat => {
                let crypto = pair
                    .crypto
                    .round_dp_with_strategy(form.asset.precision, RoundingStrategy::ToZero);
                form.crypto_amount = format_crypto(crypto);
                Ok(crypto)
            }
        }
    }

    fn commit(&self, ticket: &EstimationTicket, validation: Result<ValidatedAmount>) -> ValidationState {
        let mut form = self.lock_form();
        if !self.scheduler.is_current(ticket) {
            debug!("Dropping validation of superseded estimation #{}", ticket.seq());
            return form.validation.clone();
        }

        let outcome = ValidationOutcome::from(&validation);
        match validation {
            Ok(validated) => form.estimated_fees = Some(validated.estimate),
            Err(e) => e.log("Send amount rejected"),
        }
        form.settle(outcome);
        form.validation.clone()
    }

    fn apply_amount(&self, form: &mut SendForm, amount: SendMaxAmount) {
        form.crypto_amount = format_crypto(amount.crypto);
        form.fiat_amount = amount
            .fiat
            .map(|fiat| self.config.format_fiat(fiat))
            .unwrap_or_default();
    }

    fn price(&self, asset: &Asset) -> Option<Decimal> {
        self.portfolio
            .market_price(&asset.asset_id)
            .map(|quote| quote.price)
    }

    fn balances(&self, asset: &Asset, account_id: &AccountId) -> Balances {
        let filter = BalanceFilter::new(asset.asset_id.clone(), account_id.clone());
        let fee_filter = BalanceFilter::new(self.fee_asset.asset_id.clone(), account_id.clone());

        Balances {
            balance: self.portfolio.crypto_human_balance(&filter),
            fiat_balance: self.portfolio.fiat_balance(&filter),
            native_balance: self.portfolio.crypto_balance(&fee_filter),
            price: self.price(asset),
        }
    }

    fn send_max_input<'a>(&'a self, asset: &'a Asset, balances: &Balances) -> SendMaxInput<'a> {
        SendMaxInput {
            asset,
            fee_asset: &self.fee_asset,
            balance: balances.balance,
            fiat_balance: balances.fiat_balance,
            native_balance: balances.native_balance,
            price: balances.price,
            fee_speed: self.config.fee_speed,
        }
    }
}
