//! Maximum sendable amount.
//!
//! Tokens pay fees in another asset, so their maximum is the whole balance and
//! it is shown before the estimation returns. Native assets pay their own fee:
//! the maximum is the balance minus the fee of a send-max estimation.

use rust_decimal::Decimal;
use satchel_chains::models::units::from_base_units;
use satchel_chains::{Asset, FeeEstimate, FeeSpeed};

use crate::amount::to_fiat;
use crate::errors::{Result, SendError};
use crate::estimation::EstimationResult;
use crate::validation::covers_fee;

#[derive(Debug, Clone)]
pub struct SendMaxInput<'a> {
    pub asset: &'a Asset,
    pub fee_asset: &'a Asset,
    /// Balance of `asset`, in human units
    pub balance: Decimal,
    pub fiat_balance: Decimal,
    /// Balance of `fee_asset`, in base units
    pub native_balance: Decimal,
    pub price: Option<Decimal>,
    pub fee_speed: FeeSpeed,
}

impl SendMaxInput<'_> {
    pub fn is_native(&self) -> bool {
        self.asset.asset_id == self.fee_asset.asset_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendMaxAmount {
    pub crypto: Decimal,
    pub fiat: Option<Decimal>,
}

/// What a send-max estimation does to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMaxPlan {
    /// `None` leaves the amount fields as they are.
    pub amount: Option<SendMaxAmount>,
    /// `None` leaves the stored estimate as it is.
    pub estimate: Option<FeeEstimate>,
    pub result: Result<()>,
}

/// Amount shown while the estimation is in flight. Only tokens have one.
pub fn optimistic_amount(input: &SendMaxInput<'_>) -> Option<SendMaxAmount> {
    (!input.is_native()).then_some(SendMaxAmount {
        crypto: input.balance,
        fiat: Some(input.fiat_balance),
    })
}

pub fn plan_send_max(input: &SendMaxInput<'_>, estimate: EstimationResult) -> SendMaxPlan {
    if input.is_native() {
        native_plan(input, estimate)
    } else {
        token_plan(input, estimate)
    }
}

fn token_plan(input: &SendMaxInput<'_>, estimate: EstimationResult) -> SendMaxPlan {
    let amount = optimistic_amount(input);

    match estimate {
        Err(e) => SendMaxPlan {
            amount,
            estimate: None,
            result: Err(e.into()),
        },
        Ok(estimate) if !covers_fee(input.native_balance, &estimate, input.fee_speed) => {
            SendMaxPlan {
                amount,
                estimate: None,
                result: Err(SendError::InsufficientNativeGas {
                    symbol: input.fee_asset.symbol.clone(),
                }),
            }
        }
        Ok(estimate) => SendMaxPlan {
            amount,
            estimate: Some(estimate),
            result: Ok(()),
        },
    }
}

fn native_plan(input: &SendMaxInput<'_>, estimate: EstimationResult) -> SendMaxPlan {
    let estimate = match estimate {
        Ok(estimate) => estimate,
        Err(e) => {
            return SendMaxPlan {
                amount: None,
                estimate: None,
                result: Err(e.into()),
            }
        }
    };

    let amount = match max_native_amount(input, &estimate) {
        Ok(amount) => amount,
        Err(e) => {
            return SendMaxPlan {
                amount: None,
                estimate: None,
                result: Err(e),
            }
        }
    };

    // The amount is shown even when the fee cannot be paid.
    let result = if covers_fee(input.native_balance, &estimate, input.fee_speed) {
        Ok(())
    } else {
        Err(SendError::InsufficientNativeGas {
            symbol: input.fee_asset.symbol.clone(),
        })
    };

    SendMaxPlan {
        amount: Some(amount),
        estimate: Some(estimate),
        result,
    }
}

fn max_native_amount(input: &SendMaxInput<'_>, estimate: &FeeEstimate) -> Result<SendMaxAmount> {
    let fee = from_base_units(
        estimate.tier(input.fee_speed).tx_fee,
        input.fee_asset.precision,
    )?;
    let crypto = input
        .balance
        .checked_sub(fee)
        .ok_or_else(|| SendError::GeneralError(format!("cannot subtract fee {}", fee)))?;

    Ok(SendMaxAmount {
        crypto,
        fiat: to_fiat(crypto, input.price),
    })
}
