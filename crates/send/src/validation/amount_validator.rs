use rust_decimal::Decimal;
use satchel_chains::models::units::to_base_units;
use satchel_chains::{Asset, FeeEstimate, FeeSpeed};

use super::validation_model::ValidatedAmount;
use crate::errors::{Result, SendError};
use crate::estimation::EstimationResult;

/// Everything the balance checks read.
#[derive(Debug, Clone)]
pub struct ValidationInput<'a> {
    /// Amount to send, in human units of `asset`
    pub crypto_amount: Decimal,
    /// Balance of `asset`, in human units
    pub balance: Decimal,
    /// Balance of `fee_asset`, in base units
    pub native_balance: Decimal,
    pub asset: &'a Asset,
    pub fee_asset: &'a Asset,
    pub fee_speed: FeeSpeed,
}

impl ValidationInput<'_> {
    pub fn is_native(&self) -> bool {
        self.asset.asset_id == self.fee_asset.asset_id
    }
}

/// Check an amount against the balances and a fee estimation result.
///
/// Checks run in order and the first failure wins:
/// 1. amount above the balance: insufficient funds, whatever the estimation did
/// 2. estimation failure: insufficient funds if the chain said so, otherwise the
///    normalized error
/// 3. native asset where amount plus fee leaves nothing: insufficient funds
/// 4. fee asset balance not above the fee: insufficient native gas
pub fn validate_amount(
    input: &ValidationInput<'_>,
    estimate: EstimationResult,
) -> Result<ValidatedAmount> {
    if input.crypto_amount > input.balance {
        return Err(SendError::InsufficientFunds);
    }

    let estimate = estimate.map_err(SendError::from)?;
    let fee = estimate.tier(input.fee_speed).tx_fee;

    if input.is_native() {
        let amount = to_base_units(input.crypto_amount, input.asset.precision)?;
        if !is_positive(remainder(input.native_balance, &[amount, fee])?) {
            return Err(SendError::InsufficientFunds);
        }
    }

    if !is_positive(remainder(input.native_balance, &[fee])?) {
        return Err(SendError::InsufficientNativeGas {
            symbol: input.fee_asset.symbol.clone(),
        });
    }

    Ok(ValidatedAmount {
        crypto_amount: input.crypto_amount,
        estimate,
    })
}

/// Whether the fee asset balance can pay the fee of `estimate` at `speed`.
pub(crate) fn covers_fee(native_balance: Decimal, estimate: &FeeEstimate, speed: FeeSpeed) -> bool {
    remainder(native_balance, &[estimate.tier(speed).tx_fee])
        .map(is_positive)
        .unwrap_or(false)
}

fn remainder(balance: Decimal, costs: &[Decimal]) -> Result<Decimal> {
    costs.iter().try_fold(balance, |left, cost| {
        left.checked_sub(*cost)
            .ok_or_else(|| SendError::GeneralError(format!("cannot subtract {} from {}", cost, left)))
    })
}

fn is_positive(value: Decimal) -> bool {
    value > Decimal::ZERO
}
