//! Conversions between human units and base units.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::MAX_PRECISION;
use crate::errors::ChainError;

fn scale_factor(precision: u32) -> Result<Decimal, ChainError> {
    if precision > MAX_PRECISION {
        return Err(ChainError::InvalidAmount(format!(
            "precision {} exceeds {}",
            precision, MAX_PRECISION
        )));
    }
    Decimal::try_from_i128_with_scale(10i128.pow(precision), 0)
        .map_err(|e| ChainError::InvalidAmount(e.to_string()))
}

/// Convert a human amount into an integral base-unit amount.
///
/// Rounds half away from zero, so `0.5 wei` becomes `1 wei`.
pub fn to_base_units(amount: Decimal, precision: u32) -> Result<Decimal, ChainError> {
    amount
        .checked_mul(scale_factor(precision)?)
        .map(|base| base.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| {
            ChainError::InvalidAmount(format!(
                "{} cannot be expressed with precision {}",
                amount, precision
            ))
        })
}

/// Convert a base-unit amount into human units.
pub fn from_base_units(base: Decimal, precision: u32) -> Result<Decimal, ChainError> {
    base.checked_div(scale_factor(precision)?)
        .map(|human| human.normalize())
        .ok_or_else(|| {
            ChainError::InvalidAmount(format!(
                "{} cannot be scaled down by precision {}",
                base, precision
            ))
        })
}
