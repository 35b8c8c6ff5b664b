use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Which amount field the user is typing into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AmountField {
    #[default]
    Crypto,
    Fiat,
}

impl AmountField {
    pub fn other(self) -> Self {
        match self {
            Self::Crypto => Self::Fiat,
            Self::Fiat => Self::Crypto,
        }
    }
}

/// Crypto amount and its fiat counterpart, derived from a single input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountPair {
    /// Human units of the asset being sent
    pub crypto: Decimal,
    /// `None` when no market price is known
    pub fiat: Option<Decimal>,
}

impl AmountPair {
    /// Derive both amounts from `value` typed into `field`.
    ///
    /// Returns `None` for fiat input when the crypto amount cannot be derived.
    pub fn from_input(field: AmountField, value: Decimal, price: Option<Decimal>) -> Option<Self> {
        match field {
            AmountField::Crypto => Some(Self {
                crypto: value,
                fiat: to_fiat(value, price),
            }),
            AmountField::Fiat => to_crypto(value, price).map(|crypto| Self {
                crypto,
                fiat: Some(value),
            }),
        }
    }
}

/// `crypto * price`. `None` without a price or on overflow.
pub fn to_fiat(crypto: Decimal, price: Option<Decimal>) -> Option<Decimal> {
    price.and_then(|price| crypto.checked_mul(price))
}

/// `fiat / price`. `None` without a price, with a zero price, or on overflow.
pub fn to_crypto(fiat: Decimal, price: Option<Decimal>) -> Option<Decimal> {
    let price = price.filter(|p| !p.is_zero())?;
    fiat.checked_div(price)
}

/// Parse user input into a non-negative amount.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    Decimal::from_str(input.trim())
        .ok()
        .filter(|amount| !amount.is_sign_negative() || amount.is_zero())
}

/// Crypto amounts are shown at full precision without trailing zeros.
pub fn format_crypto(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Fiat amounts are shown with a fixed number of decimals.
pub fn format_fiat(amount: Decimal, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
}
