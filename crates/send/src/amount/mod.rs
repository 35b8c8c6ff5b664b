//! Crypto/fiat amount conversion and formatting.

mod amount_converter;

pub use amount_converter::{
    format_crypto, format_fiat, parse_amount, to_crypto, to_fiat, AmountField, AmountPair,
};
