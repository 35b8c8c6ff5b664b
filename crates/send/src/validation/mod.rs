//! Amount validation against balances and the estimated network fee.

mod amount_validator;
mod validation_model;

pub(crate) use amount_validator::covers_fee;
pub use amount_validator::{validate_amount, ValidationInput};
pub use validation_model::{
    AmountFieldError, ValidatedAmount, ValidationOutcome, ValidationState,
    GENERAL_ERROR_MESSAGE, INSUFFICIENT_FUNDS_MESSAGE, NOT_ENOUGH_NATIVE_TOKEN_MESSAGE,
};
