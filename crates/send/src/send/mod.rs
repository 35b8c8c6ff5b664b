//! Send form state and the controller driving it.

mod send_max;
mod send_model;
mod send_service;

#[cfg(test)]
mod service_tests;

pub use send_max::{optimistic_amount, plan_send_max, SendMaxAmount, SendMaxInput, SendMaxPlan};
pub use send_model::{SendConfirmation, SendForm};
pub use send_service::SendDetails;
