//! Debounced fee estimation.
//!
//! Rapid input changes are coalesced into one adapter call per window, and
//! every caller is handed a ticket. Only the ticket of the most recent call
//! may commit its result; older and cancelled tickets resolve to nothing.

mod fee_scheduler;

pub use fee_scheduler::{
    DebounceEdge, EstimationResult, EstimationTicket, FeeScheduler, SchedulerConfig,
};
