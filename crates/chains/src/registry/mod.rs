//! Adapter registry module.
//!
//! This module provides:
//! - The explicitly constructed chain adapter registry
//! - The fee estimation dispatcher sitting in front of it

mod dispatcher;
mod registry;

pub use dispatcher::{EstimateFees, FeeDispatcher};
pub use registry::ChainAdapterRegistry;
