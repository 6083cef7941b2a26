#![doc(test(attr(deny(warnings))))]

//! BudgetPulse tracks income and expense transactions against per-month
//! budget limits, persisting everything to a local key-value store.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{Controller, DataManager};
pub use crate::errors::{BudgetError, Result};

/// Initializes global tracing and emits a startup log.
pub fn init(log_filter: Option<&str>) {
    utils::init_tracing(log_filter);
    tracing::debug!("BudgetPulse tracing initialized.");
}
