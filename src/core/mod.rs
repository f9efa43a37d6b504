//! Ledger operations: summaries, form validation, and the command handlers
//! that tie the store to a view.

pub mod services;
pub mod time;
pub mod tracker;
pub mod utils;

pub use tracker::{Tracker, TrackerError, TrackerResult};
