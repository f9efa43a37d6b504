//! In-memory ledger and its durable mirror.

pub mod store;

pub use store::{LedgerStore, DEFAULT_STORAGE_KEY};
