//! Ledger record types shared by the store, the views, and the workbook codec.

pub mod category;
pub mod transaction;

pub use category::Category;
pub use transaction::{Transaction, TransactionDraft, TransactionId, TransactionKind};
