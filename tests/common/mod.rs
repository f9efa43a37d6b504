#![allow(dead_code)]

use cashflow_core::{
    core::{services::TransactionForm, time::FixedClock, Tracker},
    currency::{CurrencyFormatter, LocalePreset},
    domain::TransactionKind,
    ledger::{LedgerStore, DEFAULT_STORAGE_KEY},
    storage::{KeyValueStore, MemoryStore},
    view::HeadlessView,
};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
}

/// Tracker over `storage` with a pinned clock and the default locale,
/// already refreshed once like a freshly opened app.
pub fn tracker_on(storage: Box<dyn KeyValueStore>, view: HeadlessView) -> Tracker<HeadlessView> {
    let store = LedgerStore::load(storage, DEFAULT_STORAGE_KEY).expect("load ledger");
    let mut tracker = Tracker::new(store, view, CurrencyFormatter::new(LocalePreset::EnIn))
        .with_clock(Box::new(FixedClock(today())));
    tracker.refresh();
    tracker
}

pub fn memory_tracker(backing: &MemoryStore) -> Tracker<HeadlessView> {
    tracker_on(Box::new(backing.clone()), HeadlessView::new())
}

pub fn entry(title: &str, amount: &str, kind: TransactionKind, category: &str) -> TransactionForm {
    TransactionForm {
        title: title.into(),
        amount: amount.into(),
        kind: Some(kind),
        category: Some(category.into()),
        date: Some("2024-01-15".into()),
    }
}
