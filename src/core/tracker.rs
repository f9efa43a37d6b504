//! User-triggered operations. Each one runs to completion: compute the new
//! sequence, persist it, then redraw.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    config::Theme,
    core::{
        services::{ServiceError, Summary, SummaryService, TransactionForm, TransactionService},
        time::{Clock, SystemClock},
    },
    currency::CurrencyFormatter,
    domain::{Transaction, TransactionId},
    errors::LedgerError,
    ledger::LedgerStore,
    view::{project_rows, ChartSeries, SummaryView, TransactionRow, View},
    workbook::{codec_for, default_codecs, export_rows, read_workbook, SheetRow, WorkbookCodec},
};

pub const RESET_PROMPT: &str = "Reset all data?";
pub const NOTHING_TO_EXPORT: &str = "No transactions to export";

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{0}")]
    Validation(String),
    #[error("No transactions to export")]
    NothingToExport,
    #[error("Import failed: {0}")]
    Import(String),
    #[error("Unsupported workbook format: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl TrackerError {
    /// True when the view has already been shown this error via `alert`.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, TrackerError::Ledger(_))
    }
}

impl From<ServiceError> for TrackerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(inner) => TrackerError::Ledger(inner),
            ServiceError::Invalid(message) => TrackerError::Validation(message),
        }
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Decoded import waiting to be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportBatch {
    pub source: PathBuf,
    pub rows: Vec<SheetRow>,
}

/// Command handlers over one ledger and one view.
pub struct Tracker<V: View> {
    store: LedgerStore,
    view: V,
    formatter: CurrencyFormatter,
    codecs: Vec<Box<dyn WorkbookCodec>>,
    clock: Box<dyn Clock>,
    theme: Theme,
}

impl<V: View> Tracker<V> {
    pub fn new(store: LedgerStore, view: V, formatter: CurrencyFormatter) -> Self {
        Self {
            store,
            view,
            formatter,
            codecs: default_codecs(),
            clock: Box::new(SystemClock),
            theme: Theme::default(),
        }
    }

    /// Registers an extra format; it takes precedence over the shipped ones
    /// for its extension and for paths without one.
    pub fn with_codec(mut self, codec: Box<dyn WorkbookCodec>) -> Self {
        self.codecs.insert(0, codec);
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self.view.set_theme(theme);
        self
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.store.transactions()
    }

    pub fn summary(&self) -> Summary {
        SummaryService::summarize(self.store.transactions())
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn formatter(&self) -> &CurrencyFormatter {
        &self.formatter
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Blank entry form with today's date filled in.
    pub fn blank_form(&self) -> TransactionForm {
        TransactionForm::new(self.clock.today())
    }

    /// Full redraw: list, totals, chart.
    pub fn refresh(&mut self) {
        let rows = project_rows(self.store.transactions(), &self.formatter);
        self.view.render_list(rows);
        self.render_totals();
    }

    fn render_totals(&mut self) {
        let summary = self.summary();
        self.view
            .render_summary(&SummaryView::project(summary, &self.formatter));
        self.view.render_chart(&ChartSeries::from_summary(&summary));
    }

    /// Validates and appends a transaction. On success the new row is drawn
    /// on its own and `form` is reset for the next entry.
    pub fn add(&mut self, form: &mut TransactionForm) -> TrackerResult<TransactionId> {
        let draft = match TransactionService::validate(form, &self.formatter) {
            Ok(draft) => draft,
            Err(err) => {
                let err = TrackerError::from(err);
                self.view.alert(&err.to_string());
                return Err(err);
            }
        };

        let id = self.store.transact(|store| store.append(draft))?;
        tracing::info!(%id, count = self.store.len(), "transaction added");

        if let Some(txn) = self.store.get(id) {
            let row = TransactionRow::project(txn, &self.formatter);
            self.view.render_row(row);
        }
        self.render_totals();
        form.reset(self.clock.today());
        Ok(id)
    }

    /// Removes `id` if present. Returns whether anything was removed.
    pub fn delete(&mut self, id: TransactionId) -> TrackerResult<bool> {
        let removed = self
            .store
            .transact(|store| store.remove_by_id(id).is_some())?;
        if removed {
            tracing::info!(%id, "transaction deleted");
        } else {
            tracing::debug!(%id, "delete ignored; no such transaction");
        }
        self.refresh();
        Ok(removed)
    }

    /// Wipes memory and the durable slot after the user confirms. Returns
    /// `false` when the user declined.
    pub fn reset(&mut self) -> TrackerResult<bool> {
        if !self.view.confirm(RESET_PROMPT) {
            return Ok(false);
        }
        self.store.wipe()?;
        tracing::info!("ledger reset");
        self.refresh();
        Ok(true)
    }

    /// Hides rows whose title does not contain `query`. The ledger is not
    /// touched.
    pub fn search(&mut self, query: &str) -> usize {
        self.view.apply_filter(query)
    }

    /// Writes the ledger as a workbook to `path`, in the format its extension
    /// names.
    pub fn export(&mut self, path: &Path) -> TrackerResult<usize> {
        if self.store.is_empty() {
            self.view.alert(NOTHING_TO_EXPORT);
            return Err(TrackerError::NothingToExport);
        }
        let Some(codec) = codec_for(&self.codecs, path) else {
            let err = unsupported(path);
            self.view.alert(&err.to_string());
            return Err(err);
        };
        let rows = export_rows(self.store.transactions());
        let bytes = codec.encode(&rows)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(LedgerError::from)?;
        }
        std::fs::write(path, bytes).map_err(LedgerError::from)?;
        tracing::info!(path = %path.display(), rows = rows.len(), "ledger exported");
        Ok(rows.len())
    }

    /// Reads and decodes `path` without touching the ledger. Apply the result
    /// with [`Tracker::apply_import`].
    pub async fn read_import(&self, path: &Path) -> TrackerResult<ImportBatch> {
        let codec = codec_for(&self.codecs, path).ok_or_else(|| unsupported(path))?;
        let rows = read_workbook(path, codec)
            .await
            .map_err(|err| TrackerError::Import(err.to_string()))?;
        Ok(ImportBatch {
            source: path.to_path_buf(),
            rows,
        })
    }

    /// Replaces the whole ledger with the batch, numbering ids 1..n.
    pub fn apply_import(&mut self, batch: ImportBatch) -> TrackerResult<usize> {
        let today = self.formatter.format_date(self.clock.today());
        let transactions: Vec<Transaction> = batch
            .rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                row.into_draft(&today)
                    .into_transaction(TransactionId(idx as u64 + 1))
            })
            .collect();
        let count = transactions.len();

        self.store.transact(|store| store.replace_all(transactions))?;
        tracing::info!(source = %batch.source.display(), count, "ledger replaced by import");
        self.refresh();
        Ok(count)
    }

    /// Reads, decodes and applies an import. A read or decode failure is
    /// alerted and leaves the ledger as it was.
    pub async fn import(&mut self, path: &Path) -> TrackerResult<usize> {
        match self.read_import(path).await {
            Ok(batch) => self.apply_import(batch),
            Err(err) => {
                self.view.alert(&err.to_string());
                Err(err)
            }
        }
    }

    /// Switches locale and currency, then redraws with the new formatting.
    pub fn set_formatter(&mut self, formatter: CurrencyFormatter) {
        self.formatter = formatter;
        self.refresh();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.view.set_theme(theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.set_theme(next);
        next
    }
}

fn unsupported(path: &Path) -> TrackerError {
    TrackerError::UnsupportedFormat(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::currency::LocalePreset;
    use crate::domain::TransactionKind;
    use crate::ledger::DEFAULT_STORAGE_KEY;
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::view::HeadlessView;
    use chrono::NaiveDate;

    fn tracker_with(backing: &MemoryStore, view: HeadlessView) -> Tracker<HeadlessView> {
        let store = LedgerStore::load(Box::new(backing.clone()), DEFAULT_STORAGE_KEY).unwrap();
        let mut tracker = Tracker::new(store, view, CurrencyFormatter::new(LocalePreset::EnIn))
            .with_clock(Box::new(FixedClock(
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            )));
        tracker.refresh();
        tracker
    }

    fn form(title: &str, amount: &str, kind: TransactionKind, category: &str) -> TransactionForm {
        TransactionForm {
            title: title.into(),
            amount: amount.into(),
            kind: Some(kind),
            category: Some(category.into()),
            date: Some("2024-01-01".into()),
        }
    }

    #[test]
    fn add_renders_single_row_and_resets_form() {
        let backing = MemoryStore::new();
        let mut tracker = tracker_with(&backing, HeadlessView::new());
        let mut entry = form("Salary", "5000", TransactionKind::Income, "salary");

        tracker.add(&mut entry).unwrap();

        assert_eq!(tracker.view().full_renders, 1);
        assert_eq!(tracker.view().row_renders, 1);
        assert_eq!(entry, TransactionForm::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        let summary = tracker.view().summary.clone().unwrap();
        assert_eq!(summary.balance, "₹5,000.00");
    }

    #[test]
    fn failed_validation_alerts_and_keeps_form() {
        let backing = MemoryStore::new();
        let mut tracker = tracker_with(&backing, HeadlessView::new());
        let mut entry = form("Salary", "", TransactionKind::Income, "salary");

        let err = tracker.add(&mut entry).unwrap_err();

        assert!(matches!(err, TrackerError::Validation(_)));
        assert!(err.is_user_facing());
        assert_eq!(tracker.view().alerts.len(), 1);
        assert_eq!(entry.title, "Salary");
        assert!(!backing.contains(DEFAULT_STORAGE_KEY));
    }

    #[test]
    fn declined_reset_changes_nothing() {
        let backing = MemoryStore::new();
        let mut tracker = tracker_with(&backing, HeadlessView::answering(false));
        tracker
            .add(&mut form("Rent", "900", TransactionKind::Expense, "utilities"))
            .unwrap();

        assert!(!tracker.reset().unwrap());
        assert_eq!(tracker.transactions().len(), 1);
        assert_eq!(tracker.view().prompts, vec![RESET_PROMPT.to_string()]);
        assert!(backing.contains(DEFAULT_STORAGE_KEY));
    }

    #[test]
    fn confirmed_reset_clears_memory_and_slot() {
        let backing = MemoryStore::new();
        let mut tracker = tracker_with(&backing, HeadlessView::answering(true));
        tracker
            .add(&mut form("Rent", "900", TransactionKind::Expense, "utilities"))
            .unwrap();

        assert!(tracker.reset().unwrap());
        assert!(tracker.transactions().is_empty());
        assert_eq!(backing.get(DEFAULT_STORAGE_KEY).unwrap(), None);
        assert!(tracker.view().list.is_empty());
    }

    #[test]
    fn search_does_not_mutate_ledger() {
        let backing = MemoryStore::new();
        let mut tracker = tracker_with(&backing, HeadlessView::new());
        tracker
            .add(&mut form("Salary", "5000", TransactionKind::Income, "salary"))
            .unwrap();
        tracker
            .add(&mut form("Groceries", "200", TransactionKind::Expense, "food"))
            .unwrap();

        assert_eq!(tracker.search("gro"), 1);
        assert_eq!(tracker.transactions().len(), 2);
        assert_eq!(tracker.view().visible_titles(), vec!["Groceries".to_string()]);
    }

    #[test]
    fn export_of_empty_ledger_alerts() {
        let backing = MemoryStore::new();
        let mut tracker = tracker_with(&backing, HeadlessView::new());
        let err = tracker.export(Path::new("unused.csv")).unwrap_err();
        assert!(matches!(err, TrackerError::NothingToExport));
        assert_eq!(tracker.view().last_alert(), Some(NOTHING_TO_EXPORT));
    }

    #[test]
    fn export_to_unknown_extension_alerts() {
        let backing = MemoryStore::new();
        let mut tracker = tracker_with(&backing, HeadlessView::new());
        tracker
            .add(&mut form("Rent", "900", TransactionKind::Expense, "utilities"))
            .unwrap();

        let err = tracker.export(Path::new("ledger.txt")).unwrap_err();
        assert!(matches!(err, TrackerError::UnsupportedFormat(_)));
        assert!(err.is_user_facing());
        assert_eq!(
            tracker.view().last_alert(),
            Some("Unsupported workbook format: ledger.txt")
        );
    }

    #[test]
    fn registered_codec_handles_paths_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger");
        let backing = MemoryStore::new();
        let mut tracker = tracker_with(&backing, HeadlessView::new())
            .with_codec(Box::new(crate::workbook::CsvWorkbook));
        tracker
            .add(&mut form("Rent", "900", TransactionKind::Expense, "utilities"))
            .unwrap();

        tracker.export(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("ID,Title,Amount,Type,Category,Date"), "{text}");
    }

    #[test]
    fn apply_import_renumbers_and_fills_defaults() {
        let backing = MemoryStore::new();
        let mut tracker = tracker_with(&backing, HeadlessView::new());
        tracker
            .add(&mut form("Old", "1", TransactionKind::Income, "other"))
            .unwrap();

        let mut first = SheetRow::default();
        first.insert("Title", "Bonus");
        first.insert("Amount", "300");
        first.insert("Type", "income");
        let mut second = SheetRow::default();
        second.insert("Amount", "12.5");

        let count = tracker
            .apply_import(ImportBatch {
                source: PathBuf::from("in.csv"),
                rows: vec![first, second],
            })
            .unwrap();

        assert_eq!(count, 2);
        let ledger = tracker.transactions();
        assert_eq!(ledger[0].id, TransactionId(1));
        assert_eq!(ledger[1].id, TransactionId(2));
        assert_eq!(ledger[1].title, "Untitled");
        assert_eq!(ledger[1].kind, TransactionKind::Expense);
        assert_eq!(ledger[1].date, "1 Feb 2024");
        assert_eq!(tracker.summary().balance, 287.5);
    }

    #[test]
    fn theme_toggle_reaches_view() {
        let backing = MemoryStore::new();
        let mut tracker = tracker_with(&backing, HeadlessView::new());
        assert_eq!(tracker.toggle_theme(), Theme::Dark);
        assert_eq!(tracker.view().theme, Theme::Dark);
    }
}
