//! Projection of the ledger into display elements, and the [`View`]
//! capability the command handlers render through.

pub mod headless;

pub use headless::HeadlessView;

use crate::{
    config::Theme,
    core::services::Summary,
    currency::CurrencyFormatter,
    domain::{Transaction, TransactionId, TransactionKind},
};

/// One list entry, fully formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: TransactionId,
    pub icon: &'static str,
    pub title: String,
    /// `<date> • <category>`
    pub caption: String,
    /// Sign followed by the formatted magnitude.
    pub amount: String,
    pub kind: TransactionKind,
}

impl TransactionRow {
    pub fn project(txn: &Transaction, formatter: &CurrencyFormatter) -> Self {
        Self {
            id: txn.id,
            icon: txn.category.icon(),
            title: txn.title.clone(),
            caption: format!("{} • {}", txn.date, txn.category),
            amount: formatter.format_signed(txn.kind.sign(), txn.amount),
            kind: txn.kind,
        }
    }
}

/// Rows in display order: most recent first.
pub fn project_rows(transactions: &[Transaction], formatter: &CurrencyFormatter) -> Vec<TransactionRow> {
    transactions
        .iter()
        .rev()
        .map(|txn| TransactionRow::project(txn, formatter))
        .collect()
}

/// Formatted totals plus the raw numbers they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub balance: String,
    pub income: String,
    pub expense: String,
    pub totals: Summary,
}

impl SummaryView {
    pub fn project(summary: Summary, formatter: &CurrencyFormatter) -> Self {
        Self {
            balance: formatter.format(summary.balance),
            income: formatter.format(summary.income),
            expense: formatter.format(summary.expense),
            totals: summary,
        }
    }
}

pub const CHART_LABELS: [&str; 2] = ["Income", "Expenses"];
pub const CHART_COLORS: [&str; 2] = ["#2ecc71", "#e74c3c"];

/// Two-slice income/expense series. Labels and colors are fixed; only the
/// data is replaced on update.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: [&'static str; 2],
    pub colors: [&'static str; 2],
    pub data: [f64; 2],
}

impl ChartSeries {
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            labels: CHART_LABELS,
            colors: CHART_COLORS,
            data: [summary.income, summary.expense],
        }
    }

    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Share of each slice in `0.0..=1.0`; both zero for an empty ledger.
    pub fn shares(&self) -> [f64; 2] {
        let total = self.total();
        if total <= 0.0 {
            return [0.0, 0.0];
        }
        [self.data[0] / total, self.data[1] / total]
    }
}

/// Case-insensitive substring match on the title. An empty query matches.
pub fn title_matches(title: &str, query: &str) -> bool {
    title.to_lowercase().contains(&query.to_lowercase())
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub row: TransactionRow,
    pub visible: bool,
}

/// The rows currently on screen with their search visibility.
#[derive(Debug, Clone, Default)]
pub struct RenderedList {
    rows: Vec<RenderedRow>,
}

impl RenderedList {
    /// Full rebuild; every row starts visible.
    pub fn replace(&mut self, rows: Vec<TransactionRow>) {
        self.rows = rows
            .into_iter()
            .map(|row| RenderedRow { row, visible: true })
            .collect();
    }

    /// Inserts a freshly added row at the top.
    pub fn prepend(&mut self, row: TransactionRow) {
        self.rows.insert(0, RenderedRow { row, visible: true });
    }

    /// Toggles visibility by title match and returns how many rows remain
    /// visible.
    pub fn apply_filter(&mut self, query: &str) -> usize {
        for entry in &mut self.rows {
            entry.visible = title_matches(&entry.row.title, query);
        }
        self.visible().count()
    }

    pub fn visible(&self) -> impl Iterator<Item = &TransactionRow> {
        self.rows
            .iter()
            .filter(|entry| entry.visible)
            .map(|entry| &entry.row)
    }

    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rendering and user-interaction surface the command handlers depend on.
pub trait View {
    /// Clears and rebuilds the whole list. `rows` are already in display order.
    fn render_list(&mut self, rows: Vec<TransactionRow>);
    /// Adds one row at the top without touching the others.
    fn render_row(&mut self, row: TransactionRow);
    fn render_summary(&mut self, summary: &SummaryView);
    fn render_chart(&mut self, series: &ChartSeries);
    /// Hides rows whose title does not contain `query`; returns the visible count.
    fn apply_filter(&mut self, query: &str) -> usize;
    /// User-visible error or notice.
    fn alert(&mut self, message: &str);
    /// Explicit acknowledgment for destructive actions.
    fn confirm(&mut self, prompt: &str) -> bool;
    fn set_theme(&mut self, theme: Theme);
}
