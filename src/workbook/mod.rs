//! Tabular export/import of the ledger.
//!
//! A workbook is a single sheet with the columns in [`HEADERS`]. The format is
//! picked from the file extension: `.xlsx` via [`XlsxWorkbook`], `.csv` via
//! [`CsvWorkbook`].

pub mod csv_codec;
pub mod xlsx_codec;

pub use csv_codec::CsvWorkbook;
pub use xlsx_codec::XlsxWorkbook;

use std::{collections::HashMap, path::Path};

use crate::{
    domain::{Category, Transaction, TransactionDraft, TransactionKind},
    errors::Result,
};

pub const HEADERS: [&str; 6] = ["ID", "Title", "Amount", "Type", "Category", "Date"];

pub const DEFAULT_TITLE: &str = "Untitled";

/// One exported line. `index` is the 1-based position in the ledger, not the
/// transaction id.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub index: usize,
    pub title: String,
    pub amount: f64,
    pub kind: String,
    pub category: String,
    pub date: String,
}

pub fn export_rows(transactions: &[Transaction]) -> Vec<ExportRow> {
    transactions
        .iter()
        .enumerate()
        .map(|(idx, txn)| ExportRow {
            index: idx + 1,
            title: txn.title.clone(),
            amount: txn.amount,
            kind: txn.kind.as_str().to_string(),
            category: txn.category.as_str().to_string(),
            date: txn.date.clone(),
        })
        .collect()
}

/// A decoded sheet row keyed by header. Cells that were absent or empty are
/// simply missing from the map; other values are kept exactly as read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    cells: HashMap<String, String>,
}

impl SheetRow {
    pub fn insert(&mut self, header: &str, value: &str) {
        if !value.is_empty() {
            self.cells
                .insert(header.trim().to_ascii_lowercase(), value.to_string());
        }
    }

    pub fn cell(&self, header: &str) -> Option<&str> {
        self.cells
            .get(&header.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.is_empty()
    }

    /// Builds a draft, filling gaps: title "Untitled", amount 0, type
    /// expense, category other, date `today`.
    pub fn into_draft(self, today: &str) -> TransactionDraft {
        let amount = self
            .cell("Amount")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(0.0);
        TransactionDraft {
            title: self.cell("Title").unwrap_or(DEFAULT_TITLE).to_string(),
            amount,
            kind: self
                .cell("Type")
                .map(TransactionKind::parse_lenient)
                .unwrap_or(TransactionKind::Expense),
            category: self
                .cell("Category")
                .map(Category::parse)
                .unwrap_or(Category::Other),
            date: self.cell("Date").unwrap_or(today).to_string(),
        }
    }
}

/// Serializes export rows into a workbook file and reads the first sheet back.
pub trait WorkbookCodec {
    fn encode(&self, rows: &[ExportRow]) -> Result<Vec<u8>>;
    fn decode(&self, bytes: &[u8]) -> Result<Vec<SheetRow>>;
    fn extension(&self) -> &'static str;
}

/// Every shipped codec; the first one is used for paths without an extension.
pub fn default_codecs() -> Vec<Box<dyn WorkbookCodec>> {
    vec![Box::new(XlsxWorkbook), Box::new(CsvWorkbook)]
}

/// Codec whose extension matches `path`, ignoring case. `None` for an
/// extension no codec claims.
pub fn codec_for<'a>(
    codecs: &'a [Box<dyn WorkbookCodec>],
    path: &Path,
) -> Option<&'a dyn WorkbookCodec> {
    let found = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => codecs
            .iter()
            .find(|codec| codec.extension().eq_ignore_ascii_case(ext)),
        None => codecs.first(),
    };
    found.map(|codec| codec.as_ref())
}

/// Reads `path` asynchronously and decodes its first sheet.
pub async fn read_workbook(path: &Path, codec: &dyn WorkbookCodec) -> Result<Vec<SheetRow>> {
    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "workbook read");
    codec.decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionId;

    #[test]
    fn export_rows_use_one_based_positions() {
        let ledger = vec![
            Transaction {
                id: TransactionId(900),
                title: "Salary".into(),
                amount: 5000.0,
                kind: TransactionKind::Income,
                category: Category::Salary,
                date: "1 Jan 2024".into(),
            },
            Transaction {
                id: TransactionId(17),
                title: "Groceries".into(),
                amount: 200.0,
                kind: TransactionKind::Expense,
                category: Category::Food,
                date: "2 Jan 2024".into(),
            },
        ];
        let rows = export_rows(&ledger);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[1].kind, "expense");
        assert_eq!(rows[1].category, "food");
    }

    #[test]
    fn blank_row_takes_every_default() {
        let draft = SheetRow::default().into_draft("5 Mar 2024");
        assert_eq!(draft.title, DEFAULT_TITLE);
        assert_eq!(draft.amount, 0.0);
        assert_eq!(draft.kind, TransactionKind::Expense);
        assert_eq!(draft.category, Category::Other);
        assert_eq!(draft.date, "5 Mar 2024");
    }

    #[test]
    fn unparsable_amount_becomes_zero() {
        let mut row = SheetRow::default();
        row.insert("Title", "Coffee");
        row.insert("Amount", "three");
        row.insert("Type", "income");
        let draft = row.into_draft("today");
        assert_eq!(draft.title, "Coffee");
        assert_eq!(draft.amount, 0.0);
        assert_eq!(draft.kind, TransactionKind::Income);
    }

    #[test]
    fn header_lookup_ignores_case_and_empty_cells() {
        let mut row = SheetRow::default();
        row.insert(" title ", "Rent");
        row.insert("Date", "");
        assert_eq!(row.cell("Title"), Some("Rent"));
        assert_eq!(row.cell("Date"), None);
    }

    #[test]
    fn codec_is_chosen_by_extension() {
        let codecs = default_codecs();
        let pick = |path: &str| codec_for(&codecs, Path::new(path)).map(|codec| codec.extension());
        assert_eq!(pick("out/ledger.xlsx"), Some("xlsx"));
        assert_eq!(pick("LEDGER.CSV"), Some("csv"));
        assert_eq!(pick("ledger"), Some("xlsx"));
        assert_eq!(pick("ledger.txt"), None);
    }

    #[test]
    fn cell_values_keep_surrounding_spaces() {
        let mut row = SheetRow::default();
        row.insert("Title", "  Rent  ");
        row.insert("Amount", " 12.5 ");
        row.insert("Category", " food ");
        let draft = row.into_draft("today");
        assert_eq!(draft.title, "  Rent  ");
        assert_eq!(draft.amount, 12.5);
        assert_eq!(draft.category, Category::Custom(" food ".into()));
    }
}
