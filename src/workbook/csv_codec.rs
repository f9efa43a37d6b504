use csv::{ReaderBuilder, Trim, WriterBuilder};

use crate::errors::{LedgerError, Result};

use super::{ExportRow, SheetRow, WorkbookCodec, HEADERS};

/// Single-sheet workbook stored as comma-separated values with a header line.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvWorkbook;

impl WorkbookCodec for CsvWorkbook {
    fn encode(&self, rows: &[ExportRow]) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(HEADERS)?;
        for row in rows {
            writer.write_record([
                row.index.to_string(),
                row.title.clone(),
                row.amount.to_string(),
                row.kind.clone(),
                row.category.clone(),
                row.date.clone(),
            ])?;
        }
        writer
            .into_inner()
            .map_err(|err| LedgerError::Storage(err.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<SheetRow>> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(bytes);
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row = SheetRow::default();
            for (header, value) in headers.iter().zip(record.iter()) {
                row.insert(header, value);
            }
            if !row.is_blank() {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}
