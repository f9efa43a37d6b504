use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use crate::errors::{LedgerError, Result};

use super::{ExportRow, SheetRow, WorkbookCodec, HEADERS};

pub const SHEET_NAME: &str = "Transactions";

/// Excel workbook with a single "Transactions" sheet. Decoding reads the
/// first sheet whatever its name, taking its first row as headers.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxWorkbook;

impl WorkbookCodec for XlsxWorkbook {
    fn encode(&self, rows: &[ExportRow]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        {
            let sheet = workbook.add_worksheet();
            sheet.set_name(SHEET_NAME)?;
            for (col, header) in HEADERS.iter().enumerate() {
                sheet.write_string(0, col as u16, *header)?;
            }
            for (idx, row) in rows.iter().enumerate() {
                let line = idx as u32 + 1;
                sheet.write_number(line, 0, row.index as f64)?;
                sheet.write_string(line, 1, row.title.as_str())?;
                sheet.write_number(line, 2, row.amount)?;
                sheet.write_string(line, 3, row.kind.as_str())?;
                sheet.write_string(line, 4, row.category.as_str())?;
                sheet.write_string(line, 5, row.date.as_str())?;
            }
        }
        Ok(workbook.save_to_buffer()?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<SheetRow>> {
        let mut workbook = Xlsx::new(Cursor::new(bytes))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LedgerError::Storage("workbook has no sheets".into()))??;

        let mut lines = range.rows();
        let Some(header_cells) = lines.next() else {
            return Ok(Vec::new());
        };
        let headers: Vec<String> = header_cells.iter().map(cell_text).collect();

        let mut rows = Vec::new();
        for line in lines {
            let mut row = SheetRow::default();
            for (header, cell) in headers.iter().zip(line) {
                row.insert(header, &cell_text(cell));
            }
            if !row.is_blank() {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        other => other.to_string(),
    }
}
