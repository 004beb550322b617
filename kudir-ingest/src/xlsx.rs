//! Excel backend: calamine for reading, rust_xlsxwriter for writing.
//!
//! Reads surface the first worksheet only — KUDiR exports and the
//! summaries built from them are single-sheet files.

use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::Workbook;

use crate::table::{Cell, Table};

/// Read the first worksheet into a raw table. No header interpretation
/// happens here; layout parsers decide which rows matter.
pub fn read_xlsx(path: &Path) -> Result<Table> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("opening {}", path.display()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let Some(first) = sheet_names.first() else {
        bail!("{}: workbook has no sheets", path.display());
    };
    let range = workbook
        .worksheet_range(first)
        .with_context(|| format!("reading sheet '{}' of {}", first, path.display()))?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    Ok(Table {
        headers: Vec::new(),
        rows,
    })
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
        // Date cells keep their serial value; ledger parsers treat the
        // date/document column as opaque anyway.
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Write a table to a single-sheet xlsx file: header row first (when
/// present), then typed cells.
pub fn write_xlsx(path: &Path, table: &Table) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let mut row_idx: u32 = 0;
    if !table.headers.is_empty() {
        for (col, header) in table.headers.iter().enumerate() {
            worksheet
                .write_string(row_idx, col as u16, header)
                .map_err(|e| anyhow::anyhow!("writing header '{header}': {e}"))?;
        }
        row_idx += 1;
    }

    for row in &table.rows {
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet
                        .write_string(row_idx, col as u16, s)
                        .map_err(|e| anyhow::anyhow!("writing cell ({row_idx}, {col}): {e}"))?;
                }
                Cell::Number(n) => {
                    worksheet
                        .write_number(row_idx, col as u16, *n)
                        .map_err(|e| anyhow::anyhow!("writing cell ({row_idx}, {col}): {e}"))?;
                }
            }
        }
        row_idx += 1;
    }

    workbook
        .save(path)
        .with_context(|| format!("saving {}", path.display()))?;
    Ok(())
}
