//! In-memory tabular model shared by the spreadsheet and CSV backends.

use std::path::Path;

use anyhow::{Context, Result, bail};
use kudir_core::{ContractorTotal, SummaryRow, parse_amount};

use crate::xlsx;

/// One table cell, typed the way spreadsheet readers surface values.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Text content, if the cell holds text. Numeric cells yield `None`,
    /// which makes counterparty extraction on a non-string cell a no-match
    /// rather than an error.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret the cell as a monetary amount. Numeric cells pass
    /// through; text cells go through locale normalization; an empty or
    /// unparseable cell is absent, and the aggregation call sites decide
    /// what absence means.
    pub fn amount(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => parse_amount(s).ok(),
            Cell::Empty => None,
        }
    }

    /// Stringified form for opaque fields (ids, date/document refs) and
    /// for header rows. Whole numbers print without a decimal tail.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
        }
    }
}

/// A raw grid of cells plus an optional header row.
///
/// Readers return raw grids (`headers` empty, every sheet row in `rows`);
/// layout parsers decide which rows are banners, headers or data. Writers
/// emit `headers` as the first row when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Read a tabular file, dispatching on the extension: `.xlsx`/`.xls` via
/// the spreadsheet backend, `.csv` via the CSV backend.
pub fn read_table(path: &Path) -> Result<Table> {
    match extension_of(path).as_deref() {
        Some("xlsx") | Some("xls") => xlsx::read_xlsx(path),
        Some("csv") => read_csv(path),
        _ => bail!("unsupported table format: {}", path.display()),
    }
}

/// Write a tabular file, dispatching on the extension like [`read_table`].
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    match extension_of(path).as_deref() {
        Some("xlsx") => xlsx::write_xlsx(path, table),
        Some("csv") => write_csv(path, table),
        _ => bail!("unsupported table format: {}", path.display()),
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.with_context(|| format!("reading {}", path.display()))?;
        let row = record
            .iter()
            .map(|field| {
                let field = field.trim();
                if field.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }
    Ok(Table {
        headers: Vec::new(),
        rows,
    })
}

fn write_csv(path: &Path, table: &Table) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    if !table.headers.is_empty() {
        writer.write_record(&table.headers)?;
    }
    for row in &table.rows {
        let fields: Vec<String> = row.iter().map(Cell::display).collect();
        writer.write_record(&fields)?;
    }
    writer
        .flush()
        .with_context(|| format!("saving {}", path.display()))?;
    Ok(())
}

/// Lay out fixed-layout summaries as a writable table.
pub fn contractor_table(totals: &[ContractorTotal]) -> Table {
    Table {
        headers: vec!["Contractor".to_string(), "Expenses".to_string()],
        rows: totals
            .iter()
            .map(|t| vec![Cell::Text(t.contractor.clone()), Cell::Number(t.expenses)])
            .collect(),
    }
}

/// Lay out counterparty summaries as a writable table. The headers reuse
/// the canonical Russian names so a saved report is itself mergeable.
pub fn summary_table(rows: &[SummaryRow]) -> Table {
    use kudir_core::CanonicalColumn;

    let mut headers: Vec<String> = CanonicalColumn::ALL
        .iter()
        .map(|c| c.header().to_string())
        .collect();
    headers.push("Разница".to_string());

    Table {
        headers,
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    Cell::Text(row.counterparty.clone()),
                    Cell::Number(row.total_expenses),
                    Cell::Number(row.tax_base_expenses),
                    Cell::Number(row.difference),
                ]
            })
            .collect(),
    }
}
