//! Pre-summarized per-counterparty files: reconcile loosely named
//! headers onto the canonical column set and rebuild summary rows.

use anyhow::{Result, bail};
use kudir_core::{SummaryRow, reconcile_headers};

use crate::table::{Cell, Table};

/// Parse one summary file's raw grid into canonical rows.
///
/// The first row must be the header row. A difference column in the
/// file, if any, is ignored — the difference is recomputed after the
/// merge. Rows with an empty counterparty cell are skipped the same way
/// records without an extractable counterparty are.
pub fn parse_summary(table: &Table) -> Result<Vec<SummaryRow>> {
    let Some(header_row) = table.rows.first() else {
        bail!("summary table is empty");
    };
    let headers: Vec<String> = header_row.iter().map(Cell::display).collect();
    let map = reconcile_headers(&headers)?;
    log::info!(
        "columns {:?}: counterparty={}, total={}, tax_base={}",
        headers,
        map.counterparty,
        map.total_expenses,
        map.tax_base_expenses
    );

    let mut rows = Vec::new();
    for row in table.rows.iter().skip(1) {
        if row.iter().all(Cell::is_empty) {
            continue;
        }
        let cell = |i: usize| row.get(i).cloned().unwrap_or(Cell::Empty);
        let counterparty = cell(map.counterparty).display();
        if counterparty.is_empty() {
            continue;
        }
        let total = cell(map.total_expenses).amount().unwrap_or(0.0);
        let tax_base = cell(map.tax_base_expenses).amount().unwrap_or(0.0);
        rows.push(SummaryRow::new(counterparty, total, tax_base));
    }
    Ok(rows)
}
