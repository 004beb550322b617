//! Fixed-layout KUDiR export: a six-row report banner, then six
//! positional columns (id, date/document, description, contractor info,
//! income, expenses). There is no usable header row — the columns are
//! known by position.

use kudir_core::LedgerRecord;

use crate::table::{Cell, Table};

/// Rows of preamble (banner plus merged header cells) before data starts.
const HEADER_ROWS: usize = 6;

const COL_ID: usize = 0;
const COL_DATE_DOC: usize = 1;
const COL_DESCRIPTION: usize = 2;
const COL_CONTRACTOR_INFO: usize = 3;
const COL_INCOME: usize = 4;
const COL_EXPENSES: usize = 5;

/// Turn a raw fixed-layout grid into ledger records. Spacer and
/// section-total rows come back entirely empty and are skipped; a row
/// with an empty expense cell is kept (it contributes 0 downstream).
pub fn parse_fixed_ledger(table: &Table) -> Vec<LedgerRecord> {
    table
        .rows
        .iter()
        .skip(HEADER_ROWS)
        .filter_map(|row| parse_row(row))
        .collect()
}

fn parse_row(row: &[Cell]) -> Option<LedgerRecord> {
    if row.iter().all(Cell::is_empty) {
        return None;
    }
    let cell = |i: usize| row.get(i).cloned().unwrap_or(Cell::Empty);
    Some(LedgerRecord {
        id: cell(COL_ID).display(),
        date_doc: cell(COL_DATE_DOC).display(),
        // Non-text description/contractor cells become empty strings,
        // which extraction treats as no-match.
        description: cell(COL_DESCRIPTION).as_text().unwrap_or_default().to_string(),
        contractor_info: cell(COL_CONTRACTOR_INFO)
            .as_text()
            .unwrap_or_default()
            .to_string(),
        income: cell(COL_INCOME).amount(),
        expense: cell(COL_EXPENSES).amount(),
        tax_base_expense: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banner_rows() -> Vec<Vec<Cell>> {
        let mut rows = vec![vec![Cell::Text("Книга учета доходов и расходов".into())]];
        rows.resize(HEADER_ROWS, vec![Cell::Empty]);
        rows
    }

    #[test]
    fn skips_banner_and_reads_positional_columns() {
        let mut rows = banner_rows();
        rows.push(vec![
            Cell::Number(1.0),
            Cell::Text("№ 101 от 12.03.2024".into()),
            Cell::Text("Оплата по счету".into()),
            Cell::Text("ООО \"АТЛАНТИДА\"".into()),
            Cell::Empty,
            Cell::Text("1 500,00".into()),
        ]);
        let records = parse_fixed_ledger(&Table {
            headers: Vec::new(),
            rows,
        });
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, "1");
        assert_eq!(record.contractor_info, "ООО \"АТЛАНТИДА\"");
        assert_eq!(record.income, None);
        assert_eq!(record.expense, Some(1500.0));
    }

    #[test]
    fn empty_spacer_rows_are_dropped() {
        let mut rows = banner_rows();
        rows.push(vec![Cell::Empty, Cell::Empty, Cell::Empty]);
        rows.push(vec![
            Cell::Number(2.0),
            Cell::Text("№ 102".into()),
            Cell::Text("Возврат".into()),
            Cell::Text("ИП Петров".into()),
            Cell::Number(300.0),
            Cell::Empty,
        ]);
        let records = parse_fixed_ledger(&Table {
            headers: Vec::new(),
            rows,
        });
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].income, Some(300.0));
        assert_eq!(records[0].expense, None);
    }

    #[test]
    fn numeric_contractor_cell_reads_as_empty_text() {
        let mut rows = banner_rows();
        rows.push(vec![
            Cell::Number(3.0),
            Cell::Empty,
            Cell::Empty,
            Cell::Number(770123456.0),
            Cell::Empty,
            Cell::Number(10.0),
        ]);
        let records = parse_fixed_ledger(&Table {
            headers: Vec::new(),
            rows,
        });
        assert_eq!(records[0].contractor_info, "");
    }
}
