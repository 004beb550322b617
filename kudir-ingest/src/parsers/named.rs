//! Named-column KUDiR layout: the first row carries headers, the second
//! row is a column-numbering row and is skipped, data starts at the third.
//! Columns are located by header substrings, not positions, because the
//! exports vary in wording.

use anyhow::{Result, bail};
use kudir_core::{LedgerRecord, normalize_header};

use crate::table::{Cell, Table};

/// Substrings a normalized header must all contain per column. The
/// tax-base rule requires "расход" too, so it cannot claim the income
/// tax-base column that some exports carry alongside it.
const CONTENT: &[&str] = &["содержан"];
const TOTAL_EXPENSES: &[&str] = &["всего", "расход"];
const TAX_BASE_EXPENSES: &[&str] = &["расход", "налог", "баз"];
const INCOME: &[&str] = &["доход"];

const COL_ID: usize = 0;
const COL_DATE_DOC: usize = 1;

/// Turn a raw named-layout grid into ledger records.
pub fn parse_named_ledger(table: &Table) -> Result<Vec<LedgerRecord>> {
    let Some(header_row) = table.rows.first() else {
        bail!("ledger table is empty");
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| normalize_header(&cell.display()))
        .collect();

    let find = |required: &[&str]| {
        headers
            .iter()
            .position(|header| required.iter().all(|s| header.contains(s)))
    };

    let content = find(CONTENT);
    let total = find(TOTAL_EXPENSES);
    let tax_base = find(TAX_BASE_EXPENSES);
    let (Some(content), Some(total), Some(tax_base)) = (content, total, tax_base) else {
        let mut missing = Vec::new();
        if content.is_none() {
            missing.push("содержание операции");
        }
        if total.is_none() {
            missing.push("всего расходов");
        }
        if tax_base.is_none() {
            missing.push("расходы для налоговой базы");
        }
        bail!("missing required columns: {}", missing.join(", "));
    };
    let income = find(INCOME);

    let records = table
        .rows
        .iter()
        .skip(2) // header row + the numbering row under it
        .filter(|row| !row.iter().all(Cell::is_empty))
        .map(|row| {
            let cell = |i: usize| row.get(i).cloned().unwrap_or(Cell::Empty);
            LedgerRecord {
                id: cell(COL_ID).display(),
                date_doc: cell(COL_DATE_DOC).display(),
                description: cell(content).as_text().unwrap_or_default().to_string(),
                contractor_info: String::new(),
                income: income.and_then(|i| cell(i).amount()),
                expense: cell(total).amount(),
                tax_base_expense: cell(tax_base).amount(),
            }
        })
        .collect();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.into())
    }

    fn ledger_rows() -> Vec<Vec<Cell>> {
        vec![
            vec![
                text("№ п/п"),
                text("Дата и номер первичного документа"),
                text("Содержание операции"),
                text("Доходы, учитываемые при исчислении налоговой базы"),
                text("Всего расходов"),
                text("в т.ч. расходы, учитываемые при исчислении налоговой базы"),
            ],
            vec![
                text("1"),
                text("2"),
                text("3"),
                text("4"),
                text("5"),
                text("6"),
            ],
            vec![
                Cell::Number(1.0),
                text("№ 55 от 02.02.2024"),
                text("Оплата ООО \"ВЕГА\" за материалы"),
                Cell::Empty,
                text("1 000,00"),
                Cell::Number(800.0),
            ],
        ]
    }

    #[test]
    fn locates_columns_by_substring() {
        let records = parse_named_ledger(&Table {
            headers: Vec::new(),
            rows: ledger_rows(),
        })
        .unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.description, "Оплата ООО \"ВЕГА\" за материалы");
        assert_eq!(record.expense, Some(1000.0));
        assert_eq!(record.tax_base_expense, Some(800.0));
        assert_eq!(record.income, None);
    }

    #[test]
    fn numbering_row_is_skipped() {
        let records = parse_named_ledger(&Table {
            headers: Vec::new(),
            rows: ledger_rows(),
        })
        .unwrap();
        // The "1 2 3 4 5 6" row must not become a record.
        assert!(records.iter().all(|r| r.description != "3"));
    }

    #[test]
    fn expense_tax_base_does_not_claim_the_income_column() {
        let rows = ledger_rows();
        let headers: Vec<String> = rows[0].iter().map(|c| normalize_header(&c.display())).collect();
        let tax_base = headers
            .iter()
            .position(|h| TAX_BASE_EXPENSES.iter().all(|s| h.contains(s)))
            .unwrap();
        assert_eq!(tax_base, 5);
    }

    #[test]
    fn missing_columns_abort_with_their_names() {
        let err = parse_named_ledger(&Table {
            headers: Vec::new(),
            rows: vec![vec![text("№ п/п"), text("Содержание операции")]],
        })
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("всего расходов"), "{message}");
    }
}
