//! Grouping and summing of ledger records per extracted counterparty.
//!
//! All aggregation keeps first-seen order so runs are deterministic.
//! A record with no extractable counterparty is dropped entirely; a record
//! whose amount cell is empty or unparseable stays in its group and
//! contributes 0.

use std::collections::HashMap;

use crate::amount::round2;
use crate::extract::PartyRules;
use crate::record::{ContractorTotal, LedgerRecord, SummaryRow};

/// Sum expenses per contractor extracted from `contractor_info`
/// (fixed-layout exports). Totals are rounded to 2 decimal places.
pub fn summarize_contractors(records: &[LedgerRecord], rules: &PartyRules) -> Vec<ContractorTotal> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<ContractorTotal> = Vec::new();

    for record in records {
        let Some(contractor) = rules.extract(&record.contractor_info) else {
            continue;
        };
        let expense = record.expense.unwrap_or(0.0);
        match index.get(&contractor) {
            Some(&i) => totals[i].expenses += expense,
            None => {
                index.insert(contractor.clone(), totals.len());
                totals.push(ContractorTotal {
                    contractor,
                    expenses: expense,
                });
            }
        }
    }

    for total in &mut totals {
        total.expenses = round2(total.expenses);
    }
    totals
}

/// Aggregate named-layout records into per-counterparty summary rows,
/// keying on the canonical counterparty extracted from the operation
/// description. The difference column is computed from the final sums.
pub fn summarize_counterparties(records: &[LedgerRecord], rules: &PartyRules) -> Vec<SummaryRow> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<SummaryRow> = Vec::new();

    for record in records {
        let Some(counterparty) = rules.extract(&record.description) else {
            continue;
        };
        let expense = record.expense.unwrap_or(0.0);
        let tax_base = record.tax_base_expense.unwrap_or(0.0);
        match index.get(&counterparty) {
            Some(&i) => {
                rows[i].total_expenses += expense;
                rows[i].tax_base_expenses += tax_base;
            }
            None => {
                index.insert(counterparty.clone(), rows.len());
                rows.push(SummaryRow::new(counterparty, expense, tax_base));
            }
        }
    }

    recompute_differences(&mut rows);
    rows
}

/// Merge several already-reconciled summaries into one, re-grouping by the
/// stored counterparty string (no re-extraction). The difference is
/// recomputed after the merge, never summed from the inputs.
pub fn merge_summaries(summaries: &[Vec<SummaryRow>]) -> Vec<SummaryRow> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<SummaryRow> = Vec::new();

    for row in summaries.iter().flatten() {
        match index.get(&row.counterparty) {
            Some(&i) => {
                rows[i].total_expenses += row.total_expenses;
                rows[i].tax_base_expenses += row.tax_base_expenses;
            }
            None => {
                index.insert(row.counterparty.clone(), rows.len());
                rows.push(SummaryRow::new(
                    row.counterparty.clone(),
                    row.total_expenses,
                    row.tax_base_expenses,
                ));
            }
        }
    }

    recompute_differences(&mut rows);
    rows
}

fn recompute_differences(rows: &mut [SummaryRow]) {
    for row in rows {
        row.difference = row.total_expenses - row.tax_base_expenses;
    }
}
