//! Ledger record and summary row types shared across the workspace.

use serde::{Deserialize, Serialize};

/// One row of a KUDiR ledger export, layout-agnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Row identifier from the export (opaque, never interpreted)
    pub id: String,
    /// Date and primary-document reference (opaque, never parsed)
    pub date_doc: String,
    /// Free-text operation description
    pub description: String,
    /// Free-text contractor field; may duplicate or extend the description.
    /// Empty for layouts that have no separate contractor column.
    pub contractor_info: String,
    /// Income amount, if the cell held one
    pub income: Option<f64>,
    /// Expense amount
    pub expense: Option<f64>,
    /// Portion of the expense counted toward the simplified-tax base
    pub tax_base_expense: Option<f64>,
}

impl LedgerRecord {
    /// Returns true if the expense cell held a usable number.
    pub fn has_expense(&self) -> bool {
        self.expense.is_some()
    }
}

/// Per-contractor expense total produced from fixed-layout exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorTotal {
    pub contractor: String,
    pub expenses: f64,
}

/// Per-counterparty totals with the tax-base split.
///
/// `difference` is always `total_expenses - tax_base_expenses`; it is
/// recomputed after every aggregation and never carried between merges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub counterparty: String,
    pub total_expenses: f64,
    pub tax_base_expenses: f64,
    pub difference: f64,
}

impl SummaryRow {
    pub fn new(counterparty: impl Into<String>, total_expenses: f64, tax_base_expenses: f64) -> Self {
        Self {
            counterparty: counterparty.into(),
            total_expenses,
            tax_base_expenses,
            difference: total_expenses - tax_base_expenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difference_is_derived_at_construction() {
        let row = SummaryRow::new("ООО \"АТЛАНТИДА\"", 1500.0, 1200.0);
        assert_eq!(row.difference, 300.0);
    }
}
