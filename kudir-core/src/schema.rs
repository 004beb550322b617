//! Canonical-column reconciliation for loosely labeled summary files.
//!
//! Per-file summaries come back with inconsistently cased, spaced and
//! punctuated headers ("Всего расходов", "всего-расходов (ИТОГО)", ...).
//! Each canonical target carries the set of substrings a header must ALL
//! contain to qualify; the rule list is explicit and ordered, and a header
//! claims only the first target it qualifies for.

use crate::error::{KudirError, Result};

/// The reconciled schema every summary table is mapped onto before merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalColumn {
    Counterparty,
    TotalExpenses,
    TaxBaseExpenses,
}

impl CanonicalColumn {
    /// Rule-list evaluation order (also the output column order).
    pub const ALL: [CanonicalColumn; 3] = [
        CanonicalColumn::Counterparty,
        CanonicalColumn::TotalExpenses,
        CanonicalColumn::TaxBaseExpenses,
    ];

    /// Header written when a canonical table is saved.
    pub fn header(&self) -> &'static str {
        match self {
            CanonicalColumn::Counterparty => "Контрагент",
            CanonicalColumn::TotalExpenses => "Всего расходов",
            CanonicalColumn::TaxBaseExpenses => "Для налоговой базы",
        }
    }

    /// Substrings a normalized header must all contain to map here.
    fn required_substrings(&self) -> &'static [&'static str] {
        match self {
            CanonicalColumn::Counterparty => &["контрагент"],
            CanonicalColumn::TotalExpenses => &["всего", "расход"],
            CanonicalColumn::TaxBaseExpenses => &["налог", "баз"],
        }
    }
}

/// Where each canonical column was found in one file's header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub counterparty: usize,
    pub total_expenses: usize,
    pub tax_base_expenses: usize,
}

/// Normalize a header before substring matching: trim, lowercase, spaces
/// and hyphens to underscores, quotes stripped.
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
        .replace(['"', '\''], "")
}

/// Map arbitrary headers onto the canonical column set.
///
/// When several headers qualify for the same target, the LAST matching
/// header in column order wins (overwrite semantics — preserved source
/// behavior, not first-wins). If any target stays unmapped the whole
/// table is rejected with the missing canonical names.
pub fn reconcile_headers(headers: &[String]) -> Result<ColumnMap> {
    let mut found: [Option<usize>; 3] = [None; 3];
    for (idx, header) in headers.iter().enumerate() {
        let normalized = normalize_header(header);
        for (slot, column) in CanonicalColumn::ALL.iter().enumerate() {
            if column
                .required_substrings()
                .iter()
                .all(|s| normalized.contains(s))
            {
                found[slot] = Some(idx);
                // A header claims only the first target it qualifies for.
                break;
            }
        }
    }
    match found {
        [Some(counterparty), Some(total_expenses), Some(tax_base_expenses)] => Ok(ColumnMap {
            counterparty,
            total_expenses,
            tax_base_expenses,
        }),
        _ => {
            let missing: Vec<&str> = CanonicalColumn::ALL
                .iter()
                .zip(found)
                .filter(|(_, hit)| hit.is_none())
                .map(|(column, _)| column.header())
                .collect();
            Err(KudirError::MissingColumns(missing.join(", ")))
        }
    }
}
