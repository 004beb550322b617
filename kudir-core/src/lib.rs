//! kudir-core: domain types and core logic for summarizing KUDiR ledger
//! exports — counterparty extraction, amount normalization, per-key
//! aggregation, and canonical-column schema reconciliation.

pub mod aggregate;
pub mod amount;
pub mod error;
pub mod extract;
pub mod record;
pub mod schema;

pub use aggregate::{merge_summaries, summarize_contractors, summarize_counterparties};
pub use amount::{parse_amount, round2};
pub use error::{KudirError, Result};
pub use extract::PartyRules;
pub use record::{ContractorTotal, LedgerRecord, SummaryRow};
pub use schema::{CanonicalColumn, ColumnMap, normalize_header, reconcile_headers};
