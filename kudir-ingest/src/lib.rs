//! kudir-ingest: tabular I/O plumbing and layout-specific ledger parsers.
//!
//! The core never touches files; this crate reads spreadsheets into a raw
//! [`table::Table`], hands layout parsers the rows, and writes summary
//! tables back out.

pub mod parsers;
pub mod table;
pub mod xlsx;

pub use parsers::{parse_fixed_ledger, parse_named_ledger, parse_summary};
pub use table::{Cell, Table, contractor_table, read_table, summary_table, write_table};
