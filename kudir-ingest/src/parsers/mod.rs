//! Layout-specific ledger parsers: one module per input layout.

pub mod fixed;
pub mod named;
pub mod summary;

pub use fixed::parse_fixed_ledger;
pub use named::parse_named_ledger;
pub use summary::parse_summary;
