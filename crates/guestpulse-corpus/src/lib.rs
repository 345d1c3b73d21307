#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Review corpus model, JSONL-backed persistence, filtering and CSV import.

/// Filtering of review snapshots.
pub mod filter;
/// CSV import of review exports.
pub mod import;
/// Review record and corpus-wide summary statistics.
pub mod review;
/// File-system backed review store.
pub mod store;

pub use filter::{ReviewFilter, TextRequirement};
pub use import::{import_csv, parse_review_date, ImportReport};
pub use review::{CorpusSummary, Review};
pub use store::{CorpusError, ReviewStore};
