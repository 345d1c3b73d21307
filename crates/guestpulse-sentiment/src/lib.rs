#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Deterministic lexicon sentiment scorer for guest reviews.
//!
//! Stands in for the upstream model service: a star verdict, the matching
//! five-step label, a strength score in [0, 1] and a sarcasm flag, all
//! derived from fixed vocabularies so repeated runs agree byte for byte.

mod lexicon;

/// Batch scoring over stored reviews.
pub mod batch;
/// Single-text scoring.
pub mod scorer;
/// Verdict and label types.
pub mod verdict;

pub use batch::{score_reviews, BatchReport};
pub use scorer::score;
pub use verdict::{SentimentLabel, Verdict};
