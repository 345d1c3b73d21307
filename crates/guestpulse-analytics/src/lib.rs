#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Text analytics aggregation engine over a review corpus snapshot.
//!
//! Every operation is a pure function of the snapshot it receives plus its
//! parameters. Date filtering and non-null requirements belong to the
//! storage side (`guestpulse_corpus::ReviewFilter`); the engine only scans
//! and aggregates.

/// Rating-vs-length correlation analysis.
pub mod correlation;
/// Engine parameter errors.
pub mod error;
/// Fixed sentiment and stopword vocabularies.
pub mod lexicon;
/// Letter counting and token cleaning.
pub mod normalize;
/// Shared numeric helpers.
pub mod stats;
/// Time-bucketed sentiment trend.
pub mod trend;
/// Lexicon word-frequency counting.
pub mod word_frequency;

pub use correlation::{
    rating_length_correlation, rating_length_sample, CorrelationReport, DegenerateSample,
    RatingAverage, RatingLengthPoint,
};
pub use error::AnalyticsError;
pub use normalize::{clean_tokens, letter_count};
pub use trend::{sentiment_trend, Granularity, TrendPoint, TrendReport};
pub use word_frequency::{word_frequency, TopK, WordCount, WordFrequencyReport};
