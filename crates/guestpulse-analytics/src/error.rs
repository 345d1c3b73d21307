use thiserror::Error;

use crate::word_frequency::TopK;

/// Errors for caller-supplied engine parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Requested result size is outside the accepted range.
    #[error("top-k must be between {min} and {max}, got {got}")]
    TopKOutOfRange {
        /// Smallest accepted value.
        min: usize,
        /// Largest accepted value.
        max: usize,
        /// Value the caller supplied.
        got: usize,
    },
    /// Granularity selector is not one of the accepted names.
    #[error("unknown granularity '{0}', expected daily, weekly or monthly")]
    UnknownGranularity(String),
}

impl AnalyticsError {
    /// Builds the out-of-range error for a rejected top-k request.
    #[must_use]
    pub fn top_k_out_of_range(got: usize) -> Self {
        Self::TopKOutOfRange {
            min: TopK::MIN,
            max: TopK::MAX,
            got,
        }
    }
}
