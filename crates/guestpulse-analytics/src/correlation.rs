use guestpulse_corpus::Review;
use serde::{Deserialize, Serialize};

use crate::{normalize, stats};

/// Rating values that get their own row in the per-rating table.
const RATING_SCALE: std::ops::RangeInclusive<i32> = 1..=5;

/// Mean review length for one rating value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingAverage {
    /// Rating value, 1 through 5.
    pub rating: i32,
    /// Mean letter count, absent when no review carries this rating.
    pub average_length: Option<f64>,
}

/// One paired observation for the scatter view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingLengthPoint {
    /// Star rating.
    pub rating: i32,
    /// Unicode letter count of the review text.
    pub letter_count: usize,
}

/// Why a correlation could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateSample {
    /// Fewer than two paired observations.
    InsufficientPoints,
    /// Every sampled review has the same rating.
    ConstantRatings,
    /// Every sampled review has the same letter count.
    ConstantLengths,
}

/// Outcome of a rating-vs-length analysis.
///
/// A degenerate sample is reported as [`CorrelationReport::Undefined`]
/// with the per-rating table it could still compute, never as a zero or
/// `NaN` coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CorrelationReport {
    /// The filtered snapshot held no usable review.
    NoData,
    /// The sample cannot support a Pearson coefficient.
    Undefined {
        /// Mean letter count per rating 1..=5.
        avg_length_per_rating: Vec<RatingAverage>,
        /// Number of paired observations.
        sample_size: usize,
        /// Single cause that made the coefficient undefined.
        reason: DegenerateSample,
    },
    /// Pearson coefficient with its significance.
    Computed {
        /// Mean letter count per rating 1..=5.
        avg_length_per_rating: Vec<RatingAverage>,
        /// Pearson correlation between rating and letter count.
        pearson_r: f64,
        /// Two-tailed p-value of the coefficient.
        p_value: f64,
        /// Number of paired observations.
        sample_size: usize,
    },
}

/// Extracts the paired (rating, letter count) sample for the scatter view.
///
/// Reviews without a rating or with absent or empty text are skipped.
/// Ratings outside 1..=5 stay in the sample.
#[must_use]
pub fn rating_length_sample(reviews: &[Review]) -> Vec<RatingLengthPoint> {
    reviews
        .iter()
        .filter_map(|review| {
            let rating = review.rating?;
            let text = review.text.as_deref().filter(|t| !t.is_empty())?;
            Some(RatingLengthPoint {
                rating,
                letter_count: normalize::letter_count(text),
            })
        })
        .collect()
}

/// Relates star rating to review length over a snapshot.
///
/// Every paired observation feeds the Pearson coefficient; only ratings
/// 1..=5 get a row in the per-rating average table.
#[must_use]
pub fn rating_length_correlation(reviews: &[Review]) -> CorrelationReport {
    let sample = rating_length_sample(reviews);
    if sample.is_empty() {
        return CorrelationReport::NoData;
    }

    let avg_length_per_rating = averages_by_rating(&sample);
    let sample_size = sample.len();

    let ratings: Vec<f64> = sample.iter().map(|p| f64::from(p.rating)).collect();
    let lengths: Vec<f64> = sample.iter().map(|p| p.letter_count as f64).collect();

    match stats::pearson(&ratings, &lengths) {
        Some(pearson_r) => CorrelationReport::Computed {
            avg_length_per_rating,
            pearson_r,
            p_value: stats::pearson_two_tailed_p(pearson_r, sample_size),
            sample_size,
        },
        None => CorrelationReport::Undefined {
            avg_length_per_rating,
            sample_size,
            reason: degenerate_reason(&sample),
        },
    }
}

fn averages_by_rating(sample: &[RatingLengthPoint]) -> Vec<RatingAverage> {
    RATING_SCALE
        .map(|rating| {
            let lengths: Vec<f64> = sample
                .iter()
                .filter(|p| p.rating == rating)
                .map(|p| p.letter_count as f64)
                .collect();
            RatingAverage {
                rating,
                average_length: stats::mean(&lengths),
            }
        })
        .collect()
}

fn degenerate_reason(sample: &[RatingLengthPoint]) -> DegenerateSample {
    if sample.len() < 2 {
        return DegenerateSample::InsufficientPoints;
    }
    if sample.windows(2).all(|w| w[0].rating == w[1].rating) {
        return DegenerateSample::ConstantRatings;
    }
    DegenerateSample::ConstantLengths
}
