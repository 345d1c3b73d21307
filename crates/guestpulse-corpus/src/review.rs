use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label bucket used when a review has not been scored yet.
pub const UNLABELED: &str = "UNKNOWN";

/// A single customer review.
///
/// Sentiment fields (`sentiment_label`, `polarity`, `subjectivity`) are
/// produced by the upstream scorer and are absent until a review has been
/// scored. `subjectivity` carries the binary sarcasm flag (1.0 or 0.0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Review identifier.
    pub id: Uuid,
    /// Product (hotel) the review is about.
    pub product_id: String,
    /// Author of the review.
    pub user_id: String,
    /// Star rating, usually 1 through 5.
    pub rating: Option<i32>,
    /// Short headline.
    pub title: Option<String>,
    /// Free-form review body.
    pub text: Option<String>,
    /// When the review was written.
    pub timestamp: Option<DateTime<Utc>>,
    /// Scored sentiment label.
    pub sentiment_label: Option<String>,
    /// Scored sentiment strength in [0, 1].
    pub polarity: Option<f64>,
    /// Binary sarcasm flag stored as 1.0 or 0.0.
    pub subjectivity: Option<f64>,
    /// When the record entered the corpus.
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Creates an unscored review for the given product and author.
    #[must_use]
    pub fn new(product_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: product_id.into(),
            user_id: user_id.into(),
            rating: None,
            title: None,
            text: None,
            timestamp: None,
            sentiment_label: None,
            polarity: None,
            subjectivity: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the star rating.
    #[must_use]
    pub fn with_rating(mut self, rating: i32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the headline.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the review body.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the review timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Records the scorer verdict on this review.
    pub fn set_sentiment(
        &mut self,
        label: impl Into<String>,
        polarity: f64,
        sarcastic: bool,
    ) {
        self.sentiment_label = Some(label.into());
        self.polarity = Some(polarity);
        self.subjectivity = Some(if sarcastic { 1.0 } else { 0.0 });
    }

    /// True when the stored sarcasm flag is set.
    #[must_use]
    pub fn is_sarcastic(&self) -> bool {
        self.subjectivity.is_some_and(|s| (s - 1.0).abs() < f64::EPSILON)
    }
}

/// Aggregate statistics over the whole corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSummary {
    /// Number of reviews in the corpus.
    pub total_reviews: usize,
    /// Mean rating over rated reviews, absent when none are rated.
    pub average_rating: Option<f64>,
    /// Mean polarity over scored reviews, absent when none are scored.
    pub average_polarity: Option<f64>,
    /// Review count per sentiment label, unscored reviews under `UNKNOWN`.
    pub sentiment_counts: IndexMap<String, usize>,
    /// Reviews flagged as sarcastic.
    pub sarcasm_count: usize,
    /// Share of sarcastic reviews, 0.0 for an empty corpus.
    pub sarcasm_rate: f64,
}

impl CorpusSummary {
    /// Computes summary statistics for a set of reviews.
    #[must_use]
    pub fn compute(reviews: &[Review]) -> Self {
        let total_reviews = reviews.len();

        let ratings: Vec<f64> = reviews
            .iter()
            .filter_map(|r| r.rating.map(f64::from))
            .collect();
        let polarities: Vec<f64> = reviews.iter().filter_map(|r| r.polarity).collect();

        let mut sentiment_counts: IndexMap<String, usize> = IndexMap::new();
        for review in reviews {
            let label = review
                .sentiment_label
                .clone()
                .unwrap_or_else(|| UNLABELED.to_string());
            *sentiment_counts.entry(label).or_insert(0) += 1;
        }

        let sarcasm_count = reviews.iter().filter(|r| r.is_sarcastic()).count();
        let sarcasm_rate = if total_reviews > 0 {
            sarcasm_count as f64 / total_reviews as f64
        } else {
            0.0
        };

        Self {
            total_reviews,
            average_rating: non_empty_mean(&ratings),
            average_polarity: non_empty_mean(&polarities),
            sentiment_counts,
            sarcasm_count,
            sarcasm_rate,
        }
    }
}

fn non_empty_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_optional_fields() {
        let review = Review::new("hotel-aurora", "guest-17")
            .with_rating(4)
            .with_title("Pleasant weekend")
            .with_text("Clean and friendly.");
        assert_eq!(review.rating, Some(4));
        assert_eq!(review.title.as_deref(), Some("Pleasant weekend"));
        assert_eq!(review.text.as_deref(), Some("Clean and friendly."));
        assert!(review.sentiment_label.is_none());
        assert!(!review.is_sarcastic());
    }

    #[test]
    fn set_sentiment_stores_binary_sarcasm_flag() {
        let mut review = Review::new("hotel-aurora", "guest-17").with_text("Great, just great.");
        review.set_sentiment("negative", 0.25, true);
        assert_eq!(review.sentiment_label.as_deref(), Some("negative"));
        assert_eq!(review.subjectivity, Some(1.0));
        assert!(review.is_sarcastic());

        review.set_sentiment("positive", 0.9, false);
        assert_eq!(review.subjectivity, Some(0.0));
        assert!(!review.is_sarcastic());
    }

    #[test]
    fn summary_groups_unscored_reviews_under_unknown() {
        let mut scored = Review::new("h", "u").with_rating(5).with_text("Lovely");
        scored.set_sentiment("positive", 0.8, false);
        let mut sarcastic = Review::new("h", "u").with_rating(1).with_text("Sure, perfect");
        sarcastic.set_sentiment("negative", 0.2, true);
        let unscored = Review::new("h", "u").with_rating(3);

        let summary = CorpusSummary::compute(&[scored, sarcastic, unscored]);
        assert_eq!(summary.total_reviews, 3);
        assert_eq!(summary.sentiment_counts.get("positive"), Some(&1));
        assert_eq!(summary.sentiment_counts.get("negative"), Some(&1));
        assert_eq!(summary.sentiment_counts.get(UNLABELED), Some(&1));
        assert_eq!(summary.sarcasm_count, 1);
        assert!((summary.sarcasm_rate - 1.0 / 3.0).abs() < 1e-12);
        assert!((summary.average_rating.unwrap() - 3.0).abs() < 1e-12);
        assert!((summary.average_polarity.unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn summary_of_empty_corpus_has_no_averages() {
        let summary = CorpusSummary::compute(&[]);
        assert_eq!(summary.total_reviews, 0);
        assert!(summary.average_rating.is_none());
        assert!(summary.average_polarity.is_none());
        assert!(summary.sentiment_counts.is_empty());
        assert_eq!(summary.sarcasm_count, 0);
        assert!(summary.sarcasm_rate.abs() < f64::EPSILON);
    }
}
