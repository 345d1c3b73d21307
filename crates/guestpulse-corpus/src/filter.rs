use chrono::{DateTime, Utc};

use crate::review::Review;

/// Requirement on the review text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRequirement {
    /// Text may be present, empty or absent.
    #[default]
    Any,
    /// Text must be present; an empty string qualifies.
    Present,
    /// Text must be present and non-empty.
    NonEmpty,
}

/// Snapshot filter applied before handing reviews to an aggregation.
///
/// Date bounds are inclusive and compare on the review timestamp; a review
/// without a timestamp passes only while no bound is set. `offset` and
/// `limit` apply after all predicates, in stored order.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    product_id: Option<String>,
    user_id: Option<String>,
    min_rating: Option<i32>,
    max_rating: Option<i32>,
    text: TextRequirement,
    require_rating: bool,
    require_polarity: bool,
    require_timestamp: bool,
    offset: usize,
    limit: Option<usize>,
}

impl ReviewFilter {
    /// Creates a filter that passes every review.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps reviews written at or after the given instant.
    #[must_use]
    pub fn since(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Keeps reviews written at or before the given instant.
    #[must_use]
    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Keeps reviews for one product.
    #[must_use]
    pub fn product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Keeps reviews by one author.
    #[must_use]
    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Keeps reviews rated at or above the given value.
    #[must_use]
    pub fn min_rating(mut self, rating: i32) -> Self {
        self.min_rating = Some(rating);
        self
    }

    /// Keeps reviews rated at or below the given value.
    #[must_use]
    pub fn max_rating(mut self, rating: i32) -> Self {
        self.max_rating = Some(rating);
        self
    }

    /// Applies a text-field requirement.
    #[must_use]
    pub fn text(mut self, requirement: TextRequirement) -> Self {
        self.text = requirement;
        self
    }

    /// Keeps only rated reviews.
    #[must_use]
    pub fn require_rating(mut self) -> Self {
        self.require_rating = true;
        self
    }

    /// Keeps only reviews with a scored polarity.
    #[must_use]
    pub fn require_polarity(mut self) -> Self {
        self.require_polarity = true;
        self
    }

    /// Keeps only reviews with a timestamp.
    #[must_use]
    pub fn require_timestamp(mut self) -> Self {
        self.require_timestamp = true;
        self
    }

    /// Skips the first `offset` matching reviews.
    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Caps the number of returned reviews.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Tests a single review against every predicate.
    #[must_use]
    pub fn matches(&self, review: &Review) -> bool {
        if self.start.is_some() || self.end.is_some() {
            let Some(ts) = review.timestamp else {
                return false;
            };
            if self.start.is_some_and(|start| ts < start) {
                return false;
            }
            if self.end.is_some_and(|end| ts > end) {
                return false;
            }
        }
        if let Some(product_id) = &self.product_id {
            if review.product_id != *product_id {
                return false;
            }
        }
        if let Some(user_id) = &self.user_id {
            if review.user_id != *user_id {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if !review.rating.is_some_and(|r| r >= min) {
                return false;
            }
        }
        if let Some(max) = self.max_rating {
            if !review.rating.is_some_and(|r| r <= max) {
                return false;
            }
        }
        let text_ok = match self.text {
            TextRequirement::Any => true,
            TextRequirement::Present => review.text.is_some(),
            TextRequirement::NonEmpty => review.text.as_deref().is_some_and(|t| !t.is_empty()),
        };
        if !text_ok {
            return false;
        }
        if self.require_rating && review.rating.is_none() {
            return false;
        }
        if self.require_polarity && review.polarity.is_none() {
            return false;
        }
        if self.require_timestamp && review.timestamp.is_none() {
            return false;
        }
        true
    }

    /// Produces a filtered snapshot in stored order.
    #[must_use]
    pub fn apply(&self, reviews: &[Review]) -> Vec<Review> {
        let matching = reviews.iter().filter(|r| self.matches(r)).skip(self.offset);
        match self.limit {
            Some(limit) => matching.take(limit).cloned().collect(),
            None => matching.cloned().collect(),
        }
    }
}
