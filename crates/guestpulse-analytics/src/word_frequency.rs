use guestpulse_corpus::Review;
use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::{error::AnalyticsError, lexicon, normalize};

/// Validated result-size limit for top-word rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TopK(usize);

impl TopK {
    /// Smallest accepted limit.
    pub const MIN: usize = 1;
    /// Largest accepted limit.
    pub const MAX: usize = 100;
    /// Limit used when the caller does not supply one.
    pub const DEFAULT: usize = 20;

    /// Validates a requested limit, rejecting values outside 1..=100.
    pub fn new(value: usize) -> Result<Self, AnalyticsError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AnalyticsError::top_k_out_of_range(value))
        }
    }

    /// Returns the validated limit.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for TopK {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

// Deserialized limits run through the same range check as `new`.
impl<'de> Deserialize<'de> for TopK {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = usize::deserialize(deserializer)?;
        Self::new(value).map_err(de::Error::custom)
    }
}

/// One ranked lexicon word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// The lexicon word.
    pub word: String,
    /// Total occurrences across all scanned reviews.
    pub count: u64,
}

/// Outcome of a word-frequency scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordFrequencyReport {
    /// Reviews with a text field, whether or not any token survived.
    pub total_reviews_scanned: usize,
    /// Distinct reviews containing at least one positive word.
    pub reviews_with_positive_words: usize,
    /// Distinct reviews containing at least one negative word.
    pub reviews_with_negative_words: usize,
    /// Limit the rankings were cut to.
    pub top_k: usize,
    /// Highest-count positive words, ties in first-encounter order.
    pub positive_top_words: Vec<WordCount>,
    /// Highest-count negative words, ties in first-encounter order.
    pub negative_top_words: Vec<WordCount>,
}

/// Counts positive and negative lexicon words across a review snapshot.
///
/// Occurrence counts are uncapped; the per-review "contains a positive or
/// negative word" tallies count each review at most once. A token present
/// in both vocabularies feeds both counters.
#[must_use]
pub fn word_frequency(reviews: &[Review], top_k: TopK) -> WordFrequencyReport {
    let mut positive_counts: IndexMap<String, u64> = IndexMap::new();
    let mut negative_counts: IndexMap<String, u64> = IndexMap::new();
    let mut scanned = 0usize;
    let mut with_positive = 0usize;
    let mut with_negative = 0usize;

    for review in reviews {
        let Some(text) = review.text.as_deref() else {
            continue;
        };
        scanned += 1;

        let mut found_positive = false;
        let mut found_negative = false;
        for token in normalize::clean_tokens(text) {
            if lexicon::is_positive_word(&token) {
                *positive_counts.entry(token.clone()).or_insert(0) += 1;
                found_positive = true;
            }
            if lexicon::is_negative_word(&token) {
                *negative_counts.entry(token).or_insert(0) += 1;
                found_negative = true;
            }
        }
        if found_positive {
            with_positive += 1;
        }
        if found_negative {
            with_negative += 1;
        }
    }

    WordFrequencyReport {
        total_reviews_scanned: scanned,
        reviews_with_positive_words: with_positive,
        reviews_with_negative_words: with_negative,
        top_k: top_k.get(),
        positive_top_words: top_words(positive_counts, top_k.get()),
        negative_top_words: top_words(negative_counts, top_k.get()),
    }
}

/// Ranks counter entries by descending count, keeping insertion order for
/// equal counts, and cuts the list to `k`.
fn top_words(counts: IndexMap<String, u64>, k: usize) -> Vec<WordCount> {
    let mut ranked: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(k);
    ranked
}
