use guestpulse_corpus::Review;
use serde::{Deserialize, Serialize};

use crate::scorer;

/// Outcome of one batch scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Reviews that received a fresh verdict.
    pub scored: usize,
    /// Reviews left untouched: no text, empty text, or already labeled.
    pub skipped: usize,
}

/// Scores every unlabeled review with non-empty text, in place.
///
/// A review is eligible when its text is present and non-empty and it has
/// no sentiment label yet. Eligible reviews get label, polarity and the
/// binary sarcasm flag written back; everything else is left as it was, so
/// a rerun never rewrites an existing verdict.
pub fn score_reviews(reviews: &mut [Review]) -> BatchReport {
    let mut report = BatchReport {
        scored: 0,
        skipped: 0,
    };

    for review in reviews.iter_mut() {
        let verdict = match review.text.as_deref() {
            Some(text) if !text.is_empty() && review.sentiment_label.is_none() => {
                scorer::score(text)
            }
            _ => {
                report.skipped += 1;
                continue;
            }
        };
        review.set_sentiment(verdict.label.as_str(), verdict.score, verdict.is_sarcastic);
        report.scored += 1;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_only_unlabeled_reviews_with_text() {
        let mut already_scored = Review::new("hotel-aurora", "guest-3").with_text("Dirty room");
        already_scored.set_sentiment("negative", 0.1, false);

        let mut reviews = vec![
            Review::new("hotel-aurora", "guest-1").with_text("Clean and friendly staff"),
            Review::new("hotel-aurora", "guest-2").with_text(""),
            Review::new("hotel-aurora", "guest-4"),
            already_scored,
        ];

        let report = score_reviews(&mut reviews);
        assert_eq!(report.scored, 1);
        assert_eq!(report.skipped, 3);

        assert_eq!(
            reviews[0].sentiment_label.as_deref(),
            Some("very positive")
        );
        assert!(reviews[0].polarity.is_some_and(|p| p > 0.5));
        assert_eq!(reviews[0].subjectivity, Some(0.0));

        assert!(reviews[1].sentiment_label.is_none());
        assert!(reviews[2].sentiment_label.is_none());
        assert_eq!(reviews[3].polarity, Some(0.1));
    }

    #[test]
    fn rerun_never_rewrites_a_verdict() {
        let mut reviews =
            vec![Review::new("hotel-aurora", "guest-1").with_text("Lovely spacious room")];

        let first = score_reviews(&mut reviews);
        assert_eq!(first, BatchReport { scored: 1, skipped: 0 });
        let polarity = reviews[0].polarity;

        let second = score_reviews(&mut reviews);
        assert_eq!(second, BatchReport { scored: 0, skipped: 1 });
        assert_eq!(reviews[0].polarity, polarity);
    }

    #[test]
    fn sarcastic_text_stores_subjectivity_one() {
        let mut reviews =
            vec![Review::new("hotel-aurora", "guest-1").with_text("Oh great, a broken heater.")];
        score_reviews(&mut reviews);
        assert_eq!(reviews[0].subjectivity, Some(1.0));
        assert!(reviews[0].is_sarcastic());
    }
}
