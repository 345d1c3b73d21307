use std::fmt;

use serde::{Deserialize, Serialize};

/// Five-step sentiment scale attached to scored reviews.
///
/// The serialized form uses the human-readable labels the corpus stores
/// and the summary statistics group by ("very negative" .. "very positive").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// Strongly unfavourable.
    #[serde(rename = "very negative")]
    VeryNegative,
    /// Unfavourable.
    #[serde(rename = "negative")]
    Negative,
    /// Balanced or signal-free.
    #[serde(rename = "neutral")]
    Neutral,
    /// Favourable.
    #[serde(rename = "positive")]
    Positive,
    /// Strongly favourable.
    #[serde(rename = "very positive")]
    VeryPositive,
}

impl SentimentLabel {
    /// Maps a star verdict onto the label scale.
    #[must_use]
    pub const fn from_stars(stars: u8) -> Self {
        match stars {
            0 | 1 => Self::VeryNegative,
            2 => Self::Negative,
            3 => Self::Neutral,
            4 => Self::Positive,
            _ => Self::VeryPositive,
        }
    }

    /// Stable string form, identical to the serialized representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryNegative => "very negative",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
            Self::VeryPositive => "very positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scorer output for one piece of review text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Star-scale classification, absent when the input had no words.
    pub stars: Option<u8>,
    /// Label derived from the star scale.
    pub label: SentimentLabel,
    /// Sentiment strength in [0, 1]; 0.5 is neutral.
    pub score: f64,
    /// Sarcasm heuristic outcome.
    pub is_sarcastic: bool,
}

impl Verdict {
    /// Verdict recorded for input with no scoreable content.
    #[must_use]
    pub const fn unscoreable() -> Self {
        Self {
            stars: None,
            label: SentimentLabel::Neutral,
            score: 0.5,
            is_sarcastic: false,
        }
    }
}
