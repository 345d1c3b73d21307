//! Scorer vocabularies. Separate from the analytics engine lexicon: these
//! sets drive the verdict, not the frequency reports.

use std::collections::HashSet;

use once_cell::sync::Lazy;

static POSITIVE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "amazing", "awesome", "beautiful", "charming", "clean", "comfortable", "convenient",
        "cozy", "delicious", "enjoyable", "excellent", "fantastic", "friendly", "good", "great",
        "helpful", "lovely", "modern", "nice", "peaceful", "perfect", "pleasant", "professional",
        "quiet", "recommend", "spacious", "spotless", "superb", "welcoming", "wonderful",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "awful", "bad", "broken", "cold", "cramped", "damp", "dated", "dirty", "disappointing",
        "disgusting", "dreadful", "filthy", "horrible", "loud", "mediocre", "moldy", "noisy",
        "outdated", "overpriced", "poor", "rude", "slow", "smelly", "stained", "terrible",
        "uncomfortable", "unfriendly", "unhelpful", "worn", "worst",
    ]
    .into_iter()
    .collect()
});

static NEGATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "no", "never", "don't", "didn't", "doesn't", "isn't", "wasn't", "aren't",
        "weren't", "can't", "couldn't", "won't", "wouldn't", "hardly", "barely",
    ]
    .into_iter()
    .collect()
});

/// Phrases that flag a review as sarcastic regardless of word balance.
static SARCASM_MARKERS: &[&str] = &[
    "yeah right",
    "oh great",
    "just great",
    "oh wonderful",
    "just wonderful",
    "how lovely",
    "thanks a lot",
    "thanks for nothing",
    "what a surprise",
];

pub fn is_positive(token: &str) -> bool {
    POSITIVE.contains(token)
}

pub fn is_negative(token: &str) -> bool {
    NEGATIVE.contains(token)
}

pub fn is_negator(token: &str) -> bool {
    NEGATORS.contains(token)
}

pub fn sarcasm_markers() -> &'static [&'static str] {
    SARCASM_MARKERS
}
