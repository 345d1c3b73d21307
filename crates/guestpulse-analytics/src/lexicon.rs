use std::collections::HashSet;

use once_cell::sync::Lazy;

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // english function words
        "the", "and", "or", "is", "are", "am", "was", "were", "be", "been", "being", "of", "to",
        "in", "on", "for", "with", "at", "by", "from", "this", "that", "these", "those", "a",
        "an", "it", "its", "as", "so", "if", "but", "very", "really", "just", "also", "too",
        // pronouns
        "i", "we", "you", "he", "she", "they", "me", "us", "him", "her", "them", "my", "our",
        "your", "his", "their",
        // hospitality terms every review mentions
        "hotel", "room", "rooms", "place", "stay", "stayed", "location", "area", "night",
        "nights", "day", "days",
        // indonesian function words
        "dan", "yang", "di", "ke", "dari", "itu", "ini", "untuk", "dengan", "kami", "kita",
        "saya", "aku", "dia", "mereka", "pada", "ada", "tidak", "bukan",
    ]
    .into_iter()
    .collect()
});

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "excellent", "great", "good", "amazing", "clean", "friendly", "comfortable", "wonderful",
        "perfect", "nice", "helpful", "recommend", "love", "best", "enjoy", "spacious", "lovely",
        "fantastic", "awesome",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bad", "terrible", "awful", "dirty", "rude", "worst", "broken", "poor", "noisy",
        "disappointed", "uncomfortable", "hate", "slow", "problem", "issue", "smell", "smelly",
        "horrible", "disgusting",
    ]
    .into_iter()
    .collect()
});

/// True when the token is dropped before any counting.
#[must_use]
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// True when the token belongs to the positive vocabulary.
#[must_use]
pub fn is_positive_word(token: &str) -> bool {
    POSITIVE_WORDS.contains(token)
}

/// True when the token belongs to the negative vocabulary.
#[must_use]
pub fn is_negative_word(token: &str) -> bool {
    NEGATIVE_WORDS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwords_span_all_groups() {
        for word in ["the", "they", "hotel", "dan", "tidak"] {
            assert!(is_stopword(word), "{word} should be a stopword");
        }
        assert!(!is_stopword("breakfast"));
    }

    #[test]
    fn sentiment_vocabularies_are_disjoint() {
        assert!(is_positive_word("excellent"));
        assert!(is_negative_word("smelly"));
        assert!(POSITIVE_WORDS.intersection(&NEGATIVE_WORDS).next().is_none());
    }
}
