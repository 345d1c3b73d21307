use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Counts Unicode letter characters in the text.
///
/// Digits, underscores, punctuation, symbols, emoji and whitespace all
/// contribute zero. Works for non-Latin scripts.
#[must_use]
pub fn letter_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphabetic()).count()
}

/// Extracts the cleaned token sequence from raw text.
///
/// Lower-cases the text, splits on maximal word-character runs, then drops
/// tokens without a letter, tokens of two characters or fewer, and
/// stopwords. Surviving tokens keep their left-to-right order.
#[must_use]
pub fn clean_tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| token.chars().any(char::is_alphabetic))
        .filter(|token| token.chars().count() > 2)
        .filter(|token| !lexicon::is_stopword(token))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_only_counted() {
        assert_eq!(letter_count("Room205!"), 4);
        assert_eq!(letter_count(""), 0);
        assert_eq!(letter_count("12_345 !?"), 0);
        assert_eq!(letter_count("a1b2c3"), 3);
    }

    #[test]
    fn letter_count_handles_non_latin_scripts() {
        assert_eq!(letter_count("Отель чист"), 9);
        assert_eq!(letter_count("清潔で静か"), 5);
        assert_eq!(letter_count("bagus 👍"), 5);
    }

    #[test]
    fn cleaning_drops_short_numeric_and_stop_tokens() {
        let tokens = clean_tokens("The room was VERY clean, 5 stars at door no 12!");
        assert_eq!(tokens, vec!["clean", "stars", "door"]);
    }

    #[test]
    fn cleaning_preserves_left_to_right_order() {
        let tokens = clean_tokens("breakfast excellent staff friendly breakfast");
        assert_eq!(
            tokens,
            vec!["breakfast", "excellent", "staff", "friendly", "breakfast"]
        );
    }

    #[test]
    fn tokens_keep_underscore_runs_with_letters() {
        let tokens = clean_tokens("wifi_5 was down, 12_34 too");
        assert_eq!(tokens, vec!["wifi_5", "down"]);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = clean_tokens("Staff went above AND beyond, truly wonderful!");
        let again = clean_tokens(&once.join(" "));
        assert_eq!(once, again);
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(clean_tokens("").is_empty());
        assert!(clean_tokens("   ").is_empty());
    }
}
