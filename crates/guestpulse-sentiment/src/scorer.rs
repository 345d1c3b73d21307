use crate::lexicon;
use crate::verdict::{SentimentLabel, Verdict};

/// How many tokens after a negator still get their polarity flipped.
const NEGATION_WINDOW: usize = 2;

/// Scores one piece of review text.
///
/// The verdict is a pure function of the text: tokens are matched against
/// fixed polarity vocabularies, a negator flips hits inside a small window,
/// and the damped hit balance picks the star band. Input without a single
/// word yields [`Verdict::unscoreable`].
#[must_use]
pub fn score(text: &str) -> Verdict {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .collect();
    if tokens.is_empty() {
        return Verdict::unscoreable();
    }

    let (positive_hits, negative_hits) = polarity_hits(&tokens);
    let raw = positive_hits as f64 - negative_hits as f64;
    let balance = raw / (1.0 + raw.abs());

    let stars = stars_from_balance(balance);
    Verdict {
        stars: Some(stars),
        label: SentimentLabel::from_stars(stars),
        score: 0.5 + balance / 2.0,
        is_sarcastic: is_sarcastic(&lowered, positive_hits, negative_hits),
    }
}

/// Counts polarity hits over the token stream, flipping hits that fall
/// inside the negation window.
fn polarity_hits(tokens: &[&str]) -> (usize, usize) {
    let mut positive = 0usize;
    let mut negative = 0usize;
    let mut negation_left = 0usize;

    for token in tokens {
        if lexicon::is_negator(token) {
            negation_left = NEGATION_WINDOW;
            continue;
        }
        let negated = negation_left > 0;
        negation_left = negation_left.saturating_sub(1);

        if lexicon::is_positive(token) {
            if negated {
                negative += 1;
            } else {
                positive += 1;
            }
        } else if lexicon::is_negative(token) {
            if negated {
                positive += 1;
            } else {
                negative += 1;
            }
        }
    }

    (positive, negative)
}

fn stars_from_balance(balance: f64) -> u8 {
    if balance >= 0.6 {
        5
    } else if balance >= 0.2 {
        4
    } else if balance > -0.2 {
        3
    } else if balance > -0.6 {
        2
    } else {
        1
    }
}

/// Marker phrase, or praise and complaint colliding in an exclamation.
fn is_sarcastic(lowered: &str, positive_hits: usize, negative_hits: usize) -> bool {
    if lexicon::sarcasm_markers()
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        return true;
    }
    positive_hits > 0 && negative_hits > 0 && lowered.contains('!')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text_scores_high() {
        let verdict = score("The room was clean, spacious and wonderful.");
        assert_eq!(verdict.stars, Some(5));
        assert_eq!(verdict.label, SentimentLabel::VeryPositive);
        assert!(verdict.score > 0.5);
        assert!(!verdict.is_sarcastic);
    }

    #[test]
    fn negative_text_scores_low() {
        let verdict = score("Dirty bathroom, rude staff, awful breakfast.");
        assert_eq!(verdict.stars, Some(1));
        assert_eq!(verdict.label, SentimentLabel::VeryNegative);
        assert!(verdict.score < 0.5);
    }

    #[test]
    fn text_without_signal_is_neutral() {
        let verdict = score("We stayed two nights in March.");
        assert_eq!(verdict.stars, Some(3));
        assert_eq!(verdict.label, SentimentLabel::Neutral);
        assert!((verdict.score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_gets_no_stars() {
        for text in ["", "   ", "\t\n", "!!! ???"] {
            let verdict = score(text);
            assert_eq!(verdict.stars, None, "{text:?} should be unscoreable");
            assert_eq!(verdict.label, SentimentLabel::Neutral);
            assert!(!verdict.is_sarcastic);
        }
    }

    #[test]
    fn single_hit_lands_one_band_off_neutral() {
        assert_eq!(score("The room was clean.").stars, Some(4));
        assert_eq!(score("The room was dirty.").stars, Some(2));
    }

    #[test]
    fn negation_flips_nearby_sentiment_words() {
        let plain = score("The room was clean.");
        let negated = score("The room was not clean.");
        assert_eq!(plain.stars, Some(4));
        assert_eq!(negated.stars, Some(2));
        assert!(negated.score < plain.score);
    }

    #[test]
    fn negation_window_covers_an_intervening_adverb() {
        let verdict = score("The staff were not very friendly.");
        assert_eq!(verdict.label, SentimentLabel::Negative);
    }

    #[test]
    fn marker_phrase_flags_sarcasm() {
        let verdict = score("Oh great, another broken shower.");
        assert!(verdict.is_sarcastic);
    }

    #[test]
    fn mixed_polarity_with_exclamation_flags_sarcasm() {
        let verdict = score("Great view but filthy bathroom!");
        assert!(verdict.is_sarcastic);
        assert_eq!(verdict.stars, Some(3));

        let calm = score("Great view but filthy bathroom.");
        assert!(!calm.is_sarcastic);
    }

    #[test]
    fn verdicts_are_deterministic() {
        let text = "Lovely pool, friendly staff, slightly noisy street.";
        assert_eq!(score(text), score(text));
    }
}
