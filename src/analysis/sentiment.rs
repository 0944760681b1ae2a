//! Lexicon-based sentiment scoring.
//!
//! Each turn gets a polarity in [-1.0, 1.0] and a subjectivity in
//! [0.0, 1.0], computed as the average over lexicon words present in the
//! message. A negator preceding a sentiment word flips and damps its
//! polarity; an intensifier scales it.

use crate::models::Sentiment;

/// (word, polarity, subjectivity) entries. Polarity in [-1, 1],
/// subjectivity in [0, 1].
const SENTIMENT_WORDS: &[(&str, f64, f64)] = &[
    // Positive
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("wonderful", 1.0, 1.0),
    ("nice", 0.6, 1.0),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("love", 0.5, 0.6),
    ("thank", 0.4, 0.4),
    ("thanks", 0.4, 0.4),
    ("welcome", 0.4, 0.5),
    ("sure", 0.5, 0.9),
    ("alright", 0.3, 0.6),
    ("okay", 0.3, 0.5),
    ("ok", 0.3, 0.5),
    ("fine", 0.4, 0.6),
    ("yes", 0.3, 0.4),
    ("help", 0.2, 0.3),
    ("helpful", 0.5, 0.6),
    ("please", 0.2, 0.3),
    ("secure", 0.3, 0.4),
    ("securing", 0.3, 0.4),
    ("safe", 0.5, 0.5),
    ("correct", 0.4, 0.5),
    ("right", 0.3, 0.5),
    ("best", 0.9, 0.6),
    ("easy", 0.4, 0.75),
    ("free", 0.4, 0.7),
    ("win", 0.6, 0.7),
    ("winner", 0.6, 0.7),
    ("prize", 0.4, 0.5),
    ("congratulations", 0.8, 0.8),
    ("lucky", 0.6, 0.8),
    ("important", 0.3, 0.6),
    ("trust", 0.4, 0.5),
    // Negative
    ("bad", -0.7, 0.65),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worried", -0.4, 0.7),
    ("worry", -0.4, 0.7),
    ("scared", -0.6, 0.8),
    ("afraid", -0.5, 0.8),
    ("confused", -0.3, 0.7),
    ("confusing", -0.3, 0.7),
    ("unusual", -0.25, 0.5),
    ("suspicious", -0.4, 0.6),
    ("fraud", -0.6, 0.6),
    ("fraudulent", -0.7, 0.7),
    ("scam", -0.7, 0.7),
    ("stolen", -0.6, 0.6),
    ("stole", -0.6, 0.6),
    ("problem", -0.4, 0.5),
    ("problems", -0.4, 0.5),
    ("issue", -0.3, 0.4),
    ("trouble", -0.4, 0.5),
    ("urgent", -0.3, 0.6),
    ("urgently", -0.3, 0.6),
    ("immediately", -0.2, 0.4),
    ("risk", -0.4, 0.5),
    ("risky", -0.5, 0.6),
    ("danger", -0.6, 0.6),
    ("dangerous", -0.6, 0.6),
    ("sorry", -0.3, 0.6),
    ("wrong", -0.5, 0.6),
    ("angry", -0.7, 0.9),
    ("upset", -0.5, 0.8),
    ("stop", -0.3, 0.4),
    ("suspended", -0.4, 0.5),
    ("blocked", -0.4, 0.5),
    ("locked", -0.3, 0.4),
    ("penalty", -0.5, 0.5),
    ("arrest", -0.6, 0.6),
    ("lawsuit", -0.5, 0.5),
    ("fee", -0.2, 0.3),
    ("skeptical", -0.3, 0.7),
];

/// Words flipping the polarity of the next sentiment word.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "cannot", "can't", "don't", "doesn't", "didn't", "won't", "wouldn't",
    "isn't", "wasn't", "aren't", "couldn't", "shouldn't", "nothing",
];

/// Words scaling the polarity of the next sentiment word.
const INTENSIFIERS: &[&str] = &[
    "very", "really", "extremely", "so", "too", "quite", "totally", "absolutely", "highly",
];

/// Negation flips and damps polarity instead of fully inverting it.
const NEGATION_FACTOR: f64 = -0.5;

/// Intensifiers push polarity away from zero.
const INTENSIFIER_FACTOR: f64 = 1.3;

/// Score the sentiment of a message.
///
/// Tokens keep internal apostrophes so contractions like "didn't" act as
/// negators. A message with no lexicon words scores (0.0, 0.0).
pub fn score(message: &str) -> Sentiment {
    let tokens = tokenize(message);

    let mut polarity_sum = 0.0;
    let mut subjectivity_sum = 0.0;
    let mut hits = 0usize;

    let mut negate = false;
    let mut intensify = false;

    for token in &tokens {
        if NEGATORS.contains(&token.as_str()) {
            negate = true;
            continue;
        }
        if INTENSIFIERS.contains(&token.as_str()) {
            intensify = true;
            continue;
        }

        if let Some((_, polarity, subjectivity)) = SENTIMENT_WORDS
            .iter()
            .copied()
            .find(|(word, _, _)| *word == token.as_str())
        {
            let mut polarity = polarity;
            if intensify {
                polarity = (polarity * INTENSIFIER_FACTOR).clamp(-1.0, 1.0);
            }
            if negate {
                polarity *= NEGATION_FACTOR;
            }

            polarity_sum += polarity;
            subjectivity_sum += subjectivity;
            hits += 1;

            negate = false;
            intensify = false;
        }
    }

    if hits == 0 {
        return Sentiment::default();
    }

    Sentiment {
        polarity: (polarity_sum / hits as f64).clamp(-1.0, 1.0),
        subjectivity: (subjectivity_sum / hits as f64).clamp(0.0, 1.0),
    }
}

/// Lowercased tokens with surrounding punctuation trimmed; internal
/// apostrophes survive.
fn tokenize(message: &str) -> Vec<String> {
    message
        .split_whitespace()
        .map(|raw| {
            raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_message_scores_zero() {
        let s = score("My account number is 123456789.");
        assert_eq!(s.polarity, 0.0);
        assert_eq!(s.subjectivity, 0.0);
    }

    #[test]
    fn test_positive_message() {
        let s = score("Great, thank you so much!");
        assert!(s.polarity > 0.0);
        assert!(s.subjectivity > 0.0);
    }

    #[test]
    fn test_negative_message() {
        let s = score("This is a terrible scam.");
        assert!(s.polarity < 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let plain = score("this is good");
        let negated = score("this is not good");

        assert!(plain.polarity > 0.0);
        assert!(negated.polarity < 0.0);
        assert!(negated.polarity.abs() < plain.polarity.abs());
    }

    #[test]
    fn test_contraction_negates() {
        let s = score("that didn't help");
        assert!(s.polarity < 0.0);
    }

    #[test]
    fn test_intensifier_boosts() {
        let plain = score("this is good");
        let boosted = score("this is very good");

        assert!(boosted.polarity > plain.polarity);
    }

    #[test]
    fn test_polarity_stays_in_range() {
        let s = score("excellent wonderful amazing great best terrible awful horrible");
        assert!((-1.0..=1.0).contains(&s.polarity));
        assert!((0.0..=1.0).contains(&s.subjectivity));
    }

    #[test]
    fn test_confused_victim_turn_is_negative() {
        let s = score("Hi, I'm a bit confused. What's going on with my account?");
        assert!(s.polarity < 0.0);
        assert!(s.subjectivity > 0.0);
    }
}
