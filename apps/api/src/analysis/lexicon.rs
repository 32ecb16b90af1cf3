//! Lexicon-based polarity scoring.
//!
//! Each polar word carries a fixed score in [-1, 1]. A preceding negation flips and
//! dampens the next polar word; a preceding intensifier scales it. The answer's
//! polarity is the mean over polar words, or 0.0 when none are present.

const NEGATION_FACTOR: f32 = -0.5;

/// Returns the polarity of a single normalized (lowercase, unpunctuated) word.
fn word_polarity(word: &str) -> Option<f32> {
    let score = match word {
        // positive
        "excellent" | "outstanding" | "perfect" | "amazing" | "fantastic" => 1.0,
        "love" | "loved" | "great" | "awesome" | "wonderful" => 0.8,
        "enjoy" | "enjoyed" | "confident" | "efficient" | "elegant" | "impressive" => 0.6,
        "good" | "nice" | "happy" | "glad" | "excited" | "clean" | "reliable" | "robust" => 0.5,
        "successful" | "successfully" | "solved" | "improved" | "fast" | "scalable" => 0.4,
        "comfortable" | "familiar" | "easy" | "simple" | "useful" | "helpful" | "like" => 0.3,
        "stable" | "correct" | "clear" | "sure" | "works" | "working" => 0.2,
        // negative
        "terrible" | "awful" | "horrible" | "worst" | "hate" | "hated" => -1.0,
        "bad" | "broken" | "failed" | "failure" | "useless" | "painful" => -0.7,
        "difficult" | "hard" | "confusing" | "confused" | "frustrating" | "messy" => -0.5,
        "slow" | "buggy" | "wrong" | "unstable" | "struggled" | "struggle" => -0.4,
        "unsure" | "uncertain" | "worried" | "nervous" | "problem" | "problems" => -0.3,
        "complicated" | "limited" | "issue" | "issues" | "tricky" | "doubt" => -0.2,
        _ => return None,
    };
    Some(score)
}

fn is_negation(word: &str) -> bool {
    matches!(word, "not" | "no" | "never" | "cannot" | "hardly" | "neither" | "nor")
        || word.ends_with("n't")
}

fn intensifier(word: &str) -> Option<f32> {
    match word {
        "very" | "really" | "highly" | "truly" => Some(1.3),
        "extremely" | "incredibly" | "super" => Some(1.5),
        "quite" | "pretty" => Some(1.1),
        "somewhat" | "slightly" | "fairly" => Some(0.7),
        _ => None,
    }
}

fn normalize(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .to_lowercase()
        .replace('\u{2019}', "'")
}

fn ends_clause(token: &str) -> bool {
    token.ends_with(|c: char| matches!(c, '.' | '!' | '?' | ',' | ';' | ':'))
}

/// Mean polarity of the polar words in `text`, clamped to [-1, 1].
pub fn polarity(text: &str) -> f32 {
    let mut total = 0.0_f32;
    let mut count = 0_usize;
    let mut negated = false;
    let mut intensity = 1.0_f32;

    for token in text.split_whitespace() {
        let word = normalize(token);

        if !word.is_empty() {
            if is_negation(&word) {
                negated = true;
            } else if let Some(factor) = intensifier(&word) {
                intensity *= factor;
            } else if let Some(score) = word_polarity(&word) {
                let mut score = score * intensity;
                if negated {
                    score *= NEGATION_FACTOR;
                }
                total += score.clamp(-1.0, 1.0);
                count += 1;
                negated = false;
                intensity = 1.0;
            }
        }

        // modifiers do not carry across clause boundaries
        if ends_clause(token) {
            negated = false;
            intensity = 1.0;
        }
    }

    if count == 0 {
        0.0
    } else {
        (total / count as f32).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_polar_words_is_neutral() {
        assert_eq!(polarity("I used a hash map keyed by user id"), 0.0);
        assert_eq!(polarity(""), 0.0);
    }

    #[test]
    fn test_positive_answer_scores_positive() {
        assert!(polarity("I love Rust, the tooling is great") > 0.5);
    }

    #[test]
    fn test_negative_answer_scores_negative() {
        assert!(polarity("Honestly the migration was painful and slow") < 0.0);
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        let plain = polarity("good");
        let negated = polarity("not good");
        assert!((plain - 0.5).abs() < f32::EPSILON);
        assert!((negated + 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_contraction_negation() {
        assert!(polarity("It wasn't difficult") > 0.0);
    }

    #[test]
    fn test_intensifier_scales_and_clamps() {
        assert!(polarity("very good") > polarity("good"));
        assert_eq!(polarity("extremely excellent"), 1.0);
    }

    #[test]
    fn test_negation_does_not_cross_clause_boundary() {
        assert!((polarity("No. Good") - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_punctuation_and_case_ignored() {
        assert_eq!(polarity("GREAT!!!"), polarity("great"));
    }

    #[test]
    fn test_result_always_in_range() {
        for text in [
            "terrible awful horrible worst hate",
            "extremely super really excellent amazing",
            "not not not bad",
        ] {
            let p = polarity(text);
            assert!((-1.0..=1.0).contains(&p), "{text} -> {p}");
        }
    }
}
