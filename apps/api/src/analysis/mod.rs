//! Answer Analysis: polarity and stack-coverage signals for a single answer.
//!
//! Pure and deterministic: no I/O, no randomness. Drives both follow-up
//! insertion and adaptive termination in the interview controller.

pub mod lexicon;

use serde::{Deserialize, Serialize};

/// Answers shorter than this many words are considered thin.
pub const MIN_ENGAGED_WORDS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnswerAnalysis {
    /// Polarity in [-1, 1].
    pub sentiment: f32,
    pub word_count: usize,
    /// Number of distinct stack technologies mentioned.
    pub tech_mentions: usize,
    pub needs_followup: bool,
}

/// Scores `answer` against the candidate's declared `stack`.
///
/// `needs_followup` is set when the answer is short (< `MIN_ENGAGED_WORDS` words)
/// or never mentions a declared technology.
pub fn analyze(answer: &str, stack: &[String]) -> AnswerAnalysis {
    let word_count = answer.split_whitespace().count();
    let tech_mentions = count_tech_mentions(answer, stack);

    AnswerAnalysis {
        sentiment: lexicon::polarity(answer),
        word_count,
        tech_mentions,
        needs_followup: word_count < MIN_ENGAGED_WORDS || tech_mentions == 0,
    }
}

/// Counts stack technologies that appear anywhere in `answer` (case-insensitive substring).
pub fn count_tech_mentions(answer: &str, stack: &[String]) -> usize {
    let answer_lower = answer.to_lowercase();
    stack
        .iter()
        .map(|tech| tech.trim().to_lowercase())
        .filter(|tech| !tech.is_empty() && answer_lower.contains(tech.as_str()))
        .count()
}
