//! Follow-up Generator: proposes at most one probing question for an answer.
//!
//! Thin answers get the canned elaboration prompt without a model call.
//! Otherwise the model is asked for one question or an empty reply; anything
//! short, question-less, or failed becomes "no follow-up".

use std::sync::Arc;

use tracing::{debug, warn};

use crate::generation::prompts::{ELABORATION_PROMPT, FOLLOWUP_TEMPLATE};
use crate::llm_client::prompts::{INTERVIEWER_PERSONA, PLAIN_TEXT_ONLY};
use crate::llm_client::CompletionService;

/// Answers with at most this many words skip the model and get `ELABORATION_PROMPT`.
pub const THIN_ANSWER_MAX_WORDS: usize = 3;

/// Accepted follow-ups must be strictly longer than this many characters.
pub const MIN_FOLLOWUP_CHARS: usize = 15;

pub struct FollowupGenerator {
    llm: Arc<dyn CompletionService>,
}

impl FollowupGenerator {
    pub fn new(llm: Arc<dyn CompletionService>) -> Self {
        Self { llm }
    }

    pub async fn generate(&self, question: &str, answer: &str, stack: &str) -> Option<String> {
        if is_thin_answer(answer) {
            debug!("Answer too thin for a model follow-up, asking to elaborate");
            return Some(ELABORATION_PROMPT.to_string());
        }

        let prompt = build_followup_prompt(question, answer, stack);

        match self.llm.complete(&prompt).await {
            Ok(raw) => accept_followup(&raw),
            Err(e) => {
                warn!("Follow-up generation failed, skipping follow-up: {e}");
                None
            }
        }
    }
}

fn is_thin_answer(answer: &str) -> bool {
    answer.split_whitespace().count() <= THIN_ANSWER_MAX_WORDS
}

fn build_followup_prompt(question: &str, answer: &str, stack: &str) -> String {
    FOLLOWUP_TEMPLATE
        .replace("{persona}", INTERVIEWER_PERSONA)
        .replace("{plain_text}", PLAIN_TEXT_ONLY)
        .replace("{tech_stack}", stack)
        .replace("{question}", question)
        .replace("{answer}", answer)
}

/// Keeps a model reply only if it reads as a real question.
fn accept_followup(raw: &str) -> Option<String> {
    let candidate = raw.trim().trim_matches(|c: char| c == '"' || c == '\'').trim();

    if candidate.chars().count() <= MIN_FOLLOWUP_CHARS || !candidate.contains('?') {
        debug!("Rejected follow-up candidate: {candidate:?}");
        return None;
    }

    Some(candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{LlmError, MockCompletionService};

    const QUESTION: &str = "How do you handle errors in async Rust?";

    #[tokio::test]
    async fn test_short_answer_gets_elaboration_without_model_call() {
        let mut mock = MockCompletionService::new();
        mock.expect_complete().never();
        let generator = FollowupGenerator::new(Arc::new(mock));

        let followup = generator.generate(QUESTION, "Yes, it works.", "Rust").await;
        assert_eq!(followup.as_deref(), Some(ELABORATION_PROMPT));
    }

    #[tokio::test]
    async fn test_empty_answer_gets_elaboration_without_model_call() {
        let mut mock = MockCompletionService::new();
        mock.expect_complete().never();
        let generator = FollowupGenerator::new(Arc::new(mock));

        let followup = generator.generate(QUESTION, "   ", "Rust").await;
        assert_eq!(followup.as_deref(), Some(ELABORATION_PROMPT));
    }

    #[tokio::test]
    async fn test_model_followup_is_accepted() {
        let mut mock = MockCompletionService::new();
        mock.expect_complete()
            .withf(|prompt: &str| prompt.contains(QUESTION) && prompt.contains("thiserror enums"))
            .times(1)
            .returning(|_| Ok("\"How do you decide when to use anyhow instead?\"".to_string()));
        let generator = FollowupGenerator::new(Arc::new(mock));

        let followup = generator
            .generate(QUESTION, "I mostly use thiserror enums and the ? operator", "Rust")
            .await;
        assert_eq!(
            followup.as_deref(),
            Some("How do you decide when to use anyhow instead?")
        );
    }

    #[tokio::test]
    async fn test_empty_model_reply_means_no_followup() {
        let mut mock = MockCompletionService::new();
        mock.expect_complete()
            .times(1)
            .returning(|_| Ok("\"\"".to_string()));
        let generator = FollowupGenerator::new(Arc::new(mock));

        let followup = generator
            .generate(QUESTION, "I propagate with ? and map errors at the boundary", "Rust")
            .await;
        assert!(followup.is_none());
    }

    #[tokio::test]
    async fn test_service_error_means_no_followup() {
        let mut mock = MockCompletionService::new();
        mock.expect_complete()
            .times(1)
            .returning(|_| Err(LlmError::EmptyContent));
        let generator = FollowupGenerator::new(Arc::new(mock));

        let followup = generator
            .generate(QUESTION, "I propagate with ? and map errors at the boundary", "Rust")
            .await;
        assert!(followup.is_none());
    }

    #[test]
    fn test_accept_rejects_short_replies() {
        assert!(accept_followup("Why?").is_none());
        // exactly 15 chars is not enough
        assert!(accept_followup("Why is it fast?").is_none());
        assert!(accept_followup("Why is it so fast?").is_some());
    }

    #[test]
    fn test_accept_rejects_statements() {
        assert!(accept_followup("Great answer, no follow-up needed.").is_none());
    }
}
