//! Question Generator: turns a candidate's stack, role and experience into base questions.
//!
//! Flow: build prompt → CompletionService::complete → parse_questions → cap.
//! A failed call or an unparseable completion yields one deterministic fallback
//! question, so generation can never fail outright.

use std::sync::Arc;

use tracing::{info, warn};

use crate::generation::prompts::QUESTION_GENERATION_TEMPLATE;
use crate::llm_client::prompts::{INTERVIEWER_PERSONA, PLAIN_TEXT_ONLY};
use crate::llm_client::CompletionService;
use crate::models::profile::split_tech_stack;

/// Fewest questions the prompt asks for.
const REQUESTED_MIN: usize = 3;

pub struct QuestionGenerator {
    llm: Arc<dyn CompletionService>,
    cap: usize,
}

impl QuestionGenerator {
    /// `cap` bounds how many parsed questions are kept.
    pub fn new(llm: Arc<dyn CompletionService>, cap: usize) -> Self {
        Self { llm, cap }
    }

    /// Returns between one and `cap` questions. Never empty.
    pub async fn generate(&self, stack: &str, role: &str, experience: &str) -> Vec<String> {
        let prompt = build_question_prompt(stack, role, experience, self.cap);

        let questions = match self.llm.complete(&prompt).await {
            Ok(raw) => parse_questions(&raw, self.cap),
            Err(e) => {
                warn!("Question generation failed, using fallback: {e}");
                return vec![fallback_question(stack, role)];
            }
        };

        if questions.is_empty() {
            warn!("Question generation returned no parseable questions, using fallback");
            return vec![fallback_question(stack, role)];
        }

        info!("Generated {} base questions", questions.len());
        questions
    }
}

fn build_question_prompt(stack: &str, role: &str, experience: &str, cap: usize) -> String {
    QUESTION_GENERATION_TEMPLATE
        .replace("{persona}", INTERVIEWER_PERSONA)
        .replace("{plain_text}", PLAIN_TEXT_ONLY)
        .replace("{tech_stack}", stack)
        .replace("{role}", role)
        .replace("{experience}", experience)
        .replace("{count_min}", &REQUESTED_MIN.min(cap).to_string())
        .replace("{count_max}", &cap.to_string())
}

/// Extracts question lines from raw model output.
///
/// Per line: blank lines and headers (mention "question" but carry no `?`) are
/// dropped, bullets / numbering / `Q1:` labels are stripped, and only lines
/// containing `?` survive. Duplicates are dropped. At most `cap` are returned.
pub fn parse_questions(raw: &str, cap: usize) -> Vec<String> {
    let mut questions: Vec<String> = Vec::new();

    for line in raw.lines() {
        if questions.len() >= cap {
            break;
        }

        let line = line.trim();
        if line.is_empty() || is_header(line) {
            continue;
        }

        let cleaned = clean_line(line);
        if cleaned.is_empty() || !cleaned.contains('?') {
            continue;
        }

        if !questions.iter().any(|q| q == cleaned) {
            questions.push(cleaned.to_string());
        }
    }

    questions
}

fn is_header(line: &str) -> bool {
    line.to_lowercase().contains("question") && !line.contains('?')
}

fn strip_list_marker(line: &str) -> &str {
    line.trim_start_matches(|c: char| {
        c.is_ascii_digit()
            || c.is_whitespace()
            || matches!(c, '-' | '*' | '•' | '+' | '#' | '.' | ')' | ':' | '>')
    })
}

/// Strips "Q1:" / "q2." style labels.
fn strip_question_label(line: &str) -> &str {
    let Some(rest) = line.strip_prefix(|c: char| c == 'Q' || c == 'q') else {
        return line;
    };
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return line;
    }
    match rest[digits..].strip_prefix(|c: char| matches!(c, ':' | '.' | ')')) {
        Some(after) => after,
        None => line,
    }
}

fn clean_line(line: &str) -> &str {
    let line = strip_list_marker(line);
    let line = strip_list_marker(strip_question_label(line));
    line.trim_end_matches('*')
        .trim()
        .trim_matches('"')
        .trim()
}

/// The deterministic question used when generation fails. Mentions the first
/// listed technology and the desired role.
pub fn fallback_question(stack: &str, role: &str) -> String {
    let technology = split_tech_stack(stack)
        .into_iter()
        .next()
        .unwrap_or_else(|| "your primary technology".to_string());

    let role = role.trim();
    if role.is_empty() {
        format!(
            "Can you walk me through a recent project where you used {technology}, \
             and what you would do differently today?"
        )
    } else {
        format!(
            "Can you walk me through a recent project where you used {technology}, \
             and how it prepared you for a {role} position?"
        )
    }
}
