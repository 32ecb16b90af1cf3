use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::CandidateProfile;

/// Lifecycle of one interview. Transitions only move forward; `reset` is the only way back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Start,
    CollectingProfile,
    Interviewing,
    Complete,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::CollectingProfile => "collecting_profile",
            Phase::Interviewing => "interviewing",
            Phase::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionOrigin {
    Base,
    FollowUp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub origin: QuestionOrigin,
    /// Queue index of the base question this follow-up probes. `None` for base questions.
    pub source_question_index: Option<usize>,
}

impl Question {
    pub fn base(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: QuestionOrigin::Base,
            source_question_index: None,
        }
    }

    pub fn follow_up(text: impl Into<String>, source_question_index: usize) -> Self {
        Self {
            text: text.into(),
            origin: QuestionOrigin::FollowUp,
            source_question_index: Some(source_question_index),
        }
    }
}

/// A submitted answer. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub sentiment_score: f32,
    pub word_count: usize,
    pub tech_mention_count: usize,
    pub needed_followup: bool,
}

/// Answered vs. known questions, for progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    pub fraction: f32,
}

/// All mutable state for one candidate's interview.
///
/// Invariants (kept by the controller, the only mutator):
/// - `answers.len() <= questions.len()`
/// - `current_index == answers.len()`
/// - `answers[i]` answers `questions[i]`
#[derive(Debug, Clone)]
pub struct InterviewSession {
    pub id: Uuid,
    pub phase: Phase,
    pub profile: Option<CandidateProfile>,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
    pub current_index: usize,
    /// Set on creation and again on every reset.
    pub created_at: DateTime<Utc>,
}

impl InterviewSession {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            phase: Phase::Start,
            profile: None,
            questions: Vec::new(),
            answers: Vec::new(),
            current_index: 0,
            created_at: Utc::now(),
        }
    }

    /// Discards everything and returns to `Start`, keeping the session id.
    pub fn reset(&mut self) {
        *self = Self::new(self.id);
    }

    pub fn sentiments(&self) -> impl Iterator<Item = f32> + '_ {
        self.answers.iter().map(|a| a.sentiment_score)
    }

    pub fn follow_ups_asked(&self) -> usize {
        self.questions[..self.current_index]
            .iter()
            .filter(|q| q.origin == QuestionOrigin::FollowUp)
            .count()
    }

    /// `total` is the known queue length, capped by the answer limit.
    pub fn progress(&self, max_questions: usize) -> Progress {
        let answered = self.answers.len();
        let total = self.questions.len().min(max_questions).max(answered);
        let fraction = if total == 0 {
            0.0
        } else {
            answered as f32 / total as f32
        };
        Progress {
            answered,
            total,
            fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> Answer {
        Answer {
            text: text.to_string(),
            sentiment_score: 0.0,
            word_count: 1,
            tech_mention_count: 0,
            needed_followup: true,
        }
    }

    #[test]
    fn test_new_session_starts_empty() {
        let session = InterviewSession::new(Uuid::new_v4());
        assert_eq!(session.phase, Phase::Start);
        assert!(session.questions.is_empty());
        assert_eq!(session.current_index, 0);
    }

    #[test]
    fn test_reset_keeps_id_and_clears_state() {
        let id = Uuid::new_v4();
        let mut session = InterviewSession::new(id);
        session.phase = Phase::Interviewing;
        session.questions.push(Question::base("What is SQL?"));
        session.answers.push(answer("A query language"));
        session.current_index = 1;

        session.reset();

        assert_eq!(session.id, id);
        assert_eq!(session.phase, Phase::Start);
        assert!(session.questions.is_empty());
        assert!(session.answers.is_empty());
        assert_eq!(session.current_index, 0);
    }

    #[test]
    fn test_progress_caps_total_at_max_questions() {
        let mut session = InterviewSession::new(Uuid::new_v4());
        for i in 0..7 {
            session.questions.push(Question::base(format!("Q{i}?")));
        }
        session.answers.push(answer("a"));
        session.current_index = 1;

        let progress = session.progress(5);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.total, 5);
        assert!((progress.fraction - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_progress_empty_queue_is_zero() {
        let session = InterviewSession::new(Uuid::new_v4());
        assert_eq!(session.progress(5).fraction, 0.0);
    }

    #[test]
    fn test_follow_ups_asked_counts_only_consumed() {
        let mut session = InterviewSession::new(Uuid::new_v4());
        session.questions = vec![
            Question::base("Q1?"),
            Question::follow_up("F1?", 0),
            Question::base("Q2?"),
            Question::follow_up("F2?", 2),
        ];
        session.answers = vec![answer("a"), answer("b"), answer("c")];
        session.current_index = 3;
        assert_eq!(session.follow_ups_asked(), 1);
    }

    #[test]
    fn test_phase_serializes_snake_case() {
        let json = serde_json::to_string(&Phase::CollectingProfile).unwrap();
        assert_eq!(json, r#""collecting_profile""#);
    }
}
