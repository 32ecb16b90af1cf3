//! Interview Flow Controller: the state machine behind one screening interview.
//!
//! Phases: Start → CollectingProfile → Interviewing → Complete. Only `reset`
//! goes back. While interviewing, each submitted answer is analysed, may spawn
//! one follow-up inserted directly after the current question, and then the
//! termination policy is re-evaluated.
//!
//! The controller holds no per-candidate state; sessions are passed in by the
//! caller, which serialises access to each one.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, info_span, Instrument};

use crate::analysis::{analyze, AnswerAnalysis};
use crate::generation::followup::FollowupGenerator;
use crate::generation::question_generator::QuestionGenerator;
use crate::interview::gate::FollowupGate;
use crate::interview::summary::InterviewSummary;
use crate::interview::validation::{validate_profile, ProfileField};
use crate::llm_client::CompletionService;
use crate::models::interview::{Answer, InterviewSession, Phase, Progress, Question};
use crate::models::profile::ProfileForm;

#[derive(Debug, Error, PartialEq)]
pub enum InterviewError {
    #[error("Missing or invalid profile fields: {}", join_fields(.missing))]
    Validation { missing: Vec<ProfileField> },

    #[error("Answer cannot be empty")]
    EmptyAnswer,

    #[error("Cannot {action} while the interview is in phase '{from}'")]
    InvalidTransition { from: Phase, action: &'static str },

    #[error("No question is waiting for an answer")]
    NoPendingQuestion,
}

fn join_fields(fields: &[ProfileField]) -> String {
    fields
        .iter()
        .map(ProfileField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// When an interview ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationPolicy {
    /// Stop once `min_questions` are answered and the latest answer needed no
    /// follow-up, or at `max_questions`.
    #[default]
    Adaptive,
    /// Stop only at `max_questions` or when the queue runs out.
    FixedCount,
}

impl FromStr for TerminationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adaptive" => Ok(TerminationPolicy::Adaptive),
            "fixed" | "fixed_count" => Ok(TerminationPolicy::FixedCount),
            other => Err(format!("unknown termination policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewSettings {
    /// Hard cap on answered questions. Always >= 1.
    pub max_questions: usize,
    /// Floor before adaptive termination may trigger.
    pub min_questions: usize,
    /// Max base questions kept from one generation call.
    pub generated_question_cap: usize,
    pub termination_policy: TerminationPolicy,
}

impl Default for InterviewSettings {
    fn default() -> Self {
        Self {
            max_questions: 5,
            min_questions: 3,
            generated_question_cap: 5,
            termination_policy: TerminationPolicy::Adaptive,
        }
    }
}

/// What happened to one submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
    pub analysis: AnswerAnalysis,
    pub follow_up_inserted: bool,
    pub complete: bool,
}

pub struct InterviewController {
    questions: QuestionGenerator,
    followups: FollowupGenerator,
    gate: Arc<dyn FollowupGate>,
    settings: InterviewSettings,
}

impl InterviewController {
    pub fn new(
        llm: Arc<dyn CompletionService>,
        gate: Arc<dyn FollowupGate>,
        settings: InterviewSettings,
    ) -> Self {
        Self {
            questions: QuestionGenerator::new(llm.clone(), settings.generated_question_cap),
            followups: FollowupGenerator::new(llm),
            gate,
            settings,
        }
    }

    pub fn settings(&self) -> &InterviewSettings {
        &self.settings
    }

    /// Start → CollectingProfile.
    pub fn begin(&self, session: &mut InterviewSession) -> Result<(), InterviewError> {
        if session.phase != Phase::Start {
            return Err(InterviewError::InvalidTransition {
                from: session.phase,
                action: "begin",
            });
        }
        session.phase = Phase::CollectingProfile;
        info!(session_id = %session.id, "Interview started, collecting profile");
        Ok(())
    }

    /// CollectingProfile → Interviewing, then seeds the question queue.
    ///
    /// On validation failure the session stays in `CollectingProfile` and every
    /// missing field is reported.
    pub async fn submit_profile(
        &self,
        session: &mut InterviewSession,
        form: &ProfileForm,
    ) -> Result<(), InterviewError> {
        if session.phase != Phase::CollectingProfile {
            return Err(InterviewError::InvalidTransition {
                from: session.phase,
                action: "submit a profile",
            });
        }

        let profile =
            validate_profile(form).map_err(|missing| InterviewError::Validation { missing })?;

        info!(
            session_id = %session.id,
            position = %profile.desired_position,
            experience = %profile.experience,
            "Profile accepted"
        );

        session.profile = Some(profile);
        session.phase = Phase::Interviewing;
        self.enter_interview(session).await;
        Ok(())
    }

    /// Seeds the question queue on first entry into `Interviewing`.
    /// Idempotent: a seeded queue is never regenerated. Returns whether it generated.
    pub async fn enter_interview(&self, session: &mut InterviewSession) -> bool {
        if session.phase != Phase::Interviewing || !session.questions.is_empty() {
            return false;
        }
        let Some(profile) = session.profile.as_ref() else {
            return false;
        };

        let generated = self
            .questions
            .generate(
                &profile.stack_text(),
                &profile.desired_position,
                profile.experience.describe(),
            )
            .instrument(info_span!("seed_questions", session_id = %session.id))
            .await;

        session.questions = generated.into_iter().map(Question::base).collect();
        info!(
            session_id = %session.id,
            count = session.questions.len(),
            "Question queue seeded"
        );
        true
    }

    /// The question due next, if the interview is still serving questions.
    pub fn current_question<'a>(&self, session: &'a InterviewSession) -> Option<&'a Question> {
        if session.phase != Phase::Interviewing
            || session.answers.len() >= self.settings.max_questions
        {
            return None;
        }
        session.questions.get(session.current_index)
    }

    /// Records an answer to the current question.
    ///
    /// Blank answers are rejected with no state change and no generator calls.
    /// A follow-up, when produced, is inserted at `current_index + 1` so answered
    /// questions keep their positions.
    pub async fn submit_answer(
        &self,
        session: &mut InterviewSession,
        text: &str,
    ) -> Result<AnswerOutcome, InterviewError> {
        if session.phase != Phase::Interviewing {
            return Err(InterviewError::InvalidTransition {
                from: session.phase,
                action: "submit an answer",
            });
        }

        let question = self
            .current_question(session)
            .cloned()
            .ok_or(InterviewError::NoPendingQuestion)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(InterviewError::EmptyAnswer);
        }

        let (stack, stack_text) = match session.profile.as_ref() {
            Some(profile) => (profile.tech_stack.clone(), profile.stack_text()),
            None => (Vec::new(), String::new()),
        };

        let analysis = analyze(text, &stack);
        session.answers.push(Answer {
            text: text.to_string(),
            sentiment_score: analysis.sentiment,
            word_count: analysis.word_count,
            tech_mention_count: analysis.tech_mentions,
            needed_followup: analysis.needs_followup,
        });

        let mut follow_up_inserted = false;
        let room_for_follow_up = session.answers.len() + 1 < self.settings.max_questions;

        if room_for_follow_up && self.gate.should_follow_up(&analysis) {
            if let Some(follow_up) = self
                .followups
                .generate(&question.text, text, &stack_text)
                .instrument(info_span!("follow_up", session_id = %session.id))
                .await
            {
                let source = question
                    .source_question_index
                    .unwrap_or(session.current_index);
                session
                    .questions
                    .insert(session.current_index + 1, Question::follow_up(follow_up, source));
                follow_up_inserted = true;
            }
        }

        session.current_index += 1;

        debug!(
            session_id = %session.id,
            answered = session.answers.len(),
            words = analysis.word_count,
            tech_mentions = analysis.tech_mentions,
            needs_followup = analysis.needs_followup,
            follow_up_inserted,
            "Answer recorded"
        );

        let complete = self.should_terminate(session);
        if complete {
            session.phase = Phase::Complete;
            info!(
                session_id = %session.id,
                answered = session.answers.len(),
                "Interview complete"
            );
        }

        Ok(AnswerOutcome {
            analysis,
            follow_up_inserted,
            complete,
        })
    }

    fn should_terminate(&self, session: &InterviewSession) -> bool {
        let answered = session.answers.len();

        if answered >= self.settings.max_questions
            || session.current_index >= session.questions.len()
        {
            return true;
        }

        match self.settings.termination_policy {
            TerminationPolicy::Adaptive => {
                answered >= self.settings.min_questions
                    && session.answers.last().is_some_and(|a| !a.needed_followup)
            }
            TerminationPolicy::FixedCount => false,
        }
    }

    pub fn progress(&self, session: &InterviewSession) -> Progress {
        session.progress(self.settings.max_questions)
    }

    /// Closing signals, available once the interview is `Complete`.
    pub fn summary(&self, session: &InterviewSession) -> Option<InterviewSummary> {
        (session.phase == Phase::Complete).then(|| InterviewSummary::from_session(session))
    }
}
