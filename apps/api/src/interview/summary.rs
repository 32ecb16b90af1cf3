//! Closing summary signals for a completed interview.

use serde::{Deserialize, Serialize};

use crate::models::interview::InterviewSession;

const POSITIVE_TONE_THRESHOLD: f32 = 0.3;
const HESITANT_TONE_THRESHOLD: f32 = -0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Neutral,
    Hesitant,
}

impl Tone {
    pub fn from_average(average: f32) -> Self {
        if average > POSITIVE_TONE_THRESHOLD {
            Tone::Positive
        } else if average < HESITANT_TONE_THRESHOLD {
            Tone::Hesitant
        } else {
            Tone::Neutral
        }
    }

    fn feedback(&self) -> &'static str {
        match self {
            Tone::Positive => "You came across as confident and positive. Great job!",
            Tone::Neutral => {
                "Your tone was quite neutral throughout. Thank you for being thoughtful in your responses."
            }
            Tone::Hesitant => {
                "We sensed a bit of hesitation or uncertainty. Remember to highlight your strengths next time!"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSummary {
    pub candidate_name: String,
    pub email: String,
    pub questions_answered: usize,
    pub follow_ups_asked: usize,
    /// Mean answer polarity; 0.0 with no answers.
    pub average_sentiment: f32,
    /// Fraction of answers that mention at least one declared technology.
    pub tech_mention_rate: f32,
    pub total_tech_mentions: usize,
    pub tone: Tone,
    pub closing_message: String,
}

impl InterviewSummary {
    pub fn from_session(session: &InterviewSession) -> Self {
        let answered = session.answers.len();

        let average_sentiment = if answered == 0 {
            0.0
        } else {
            session.sentiments().sum::<f32>() / answered as f32
        };

        let engaged = session
            .answers
            .iter()
            .filter(|a| a.tech_mention_count > 0)
            .count();
        let tech_mention_rate = if answered == 0 {
            0.0
        } else {
            engaged as f32 / answered as f32
        };

        let (candidate_name, email) = session
            .profile
            .as_ref()
            .map(|p| (p.name.clone(), p.email.clone()))
            .unwrap_or_else(|| ("Candidate".to_string(), "your email".to_string()));

        let tone = Tone::from_average(average_sentiment);
        let closing_message = format!(
            "Thank you for your time, {candidate_name}! {} Our recruitment team will review your \
             responses and match your profile with relevant opportunities. You'll hear from us at \
             {email} within a few days.",
            tone.feedback()
        );

        Self {
            candidate_name,
            email,
            questions_answered: answered,
            follow_ups_asked: session.follow_ups_asked(),
            average_sentiment,
            tech_mention_rate,
            total_tech_mentions: session.answers.iter().map(|a| a.tech_mention_count).sum(),
            tone,
            closing_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interview::{Answer, Question};
    use crate::models::profile::{CandidateProfile, ExperienceLevel};
    use uuid::Uuid;

    fn answer(sentiment: f32, mentions: usize) -> Answer {
        Answer {
            text: "answer".to_string(),
            sentiment_score: sentiment,
            word_count: 40,
            tech_mention_count: mentions,
            needed_followup: false,
        }
    }

    fn session_with(answers: Vec<Answer>) -> InterviewSession {
        let mut session = InterviewSession::new(Uuid::new_v4());
        session.profile = Some(CandidateProfile {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            phone: "555-0100".to_string(),
            location: "Arlington".to_string(),
            experience: ExperienceLevel::Principal,
            desired_position: "Compiler Engineer".to_string(),
            tech_stack: vec!["COBOL".to_string()],
        });
        session.questions = (0..answers.len())
            .map(|i| Question::base(format!("Q{i}?")))
            .collect();
        session.current_index = answers.len();
        session.answers = answers;
        session
    }

    #[test]
    fn test_tone_thresholds() {
        assert_eq!(Tone::from_average(0.31), Tone::Positive);
        assert_eq!(Tone::from_average(0.3), Tone::Neutral);
        assert_eq!(Tone::from_average(-0.3), Tone::Neutral);
        assert_eq!(Tone::from_average(-0.31), Tone::Hesitant);
    }

    #[test]
    fn test_summary_aggregates_answers() {
        let summary = InterviewSummary::from_session(&session_with(vec![
            answer(0.6, 2),
            answer(0.4, 0),
            answer(0.2, 1),
            answer(0.4, 0),
        ]));
        assert_eq!(summary.questions_answered, 4);
        assert!((summary.average_sentiment - 0.4).abs() < 1e-6);
        assert!((summary.tech_mention_rate - 0.5).abs() < f32::EPSILON);
        assert_eq!(summary.total_tech_mentions, 3);
        assert_eq!(summary.tone, Tone::Positive);
        assert!(summary.closing_message.contains("Grace"));
        assert!(summary.closing_message.contains("grace@example.com"));
    }

    #[test]
    fn test_summary_without_answers_is_neutral() {
        let summary = InterviewSummary::from_session(&session_with(vec![]));
        assert_eq!(summary.questions_answered, 0);
        assert_eq!(summary.average_sentiment, 0.0);
        assert_eq!(summary.tech_mention_rate, 0.0);
        assert_eq!(summary.tone, Tone::Neutral);
    }
}
