//! Follow-up gates decide, per answer, whether the follow-up generator is consulted.

use rand::Rng;

use crate::analysis::AnswerAnalysis;

/// Decides whether an answer should be probed with a follow-up.
/// Carried by the controller as `Arc<dyn FollowupGate>`.
pub trait FollowupGate: Send + Sync {
    fn should_follow_up(&self, analysis: &AnswerAnalysis) -> bool;
}

/// Follows up exactly when the analyzer flags the answer.
pub struct NeedsFollowupGate;

impl FollowupGate for NeedsFollowupGate {
    fn should_follow_up(&self, analysis: &AnswerAnalysis) -> bool {
        analysis.needs_followup
    }
}

/// Follows up on flagged answers only when a roll in [0, 1) lands below `probability`.
pub struct ProbabilisticGate {
    probability: f64,
    roll: Box<dyn Fn() -> f64 + Send + Sync>,
}

impl ProbabilisticGate {
    pub fn new(probability: f64) -> Self {
        Self::with_roll(probability, || rand::thread_rng().gen::<f64>())
    }

    /// Injects the roll source, e.g. a constant in tests.
    pub fn with_roll(probability: f64, roll: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            roll: Box::new(roll),
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl FollowupGate for ProbabilisticGate {
    fn should_follow_up(&self, analysis: &AnswerAnalysis) -> bool {
        analysis.needs_followup && (self.roll)() < self.probability
    }
}
