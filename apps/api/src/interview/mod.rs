// Screening interview: profile intake, question serving, adaptive follow-ups, summary.
// The controller owns the flow; handlers only lock a session and delegate.

pub mod controller;
pub mod gate;
pub mod handlers;
pub mod summary;
pub mod validation;

/// Shown on the start screen before the candidate begins.
pub const GREETING: &str = "Hi! I'm TalentScout, your virtual hiring assistant. \
    I'll guide you through a short technical screening tailored to your tech stack. Let's begin!";
