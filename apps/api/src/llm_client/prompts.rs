// Shared prompt fragments used by more than one generator.
// Each generator keeps its own templates in generation/prompts.rs.

/// Persona line that opens every interviewer prompt.
pub const INTERVIEWER_PERSONA: &str = "You are TalentScout, a friendly and professional AI hiring \
    assistant conducting a short technical screening for a candidate.";

/// Keeps model output free of preambles so the line-based parsers see only content.
pub const PLAIN_TEXT_ONLY: &str = "Respond with plain text only. \
    Do NOT add introductions, explanations, headings or closing remarks. \
    Do NOT use markdown formatting.";
