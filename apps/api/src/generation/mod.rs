// Question generation: seeds base questions and proposes follow-ups.
// All LLM calls go through llm_client::CompletionService. Neither generator
// ever returns an error: failures degrade to a fallback question or "no follow-up".

pub mod followup;
pub mod prompts;
pub mod question_generator;
