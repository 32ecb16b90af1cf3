// All LLM prompt templates for question and follow-up generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Base question generation template.
/// Replace: {persona}, {plain_text}, {tech_stack}, {role}, {experience}, {count_min}, {count_max}
pub const QUESTION_GENERATION_TEMPLATE: &str = r#"{persona}

Your task is to write tailored technical screening questions.

Candidate's Tech Stack: {tech_stack}
Desired Position: {role}
Experience: {experience}

Guidelines:
- Generate {count_min} to {count_max} relevant technical questions based on the stack and role.
- Vary difficulty: include at least one conceptual, one practical, and one deeper applied question.
- Calibrate depth to the candidate's experience level.
- Avoid overused textbook definitions unless the candidate is entry level.
- Keep each question natural, short, and free of unnecessary jargon.
- Output the questions as a plain bulleted list, one question per line, each ending with a question mark.

{plain_text}"#;

/// Follow-up generation template.
/// Replace: {persona}, {plain_text}, {tech_stack}, {question}, {answer}
pub const FOLLOWUP_TEMPLATE: &str = r#"{persona}

Tech Stack: {tech_stack}

Interview question:
"{question}"

Candidate's answer:
{answer}

Respond with EXACTLY ONE follow-up question that would:
- Clarify or deepen the candidate's response
- Stay on topic and sound human and natural

If the answer is already strong and needs no follow-up, reply with an EMPTY string.

{plain_text}"#;

/// Asked without a model call when an answer is too thin to probe.
pub const ELABORATION_PROMPT: &str =
    "Would you mind elaborating a little more on your answer?";
