// LLM prompt templates and output schemas for the interview endpoints.
// Schemas use the provider's OpenAPI-style type names (OBJECT, ARRAY, ...).

use serde_json::{json, Value};

/// Sent alongside the uploaded resume file.
pub const RESUME_SKILLS_PROMPT: &str = "\
Analyze this resume and extract a list of professional skills.
Categorize them into 'technical' (hard skills, tools, languages) and 'soft' (communication, leadership, etc.).
Return strictly a JSON object with a list of skills.";

/// Question prompt template. Replace `{skills}` and `{previous_questions}` before sending.
pub const QUESTION_PROMPT_TEMPLATE: &str = "\
You are an expert technical interviewer.
The candidate has the following skills: {skills}.

Previous questions asked: {previous_questions}.

Generate ONE new, challenging, but fair interview question relevant to one or more of these skills.
Do not repeat previous topics exactly.
Keep the question concise (under 30 words).
Do not include greetings or introductory text, just the question.";

/// Higher than the provider default so consecutive questions vary.
pub const QUESTION_TEMPERATURE: f64 = 0.8;

/// Answer evaluation template. Replace `{question}` and `{answer}` before sending.
pub const ANSWER_EVALUATION_PROMPT_TEMPLATE: &str = r#"Question: "{question}"
Candidate Answer: "{answer}"

Evaluate the answer.
1. Give a score from 1 to 10 (10 being perfect).
2. Provide concise, constructive feedback (max 2 sentences).

Return JSON."#;

/// Prebuilt provider voice used for every spoken question.
pub const VOICE_NAME: &str = "Kore";

pub fn resume_skills_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "skills": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "category": {"type": "STRING", "enum": ["technical", "soft", "other"]}
                    }
                }
            }
        }
    })
}

pub fn answer_evaluation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": {"type": "INTEGER"},
            "feedback": {"type": "STRING"}
        }
    })
}
