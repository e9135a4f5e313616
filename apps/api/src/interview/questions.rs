//! Interview question generation.

use crate::errors::AppError;
use crate::interview::prompts::{QUESTION_PROMPT_TEMPLATE, QUESTION_TEMPERATURE};
use crate::llm_client::{GenerateContentRequest, GenerationConfig, ModelProvider, Part, MODEL};
use crate::models::interview::{QuestionRequest, Skill};

/// Returned when the model produces no usable text.
pub const FALLBACK_QUESTION: &str = "Could not generate question.";

/// Asks the model for one new question about the selected skills.
/// Novelty and relevance are left to the model.
pub async fn generate_question(
    provider: &dyn ModelProvider,
    request: &QuestionRequest,
) -> Result<String, AppError> {
    let prompt = build_question_prompt(&request.selected_skills, &request.previous_questions)?;

    let llm_request = GenerateContentRequest::user(vec![Part::text(prompt)]).with_config(
        GenerationConfig {
            temperature: Some(QUESTION_TEMPERATURE),
            ..Default::default()
        },
    );

    let response = provider
        .generate_content(MODEL, &llm_request)
        .await
        .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;

    Ok(question_or_fallback(response.text().as_deref()))
}

fn build_question_prompt(
    skills: &[Skill],
    previous_questions: &[String],
) -> Result<String, AppError> {
    let skills_list = skills
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let previous = serde_json::to_string(previous_questions)
        .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;

    Ok(QUESTION_PROMPT_TEMPLATE
        .replace("{skills}", &skills_list)
        .replace("{previous_questions}", &previous))
}

fn question_or_fallback(text: Option<&str>) -> String {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .unwrap_or_else(|| FALLBACK_QUESTION.to_string())
}
