//! Resume → skills extraction.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::interview::prompts::{resume_skills_schema, RESUME_SKILLS_PROMPT};
use crate::llm_client::{
    parse_json, GenerateContentRequest, GenerationConfig, LlmError, ModelProvider, Part, MODEL,
};
use crate::models::interview::Skill;

#[derive(Debug, Deserialize)]
struct ExtractedSkills {
    #[serde(default)]
    skills: Option<Vec<ExtractedSkill>>,
}

/// Fields are read loosely: the schema is a request to the model, not a guarantee.
#[derive(Debug, Deserialize)]
struct ExtractedSkill {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
}

/// Sends the resume file to the model and returns its skills, all selected.
pub async fn extract_skills(
    provider: &dyn ModelProvider,
    file: Vec<u8>,
    mime_type: &str,
) -> Result<Vec<Skill>, AppError> {
    let request = GenerateContentRequest::user(vec![
        Part::inline(mime_type, file),
        Part::text(RESUME_SKILLS_PROMPT),
    ])
    .with_config(GenerationConfig::json(resume_skills_schema()));

    let response = provider
        .generate_content(MODEL, &request)
        .await
        .map_err(|e| AppError::Llm(format!("Resume parsing failed: {e}")))?;

    skills_from_text(response.text().as_deref())
        .map_err(|e| AppError::Llm(format!("Resume parsing failed: {e}")))
}

/// Maps the model's JSON to `Skill`s with positional ids (`skill-0`, `skill-1`, ...).
/// No text at all means no skills.
fn skills_from_text(text: Option<&str>) -> Result<Vec<Skill>, LlmError> {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Ok(Vec::new()),
    };

    let extracted: ExtractedSkills = parse_json(text)?;

    Ok(extracted
        .skills
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, item)| Skill {
            id: format!("skill-{index}"),
            name: field_text(item.name),
            category: field_text(item.category),
            selected: true,
        })
        .collect())
}

/// Strings as-is, other scalars in their JSON form, null or missing as "".
fn field_text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}
