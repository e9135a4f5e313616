//! Free-text answer scoring.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::interview::prompts::{answer_evaluation_schema, ANSWER_EVALUATION_PROMPT_TEMPLATE};
use crate::llm_client::{
    parse_json, GenerateContentRequest, GenerationConfig, LlmError, ModelProvider, Part, MODEL,
};
use crate::models::interview::{AnswerFeedback, AnswerRequest};

pub const DEFAULT_FEEDBACK: &str = "No feedback provided.";

/// Fields are read loosely: the schema is a request to the model, not a guarantee.
#[derive(Debug, Default, Deserialize)]
struct RawEvaluation {
    #[serde(default)]
    score: Option<Value>,
    #[serde(default)]
    feedback: Option<Value>,
}

/// Scores `answer` against `question`. Missing fields fall back to
/// score 0 and [`DEFAULT_FEEDBACK`].
pub async fn evaluate_answer(
    provider: &dyn ModelProvider,
    request: &AnswerRequest,
) -> Result<AnswerFeedback, AppError> {
    let prompt = ANSWER_EVALUATION_PROMPT_TEMPLATE
        .replace("{question}", &request.question)
        .replace("{answer}", &request.answer);

    let llm_request = GenerateContentRequest::user(vec![Part::text(prompt)])
        .with_config(GenerationConfig::json(answer_evaluation_schema()));

    let response = provider
        .generate_content(MODEL, &llm_request)
        .await
        .map_err(|e| AppError::Llm(format!("Answer validation failed: {e}")))?;

    feedback_from_text(response.text().as_deref())
        .map_err(|e| AppError::Llm(format!("Answer validation failed: {e}")))
}

fn feedback_from_text(text: Option<&str>) -> Result<AnswerFeedback, LlmError> {
    let raw: RawEvaluation = match text {
        Some(t) if !t.trim().is_empty() => parse_json(t)?,
        _ => RawEvaluation::default(),
    };

    Ok(AnswerFeedback {
        score: raw.score.as_ref().and_then(score_from_value).unwrap_or(0),
        feedback: raw
            .feedback
            .as_ref()
            .and_then(feedback_from_value)
            .unwrap_or_else(|| DEFAULT_FEEDBACK.to_string()),
    })
}

/// Integers pass through; floats and numeric strings are rounded.
fn score_from_value(value: &Value) -> Option<i64> {
    let number = match value {
        Value::Number(n) => return n.as_i64().or_else(|| n.as_f64().and_then(round_score)),
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    round_score(number)
}

fn round_score(number: f64) -> Option<i64> {
    number.is_finite().then(|| number.round() as i64)
}

fn feedback_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
