//! Axum route handlers for the interview API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::interview::evaluation::evaluate_answer;
use crate::interview::questions::generate_question;
use crate::interview::resume::extract_skills;
use crate::interview::speech::synthesize_speech;
use crate::models::interview::{
    AnswerFeedback, AnswerRequest, QuestionRequest, QuestionResponse, Skill, TtsRequest,
    TtsResponse,
};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

struct Upload {
    data: Vec<u8>,
    mime_type: String,
}

/// POST /parse-resume
///
/// Multipart upload with a `file` field. Returns the extracted skills.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<Skill>>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    info!(
        "Parsing resume: {} bytes of {}",
        upload.data.len(),
        upload.mime_type
    );

    let skills = extract_skills(state.provider.as_ref(), upload.data, &upload.mime_type).await?;
    info!("Extracted {} skills", skills.len());

    Ok(Json(skills))
}

/// POST /generate-question
pub async fn handle_generate_question(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<QuestionResponse>, AppError> {
    let question = generate_question(state.provider.as_ref(), &request).await?;
    Ok(Json(QuestionResponse { question }))
}

/// POST /validate-answer
pub async fn handle_validate_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerFeedback>, AppError> {
    let feedback = evaluate_answer(state.provider.as_ref(), &request).await?;
    Ok(Json(feedback))
}

/// POST /tts
///
/// Always 200. `audio` is null when synthesis failed.
pub async fn handle_tts(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> Json<TtsResponse> {
    let audio = synthesize_speech(state.provider.as_ref(), &request.text).await;
    Json(TtsResponse { audio })
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let mime_type = upload_mime_type(field.content_type(), field.file_name());
        let data = field.bytes().await?;
        return Ok(Upload {
            data: data.to_vec(),
            mime_type,
        });
    }
    Err(AppError::UnprocessableEntity(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}

/// Declared content type first, then a guess from the file name.
fn upload_mime_type(content_type: Option<&str>, file_name: Option<&str>) -> String {
    content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .map(String::from)
        .or_else(|| {
            file_name
                .and_then(|name| mime_guess::from_path(name).first_raw())
                .map(String::from)
        })
        .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string())
}
