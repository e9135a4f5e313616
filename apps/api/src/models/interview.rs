use serde::{Deserialize, Serialize};

/// A skill the candidate can be interviewed on.
///
/// `category` is nominally `technical`, `soft` or `other`; it is whatever the
/// provider returned and is not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRequest {
    pub selected_skills: Vec<Skill>,
    /// Only used to steer the model away from repeats.
    pub previous_questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub question: String,
    pub answer: String,
}

/// Score is nominally 1-10 but passed through unclamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub score: i64,
    pub feedback: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TtsRequest {
    pub text: String,
}

/// `audio` is `None` (JSON `null`) whenever synthesis failed for any reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtsResponse {
    pub audio: Option<String>,
}
