//! Canned `ModelProvider` for exercising handlers without a network.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{GenerateContentRequest, GenerateContentResponse, LlmError, ModelProvider};

enum Reply {
    Body(Value),
    Fail(String),
}

pub struct StubProvider {
    reply: Reply,
    requests: Mutex<Vec<(String, Value)>>,
}

impl StubProvider {
    /// Replies with a raw `generateContent` response body.
    pub fn body(body: Value) -> Self {
        Self {
            reply: Reply::Body(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replies with a single candidate holding one text part.
    pub fn text(text: &str) -> Self {
        Self::body(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
        }))
    }

    /// Replies with a candidate that has no parts at all.
    pub fn empty() -> Self {
        Self::body(json!({"candidates": [{"finishReason": "STOP"}]}))
    }

    /// Fails every call with a 500 from the provider.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Fail(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every `(model, serialized request)` received so far.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> (String, Value) {
        self.requests()
            .pop()
            .expect("provider was never called")
    }
}

#[async_trait]
impl ModelProvider for StubProvider {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), serde_json::to_value(request)?));
        match &self.reply {
            Reply::Body(body) => Ok(serde_json::from_value(body.clone())?),
            Reply::Fail(message) => Err(LlmError::Api {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}
