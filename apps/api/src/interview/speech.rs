//! Speech synthesis. Unlike the other endpoints this never fails: every
//! problem is logged and reported to the caller as missing audio.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{error, warn};

use crate::interview::prompts::VOICE_NAME;
use crate::llm_client::{GenerateContentRequest, GenerationConfig, ModelProvider, Part, TTS_MODEL};

/// Returns the synthesized audio as base64, or `None` on any failure.
pub async fn synthesize_speech(provider: &dyn ModelProvider, text: &str) -> Option<String> {
    let request = GenerateContentRequest::user(vec![Part::text(text)])
        .with_config(GenerationConfig::audio(VOICE_NAME));

    let response = match provider.generate_content(TTS_MODEL, &request).await {
        Ok(r) => r,
        Err(e) => {
            error!("Speech synthesis failed: {e}");
            return None;
        }
    };

    match response.first_inline_data() {
        Some(blob) => Some(encode_audio(&blob.data)),
        None => {
            warn!("Speech synthesis returned no audio payload");
            None
        }
    }
}

pub fn encode_audio(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
