use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelProvider;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Generative model backend. `LlmClient` in production.
    pub provider: Arc<dyn ModelProvider>,
    pub config: Config,
}
