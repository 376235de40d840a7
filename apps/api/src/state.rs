use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::TextGenerationProvider;
use crate::render::ResumeRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Text generation for every AI operation. `LlmClient` in production.
    pub llm: Arc<dyn TextGenerationProvider>,
    /// Themes plus rendering engine; request-scoped sessions, no shared mutable state.
    pub renderer: ResumeRenderer,
}
