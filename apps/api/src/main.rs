mod ai;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod render;
mod resumes;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::LlmClient;
use crate::render::{ChromiumEngine, FsThemeProvider, ResumeRenderer, ThemeProvider};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Builder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_base_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize themes and the rendering engine
    let themes = FsThemeProvider::new(&config.themes_dir, config.default_theme.clone());
    info!(
        "Themes from {}: {:?} (default: {})",
        config.themes_dir.display(),
        themes.available(),
        themes.default_theme()
    );
    let engine = ChromiumEngine::new(config.chrome_executable.clone());
    let renderer = ResumeRenderer::new(
        Arc::new(themes),
        Arc::new(engine),
        config.page_format,
        Duration::from_secs(config.render_timeout_secs),
    );
    info!(
        "Renderer: {:?} pages, {}s budget",
        config.page_format, config.render_timeout_secs
    );

    // Build app state
    let state = AppState {
        db,
        llm: Arc::new(llm),
        renderer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
