use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_BASE_URL;
use crate::render::PageFormat;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub themes_dir: PathBuf,
    pub default_theme: String,
    /// Chromium binary to launch; autodetected when unset.
    pub chrome_executable: Option<PathBuf>,
    pub render_timeout_secs: u64,
    pub page_format: PageFormat,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            themes_dir: optional_env("THEMES_DIR")
                .unwrap_or_else(|| "themes".to_string())
                .into(),
            default_theme: optional_env("DEFAULT_THEME").unwrap_or_else(|| "classic".to_string()),
            chrome_executable: optional_env("CHROME_EXECUTABLE").map(PathBuf::from),
            render_timeout_secs: optional_env("RENDER_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse::<u64>()
                .context("RENDER_TIMEOUT_SECS must be a whole number of seconds")?,
            page_format: optional_env("PAGE_FORMAT")
                .map(|v| v.parse::<PageFormat>())
                .transpose()
                .map_err(|e| anyhow::anyhow!("PAGE_FORMAT: {e}"))?
                .unwrap_or_default(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
