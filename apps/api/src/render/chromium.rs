//! Headless Chromium rendering engine (one browser process per session).

use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::render::engine::{PageFormat, RenderError, RenderSession, RenderingEngine};

/// Resolves once web fonts (the icon font included) finished loading.
const FONTS_READY_JS: &str = "document.fonts.ready.then(() => true)";

#[derive(Debug, Clone, Default)]
pub struct ChromiumEngine {
    executable: Option<PathBuf>,
}

impl ChromiumEngine {
    pub fn new(executable: Option<PathBuf>) -> Self {
        Self { executable }
    }

    fn browser_config(&self) -> Result<BrowserConfig, RenderError> {
        let mut builder = BrowserConfig::builder()
            .new_headless_mode()
            .no_sandbox()
            .args(vec!["--disable-gpu", "--disable-dev-shm-usage"]);
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(RenderError::Launch)
    }
}

#[async_trait]
impl RenderingEngine for ChromiumEngine {
    async fn acquire(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        let config = self.browser_config()?;
        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            error!("Failed to launch headless browser: {e}");
            RenderError::Launch(e.to_string())
        })?;

        // Drive the CDP connection in the background until the browser goes away
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!("Headless browser launched");
        Ok(Box::new(ChromiumSession {
            browser: Some(browser),
            events,
        }))
    }
}

struct ChromiumSession {
    browser: Option<Browser>,
    events: JoinHandle<()>,
}

impl ChromiumSession {
    async fn load(page: &Page, html: &str) -> Result<(), RenderError> {
        page.set_content(html)
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))?;
        page.evaluate(FONTS_READY_JS)
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl RenderSession for ChromiumSession {
    async fn render(&mut self, html: &str, format: PageFormat) -> Result<Vec<u8>, RenderError> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| RenderError::Launch("browser already closed".to_string()))?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        Self::load(&page, html).await?;

        let (width, height) = format.size_inches();
        let margin = format.margin_inches();
        let params = PrintToPdfParams {
            paper_width: Some(width),
            paper_height: Some(height),
            margin_top: margin,
            margin_bottom: margin,
            margin_left: margin,
            margin_right: margin,
            print_background: Some(true),
            prefer_css_page_size: Some(false),
            ..Default::default()
        };
        let pdf = page
            .pdf(params)
            .await
            .map_err(|e| RenderError::Print(e.to_string()))?;

        info!("Rendered {} byte PDF ({format:?})", pdf.len());
        Ok(pdf)
    }

    async fn release(&mut self) -> Result<(), RenderError> {
        let Some(mut browser) = self.browser.take() else {
            return Ok(());
        };
        let closed = browser.close().await;
        // Reap the child process even if the close command failed
        if let Err(e) = browser.wait().await {
            error!("Failed to reap browser process: {e}");
        }
        self.events.abort();
        closed
            .map(|_| debug!("Headless browser closed"))
            .map_err(|e| RenderError::Launch(format!("browser close failed: {e}")))
    }
}
