//! Rendering engine seam: turns a composed HTML document into PDF bytes.
//!
//! Engines hand out request-scoped sessions (acquire → render → release).
//! `render_document` owns the session lifecycle: the session is released exactly once
//! on success, on failure, on timeout, and when the calling future is dropped.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch rendering engine: {0}")]
    Launch(String),

    #[error("Failed to load document: {0}")]
    Navigation(String),

    #[error("Failed to print PDF: {0}")]
    Print(String),

    #[error("Rendering timed out after {0:?}")]
    Timeout(Duration),

    #[error("Layout worker failed: {0}")]
    Worker(String),
}

/// Output page size. `Exact` pages are sized to their content and printed without margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
    /// Width and height in inches.
    Exact { width: f64, height: f64 },
}

impl PageFormat {
    /// Paper size as (width, height) in inches.
    pub fn size_inches(self) -> (f64, f64) {
        match self {
            PageFormat::A4 => (8.27, 11.69),
            PageFormat::Letter => (8.5, 11.0),
            PageFormat::Exact { width, height } => (width, height),
        }
    }

    /// Page margin in inches; `None` leaves the engine default.
    pub fn margin_inches(self) -> Option<f64> {
        match self {
            PageFormat::Exact { .. } => Some(0.0),
            _ => None,
        }
    }
}

impl FromStr for PageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageFormat::A4),
            "letter" => Ok(PageFormat::Letter),
            other => Err(format!("Unknown page format '{other}' (expected A4 or Letter)")),
        }
    }
}

/// One live engine instance (a browser process, a pooled tab, ...).
#[async_trait]
pub trait RenderSession: Send {
    async fn render(&mut self, html: &str, format: PageFormat) -> Result<Vec<u8>, RenderError>;

    /// Tears the session down. Called exactly once per acquired session.
    async fn release(&mut self) -> Result<(), RenderError>;
}

#[async_trait]
pub trait RenderingEngine: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn RenderSession>, RenderError>;
}

/// Holds an acquired session and releases it if dropped before `release` ran.
struct SessionGuard {
    session: Option<Box<dyn RenderSession>>,
}

impl SessionGuard {
    async fn render(&mut self, html: &str, format: PageFormat) -> Result<Vec<u8>, RenderError> {
        match self.session.as_mut() {
            Some(session) => session.render(html, format).await,
            None => Err(RenderError::Launch("session already released".to_string())),
        }
    }

    async fn release(&mut self) {
        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.release().await {
                warn!("Rendering session teardown failed: {e}");
            }
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!("Rendering cancelled, releasing session in background");
                handle.spawn(async move {
                    if let Err(e) = session.release().await {
                        warn!("Rendering session teardown after cancellation failed: {e}");
                    }
                });
            }
            Err(_) => warn!("Rendering session dropped outside a runtime; not released"),
        }
    }
}

/// Renders one document in a fresh session under a time budget. Not retried.
pub async fn render_document(
    engine: &dyn RenderingEngine,
    html: &str,
    format: PageFormat,
    budget: Duration,
) -> Result<Vec<u8>, RenderError> {
    let mut guard = SessionGuard {
        session: Some(engine.acquire().await?),
    };

    let outcome = match tokio::time::timeout(budget, guard.render(html, format)).await {
        Ok(result) => result,
        Err(_) => Err(RenderError::Timeout(budget)),
    };

    guard.release().await;
    outcome
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy)]
    pub(crate) enum Behavior {
        Succeed,
        Fail,
        Hang,
    }

    /// Engine double that counts acquisitions and releases and records what it printed.
    #[derive(Clone)]
    pub(crate) struct FakeEngine {
        pub behavior: Behavior,
        pub acquired: Arc<AtomicUsize>,
        pub released: Arc<AtomicUsize>,
        pub printed: Arc<Mutex<Vec<(String, PageFormat)>>>,
    }

    impl FakeEngine {
        pub(crate) fn new(behavior: Behavior) -> Self {
            Self {
                behavior,
                acquired: Arc::new(AtomicUsize::new(0)),
                released: Arc::new(AtomicUsize::new(0)),
                printed: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub(crate) fn last_printed(&self) -> Option<(String, PageFormat)> {
            self.printed.lock().unwrap().last().cloned()
        }
    }

    struct FakeSession {
        behavior: Behavior,
        released: Arc<AtomicUsize>,
        printed: Arc<Mutex<Vec<(String, PageFormat)>>>,
    }

    #[async_trait]
    impl RenderSession for FakeSession {
        async fn render(&mut self, html: &str, format: PageFormat) -> Result<Vec<u8>, RenderError> {
            self.printed.lock().unwrap().push((html.to_string(), format));
            match self.behavior {
                Behavior::Succeed => Ok(format!("%PDF-1.7\n{}", html.len()).into_bytes()),
                Behavior::Fail => Err(RenderError::Navigation("target crashed".to_string())),
                Behavior::Hang => std::future::pending().await,
            }
        }

        async fn release(&mut self) -> Result<(), RenderError> {
            self.released.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[async_trait]
    impl RenderingEngine for FakeEngine {
        async fn acquire(&self) -> Result<Box<dyn RenderSession>, RenderError> {
            self.acquired.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FakeSession {
                behavior: self.behavior,
                released: self.released.clone(),
                printed: self.printed.clone(),
            }))
        }
    }

    const BUDGET: Duration = Duration::from_secs(30);

    #[tokio::test]
    async fn test_success_releases_once() {
        let engine = FakeEngine::new(Behavior::Succeed);
        let pdf = render_document(&engine, "<html></html>", PageFormat::A4, BUDGET)
            .await
            .unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert_eq!(engine.acquired.load(Ordering::SeqCst), 1);
        assert_eq!(engine.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_engine_failure_propagates_and_releases_once() {
        let engine = FakeEngine::new(Behavior::Fail);
        let result = render_document(&engine, "<html></html>", PageFormat::A4, BUDGET).await;
        assert!(matches!(result, Err(RenderError::Navigation(_))));
        assert_eq!(engine.acquired.load(Ordering::SeqCst), 1, "no retry");
        assert_eq!(engine.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_releases_once() {
        let engine = FakeEngine::new(Behavior::Hang);
        let result = render_document(&engine, "<html></html>", PageFormat::A4, BUDGET).await;
        assert!(matches!(result, Err(RenderError::Timeout(d)) if d == BUDGET));
        assert_eq!(engine.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_request_releases_once() {
        let engine = FakeEngine::new(Behavior::Hang);
        let call = render_document(&engine, "<html></html>", PageFormat::A4, BUDGET);
        // Caller gives up long before the render budget
        let aborted = tokio::time::timeout(Duration::from_secs(1), call).await;
        assert!(aborted.is_err());

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(engine.released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_page_format_parsing() {
        assert_eq!("a4".parse::<PageFormat>().unwrap(), PageFormat::A4);
        assert_eq!(" Letter ".parse::<PageFormat>().unwrap(), PageFormat::Letter);
        assert!("tabloid".parse::<PageFormat>().is_err());
        assert_eq!(PageFormat::default().size_inches(), (8.27, 11.69));
    }

    #[test]
    fn test_exact_pages_have_no_margin() {
        let exact = PageFormat::Exact {
            width: 10.0,
            height: 5.0,
        };
        assert_eq!(exact.size_inches(), (10.0, 5.0));
        assert_eq!(exact.margin_inches(), Some(0.0));
        assert_eq!(PageFormat::A4.margin_inches(), None);
    }
}
