//! The résumé rendering pipeline: markdown → layout fragments → themed HTML → PDF.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::render::document::compose_document;
use crate::render::engine::{render_document, PageFormat, RenderError, RenderingEngine};
use crate::render::image::{image_document, ImageInfo};
use crate::render::markdown::layout_markdown;
use crate::render::theme::ThemeProvider;
use crate::render::vocabulary::Vocabulary;

/// Request-scoped pipeline inputs shared across requests. Holds no mutable state.
#[derive(Clone)]
pub struct ResumeRenderer {
    themes: Arc<dyn ThemeProvider>,
    engine: Arc<dyn RenderingEngine>,
    page_format: PageFormat,
    budget: Duration,
}

impl ResumeRenderer {
    pub fn new(
        themes: Arc<dyn ThemeProvider>,
        engine: Arc<dyn RenderingEngine>,
        page_format: PageFormat,
        budget: Duration,
    ) -> Self {
        Self {
            themes,
            engine,
            page_format,
            budget,
        }
    }

    pub fn themes(&self) -> &dyn ThemeProvider {
        self.themes.as_ref()
    }

    /// Produces the complete HTML document for a markdown résumé.
    /// Layout and theme file reads both run off the async executor.
    pub async fn compose(
        &self,
        markdown: String,
        theme_id: Option<&str>,
        vocabulary: &'static Vocabulary,
    ) -> Result<String, RenderError> {
        let themes = Arc::clone(&self.themes);
        let theme_id = theme_id.map(str::to_string);
        tokio::task::spawn_blocking(move || {
            let fragments = layout_markdown(&markdown, vocabulary);
            let theme_id = theme_id.as_deref().unwrap_or_else(|| themes.default_theme());
            let style = themes.resolve(theme_id);
            compose_document(&fragments, &style, vocabulary.language)
        })
        .await
        .map_err(|e| RenderError::Worker(e.to_string()))
    }

    /// Renders a markdown résumé to PDF bytes. Engine failures are not retried.
    pub async fn render_pdf(
        &self,
        markdown: String,
        theme_id: Option<&str>,
        vocabulary: &'static Vocabulary,
    ) -> Result<Vec<u8>, RenderError> {
        let html = self.compose(markdown, theme_id, vocabulary).await?;
        let pdf = render_document(self.engine.as_ref(), &html, self.page_format, self.budget).await?;
        info!(
            "Rendered resume PDF: theme={}, bytes={}",
            theme_id.unwrap_or(self.themes.default_theme()),
            pdf.len()
        );
        Ok(pdf)
    }

    /// Prints one PNG/JPEG image onto a single page of the image's own size.
    pub async fn render_image_pdf(&self, image: &[u8], info: ImageInfo) -> Result<Vec<u8>, RenderError> {
        let html = image_document(image, &info);
        let pdf = render_document(self.engine.as_ref(), &html, info.page_format(), self.budget).await?;
        info!(
            "Rendered image PDF: {}x{} {}, bytes={}",
            info.width,
            info.height,
            info.kind.mime(),
            pdf.len()
        );
        Ok(pdf)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use std::sync::atomic::AtomicUsize;

    use crate::render::engine::tests::{Behavior, FakeEngine};
    use crate::render::image::{sniff_image, tests::png_header};
    use crate::render::vocabulary::ENGLISH;

    /// In-memory themes: only "classic" exists.
    pub(crate) struct StaticThemes;

    impl ThemeProvider for StaticThemes {
        fn resolve(&self, theme_id: &str) -> String {
            match theme_id {
                "modern" => "/* modern */".to_string(),
                _ => "/* classic */".to_string(),
            }
        }

        fn available(&self) -> Vec<String> {
            vec!["classic".to_string(), "modern".to_string()]
        }

        fn default_theme(&self) -> &str {
            "classic"
        }
    }

    pub(crate) fn renderer(engine: FakeEngine) -> ResumeRenderer {
        ResumeRenderer::new(
            Arc::new(StaticThemes),
            Arc::new(engine),
            PageFormat::A4,
            Duration::from_secs(30),
        )
    }

    const JANE_DOE: &str = "# Jane Doe — Engineer\n\n## Contacts\nEmail: jane@x.com\n\n## Skills\n- Go\n\n## Summary\nExperienced engineer.\n\n## Experience\n**Co** — Role\n* Did X";

    #[tokio::test]
    async fn test_compose_uses_requested_theme() {
        let renderer = renderer(FakeEngine::new(Behavior::Succeed));
        let html = renderer
            .compose(JANE_DOE.to_string(), Some("modern"), &ENGLISH)
            .await
            .unwrap();
        assert!(html.contains("<style>/* modern */</style>"));
        assert!(html.contains("<h1>Jane Doe — Engineer</h1>"));
        assert!(html.contains("icon-email"));
    }

    #[tokio::test]
    async fn test_compose_without_theme_uses_default() {
        let renderer = renderer(FakeEngine::new(Behavior::Succeed));
        let html = renderer
            .compose(JANE_DOE.to_string(), None, &ENGLISH)
            .await
            .unwrap();
        assert!(html.contains("<style>/* classic */</style>"));
    }

    /// Panics when a theme is read on the thread driving the (current-thread) runtime.
    struct BlockingThemes {
        executor: std::thread::ThreadId,
        reads: AtomicUsize,
    }

    impl ThemeProvider for BlockingThemes {
        fn resolve(&self, _theme_id: &str) -> String {
            assert_ne!(
                std::thread::current().id(),
                self.executor,
                "theme resolved on the async executor"
            );
            self.reads.fetch_add(1, Ordering::SeqCst);
            "/* blocking */".to_string()
        }

        fn available(&self) -> Vec<String> {
            vec!["classic".to_string()]
        }

        fn default_theme(&self) -> &str {
            "classic"
        }
    }

    #[tokio::test]
    async fn test_theme_is_resolved_off_the_executor() {
        let themes = Arc::new(BlockingThemes {
            executor: std::thread::current().id(),
            reads: AtomicUsize::new(0),
        });
        let renderer = ResumeRenderer::new(
            themes.clone(),
            Arc::new(FakeEngine::new(Behavior::Succeed)),
            PageFormat::A4,
            Duration::from_secs(30),
        );
        let html = renderer
            .compose(JANE_DOE.to_string(), None, &ENGLISH)
            .await
            .unwrap();
        assert!(html.contains("<style>/* blocking */</style>"));
        assert_eq!(themes.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_render_image_pdf_uses_image_sized_page() {
        let engine = FakeEngine::new(Behavior::Succeed);
        let renderer = renderer(engine.clone());
        let image = png_header(720, 1440);
        let info = sniff_image(&image).unwrap();

        let pdf = renderer.render_image_pdf(&image, info).await.unwrap();

        assert!(pdf.starts_with(b"%PDF"));
        let (html, format) = engine.last_printed().unwrap();
        assert_eq!(
            format,
            PageFormat::Exact {
                width: 10.0,
                height: 20.0
            }
        );
        assert!(html.contains("data:image/png;base64,"));
        assert_eq!(engine.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_render_pdf_end_to_end() {
        let engine = FakeEngine::new(Behavior::Succeed);
        let renderer = renderer(engine.clone());
        let pdf = renderer
            .render_pdf(JANE_DOE.to_string(), Some("classic"), &ENGLISH)
            .await
            .unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert_eq!(engine.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_render_pdf_engine_failure_is_fatal() {
        let engine = FakeEngine::new(Behavior::Fail);
        let renderer = renderer(engine.clone());
        let result = renderer
            .render_pdf(JANE_DOE.to_string(), None, &ENGLISH)
            .await;
        assert!(result.is_err());
        assert_eq!(engine.acquired.load(Ordering::SeqCst), 1);
        assert_eq!(engine.released.load(Ordering::SeqCst), 1);
    }
}
