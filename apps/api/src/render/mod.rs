// Résumé rendering: markdown sectioning, two-column routing, contacts formatting,
// markdown → HTML, theme resolution and PDF output through a rendering engine.
// Everything before the engine call is pure and CPU-only.

pub mod chromium;
pub mod contacts;
pub mod document;
pub mod engine;
pub mod handlers;
pub mod image;
pub mod markdown;
pub mod pipeline;
pub mod router;
pub mod sections;
pub mod theme;
pub mod vocabulary;

pub use chromium::ChromiumEngine;
pub use engine::{PageFormat, RenderError};
pub use pipeline::ResumeRenderer;
pub use theme::{FsThemeProvider, ThemeProvider};
pub use vocabulary::Vocabulary;
