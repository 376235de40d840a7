//! Theme resolution: maps a theme id to the CSS text of `<themes_dir>/<id>.css`.

use std::path::PathBuf;

use tracing::{error, warn};

/// Resolves theme ids to style text. Never fails: unknown ids fall back to the
/// default theme, and an unreadable default yields empty style text.
pub trait ThemeProvider: Send + Sync {
    fn resolve(&self, theme_id: &str) -> String;

    /// Ids of the themes that can be resolved without falling back.
    fn available(&self) -> Vec<String>;

    fn default_theme(&self) -> &str;
}

/// Reads themes from a directory of `.css` files.
#[derive(Debug, Clone)]
pub struct FsThemeProvider {
    dir: PathBuf,
    default_theme: String,
}

impl FsThemeProvider {
    pub fn new(dir: impl Into<PathBuf>, default_theme: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            default_theme: default_theme.into(),
        }
    }

    fn read(&self, theme_id: &str) -> Option<String> {
        if !is_valid_theme_id(theme_id) {
            warn!("Rejected theme id '{theme_id}'");
            return None;
        }
        let path = self.dir.join(format!("{theme_id}.css"));
        match std::fs::read_to_string(&path) {
            Ok(css) => Some(css),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Theme file not found at {}", path.display());
                None
            }
            Err(e) => {
                error!("Error reading theme file {}: {e}", path.display());
                None
            }
        }
    }
}

impl ThemeProvider for FsThemeProvider {
    fn resolve(&self, theme_id: &str) -> String {
        if let Some(css) = self.read(theme_id) {
            return css;
        }
        if theme_id != self.default_theme {
            warn!(
                "Theme '{theme_id}' unavailable, using default '{}'",
                self.default_theme
            );
            if let Some(css) = self.read(&self.default_theme) {
                return css;
            }
        }
        error!(
            "Default theme '{}' is unreadable, rendering unstyled",
            self.default_theme
        );
        String::new()
    }

    fn available(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot list themes in {}: {e}", self.dir.display());
                return Vec::new();
            }
        };
        let mut themes: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "css"))
            .filter_map(|path| path.file_stem()?.to_str().map(String::from))
            .filter(|stem| is_valid_theme_id(stem))
            .collect();
        themes.sort();
        themes
    }

    fn default_theme(&self) -> &str {
        &self.default_theme
    }
}

/// Theme ids are plain file stems; anything else could escape the themes directory.
fn is_valid_theme_id(theme_id: &str) -> bool {
    !theme_id.is_empty()
        && theme_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
