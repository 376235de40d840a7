//! Composes rendered fragments and theme CSS into one printable HTML document.

use crate::render::markdown::Fragments;

const ICON_STYLESHEET: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css";

/// Builds the four-region résumé document:
/// name/title header, contacts block, left column (aside), right column (main).
pub fn compose_document(fragments: &Fragments, style: &str, language: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{language}">
<head>
  <meta charset="utf-8">
  <title>Resume</title>
  <style>{style}</style>
  <link rel="stylesheet" href="{ICON_STYLESHEET}">
</head>
<body>
  <div class="cv-container">
    <header class="cv-name-title-block">
{name_title}
    </header>
    <div class="cv-contacts-block">
{contacts}
    </div>
    <div class="cv-content-columns">
      <aside class="left-column">
{left}
      </aside>
      <main class="right-column">
{right}
      </main>
    </div>
  </div>
</body>
</html>
"#,
        name_title = fragments.name_title,
        contacts = fragments.contacts,
        left = fragments.left,
        right = fragments.right,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments() -> Fragments {
        Fragments {
            name_title: "<h1>Jane</h1>".to_string(),
            contacts: "<h2>Contacts</h2>".to_string(),
            left: "<h2>Skills</h2>".to_string(),
            right: "<h2>Summary</h2>".to_string(),
        }
    }

    #[test]
    fn test_regions_are_populated_in_layout_order() {
        let html = compose_document(&fragments(), "body{}", "en");
        let positions: Vec<usize> = [
            "<header class=\"cv-name-title-block\">\n<h1>Jane</h1>",
            "<div class=\"cv-contacts-block\">\n<h2>Contacts</h2>",
            "<aside class=\"left-column\">\n<h2>Skills</h2>",
            "<main class=\"right-column\">\n<h2>Summary</h2>",
        ]
        .iter()
        .map(|needle| html.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_theme_style_and_language_are_embedded() {
        let html = compose_document(&fragments(), "h1 { color: red; }", "ru");
        assert!(html.contains("<style>h1 { color: red; }</style>"));
        assert!(html.contains("<html lang=\"ru\">"));
        assert!(html.contains(ICON_STYLESHEET));
    }

    #[test]
    fn test_unstyled_document_still_composes() {
        let html = compose_document(&Fragments::default(), "", "en");
        assert!(html.contains("<style></style>"));
        assert!(html.contains("<main class=\"right-column\">"));
    }
}
