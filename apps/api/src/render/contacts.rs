//! Contacts block formatting for the résumé header.

use serde::Serialize;

use crate::render::vocabulary::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Github,
    Linkedin,
    Location,
    Unrecognized,
}

impl ContactKind {
    /// CSS class of the icon placeholder the themes style.
    pub fn icon_class(self) -> Option<&'static str> {
        match self {
            ContactKind::Email => Some("icon-email"),
            ContactKind::Phone => Some("icon-phone"),
            ContactKind::Github => Some("icon-github"),
            ContactKind::Linkedin => Some("icon-linkedin"),
            ContactKind::Location => Some("icon-location"),
            ContactKind::Unrecognized => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLine<'a> {
    pub kind: ContactKind,
    pub text: &'a str,
}

impl<'a> ContactLine<'a> {
    /// Tags a line by its leading label. Labels are case-sensitive.
    pub fn classify(text: &'a str, vocabulary: &Vocabulary) -> Self {
        let kind = vocabulary
            .contact_labels
            .iter()
            .find(|(_, label)| text.starts_with(label))
            .map_or(ContactKind::Unrecognized, |(kind, _)| *kind);
        Self { kind, text }
    }

    pub fn to_html(&self) -> String {
        let text = escape_html(self.text);
        match self.kind.icon_class() {
            Some(class) => format!("<p><span class=\"{class}\"></span> {text}</p>"),
            None => format!("<p>{text}</p>"),
        }
    }
}

/// The header bucket split at the contacts heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderParts<'a> {
    /// Name and title markdown (everything before the contacts heading).
    pub name_title: &'a str,
    /// Contacts markdown, heading line included. Empty if there is no contacts heading.
    pub contacts: &'a str,
}

/// Splits the header bucket at the first contacts heading (case-insensitive).
/// Without one, the whole header is name/title and contacts are empty.
pub fn split_header<'a>(header: &'a str, vocabulary: &Vocabulary) -> HeaderParts<'a> {
    let mut offset = 0;
    for line in header.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if let Some(title) = trimmed.strip_prefix("##") {
            let is_level_two = title.is_empty() || title.starts_with(char::is_whitespace);
            if is_level_two && vocabulary.is_contacts_heading(&title.trim().to_lowercase()) {
                return HeaderParts {
                    name_title: header[..offset].trim(),
                    contacts: header[offset..].trim(),
                };
            }
        }
        offset += line.len();
    }

    HeaderParts {
        name_title: header.trim(),
        contacts: "",
    }
}

/// Formats the contacts markdown into markup: a fixed heading followed by one
/// paragraph per non-blank line, with an icon marker for recognized fields.
pub fn format_contacts(contacts: &str, vocabulary: &Vocabulary) -> String {
    let mut lines = contacts.lines();
    // First line is the contacts heading itself
    if lines.next().is_none() {
        return String::new();
    }

    // Trailing whitespace (hard-break markers included) never reaches the output
    let items: Vec<String> = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| ContactLine::classify(line, vocabulary).to_html())
        .collect();

    let mut html = format!("<h2>{}</h2>\n", vocabulary.contacts_heading);
    html.push_str(&items.join("\n"));
    html
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::vocabulary::{ENGLISH, RUSSIAN};

    #[test]
    fn test_email_line_is_tagged() {
        let line = ContactLine::classify("Email: foo@bar.com", &ENGLISH);
        assert_eq!(line.kind, ContactKind::Email);
        assert_eq!(
            line.to_html(),
            "<p><span class=\"icon-email\"></span> Email: foo@bar.com</p>"
        );
    }

    #[test]
    fn test_unknown_label_is_wrapped_unmodified() {
        let line = ContactLine::classify("Random: text", &ENGLISH);
        assert_eq!(line.kind, ContactKind::Unrecognized);
        assert_eq!(line.to_html(), "<p>Random: text</p>");
    }

    #[test]
    fn test_labels_are_locale_specific() {
        assert_eq!(
            ContactLine::classify("Телефон: +7 999", &RUSSIAN).kind,
            ContactKind::Phone
        );
        assert_eq!(
            ContactLine::classify("Телефон: +7 999", &ENGLISH).kind,
            ContactKind::Unrecognized
        );
        assert_eq!(
            ContactLine::classify("Location: Baku", &ENGLISH).kind,
            ContactKind::Location
        );
        // case-sensitive
        assert_eq!(
            ContactLine::classify("email: x@y.z", &ENGLISH).kind,
            ContactKind::Unrecognized
        );
    }

    #[test]
    fn test_split_header_at_contacts_heading() {
        let header = "# Jane Doe — Engineer\n\n## CONTACTS\nEmail: jane@x.com";
        let parts = split_header(header, &ENGLISH);
        assert_eq!(parts.name_title, "# Jane Doe — Engineer");
        assert_eq!(parts.contacts, "## CONTACTS\nEmail: jane@x.com");
    }

    #[test]
    fn test_split_header_without_contacts_heading() {
        let header = "# Jane Doe\n\n## Random Notes\ntext";
        let parts = split_header(header, &ENGLISH);
        assert_eq!(parts.name_title, header);
        assert_eq!(parts.contacts, "");
        assert_eq!(format_contacts(parts.contacts, &ENGLISH), "");
    }

    #[test]
    fn test_format_contacts_strips_heading_blanks_and_hard_breaks() {
        let contacts = "## Контакты\nEmail: a@b.c  \nТелефон: +7  \n\nGitHub: gh/a  \nLinkedIn: in/a  \nЛокация: Москва\nTelegram: @a";
        let html = format_contacts(contacts, &RUSSIAN);
        let expected = [
            "<h2>Контакты</h2>",
            "<p><span class=\"icon-email\"></span> Email: a@b.c</p>",
            "<p><span class=\"icon-phone\"></span> Телефон: +7</p>",
            "<p><span class=\"icon-github\"></span> GitHub: gh/a</p>",
            "<p><span class=\"icon-linkedin\"></span> LinkedIn: in/a</p>",
            "<p><span class=\"icon-location\"></span> Локация: Москва</p>",
            "<p>Telegram: @a</p>",
        ]
        .join("\n");
        assert_eq!(html, expected);
    }

    #[test]
    fn test_contact_lines_lose_all_surrounding_whitespace() {
        let contacts = "## Contacts\nEmail: a@b.c  \r\n  Phone: +1   \nGitHub: gh/a \t";
        let html = format_contacts(contacts, &ENGLISH);
        let expected = [
            "<h2>Contacts</h2>",
            "<p><span class=\"icon-email\"></span> Email: a@b.c</p>",
            "<p><span class=\"icon-phone\"></span> Phone: +1</p>",
            "<p><span class=\"icon-github\"></span> GitHub: gh/a</p>",
        ]
        .join("\n");
        assert_eq!(html, expected);
    }

    #[test]
    fn test_contact_text_is_escaped() {
        let line = ContactLine::classify("Web: <script>&", &ENGLISH);
        assert_eq!(line.to_html(), "<p>Web: &lt;script&gt;&amp;</p>");
    }
}
