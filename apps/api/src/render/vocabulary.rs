//! Locale vocabularies: the heading keywords and contact labels the layout parser recognizes.
//!
//! Adding a locale means adding a `Vocabulary` value and listing it in `VOCABULARIES`.
//! Routing and contact formatting never hardcode localized text.

use serde::Serialize;
use tracing::warn;

use crate::render::contacts::ContactKind;

/// Which column of the two-column layout a section lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Header,
    Left,
    Right,
}

#[derive(Debug)]
pub struct Vocabulary {
    /// ISO 639-1 code this vocabulary serves.
    pub language: &'static str,
    /// Heading text emitted above the formatted contacts block.
    pub contacts_heading: &'static str,
    pub header_keywords: &'static [&'static str],
    pub left_keywords: &'static [&'static str],
    pub right_keywords: &'static [&'static str],
    /// Tested in order; the first matching label wins.
    pub contact_labels: &'static [(ContactKind, &'static str)],
    /// Canonical level-2 headings in document order, used when prompting for markdown.
    pub outline: &'static [&'static str],
}

pub static ENGLISH: Vocabulary = Vocabulary {
    language: "en",
    contacts_heading: "Contacts",
    header_keywords: &["contact"],
    left_keywords: &[
        "education",
        "courses",
        "skills",
        "stack",
        "languages",
        "hobbies",
        "interests",
    ],
    right_keywords: &["summary", "experience", "projects"],
    contact_labels: &[
        (ContactKind::Email, "Email:"),
        (ContactKind::Phone, "Phone:"),
        (ContactKind::Github, "GitHub:"),
        (ContactKind::Linkedin, "LinkedIn:"),
        (ContactKind::Location, "Location:"),
    ],
    outline: &[
        "Contacts",
        "Education/Courses",
        "Skills",
        "Stack",
        "Languages",
        "Hobbies/Interests",
        "Summary",
        "Work Experience",
        "Projects",
    ],
};

pub static RUSSIAN: Vocabulary = Vocabulary {
    language: "ru",
    contacts_heading: "Контакты",
    header_keywords: &["контакты"],
    left_keywords: &[
        "образование",
        "курсы",
        "навыки",
        "стек",
        "языки",
        "хобби",
        "интересы",
    ],
    right_keywords: &["summary", "опыт работы", "проекты"],
    contact_labels: &[
        (ContactKind::Email, "Email:"),
        (ContactKind::Phone, "Телефон:"),
        (ContactKind::Github, "GitHub:"),
        (ContactKind::Linkedin, "LinkedIn:"),
        (ContactKind::Location, "Локация:"),
    ],
    outline: &[
        "Контакты",
        "Образование/Курсы",
        "Навыки",
        "Стек",
        "Языки",
        "Хобби/Интересы",
        "Summary",
        "Опыт работы",
        "Проекты",
    ],
};

static VOCABULARIES: &[&Vocabulary] = &[&ENGLISH, &RUSSIAN];

impl Vocabulary {
    /// Looks up the vocabulary for a language code. Unknown codes fall back to English.
    pub fn for_language(code: &str) -> &'static Vocabulary {
        let code = code.trim().to_lowercase();
        match VOCABULARIES.iter().find(|v| v.language == code) {
            Some(vocabulary) => *vocabulary,
            None => {
                warn!("No layout vocabulary for language '{code}', using English headings");
                &ENGLISH
            }
        }
    }

    /// Classifies a lowercased level-2 heading title.
    /// Header keywords are tested first, then left, then right.
    pub fn classify_heading(&self, title: &str) -> Option<Bucket> {
        let matches = |keywords: &[&str]| keywords.iter().any(|k| title.contains(k));
        if matches(self.header_keywords) {
            Some(Bucket::Header)
        } else if matches(self.left_keywords) {
            Some(Bucket::Left)
        } else if matches(self.right_keywords) {
            Some(Bucket::Right)
        } else {
            None
        }
    }

    pub fn is_contacts_heading(&self, title: &str) -> bool {
        self.classify_heading(title) == Some(Bucket::Header)
    }
}
