//! Section splitting: cuts a markdown résumé into level-2 heading delimited sections.
//!
//! The splitter is a line scanner, not a regex split: a section starts at every line
//! that is a level-2 heading (`## Title`) and runs until the next one. Level-1 and
//! level-3+ headings are ordinary content of whichever section contains them.

/// What a section starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    /// Starts with a level-1 heading (`# Name — Title`).
    Title,
    /// Starts with a level-2 heading. Holds the lowercased, trimmed heading title.
    Heading(String),
    /// Text before the first level-2 heading that has no level-1 heading.
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// Trimmed section text, heading line included.
    pub text: &'a str,
    pub kind: SectionKind,
}

impl<'a> Section<'a> {
    fn classify(text: &'a str) -> Self {
        let first_line = text.lines().next().unwrap_or_default();
        let kind = if text.starts_with("# ") {
            SectionKind::Title
        } else if let Some(title) = heading_title(first_line) {
            SectionKind::Heading(title.trim().to_lowercase())
        } else {
            SectionKind::Body
        };
        Self { text, kind }
    }

    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            SectionKind::Heading(title) => Some(title),
            _ => None,
        }
    }
}

/// Lazy iterator over the sections of a document, in document order.
/// Empty (whitespace-only) sections are skipped.
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    rest: &'a str,
}

pub fn split_sections(markdown: &str) -> Sections<'_> {
    Sections { rest: markdown }
}

impl<'a> Iterator for Sections<'a> {
    type Item = Section<'a>;

    fn next(&mut self) -> Option<Section<'a>> {
        while !self.rest.is_empty() {
            let end = next_boundary(self.rest);
            let (chunk, rest) = self.rest.split_at(end);
            self.rest = rest;

            let text = chunk.trim();
            if !text.is_empty() {
                return Some(Section::classify(text));
            }
        }
        None
    }
}

/// Byte offset of the first level-2 heading line after the first line of `text`,
/// or `text.len()` if there is none. The first line always belongs to the current section.
fn next_boundary(text: &str) -> usize {
    let Some(first_newline) = text.find('\n') else {
        return text.len();
    };
    let mut offset = first_newline + 1;
    while offset < text.len() {
        let line_end = text[offset..]
            .find('\n')
            .map_or(text.len(), |i| offset + i);
        if heading_title(&text[offset..line_end]).is_some() {
            return offset;
        }
        offset = line_end + 1;
    }
    text.len()
}

/// Returns the raw title if `line` is a level-2 heading: `##` followed by whitespace.
fn heading_title(line: &str) -> Option<&str> {
    let line = line.trim_end_matches('\r');
    let rest = line.strip_prefix("##")?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.starts_with(char::is_whitespace).then_some(rest)
}
