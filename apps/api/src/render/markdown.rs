//! Markdown → HTML fragments for each layout region.

use pulldown_cmark::{html, Event, Options, Parser};
use serde::Serialize;

use crate::render::contacts::{format_contacts, split_header};
use crate::render::router::{route_sections, Buckets};
use crate::render::sections::split_sections;
use crate::render::vocabulary::Vocabulary;

/// Rendered markup for the four regions of the résumé document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fragments {
    pub name_title: String,
    pub contacts: String,
    pub left: String,
    pub right: String,
}

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Renders one markdown text. No state is shared between calls.
/// Raw HTML in the source is emitted as escaped text, never as markup.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Renders routed buckets. The contacts block is formatted rather than markdown-rendered.
pub fn render_buckets(buckets: &Buckets, vocabulary: &Vocabulary) -> Fragments {
    let header = split_header(&buckets.header, vocabulary);
    Fragments {
        name_title: render_markdown(header.name_title),
        contacts: format_contacts(header.contacts, vocabulary),
        left: render_markdown(&buckets.left),
        right: render_markdown(&buckets.right),
    }
}

/// Runs the CPU-only half of the pipeline: split → route → format → render.
pub fn layout_markdown(markdown: &str, vocabulary: &Vocabulary) -> Fragments {
    let buckets = route_sections(split_sections(markdown), vocabulary);
    render_buckets(&buckets, vocabulary)
}
