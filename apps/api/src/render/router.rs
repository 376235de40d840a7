//! Section routing: assigns each section to the header, left or right column.
//!
//! Routing is a fold over `(current_target, buckets)`. A recognized heading moves the
//! target; an unrecognized heading (or untitled body text) inherits the current target.
//! Title sections always go to the header and leave the target untouched.

use serde::Serialize;

use crate::render::sections::{Section, SectionKind};
use crate::render::vocabulary::{Bucket, Vocabulary};

/// The three layout regions as markdown text, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Buckets {
    pub header: String,
    pub left: String,
    pub right: String,
}

impl Buckets {
    pub fn get(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Header => &self.header,
            Bucket::Left => &self.left,
            Bucket::Right => &self.right,
        }
    }

    fn get_mut(&mut self, bucket: Bucket) -> &mut String {
        match bucket {
            Bucket::Header => &mut self.header,
            Bucket::Left => &mut self.left,
            Bucket::Right => &mut self.right,
        }
    }

    /// Appends a section, separated from existing content by exactly one blank line
    /// so the markdown renderer never merges two sections into one block.
    fn append(&mut self, bucket: Bucket, text: &str) {
        let target = self.get_mut(bucket);
        if !target.is_empty() && !target.ends_with("\n\n") {
            if target.ends_with('\n') {
                target.push('\n');
            } else {
                target.push_str("\n\n");
            }
        }
        target.push_str(text);
    }
}

/// Decides where one section goes. Returns `(next_target, destination)`.
fn route_one(current: Bucket, section: &Section<'_>, vocabulary: &Vocabulary) -> (Bucket, Bucket) {
    match &section.kind {
        SectionKind::Title => (current, Bucket::Header),
        SectionKind::Heading(title) => {
            let target = vocabulary.classify_heading(title).unwrap_or(current);
            (target, target)
        }
        SectionKind::Body => (current, current),
    }
}

/// Routes sections into buckets. Every section lands in exactly one bucket.
pub fn route_sections<'a>(
    sections: impl IntoIterator<Item = Section<'a>>,
    vocabulary: &Vocabulary,
) -> Buckets {
    let (_, buckets) = sections.into_iter().fold(
        (Bucket::Header, Buckets::default()),
        |(current, mut buckets), section| {
            let (next, destination) = route_one(current, &section, vocabulary);
            buckets.append(destination, section.text);
            (next, buckets)
        },
    );
    buckets
}
