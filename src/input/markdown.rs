//! Markdown resume extraction
//!
//! Renders the Markdown event stream to plain text and harvests link
//! destinations, so Markdown resumes get the same (text, links) shape as
//! PDFs.

use crate::input::pdf::ExtractedText;
use pulldown_cmark::{Event, Parser, Tag};

pub fn extract(source: &str) -> ExtractedText {
    let mut text = String::new();
    let mut links = Vec::new();

    for event in Parser::new(source) {
        match event {
            Event::Start(Tag::Link(_, dest, _)) => {
                links.push(dest.to_string());
            }
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(Tag::Paragraph)
            | Event::End(Tag::Heading(..))
            | Event::End(Tag::Item) => text.push('\n'),
            _ => {}
        }
    }

    ExtractedText {
        pages: vec![text],
        links,
    }
}
