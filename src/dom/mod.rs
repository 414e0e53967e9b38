//! Arena DOM: parsing, traversal, serialization and selector queries.
//!
//! # Example
//!
//! ```
//! use articlex::dom::{parse_html, parse_selectors};
//!
//! let doc = parse_html("<div class='post'><p>Hello, World!</p></div>");
//! let selectors = parse_selectors("div.post p").unwrap();
//! let p = doc.select_first(&selectors).unwrap();
//! assert_eq!(doc.text_content(p), "Hello, World!");
//! ```

mod arena;
mod query;
mod serialize;
mod tree_sink;

pub use arena::{Attribute, Document, Node, NodeData, NodeId};
pub use query::{ArticleSelectors, ElementRef, Selectors, parse_selectors};
pub use tree_sink::DocumentSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse an HTML document into a [`Document`].
///
/// Parsing never fails: malformed markup is repaired the way browsers do.
pub fn parse_html(html: &str) -> Document {
    let sink = DocumentSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_document()
}

/// Parse raw HTML bytes, detecting their encoding.
///
/// Valid UTF-8 is used as-is; otherwise a charset declared in the document
/// is honored, falling back to Windows-1252.
pub fn parse_html_bytes(bytes: &[u8]) -> Document {
    let hint_encoding = crate::util::sniff_charset(bytes);
    let html = crate::util::decode_text(bytes, hint_encoding);
    parse_html(&html)
}
