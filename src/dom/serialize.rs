//! HTML serialization of arena subtrees.
//!
//! Produces the markup a browser's `innerHTML` / `outerHTML` would return,
//! which is what the selector measures markup density against.

use std::fmt::Write;

use super::arena::{Document, NodeData, NodeId};

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are emitted verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe",
    "noembed",
    "noframes",
    "noscript",
    "plaintext",
    "script",
    "style",
    "xmp",
];

impl Document {
    /// Serialized markup of the node's children.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            write_node(self, child, &mut out);
        }
        out
    }

    /// Serialized markup of the node itself, including its own tag.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        write_node(self, id, &mut out);
        out
    }
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    let Some(node) = doc.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child in doc.children(id) {
                write_node(doc, child, out);
            }
        }
        NodeData::Doctype { name } => {
            let _ = write!(out, "<!DOCTYPE {name}>");
        }
        NodeData::Comment(text) => {
            let _ = write!(out, "<!--{text}-->");
        }
        NodeData::Text(text) => {
            let raw_parent = doc
                .tag_name(node.parent)
                .is_some_and(|tag| RAW_TEXT_ELEMENTS.contains(&tag));
            if raw_parent {
                out.push_str(text);
            } else {
                escape_text(text, out);
            }
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                out.push(' ');
                out.push_str(attr.name.local.as_ref());
                out.push_str("=\"");
                escape_attr(&attr.value, out);
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            for child in doc.children(id) {
                write_node(doc, child, out);
            }

            let _ = write!(out, "</{tag}>");
        }
    }
}

/// Escape text content.
fn escape_text(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

/// Escape a double-quoted attribute value.
fn escape_attr(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
