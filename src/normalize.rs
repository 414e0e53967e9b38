//! Removal of structurally noisy elements before analysis.
//!
//! The normalizer never touches the caller's tree. It deep-copies the
//! selected subtree into a fresh [`Document`], skipping every element whose
//! tag is on the [`TagDenylist`] together with everything inside it.

use crate::config::TagDenylist;
use crate::dom::{Document, NodeData, NodeId};

/// Denylist-driven DOM cleaner.
pub struct Normalizer<'a> {
    denylist: &'a TagDenylist,
}

impl<'a> Normalizer<'a> {
    pub fn new(denylist: &'a TagDenylist) -> Self {
        Self { denylist }
    }

    /// Build a cleaned working copy of the subtree at `from`.
    ///
    /// When `from` is the document node its children become the children of
    /// the copy's root; any other node is copied as the single child of the
    /// copy's root. Returns `None` when `from` is itself a denylisted element.
    pub fn normalize(&self, doc: &Document, from: NodeId) -> Option<Document> {
        if self.is_denied(doc, from) {
            tracing::debug!(tag = doc.tag_name(from), "normalization root is denylisted");
            return None;
        }

        let mut out = Document::new();
        let out_root = out.root();

        match doc.get(from).map(|n| &n.data) {
            None => return None,
            Some(NodeData::Document) => {
                for child in doc.children(from) {
                    self.copy_into(doc, child, &mut out, out_root);
                }
            }
            Some(_) => self.copy_into(doc, from, &mut out, out_root),
        }

        Some(out)
    }

    fn is_denied(&self, doc: &Document, id: NodeId) -> bool {
        doc.tag_name(id).is_some_and(|tag| self.denylist.contains(tag))
    }

    fn copy_into(&self, src: &Document, id: NodeId, out: &mut Document, parent: NodeId) {
        if self.is_denied(src, id) {
            return;
        }
        let Some(node) = src.get(id) else {
            return;
        };

        let copy = match &node.data {
            NodeData::Element { name, attrs, .. } => out.create_element(name.clone(), attrs.clone()),
            NodeData::Text(text) => {
                out.append_text(parent, text);
                return;
            }
            NodeData::Comment(text) => out.create_comment(text.clone()),
            NodeData::Doctype { name } => out.create_doctype(name.clone()),
            NodeData::Document => return,
        };
        out.append(parent, copy);

        for child in src.children(id) {
            self.copy_into(src, child, out, copy);
        }
    }
}
