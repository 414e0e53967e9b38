//! Arena-based DOM for HTML parsing.
//!
//! Every node lives in one contiguous vector and is addressed by a
//! [`NodeId`]. Ids never change for the lifetime of a [`Document`], which
//! makes them usable as keys for out-of-band annotations.

use std::collections::HashMap;

use html5ever::{LocalName, Namespace, QualName};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }

    /// Index of this node in the arena.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Node type in the arena DOM.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
        /// Pre-extracted id for fast matching.
        id: Option<String>,
        /// Pre-extracted classes for fast matching.
        classes: Vec<String>,
    },
    /// Text content.
    Text(String),
    /// Comment (never rendered, kept so the tree mirrors the source).
    Comment(String),
    /// Document type declaration.
    Doctype { name: String },
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the arena DOM.
#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// Arena-based DOM tree.
///
/// Parent/child/sibling links are indices into the node vector. Cloning a
/// `Document` yields a fully isolated working copy with identical ids.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    id_map: HashMap<String, NodeId>,
}

impl Document {
    /// Create a new empty DOM with a document root.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId::NONE,
            id_map: HashMap::new(),
        };
        doc.root = doc.alloc(Node::new(NodeData::Document));
        doc
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// The document root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.index())
    }

    /// Create a new, detached element node.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        let mut id = None;
        let mut classes = Vec::new();

        for attr in &attrs {
            match attr.name.local.as_ref() {
                "id" => id = Some(attr.value.clone()),
                "class" => {
                    classes = attr
                        .value
                        .split_whitespace()
                        .map(str::to_string)
                        .collect()
                }
                _ => {}
            }
        }

        let node_id = self.alloc(Node::new(NodeData::Element {
            name,
            attrs,
            id: id.clone(),
            classes,
        }));

        if let Some(id_str) = id {
            self.id_map.entry(id_str).or_insert(node_id);
        }

        node_id
    }

    /// Create a new, detached text node.
    pub fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Text(text)))
    }

    /// Create a new, detached comment node.
    pub fn create_comment(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(text)))
    }

    /// Create a doctype node.
    pub fn create_doctype(&mut self, name: String) -> NodeId {
        self.alloc(Node::new(NodeData::Doctype { name }))
    }

    /// Append a child to a parent node.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
            child_node.next_sibling = NodeId::NONE;
        }

        if let Some(last_node) = self.get_mut(last_child) {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node before a sibling.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append text to the last child if it is a text node, otherwise add a new one.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(ref mut existing) = last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Unlink a node from its parent and siblings. The node stays in the arena.
    pub fn detach(&mut self, target: NodeId) {
        let (parent, prev, next) = match self.get(target) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(target) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Get node by id attribute (first occurrence in parse order).
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_map.get(id).copied()
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the DOM holds nothing but the document root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over all children of a node.
    pub fn children(&self, parent: NodeId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        ChildrenIter {
            doc: self,
            current: first,
        }
    }

    /// Iterate over element children only.
    pub fn element_children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(parent).filter(|&c| self.is_element(c))
    }

    /// Iterate over the ancestors of a node, nearest first, excluding the node itself.
    pub fn ancestors(&self, id: NodeId) -> AncestorsIter<'_> {
        AncestorsIter {
            doc: self,
            current: self.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE),
        }
    }

    /// Pre-order (document order) traversal of a subtree, starting with `from`.
    pub fn descendants(&self, from: NodeId) -> DescendantsIter<'_> {
        DescendantsIter {
            doc: self,
            stack: if self.get(from).is_some() {
                vec![from]
            } else {
                Vec::new()
            },
        }
    }

    /// Whether `node` is `ancestor` or lies inside its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Find the first node matching a predicate (document order).
    pub fn find<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        self.descendants(self.root)
            .find(|&id| self.get(id).is_some_and(&predicate))
    }

    /// Find element by tag name (first match).
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find(|node| match &node.data {
            NodeData::Element { name, .. } => name.local.as_ref() == tag,
            _ => false,
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    doc: &'a Document,
    current: NodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .doc
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Iterator walking parent links up to the document root.
pub struct AncestorsIter<'a> {
    doc: &'a Document,
    current: NodeId,
}

impl Iterator for AncestorsIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .doc
            .get(id)
            .map(|n| n.parent)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Depth-first, left-to-right subtree iterator.
pub struct DescendantsIter<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantsIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        let mut child = self
            .doc
            .get(id)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);
        while let Some(node) = self.doc.get(child) {
            self.stack.push(child);
            child = node.prev_sibling;
        }
        Some(id)
    }
}

/// Convenience accessors for element and text nodes.
impl Document {
    /// Get element's local name (tag).
    pub fn element_name(&self, id: NodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Get element's tag name as a string slice.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element_name(id).map(|n| n.as_ref())
    }

    /// Get element's namespace.
    pub fn element_namespace(&self, id: NodeId) -> Option<&Namespace> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.ns),
            _ => None,
        })
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// All attributes of an element, in source order.
    pub fn attrs(&self, id: NodeId) -> &[Attribute] {
        self.get(id)
            .and_then(|n| match &n.data {
                NodeData::Element { attrs, .. } => Some(attrs.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Get element's id attribute.
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { id, .. } => id.as_deref(),
            _ => None,
        })
    }

    /// Get element's classes.
    pub fn element_classes(&self, id: NodeId) -> &[String] {
        self.get(id)
            .and_then(|n| match &n.data {
                NodeData::Element { classes, .. } => Some(classes.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Check if node is an element.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    /// Get the contents of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of every text node in the subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(text) = self.text(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// Length of [`Document::text_content`] in characters.
    pub fn text_len(&self, id: NodeId) -> usize {
        self.descendants(id)
            .filter_map(|node| self.text(node))
            .map(|text| text.chars().count())
            .sum()
    }

    /// Text of the direct text children only, as if every child element
    /// had been removed: `<div>intro <a>link</a></div>` yields `"intro "`.
    pub fn own_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            if let Some(text) = self.text(child) {
                out.push_str(text);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use html5ever::ns;

    use super::*;

    fn make_qname(local: &str) -> QualName {
        QualName::new(None, ns!(html), LocalName::from(local))
    }

    fn element(doc: &mut Document, tag: &str) -> NodeId {
        doc.create_element(make_qname(tag), vec![])
    }

    #[test]
    fn test_create_elements() {
        let mut doc = Document::new();

        let div = doc.create_element(
            make_qname("div"),
            vec![
                Attribute {
                    name: make_qname("id"),
                    value: "main".to_string(),
                },
                Attribute {
                    name: make_qname("class"),
                    value: "content  wide".to_string(),
                },
            ],
        );
        doc.append(doc.root(), div);

        assert_eq!(doc.tag_name(div), Some("div"));
        assert_eq!(doc.element_id(div), Some("main"));
        assert_eq!(doc.get_by_id("main"), Some(div));
        assert_eq!(doc.element_classes(div), ["content", "wide"]);
    }

    #[test]
    fn test_append_children() {
        let mut doc = Document::new();

        let parent = element(&mut doc, "div");
        let child1 = element(&mut doc, "p");
        let child2 = element(&mut doc, "p");

        doc.append(doc.root(), parent);
        doc.append(parent, child1);
        doc.append_text(parent, "between");
        doc.append(parent, child2);

        assert_eq!(doc.children(parent).count(), 3);
        let elements: Vec<_> = doc.element_children(parent).collect();
        assert_eq!(elements, vec![child1, child2]);
    }

    #[test]
    fn test_text_merging() {
        let mut doc = Document::new();

        let p = element(&mut doc, "p");
        doc.append(doc.root(), p);

        doc.append_text(p, "Hello, ");
        doc.append_text(p, "World!");

        let children: Vec<_> = doc.children(p).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(doc.text(children[0]), Some("Hello, World!"));
    }

    #[test]
    fn test_detach_middle_child() {
        let mut doc = Document::new();
        let parent = element(&mut doc, "ul");
        let a = element(&mut doc, "li");
        let b = element(&mut doc, "li");
        let c = element(&mut doc, "li");
        doc.append(doc.root(), parent);
        doc.append(parent, a);
        doc.append(parent, b);
        doc.append(parent, c);

        doc.detach(b);

        let remaining: Vec<_> = doc.children(parent).collect();
        assert_eq!(remaining, vec![a, c]);
        assert!(doc.get(b).unwrap().parent.is_none());
        assert_eq!(doc.get(c).unwrap().prev_sibling, a);
    }

    #[test]
    fn test_text_content_and_own_text() {
        let mut doc = Document::new();
        let div = element(&mut doc, "div");
        let a = element(&mut doc, "a");
        doc.append(doc.root(), div);
        doc.append_text(div, "intro ");
        doc.append(div, a);
        doc.append_text(a, "link");
        doc.append_text(div, " outro");

        assert_eq!(doc.text_content(div), "intro link outro");
        assert_eq!(doc.text_len(div), 16);
        assert_eq!(doc.own_text(div), "intro  outro");
    }

    #[test]
    fn test_descendants_in_document_order() {
        let mut doc = Document::new();
        let body = element(&mut doc, "body");
        let first = element(&mut doc, "section");
        let nested = element(&mut doc, "p");
        let second = element(&mut doc, "section");
        doc.append(doc.root(), body);
        doc.append(body, first);
        doc.append(first, nested);
        doc.append(body, second);

        let order: Vec<_> = doc.descendants(body).collect();
        assert_eq!(order, vec![body, first, nested, second]);
        assert!(doc.contains(body, nested));
        assert!(!doc.contains(second, nested));
        let ancestors: Vec<_> = doc.ancestors(nested).collect();
        assert_eq!(ancestors, vec![first, body, doc.root()]);
    }
}
