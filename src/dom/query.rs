//! CSS selector queries against a [`Document`].
//!
//! Implements the `selectors` crate `Element` trait for arena nodes so that
//! signatures (and any other selector string) can be matched without a
//! second DOM library.

use std::fmt;

use cssparser::{ParserInput, ToCss};
use html5ever::{LocalName, Namespace};
use precomputed_hash::PrecomputedHash;
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::context::{MatchingContext, QuirksMode, SelectorCaches};
use selectors::matching::{
    ElementSelectorFlags, MatchingForInvalidation, MatchingMode, NeedsSelectorFlags,
};
use selectors::parser::{ParseRelative, SelectorList, SelectorParseErrorKind};
use selectors::{OpaqueElement, SelectorImpl};

use super::arena::{Document, NodeData, NodeId};
use crate::error::{Error, Result};

/// Selector implementation used for all queries in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSelectors;

/// Identifier string type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct IdentStr(pub String);

impl PrecomputedHash for IdentStr {
    fn precomputed_hash(&self) -> u32 {
        let mut h: u32 = 0;
        for byte in self.0.bytes() {
            h = h.wrapping_mul(31).wrapping_add(byte as u32);
        }
        h
    }
}

impl AsRef<str> for IdentStr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IdentStr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl ToCss for IdentStr {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        cssparser::serialize_identifier(&self.0, dest)
    }
}

/// Wrapper type for LocalName that implements ToCss.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CssLocalName(pub LocalName);

impl PrecomputedHash for CssLocalName {
    fn precomputed_hash(&self) -> u32 {
        self.0.precomputed_hash()
    }
}

impl ToCss for CssLocalName {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(self.0.as_ref())
    }
}

impl From<&str> for CssLocalName {
    fn from(s: &str) -> Self {
        Self(LocalName::from(s))
    }
}

/// Wrapper type for Namespace that implements ToCss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CssNamespace(pub Namespace);

impl PrecomputedHash for CssNamespace {
    fn precomputed_hash(&self) -> u32 {
        self.0.precomputed_hash()
    }
}

impl ToCss for CssNamespace {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(self.0.as_ref())
    }
}

impl From<&str> for CssNamespace {
    fn from(s: &str) -> Self {
        Self(Namespace::from(s))
    }
}

impl<'i> selectors::parser::Parser<'i> for ArticleSelectors {
    type Impl = ArticleSelectors;
    type Error = SelectorParseErrorKind<'i>;
}

/// Pseudo-elements never match a static document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoElement {}

impl ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = ArticleSelectors;

    fn accepts_state_pseudo_classes(&self) -> bool {
        match *self {}
    }

    fn valid_after_slotted(&self) -> bool {
        match *self {}
    }
}

/// The parser accepts no non-tree-structural pseudo-classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NonTSPseudoClass {}

impl selectors::parser::NonTSPseudoClass for NonTSPseudoClass {
    type Impl = ArticleSelectors;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }
}

impl ToCss for NonTSPseudoClass {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl SelectorImpl for ArticleSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = IdentStr;
    type Identifier = IdentStr;
    type LocalName = CssLocalName;
    type NamespaceUrl = CssNamespace;
    type NamespacePrefix = IdentStr;
    type BorrowedLocalName = CssLocalName;
    type BorrowedNamespaceUrl = CssNamespace;
    type NonTSPseudoClass = NonTSPseudoClass;
    type PseudoElement = PseudoElement;
}

/// A parsed, reusable selector list.
pub type Selectors = SelectorList<ArticleSelectors>;

/// Parse a selector string.
///
/// A string the CSS parser rejects is reported as [`Error::InvalidSignature`].
pub fn parse_selectors(source: &str) -> Result<Selectors> {
    let mut input = ParserInput::new(source);
    let mut parser = cssparser::Parser::new(&mut input);
    SelectorList::parse(&ArticleSelectors, &mut parser, ParseRelative::No)
        .map_err(|_| Error::InvalidSignature(source.to_string()))
}

/// Reference to an element in a [`Document`] for selector matching.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    pub doc: &'a Document,
    pub id: NodeId,
}

impl<'a> ElementRef<'a> {
    pub fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    /// Whether this element matches any selector in the list.
    pub fn matches(&self, selectors: &Selectors) -> bool {
        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            &mut caches,
            QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            MatchingForInvalidation::No,
        );

        selectors.slice().iter().any(|selector| {
            selectors::matching::matches_selector(selector, 0, None, self, &mut context)
        })
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("name", &self.doc.element_name(self.id))
            .finish()
    }
}

impl Document {
    /// First element in document order matching `selectors`.
    pub fn select_first(&self, selectors: &Selectors) -> Option<NodeId> {
        self.select(selectors).next()
    }

    /// Every element matching `selectors`, in document order.
    pub fn select<'a>(&'a self, selectors: &'a Selectors) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(self.root())
            .filter(move |&id| self.is_element(id) && ElementRef::new(self, id).matches(selectors))
    }
}

impl selectors::Element for ElementRef<'_> {
    type Impl = ArticleSelectors;

    fn opaque(&self) -> OpaqueElement {
        match self.doc.get(self.id) {
            Some(node) => OpaqueElement::new(node),
            None => OpaqueElement::new(self.doc),
        }
    }

    fn parent_element(&self) -> Option<Self> {
        let node = self.doc.get(self.id)?;
        if self.doc.is_element(node.parent) {
            Some(Self::new(self.doc, node.parent))
        } else {
            None
        }
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        let mut current = self.doc.get(self.id)?.prev_sibling;
        while current.is_some() {
            if self.doc.is_element(current) {
                return Some(Self::new(self.doc, current));
            }
            current = self.doc.get(current)?.prev_sibling;
        }
        None
    }

    fn next_sibling_element(&self) -> Option<Self> {
        let mut current = self.doc.get(self.id)?.next_sibling;
        while current.is_some() {
            if self.doc.is_element(current) {
                return Some(Self::new(self.doc, current));
            }
            current = self.doc.get(current)?.next_sibling;
        }
        None
    }

    fn first_element_child(&self) -> Option<Self> {
        self.doc
            .element_children(self.id)
            .next()
            .map(|child| Self::new(self.doc, child))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, name: &CssLocalName) -> bool {
        self.doc
            .element_name(self.id)
            .is_some_and(|n| n == &name.0)
    }

    fn has_namespace(&self, ns: &CssNamespace) -> bool {
        self.doc
            .element_namespace(self.id)
            .is_some_and(|n| n == &ns.0)
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.doc.element_name(self.id) == other.doc.element_name(other.id)
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssNamespace>,
        local_name: &CssLocalName,
        operation: &AttrSelectorOperation<&IdentStr>,
    ) -> bool {
        self.doc.attrs(self.id).iter().any(|attr| {
            let ns_match = match ns {
                NamespaceConstraint::Any => true,
                NamespaceConstraint::Specific(ns) => attr.name.ns == ns.0,
            };
            ns_match && attr.name.local == local_name.0 && operation.eval_str(&attr.value)
        })
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &NonTSPseudoClass,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pc {}
    }

    fn match_pseudo_element(
        &self,
        pe: &PseudoElement,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pe {}
    }

    fn is_link(&self) -> bool {
        self.doc.tag_name(self.id) == Some("a") && self.doc.get_attr(self.id, "href").is_some()
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        self.doc
            .element_id(self.id)
            .is_some_and(|own| case_sensitivity.eq(own.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        self.doc
            .element_classes(self.id)
            .iter()
            .any(|c| case_sensitivity.eq(c.as_bytes(), name.0.as_bytes()))
    }

    fn imported_part(&self, _name: &IdentStr) -> Option<IdentStr> {
        None
    }

    fn is_part(&self, _name: &IdentStr) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.doc.children(self.id).all(|child| {
            match self.doc.get(child).map(|n| &n.data) {
                Some(NodeData::Element { .. }) => false,
                Some(NodeData::Text(t)) => t.is_empty(),
                _ => true,
            }
        })
    }

    fn is_root(&self) -> bool {
        self.doc
            .get(self.id)
            .and_then(|n| self.doc.get(n.parent))
            .is_some_and(|parent| matches!(parent.data, NodeData::Document))
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn add_element_unique_hashes(&self, _filter: &mut selectors::bloom::BloomFilter) -> bool {
        false
    }

    fn has_custom_state(&self, _name: &IdentStr) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn first(doc: &Document, selector: &str) -> Option<NodeId> {
        doc.select_first(&parse_selectors(selector).unwrap())
    }

    #[test]
    fn test_tag_selector() {
        let doc = parse_html("<div><p>Hello</p></div>");
        let p = doc.find_by_tag("p").unwrap();

        assert_eq!(first(&doc, "p"), Some(p));
        assert!(!ElementRef::new(&doc, p).matches(&parse_selectors("div").unwrap()));
    }

    #[test]
    fn test_class_selector() {
        let doc = parse_html(r#"<p class="intro highlight">Hello</p>"#);
        let p = doc.find_by_tag("p").unwrap();
        let elem = ElementRef::new(&doc, p);

        assert!(elem.matches(&parse_selectors(".intro").unwrap()));
        assert!(elem.matches(&parse_selectors("p.highlight").unwrap()));
        assert!(!elem.matches(&parse_selectors(".missing").unwrap()));
    }

    #[test]
    fn test_descendant_and_child_selectors() {
        let doc = parse_html("<div><span><p>Nested</p></span></div>");
        let p = doc.find_by_tag("p").unwrap();
        let elem = ElementRef::new(&doc, p);

        assert!(elem.matches(&parse_selectors("html body div span p").unwrap()));
        assert!(elem.matches(&parse_selectors("div p").unwrap()));
        assert!(elem.matches(&parse_selectors("span > p").unwrap()));
        assert!(!elem.matches(&parse_selectors("div > p").unwrap()));
    }

    #[test]
    fn test_select_returns_document_order() {
        let doc = parse_html("<ul><li>one</li><li>two</li></ul><ol><li>three</li></ol>");
        let selectors = parse_selectors("li").unwrap();
        let texts: Vec<_> = doc
            .select(&selectors)
            .map(|id| doc.text_content(id))
            .collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn test_no_match_is_none() {
        let doc = parse_html("<div><p>Hello</p></div>");
        assert_eq!(first(&doc, "article.post"), None);
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        let err = parse_selectors("div..broken").unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(s) if s == "div..broken"));
    }
}
