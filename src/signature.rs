//! Structural signatures of selected nodes.
//!
//! A signature is the tag path from the document root down to a node, each
//! step written as `tag` or `tag.firstclass`, joined by spaces:
//! `html body div.content article.post`. It is a plain descendant selector,
//! so it can be stored and later replayed against other pages built from
//! the same template.

use std::fmt;
use std::str::FromStr;

use crate::dom::{Document, NodeId, parse_selectors};
use crate::error::{Error, Result};

/// Root-to-node tag path of a selected element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(transparent))]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Signature {
    type Err = Error;

    /// Accept any string that parses as a selector list, or the empty
    /// signature of the document node.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if !s.is_empty() {
            parse_selectors(s)?;
        }
        Ok(Signature(s.to_string()))
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.0
    }
}

/// Signature of `node`: its own step preceded by one step per ancestor element.
///
/// Non-element nodes contribute nothing, so the signature of the document
/// node itself is empty.
pub fn encode(doc: &Document, node: NodeId) -> Signature {
    let mut steps: Vec<String> = std::iter::once(node)
        .chain(doc.ancestors(node))
        .filter_map(|id| step(doc, id))
        .collect();
    steps.reverse();
    Signature(steps.join(" "))
}

fn step(doc: &Document, id: NodeId) -> Option<String> {
    let tag = doc.tag_name(id)?;
    let mut out = String::with_capacity(tag.len());
    let _ = cssparser::serialize_identifier(tag, &mut out);

    if let Some(class) = doc.element_classes(id).first() {
        out.push('.');
        let _ = cssparser::serialize_identifier(class, &mut out);
    }
    Some(out)
}

/// First node in document order matching `signature`.
///
/// A signature that matches nothing is `Ok(None)`: the page simply does not
/// follow the template. The empty signature selects the document node.
pub fn decode(doc: &Document, signature: &Signature) -> Result<Option<NodeId>> {
    if signature.is_empty() {
        return Ok(Some(doc.root()));
    }
    let selectors = parse_selectors(signature.as_str())?;
    Ok(doc.select_first(&selectors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_encode_uses_first_class_only() {
        let doc = parse_html(
            r#"<div class="content wide"><article class="post featured"><p id="x">Text</p></article></div>"#,
        );
        let p = doc.get_by_id("x").unwrap();
        let signature = encode(&doc, p);
        assert_eq!(signature.as_str(), "html body div.content article.post p");
    }

    #[test]
    fn test_encode_document_node_is_empty() {
        let doc = parse_html("<p>Text</p>");
        assert!(encode(&doc, doc.root()).is_empty());
    }

    #[test]
    fn test_empty_signature_replays_to_document() {
        let doc = parse_html("<div><span>menu</span></div>");
        let signature = encode(&doc, doc.root());
        assert_eq!(decode(&doc, &signature).unwrap(), Some(doc.root()));

        let parsed: Signature = "  ".parse().unwrap();
        assert_eq!(parsed, signature);
    }

    #[test]
    fn test_round_trip() {
        let doc = parse_html(
            r#"<div class="sidebar"><p>Side</p></div><div class="main"><p>Body text</p></div>"#,
        );
        let main_p = doc
            .select_first(&parse_selectors("div.main p").unwrap())
            .unwrap();
        let signature = encode(&doc, main_p);
        assert_eq!(decode(&doc, &signature).unwrap(), Some(main_p));
    }

    #[test]
    fn test_decode_returns_first_match() {
        let doc = parse_html("<div><p>one</p><p>two</p></div>");
        let signature: Signature = "html body div p".parse().unwrap();
        let found = decode(&doc, &signature).unwrap().unwrap();
        assert_eq!(doc.text_content(found), "one");
    }

    #[test]
    fn test_decode_no_match_is_not_an_error() {
        let doc = parse_html("<div><p>one</p></div>");
        let signature: Signature = "html body section.article p".parse().unwrap();
        assert_eq!(decode(&doc, &signature).unwrap(), None);
    }

    #[test]
    fn test_invalid_signature_string() {
        let err = "div..broken >".parse::<Signature>().unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(_)));
    }

    #[test]
    fn test_unusual_class_names_survive_round_trip() {
        let doc = parse_html(r#"<div class="2col md:w-1/2"><span>x</span></div>"#);
        let span = doc.find_by_tag("span").unwrap();
        let signature = encode(&doc, span);
        assert_eq!(signature.as_str(), r"html body div.\32 col span");
        assert_eq!(decode(&doc, &signature).unwrap(), Some(span));
    }
}
