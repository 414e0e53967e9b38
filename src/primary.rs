//! Greedy descent to the node holding the article body.
//!
//! Starting from an annotated node, every level measures the element
//! children (text length, markup density and correct-sentence totals),
//! stops when the text is spread evenly across them, and otherwise moves
//! into the child with the most correct sentences. A dense "best" child is
//! swapped for the previous best when that one is long and clean enough,
//! which keeps comment sections from beating the article they follow.

use tracing::debug;

use crate::annotate::Annotations;
use crate::config::{Arithmetic, Thresholds};
use crate::dom::{Document, NodeId};

/// One measured child at a selection level.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    node: NodeId,
    text_len: usize,
    density: f64,
    correct: usize,
}

/// Outcome of examining one level.
enum Step {
    Stop,
    Descend(NodeId),
}

/// Picks the primary content node of an annotated tree.
pub struct PrimaryNodeSelector<'a> {
    doc: &'a Document,
    annotations: &'a Annotations,
    thresholds: &'a Thresholds,
    arithmetic: Arithmetic,
}

impl<'a> PrimaryNodeSelector<'a> {
    pub fn new(
        doc: &'a Document,
        annotations: &'a Annotations,
        thresholds: &'a Thresholds,
        arithmetic: Arithmetic,
    ) -> Self {
        Self {
            doc,
            annotations,
            thresholds,
            arithmetic,
        }
    }

    /// The selected node: `from` itself or one of its descendants.
    pub fn select(&self, from: NodeId) -> NodeId {
        let mut node = from;
        loop {
            match self.step(node) {
                Step::Stop => return node,
                Step::Descend(child) => node = child,
            }
        }
    }

    fn step(&self, node: NodeId) -> Step {
        let mut children = self.doc.element_children(node).peekable();
        if children.peek().is_none() {
            return Step::Stop;
        }

        let node_text_len = self.doc.text_len(node);
        let node_correct = self.annotations.total_correct_sentences(node);

        let mut text_lengths = Vec::new();
        let mut sentence_children = 0;
        let mut max_correct = 0;
        let mut best: Option<Candidate> = None;
        let mut runner_up: Option<Candidate> = None;

        for child in children {
            let correct = self.annotations.total_correct_sentences(child);
            if correct > self.thresholds.sentence_child_min_correct {
                sentence_children += 1;
                max_correct = max_correct.max(correct);
            }

            let text_len = self.doc.text_len(child);
            let markup_len = self.doc.inner_html(child).chars().count();
            let Some(density) = self.arithmetic.density(markup_len, text_len) else {
                continue;
            };
            text_lengths.push(text_len);

            if correct > best.map_or(0, |b| b.correct) {
                runner_up = best;
                best = Some(Candidate {
                    node: child,
                    text_len,
                    density,
                    correct,
                });
            }
        }

        let Some(best) = best else {
            debug!(node = node.0, "no child with correct sentences");
            return Step::Stop;
        };

        let deviation = self.arithmetic.mean_deviation(&text_lengths);
        let spread_percent = if node_text_len == 0 {
            0.0
        } else {
            100.0 * deviation / node_text_len as f64
        };

        let evenly_spread = spread_percent < self.thresholds.even_spread_percent
            && text_lengths.len() > self.thresholds.min_children_for_even_spread;
        let no_dominant_child = sentence_children > self.thresholds.min_sentence_children
            && (max_correct as f64) < node_correct as f64 * self.thresholds.best_child_share;

        if evenly_spread || no_dominant_child {
            debug!(
                node = node.0,
                spread_percent,
                measured = text_lengths.len(),
                sentence_children,
                max_correct,
                node_correct,
                "text is evenly distributed, stopping"
            );
            return Step::Stop;
        }

        if let Some(runner_up) = runner_up
            && prefers_runner_up(&best, &runner_up, self.thresholds)
        {
            debug!(
                best = best.node.0,
                best_density = best.density,
                runner_up = runner_up.node.0,
                runner_up_density = runner_up.density,
                "preferring runner-up over dense best child"
            );
            return Step::Descend(runner_up.node);
        }

        Step::Descend(best.node)
    }
}

/// Whether the previous best should replace a denser current best.
fn prefers_runner_up(best: &Candidate, runner_up: &Candidate, thresholds: &Thresholds) -> bool {
    let best_len = best.text_len as f64;
    let runner_up_len = runner_up.text_len as f64;

    (runner_up.density * 2.0 <= best.density
        && runner_up_len > thresholds.dense_runner_up_length * best_len)
        || (runner_up_len > thresholds.comparable_runner_up_length * best_len
            && runner_up.density < best.density)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::annotate;
    use crate::dom::parse_html;
    use crate::sentence::RuleTokenizer;

    fn select(html: &str) -> (Document, NodeId) {
        let doc = parse_html(html);
        let thresholds = Thresholds::default();
        let annotations = annotate(&doc, doc.root(), &RuleTokenizer::default(), &thresholds);
        let selected = PrimaryNodeSelector::new(&doc, &annotations, &thresholds, Arithmetic::default())
            .select(doc.root());
        (doc, selected)
    }

    fn candidate(text_len: usize, density: f64) -> Candidate {
        Candidate {
            node: NodeId::NONE,
            text_len,
            density,
            correct: 0,
        }
    }

    #[test]
    fn test_leaf_is_returned() {
        let doc = parse_html("<p>Only text in this paragraph.</p>");
        let p = doc.find_by_tag("p").unwrap();
        let thresholds = Thresholds::default();
        let annotations = annotate(&doc, p, &RuleTokenizer::default(), &thresholds);
        let selector = PrimaryNodeSelector::new(&doc, &annotations, &thresholds, Arithmetic::Exact);
        assert_eq!(selector.select(p), p);
    }

    #[test]
    fn test_no_sentences_returns_start() {
        let (doc, selected) = select("<div><span>a</span><span>b</span></div>");
        assert_eq!(selected, doc.root());
    }

    #[test]
    fn test_descends_to_article() {
        let (doc, selected) = select(
            "<body><div id='menu'><a>Home</a><a>About</a></div>\
             <div id='main'><p>This is the first real sentence. It has a second sentence too.</p></div></body>",
        );
        assert_eq!(doc.element_id(selected), None);
        assert_eq!(doc.tag_name(selected), Some("p"));
        assert!(doc.contains(doc.get_by_id("main").unwrap(), selected));
    }

    #[test]
    fn test_even_paragraphs_stop_at_container() {
        let paragraph = "<p>Each paragraph here has two sentences. They are equally long here.</p>";
        let html = format!("<body><div id='story'>{}</div></body>", paragraph.repeat(4));
        let (doc, selected) = select(&html);
        assert_eq!(doc.element_id(selected), Some("story"));
    }

    fn boxed(children: &[&str]) -> String {
        let inner: String = children.iter().map(|c| format!("<p>{c}</p>")).collect();
        format!("<body><div id='box'>{inner}</div></body>")
    }

    #[test]
    fn test_three_even_children_still_descend() {
        // Even spread needs more than three measured children.
        let (doc, selected) = select(&boxed(&[
            "Alpha sentence number one is here. Alpha sentence number two is here.",
            "Bravo sentence number one is here, bravo sentence number two is here,",
            "Delta sentence number one is here, delta sentence number two is here,",
        ]));
        assert_eq!(doc.tag_name(selected), Some("p"));
        assert!(doc.text_content(selected).starts_with("Alpha"));
    }

    #[test]
    fn test_no_dominant_child_stops() {
        // 2 + 2 + 4 correct sentences: the best child holds half of the total.
        let (doc, selected) = select(&boxed(&[
            "Alpha has two sentences in it. Both of them end with periods.",
            "Bravo is the second block here. It also has exactly two sentences.",
            "Charlie is the longest block of text in the box. It carries four full sentences. \
             Each one is long enough to count. The last one ends the block.",
        ]));
        assert_eq!(doc.element_id(selected), Some("box"));
    }

    #[test]
    fn test_child_with_exactly_best_share_is_followed() {
        // 16 of 20 correct sentences is not below 80%.
        let long = "Another sentence keeps this paragraph going. ".repeat(16);
        let (doc, selected) = select(&boxed(&[
            "Alpha has two sentences in it. Both of them end with periods.",
            "Bravo is the second block here. It also has exactly two sentences.",
            long.trim_end(),
        ]));
        assert!(doc.text_content(selected).starts_with("Another sentence"));
    }

    #[test]
    fn test_spread_just_below_threshold_stops() {
        // Lengths 11, 11, 39, 39: deviation 14 over 100 chars.
        let (doc, selected) = select(&boxed(&[
            "short texts",
            "plain texts",
            "Every word here counts toward all sums.",
            "Each line here adds a few more word in.",
        ]));
        assert_eq!(doc.element_id(selected), Some("box"));
    }

    #[test]
    fn test_spread_at_threshold_descends() {
        // Lengths 10, 10, 40, 40: deviation 15 over 100 chars is exactly 15%.
        let (doc, selected) = select(&boxed(&[
            "short text",
            "plain text",
            "Every word here counts toward the total.",
            "Each line here adds a few more words in.",
        ]));
        assert_eq!(doc.text_content(selected), "Every word here counts toward the total.");
    }

    #[test]
    fn test_first_seen_wins_ties() {
        let (doc, selected) = select(
            "<body><div id='a'><p>Alpha sentence number one. Alpha sentence number two.</p></div>\
             <div id='b'><p>Bravo sentence number one. Bravo sentence number two.</p></div></body>",
        );
        assert!(doc.contains(doc.get_by_id("a").unwrap(), selected));
    }

    #[test]
    fn test_dense_best_loses_to_long_clean_runner_up() {
        let best = candidate(800, 6.0);
        let thresholds = Thresholds::default();
        assert!(prefers_runner_up(&best, &candidate(300, 2.0), &thresholds));
        assert!(prefers_runner_up(&best, &candidate(300, 3.0), &thresholds));
        assert!(!prefers_runner_up(&best, &candidate(300, 4.0), &thresholds));
    }

    #[test]
    fn test_short_runner_up_keeps_best() {
        // 200 chars is below 30% of 800 and below 70% of it
        let best = candidate(800, 6.0);
        assert!(!prefers_runner_up(&best, &candidate(200, 2.0), &Thresholds::default()));
    }

    #[test]
    fn test_runner_up_thresholds_are_strict() {
        let thresholds = Thresholds::default();
        let best = candidate(1000, 6.0);
        // Exactly half the density is enough; exactly 30% of the length is not.
        assert!(prefers_runner_up(&best, &candidate(301, 3.0), &thresholds));
        assert!(!prefers_runner_up(&best, &candidate(300, 3.0), &thresholds));
        assert!(!prefers_runner_up(&best, &candidate(301, 3.1), &thresholds));
        // Exactly 70% of the length is not comparable.
        assert!(prefers_runner_up(&best, &candidate(701, 5.9), &thresholds));
        assert!(!prefers_runner_up(&best, &candidate(700, 5.9), &thresholds));
        assert!(!prefers_runner_up(&best, &candidate(701, 6.0), &thresholds));
    }

    #[test]
    fn test_comparable_runner_up_with_lower_density() {
        let best = candidate(100, 3.0);
        let thresholds = Thresholds::default();
        assert!(prefers_runner_up(&best, &candidate(80, 2.0), &thresholds));
        assert!(!prefers_runner_up(&best, &candidate(80, 3.0), &thresholds));
        assert!(!prefers_runner_up(&best, &candidate(60, 2.0), &thresholds));
    }
}
