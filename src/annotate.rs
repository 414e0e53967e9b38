//! Per-node sentence statistics.
//!
//! [`annotate`] walks the tree bottom-up once and stores a [`NodeStats`] for
//! the start node and every element below it. The result is an
//! [`Annotations`] table keyed by [`NodeId`], read-only afterwards.
//!
//! A node's own sentences are measured on its text with all child elements
//! removed, so text is never counted twice: `<div>intro <a>link</a></div>`
//! contributes `"intro"` to the `div` and `"link"` to the `a`.

use crate::config::Thresholds;
use crate::dom::{Document, NodeId};
use crate::sentence::{SentenceTokenizer, word_count};

/// Sentence quality of one text blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextDescription {
    pub count_sentences: usize,
    /// Mean words per sentence, truncated. 0 without sentences.
    pub average_words: usize,
    pub count_long_sentences: usize,
    pub count_good_sentences: usize,
    pub count_correct_sentences: usize,
}

/// Score the sentences of `text`.
///
/// A sentence with at most `min_sentence_words` words is ignored. Longer
/// ones are "long"; those below `max_good_sentence_words` are also "good",
/// and a good sentence ending in `.`, `?` or `!` is "correct".
pub fn describe_sentences(
    text: &str,
    tokenizer: &dyn SentenceTokenizer,
    thresholds: &Thresholds,
) -> TextDescription {
    let sentences = tokenizer.tokenize(text);
    let mut description = TextDescription {
        count_sentences: sentences.len(),
        ..Default::default()
    };

    let mut total_words = 0;
    for sentence in sentences {
        let words = word_count(sentence);
        total_words += words;

        if words <= thresholds.min_sentence_words {
            continue;
        }
        description.count_long_sentences += 1;

        if words < thresholds.max_good_sentence_words {
            description.count_good_sentences += 1;
            if sentence.ends_with(['.', '?', '!']) {
                description.count_correct_sentences += 1;
            }
        }
    }

    if description.count_sentences > 0 {
        description.average_words = total_words / description.count_sentences;
    }
    description
}

/// Statistics of one node: its own sentences plus subtree aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStats {
    /// Sentences in the node's own text, child elements removed.
    pub own: TextDescription,
    /// Good sentences in the whole subtree, this node included.
    pub total_good_sentences: usize,
    /// Correct sentences in the whole subtree, this node included.
    pub total_correct_sentences: usize,
    /// Largest own good-sentence count of any single node in the subtree.
    pub max_flat_sentences: usize,
}

/// Out-of-band [`NodeStats`] storage indexed by node id.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    stats: Vec<Option<NodeStats>>,
}

impl Annotations {
    fn with_capacity(len: usize) -> Self {
        Self {
            stats: vec![None; len],
        }
    }

    fn set(&mut self, id: NodeId, stats: NodeStats) {
        if let Some(slot) = self.stats.get_mut(id.index()) {
            *slot = Some(stats);
        }
    }

    /// Stats of an annotated node.
    pub fn get(&self, id: NodeId) -> Option<&NodeStats> {
        if id.is_none() {
            return None;
        }
        self.stats.get(id.index()).and_then(Option::as_ref)
    }

    /// Subtree correct-sentence total, 0 for nodes that were never annotated.
    pub fn total_correct_sentences(&self, id: NodeId) -> usize {
        self.get(id).map_or(0, |s| s.total_correct_sentences)
    }

    /// Number of annotated nodes.
    pub fn len(&self) -> usize {
        self.stats.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Annotate `from` and every element beneath it.
pub fn annotate(
    doc: &Document,
    from: NodeId,
    tokenizer: &dyn SentenceTokenizer,
    thresholds: &Thresholds,
) -> Annotations {
    let mut annotations = Annotations::with_capacity(doc.len());
    if doc.get(from).is_some() {
        let annotator = Annotator {
            doc,
            tokenizer,
            thresholds,
        };
        annotator.walk(from, &mut annotations);
    }
    annotations
}

struct Annotator<'a> {
    doc: &'a Document,
    tokenizer: &'a dyn SentenceTokenizer,
    thresholds: &'a Thresholds,
}

impl Annotator<'_> {
    /// Post-order: children are annotated before their parent.
    fn walk(&self, id: NodeId, annotations: &mut Annotations) -> NodeStats {
        let mut stats = NodeStats::default();
        let mut has_children = false;

        for child in self.doc.element_children(id) {
            has_children = true;
            let child_stats = self.walk(child, annotations);
            stats.total_good_sentences += child_stats.total_good_sentences;
            stats.total_correct_sentences += child_stats.total_correct_sentences;
            stats.max_flat_sentences = stats.max_flat_sentences.max(child_stats.max_flat_sentences);
        }

        let text = if has_children {
            collapse_whitespace(&self.doc.own_text(id))
        } else {
            self.doc.text_content(id)
        };
        stats.own = describe_sentences(&text, self.tokenizer, self.thresholds);
        stats.total_good_sentences += stats.own.count_good_sentences;
        stats.total_correct_sentences += stats.own.count_correct_sentences;
        stats.max_flat_sentences = stats.max_flat_sentences.max(stats.own.count_good_sentences);

        annotations.set(id, stats);
        stats
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
