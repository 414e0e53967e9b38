//! Property tests over generated documents.

use proptest::prelude::*;

use articlex::dom::parse_html;
use articlex::sentence::word_count;
use articlex::{
    Arithmetic, Extractor, PrimaryNodeSelector, RuleTokenizer, SentenceTokenizer, Thresholds,
    annotate, decode,
};

fn sentence() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "The quick brown fox jumps over the lazy dog.",
        "Short one.",
        "Is this really a question worth asking?",
        "this fragment has no final punctuation",
        "What a surprise that was!",
        "Mr. Brown met Dr. Green at the station.",
        "one two three four five six seven eight nine ten eleven twelve thirteen \
         fourteen fifteen sixteen seventeen eighteen nineteen twenty twenty-one \
         twenty-two twenty-three twenty-four twenty-five.",
        "Ok.",
    ])
    .prop_map(str::to_string)
}

/// Random nested markup: containers with optional own text around leaves.
fn tree() -> impl Strategy<Value = String> {
    let leaf = (
        prop::sample::select(vec!["p", "span", "li", "em"]),
        prop::collection::vec(sentence(), 0..4),
    )
        .prop_map(|(tag, text)| format!("<{tag}>{}</{tag}>", text.join(" ")));

    leaf.prop_recursive(4, 64, 5, |inner| {
        (
            prop::sample::select(vec!["div", "section", "article"]),
            prop::sample::select(vec!["", "main", "post body", "comments"]),
            prop::collection::vec(sentence(), 0..2),
            prop::collection::vec(inner, 1..5),
        )
            .prop_map(|(tag, class, own, children)| {
                format!(
                    "<{tag} class=\"{class}\">{} {}</{tag}>",
                    own.join(" "),
                    children.concat()
                )
            })
    })
}

fn document() -> impl Strategy<Value = String> {
    tree().prop_map(|body| format!("<html><head><title>t</title></head><body>{body}</body></html>"))
}

proptest! {
    #[test]
    fn prop_totals_aggregate_bottom_up(html in document()) {
        let doc = parse_html(&html);
        let annotations = annotate(
            &doc,
            doc.root(),
            &RuleTokenizer::default(),
            &Thresholds::default(),
        );

        for id in doc.descendants(doc.root()) {
            let Some(stats) = annotations.get(id) else { continue };
            let children: Vec<_> = doc
                .element_children(id)
                .map(|c| *annotations.get(c).unwrap())
                .collect();

            let good: usize = children.iter().map(|c| c.total_good_sentences).sum();
            let correct: usize = children.iter().map(|c| c.total_correct_sentences).sum();
            let flat = children.iter().map(|c| c.max_flat_sentences).max().unwrap_or(0);

            prop_assert_eq!(stats.total_good_sentences, good + stats.own.count_good_sentences);
            prop_assert_eq!(stats.total_correct_sentences, correct + stats.own.count_correct_sentences);
            prop_assert_eq!(stats.max_flat_sentences, flat.max(stats.own.count_good_sentences));
            prop_assert!(stats.own.count_correct_sentences <= stats.own.count_good_sentences);
            prop_assert!(stats.own.count_good_sentences <= stats.own.count_long_sentences);
        }
    }

    #[test]
    fn prop_selection_stays_inside_root(html in document()) {
        let extractor = Extractor::default();
        let doc = extractor.load(&articlex::Source::from(html.as_str())).unwrap();
        let article = extractor.article(&doc).unwrap();
        prop_assert!(article.document.contains(article.document.root(), article.node));
    }

    #[test]
    fn prop_selection_from_inner_node_stays_inside_it(html in document()) {
        let doc = parse_html(&html);
        let thresholds = Thresholds::default();
        let body = doc.find_by_tag("body").unwrap();
        let annotations = annotate(&doc, body, &RuleTokenizer::default(), &thresholds);
        let selected = PrimaryNodeSelector::new(&doc, &annotations, &thresholds, Arithmetic::Exact)
            .select(body);
        prop_assert!(doc.contains(body, selected));
    }

    #[test]
    fn prop_signature_is_deterministic_and_replayable(html in document()) {
        let extractor = Extractor::default();
        let source = articlex::Source::from(html.as_str());
        let first = extractor.extract_signature(&source).unwrap();
        let second = extractor.extract_signature(&source).unwrap();
        prop_assert_eq!(&first, &second);

        let doc = parse_html(&html);
        prop_assert!(decode(&doc, &first).unwrap().is_some());
        prop_assert!(extractor.extract_text_by_signature(&source, &first).unwrap().is_some());
    }

    #[test]
    fn prop_leaf_selects_itself(text in "[A-Za-z .!?]{0,200}") {
        let html = format!("<p id=\"leaf\">{text}</p>");
        let doc = parse_html(&html);
        let leaf = doc.get_by_id("leaf").unwrap();
        let thresholds = Thresholds::default();
        let annotations = annotate(&doc, leaf, &RuleTokenizer::default(), &thresholds);
        let selected = PrimaryNodeSelector::new(&doc, &annotations, &thresholds, Arithmetic::Truncating)
            .select(leaf);
        prop_assert_eq!(selected, leaf);
    }

    #[test]
    fn prop_tokenizer_never_splits_words(text in "[A-Za-z0-9 .!?\"')\n]{0,300}") {
        let sentences = RuleTokenizer::default().tokenize(&text);
        let words: usize = sentences.iter().map(|s| word_count(s)).sum();
        prop_assert_eq!(words, word_count(&text));
        for s in sentences {
            prop_assert!(!s.is_empty());
            prop_assert_eq!(s, s.trim());
        }
    }
}
