//! Benchmarks for the extraction pipeline.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use articlex::dom::parse_html;
use articlex::{Extractor, RuleTokenizer, Signature, Source, SentenceTokenizer, Thresholds, annotate};

const ARTICLE_HTML: &str = include_str!("../tests/fixtures/news_article.html");
const COMMENTS_HTML: &str = include_str!("../tests/fixtures/comment_block.html");

/// A long page: the fixture article repeated inside a larger layout.
fn large_page() -> String {
    let body = ARTICLE_HTML
        .split_once("<body>")
        .and_then(|(_, rest)| rest.split_once("</body>"))
        .map(|(body, _)| body)
        .unwrap_or(ARTICLE_HTML);
    format!(
        "<html><body>{}</body></html>",
        (0..20)
            .map(|i| format!("<div class=\"block-{i}\">{body}</div>"))
            .collect::<String>()
    )
}

// ============================================================================
// Stage Benchmarks
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_html", |b| {
        b.iter(|| parse_html(black_box(ARTICLE_HTML)));
    });
}

fn bench_annotate(c: &mut Criterion) {
    let doc = parse_html(ARTICLE_HTML);
    let tokenizer = RuleTokenizer::default();
    let thresholds = Thresholds::default();

    c.bench_function("annotate", |b| {
        b.iter(|| annotate(black_box(&doc), doc.root(), &tokenizer, &thresholds));
    });
}

fn bench_tokenize(c: &mut Criterion) {
    let doc = parse_html(ARTICLE_HTML);
    let text = doc.text_content(doc.root());
    let tokenizer = RuleTokenizer::default();

    c.bench_function("tokenize", |b| {
        b.iter(|| tokenizer.tokenize(black_box(&text)).len());
    });
}

// ============================================================================
// Pipeline Benchmarks
// ============================================================================

fn bench_extract_text(c: &mut Criterion) {
    let extractor = Extractor::default();
    let source = Source::from(ARTICLE_HTML);

    c.bench_function("extract_text", |b| {
        b.iter(|| extractor.extract_text(black_box(&source)).unwrap());
    });
}

fn bench_extract_signature_large(c: &mut Criterion) {
    let extractor = Extractor::default();
    let source = Source::from(large_page());

    c.bench_function("extract_signature_large", |b| {
        b.iter(|| extractor.extract_signature(black_box(&source)).unwrap());
    });
}

fn bench_by_signature(c: &mut Criterion) {
    let extractor = Extractor::default();
    let source = Source::from(COMMENTS_HTML);
    let signature: Signature = "html body div div.story".parse().unwrap();

    c.bench_function("extract_text_by_signature", |b| {
        b.iter(|| {
            extractor
                .extract_text_by_signature(black_box(&source), &signature)
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_annotate,
    bench_tokenize,
    bench_extract_text,
    bench_extract_signature_large,
    bench_by_signature,
);

criterion_main!(benches);
