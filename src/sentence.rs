//! Sentence boundary detection.
//!
//! The annotator only needs sentence spans, so tokenization sits behind the
//! [`SentenceTokenizer`] trait. [`RuleTokenizer`] is a rule-based splitter
//! driven by a [`SentenceModel`] of known abbreviations.

use std::collections::HashSet;

/// Splits a text blob into ordered sentence spans.
pub trait SentenceTokenizer {
    /// Sentences of `text` in order, trimmed, never empty.
    fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str>;
}

/// Sentence-final punctuation.
const TERMINATORS: &[char] = &['.', '?', '!'];

/// Characters that may close a sentence after its terminator.
const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}', '\u{bb}'];

/// Abbreviations that end in a period without ending a sentence.
const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "a.m", "al", "apr", "aug", "ave", "blvd", "capt", "cf", "co", "col", "corp", "dec", "dept",
    "dr", "e.g", "etc", "feb", "fig", "gen", "gov", "i.e", "inc", "jan", "jr", "jul", "jun", "lt",
    "ltd", "mar", "mr", "mrs", "ms", "mt", "no", "nov", "oct", "p.m", "ph.d", "prof", "rep", "rev",
    "sen", "sep", "sept", "sgt", "sr", "st", "u.k", "u.s", "vs",
];

/// Language knowledge used by [`RuleTokenizer`].
#[derive(Debug, Clone)]
pub struct SentenceModel {
    abbreviations: HashSet<String>,
}

impl SentenceModel {
    /// Model with a custom abbreviation list (case-insensitive, without the trailing period).
    pub fn new<I, S>(abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            abbreviations: abbreviations
                .into_iter()
                .map(|a| a.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn english() -> Self {
        Self::new(ENGLISH_ABBREVIATIONS)
    }

    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(&word.to_lowercase())
    }
}

impl Default for SentenceModel {
    fn default() -> Self {
        Self::english()
    }
}

/// Rule-based sentence splitter.
///
/// A boundary is a run of `.?!` (plus closing quotes or brackets) followed by
/// whitespace or the end of the text. A single period after a known
/// abbreviation or a one-letter initial is not a boundary, and neither is
/// any terminator followed by a lowercase word.
#[derive(Debug, Clone, Default)]
pub struct RuleTokenizer {
    model: SentenceModel,
}

impl RuleTokenizer {
    pub fn new(model: SentenceModel) -> Self {
        Self { model }
    }

    fn is_boundary(&self, text: &str, term_start: usize, term: &str, after: usize) -> bool {
        let rest = &text[after..];
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return false;
        }
        if rest
            .trim_start()
            .chars()
            .next()
            .is_some_and(char::is_lowercase)
        {
            return false;
        }
        if term == "." {
            let word = preceding_word(&text[..term_start]);
            let is_initial = {
                let mut chars = word.chars();
                matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
            };
            if is_initial || self.model.is_abbreviation(word) {
                return false;
            }
        }
        true
    }
}

impl SentenceTokenizer for RuleTokenizer {
    fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((i, ch)) = chars.next() {
            if !TERMINATORS.contains(&ch) {
                continue;
            }

            let mut term_end = i + ch.len_utf8();
            while let Some(&(j, c)) = chars.peek()
                && TERMINATORS.contains(&c)
            {
                term_end = j + c.len_utf8();
                chars.next();
            }
            let mut end = term_end;
            while let Some(&(j, c)) = chars.peek()
                && CLOSERS.contains(&c)
            {
                end = j + c.len_utf8();
                chars.next();
            }

            if self.is_boundary(text, i, &text[i..term_end], end) {
                push_trimmed(&mut sentences, &text[start..end]);
                start = end;
            }
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }
}

fn push_trimmed<'t>(sentences: &mut Vec<&'t str>, span: &'t str) {
    let span = span.trim();
    if !span.is_empty() {
        sentences.push(span);
    }
}

/// The whitespace-delimited word ending at the end of `text`, stripped of
/// leading punctuation: `"see (Fig"` yields `"Fig"`.
fn preceding_word(text: &str) -> &str {
    let word = text
        .rfind(char::is_whitespace)
        .map_or(text, |pos| &text[pos..])
        .trim_start();
    word.trim_start_matches(|c: char| !c.is_alphanumeric())
}

/// Number of whitespace-delimited words.
pub fn word_count(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}
