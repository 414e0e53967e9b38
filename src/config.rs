//! Extraction configuration.
//!
//! An [`ExtractorConfig`] is built once and handed to every pipeline stage;
//! nothing in the crate reads process-wide settings.
//!
//! ```
//! use articlex::{Arithmetic, ExtractorConfig, TagDenylist};
//!
//! let config = ExtractorConfig::default()
//!     .with_denylist(TagDenylist::new(["script", "style", "aside"]))
//!     .with_arithmetic(Arithmetic::Exact);
//! assert!(config.denylist.contains("aside"));
//! assert!(!config.denylist.contains("nav"));
//! ```

use std::time::Duration;

/// Tags removed before analysis when no denylist is configured.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "script", "style", "noscript", "head", "header", "footer", "nav",
];

/// A sorted, case-sensitive set of tag names.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "cli", serde(from = "Vec<String>", into = "Vec<String>"))]
pub struct TagDenylist {
    tags: Vec<String>,
}

impl TagDenylist {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        tags.sort();
        tags.dedup();
        Self { tags }
    }

    /// Binary-search membership test.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.binary_search_by(|t| t.as_str().cmp(tag)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for TagDenylist {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST.iter().copied())
    }
}

impl From<Vec<String>> for TagDenylist {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

impl From<TagDenylist> for Vec<String> {
    fn from(list: TagDenylist) -> Self {
        list.tags
    }
}

/// Empirically tuned constants of the sentence scorer and the selector.
///
/// The defaults reproduce established extraction behavior; change them
/// only together with a corpus to re-tune against.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "cli", serde(default))]
pub struct Thresholds {
    /// Sentences with this many words or fewer are ignored.
    pub min_sentence_words: usize,
    /// Sentences with this many words or more are "long" but not "good".
    pub max_good_sentence_words: usize,
    /// Mean deviation (percent of the parent's text) below which text counts as evenly spread.
    pub even_spread_percent: f64,
    /// The even-spread rule needs strictly more measured children than this.
    pub min_children_for_even_spread: usize,
    /// Children with more than this many correct sentences are "sentence children".
    pub sentence_child_min_correct: usize,
    /// The share rule needs strictly more sentence children than this.
    pub min_sentence_children: usize,
    /// Stop when the best child holds less than this share of the parent's correct sentences.
    pub best_child_share: f64,
    /// Low-density runner-up must exceed this fraction of the best child's text length.
    pub dense_runner_up_length: f64,
    /// Comparable runner-up must exceed this fraction of the best child's text length.
    pub comparable_runner_up_length: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_sentence_words: 3,
            max_good_sentence_words: 25,
            even_spread_percent: 15.0,
            min_children_for_even_spread: 3,
            sentence_child_min_correct: 1,
            min_sentence_children: 2,
            best_child_share: 0.8,
            dense_runner_up_length: 0.3,
            comparable_runner_up_length: 0.7,
        }
    }
}

/// Arithmetic used for markup density and the mean inside mean deviation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum Arithmetic {
    /// Integer (truncating) division, matching the tuned thresholds.
    #[default]
    Truncating,
    /// Real-valued division.
    Exact,
}

impl Arithmetic {
    /// Markup density, `markup / text`. `None` when there is no text.
    pub fn density(self, markup_len: usize, text_len: usize) -> Option<f64> {
        if text_len == 0 {
            return None;
        }
        Some(match self {
            Arithmetic::Truncating => (markup_len / text_len) as f64,
            Arithmetic::Exact => markup_len as f64 / text_len as f64,
        })
    }

    /// Arithmetic mean of `values`, 0 for an empty slice.
    pub fn mean(self, values: &[usize]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let sum: usize = values.iter().sum();
        match self {
            Arithmetic::Truncating => (sum / values.len()) as f64,
            Arithmetic::Exact => sum as f64 / values.len() as f64,
        }
    }

    /// Mean absolute deviation of `values` from their mean, 0 for an empty slice.
    pub fn mean_deviation(self, values: &[usize]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let mean = self.mean(values);
        let total: f64 = values.iter().map(|&v| (v as f64 - mean).abs()).sum();
        total / values.len() as f64
    }
}

/// Settings of the document fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "cli", serde(default))]
pub struct FetchConfig {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("articlex/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Complete configuration of an [`Extractor`](crate::Extractor).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "cli", serde(default))]
pub struct ExtractorConfig {
    pub denylist: TagDenylist,
    pub thresholds: Thresholds,
    pub arithmetic: Arithmetic,
    /// Line width of the plain-text rendering.
    pub text_width: TextWidth,
    pub fetch: FetchConfig,
}

/// Line width handed to the HTML-to-text converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "cli", serde(transparent))]
pub struct TextWidth(pub usize);

impl Default for TextWidth {
    fn default() -> Self {
        TextWidth(80)
    }
}

impl ExtractorConfig {
    pub fn with_denylist(mut self, denylist: TagDenylist) -> Self {
        self.denylist = denylist;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_arithmetic(mut self, arithmetic: Arithmetic) -> Self {
        self.arithmetic = arithmetic;
        self
    }

    pub fn with_text_width(mut self, width: usize) -> Self {
        self.text_width = TextWidth(width.max(1));
        self
    }

    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }
}
