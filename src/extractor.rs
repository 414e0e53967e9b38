//! The extraction pipeline and its public operations.
//!
//! ```text
//! Source -> Document -> Normalizer -> annotate -> PrimaryNodeSelector -> Article
//!                                                                          |-> text
//!                                                                          |-> html
//!                                                                          `-> Signature
//! ```

use std::path::PathBuf;

use tracing::debug;

use crate::annotate::annotate;
use crate::calibrate::{CalibrationReport, Calibrator};
use crate::config::ExtractorConfig;
use crate::dom::{Document, NodeId, parse_html, parse_html_bytes};
use crate::error::{Error, Result};
use crate::fetch::{DefaultFetcher, Fetch, scheme};
use crate::normalize::Normalizer;
use crate::primary::PrimaryNodeSelector;
use crate::sentence::{RuleTokenizer, SentenceTokenizer};
use crate::signature::{Signature, decode, encode};
use crate::text::html_to_text;

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Markup already in memory.
    Html(String),
    /// Raw bytes in an unknown encoding.
    Bytes(Vec<u8>),
    File(PathBuf),
    Url(String),
}

impl Source {
    /// `http(s)://` locations become [`Source::Url`], everything else a [`Source::File`].
    pub fn from_location(location: &str) -> Self {
        match scheme(location) {
            Some("http" | "https") => Source::Url(location.to_string()),
            _ => Source::File(PathBuf::from(
                location.strip_prefix("file://").unwrap_or(location),
            )),
        }
    }
}

impl From<&str> for Source {
    fn from(html: &str) -> Self {
        Source::Html(html.to_string())
    }
}

impl From<String> for Source {
    fn from(html: String) -> Self {
        Source::Html(html)
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::File(path)
    }
}

/// The selected article inside a normalized working copy of a document.
#[derive(Debug, Clone)]
pub struct Article {
    pub document: Document,
    pub node: NodeId,
}

impl Article {
    /// Inner HTML of the selected node.
    pub fn html(&self) -> String {
        self.document.inner_html(self.node)
    }

    /// Plain-text rendering of the selected node.
    pub fn text(&self, width: usize) -> String {
        html_to_text(&self.html(), width)
    }

    pub fn signature(&self) -> Signature {
        encode(&self.document, self.node)
    }
}

/// Article extractor.
///
/// # Example
///
/// ```
/// use articlex::{Extractor, ExtractorConfig, Source};
///
/// let html = "<html><body><nav>Home | About</nav>\
///             <div class='post'><p>Rust is a systems language. It is memory safe.</p></div>\
///             </body></html>";
/// let extractor = Extractor::new(ExtractorConfig::default());
///
/// let signature = extractor.extract_signature(&Source::from(html)).unwrap();
/// assert_eq!(signature.as_str(), "html body div.post p");
///
/// let text = extractor.extract_text(&Source::from(html)).unwrap();
/// assert!(text.starts_with("Rust is a systems language."));
/// ```
pub struct Extractor {
    config: ExtractorConfig,
    tokenizer: Box<dyn SentenceTokenizer>,
    fetcher: Option<Box<dyn Fetch>>,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            tokenizer: Box::new(RuleTokenizer::default()),
            fetcher: None,
        }
    }

    /// Replace the default sentence tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: impl SentenceTokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    /// Fetch URLs through `fetcher` instead of the built-in HTTP client.
    pub fn with_fetcher(mut self, fetcher: impl Fetch + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Parse a source into a document.
    pub fn load(&self, source: &Source) -> Result<Document> {
        Ok(match source {
            Source::Html(html) => parse_html(html),
            Source::Bytes(bytes) => parse_html_bytes(bytes),
            Source::File(path) => parse_html_bytes(&std::fs::read(path)?),
            Source::Url(url) => parse_html_bytes(&self.with_url_fetcher(|f| f.fetch(url))?),
        })
    }

    fn with_url_fetcher<T>(&self, f: impl FnOnce(&dyn Fetch) -> Result<T>) -> Result<T> {
        match &self.fetcher {
            Some(fetcher) => f(fetcher.as_ref()),
            None => f(&DefaultFetcher::new(&self.config.fetch)?),
        }
    }

    /// Run normalization, annotation and selection over `doc`.
    ///
    /// `None` when nothing survives normalization.
    pub fn article(&self, doc: &Document) -> Option<Article> {
        let normalizer = Normalizer::new(&self.config.denylist);
        let document = normalizer.normalize(doc, doc.root())?;
        let root = document.root();

        let annotations = annotate(
            &document,
            root,
            self.tokenizer.as_ref(),
            &self.config.thresholds,
        );
        let node = PrimaryNodeSelector::new(
            &document,
            &annotations,
            &self.config.thresholds,
            self.config.arithmetic,
        )
        .select(root);

        debug!(
            node = node.0,
            tag = document.tag_name(node),
            annotated = annotations.len(),
            "selected primary node"
        );
        Some(Article { document, node })
    }

    /// Signature of the article in an already parsed document.
    pub fn document_signature(&self, doc: &Document) -> Signature {
        self.article(doc)
            .map(|article| article.signature())
            .unwrap_or_else(|| encode(doc, doc.root()))
    }

    /// Plain text of the article.
    pub fn extract_text(&self, source: &Source) -> Result<String> {
        let doc = self.load(source)?;
        Ok(self
            .article(&doc)
            .map(|article| article.text(self.config.text_width.0))
            .unwrap_or_default())
    }

    /// Inner HTML of the article.
    pub fn extract_html(&self, source: &Source) -> Result<String> {
        let doc = self.load(source)?;
        Ok(self
            .article(&doc)
            .map(|article| article.html())
            .unwrap_or_default())
    }

    /// Reusable signature of the article.
    pub fn extract_signature(&self, source: &Source) -> Result<Signature> {
        let doc = self.load(source)?;
        Ok(self.document_signature(&doc))
    }

    /// Text of the first node matching `signature`, skipping the heuristics.
    ///
    /// `Ok(None)` when the signature selects nothing in this document.
    pub fn extract_text_by_signature(
        &self,
        source: &Source,
        signature: &Signature,
    ) -> Result<Option<String>> {
        let doc = self.load(source)?;
        let Some(node) = decode(&doc, signature)? else {
            debug!(%signature, "signature matched nothing");
            return Ok(None);
        };
        Ok(Some(html_to_text(
            &doc.inner_html(node),
            self.config.text_width.0,
        )))
    }

    /// Most frequent article signature over `locations`.
    pub fn calibrate<S: AsRef<str>>(&self, locations: &[S]) -> Result<Signature> {
        Ok(self.calibrate_report(locations)?.signature)
    }

    /// Calibrate and return the full tally.
    pub fn calibrate_report<S: AsRef<str>>(&self, locations: &[S]) -> Result<CalibrationReport> {
        if locations.is_empty() {
            return Err(Error::NoUrls);
        }
        self.with_url_fetcher(|fetcher| Calibrator::new(self, fetcher).calibrate_report(locations))
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}
