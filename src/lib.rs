//! # articlex
//!
//! Extracts the main article from an HTML page, leaving out navigation,
//! scripts, headers, footers and comment sections.
//!
//! ## How it works
//!
//! 1. Denylisted elements (`script`, `nav`, `footer`, ...) are removed from
//!    a working copy of the document.
//! 2. Every element is annotated bottom-up with sentence statistics: how
//!    many sentences of plausible length, and how many of those end in
//!    terminal punctuation ("correct" sentences).
//! 3. A greedy descent from the root follows the child with the most
//!    correct sentences until the text is spread evenly across children.
//!    A dense child (high markup-to-text ratio) loses to a long, cleaner
//!    sibling, which keeps comment threads from beating the article.
//!
//! The selected node can be rendered as text or HTML, or turned into a
//! [`Signature`]: a tag path such as `html body div.content article.post`
//! that finds the article directly on other pages of the same template.
//!
//! ## Quick Start
//!
//! ```
//! use articlex::{Extractor, Source};
//!
//! let page = "<html><body>\
//!     <nav><a href='/'>Home</a></nav>\
//!     <article class='post'><p>Articles are made of sentences. This one has two.</p></article>\
//!     </body></html>";
//!
//! let extractor = Extractor::default();
//! let text = extractor.extract_text(&Source::from(page)).unwrap();
//! assert_eq!(text, "Articles are made of sentences. This one has two.");
//! ```
//!
//! ## Templates
//!
//! ```no_run
//! use articlex::{Extractor, Source};
//!
//! let extractor = Extractor::default();
//! let signature = extractor
//!     .calibrate(&["https://example.com/a", "https://example.com/b", "https://example.com/c"])
//!     .unwrap();
//!
//! let text = extractor
//!     .extract_text_by_signature(&Source::from_location("https://example.com/d"), &signature)
//!     .unwrap();
//! ```

pub mod annotate;
pub mod calibrate;
pub mod config;
pub mod dom;
pub mod error;
pub mod extractor;
pub mod fetch;
pub mod normalize;
pub mod primary;
pub mod sentence;
pub mod signature;
pub mod text;
pub(crate) mod util;

pub use annotate::{Annotations, NodeStats, TextDescription, annotate, describe_sentences};
pub use calibrate::{CalibrationReport, Calibrator, SignatureCount, majority};
pub use config::{Arithmetic, ExtractorConfig, FetchConfig, TagDenylist, TextWidth, Thresholds};
pub use error::{Error, Result};
pub use extractor::{Article, Extractor, Source};
pub use fetch::{DefaultFetcher, Fetch, FileFetcher, HttpFetcher};
pub use normalize::Normalizer;
pub use primary::PrimaryNodeSelector;
pub use sentence::{RuleTokenizer, SentenceModel, SentenceTokenizer};
pub use signature::{Signature, decode, encode};
