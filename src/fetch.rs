//! Document retrieval from URLs and files.

use std::path::Path;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::FetchConfig;
use crate::error::{Error, Result};

/// Retrieves the raw bytes of a document.
///
/// Failures are terminal: implementations do not retry.
pub trait Fetch {
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP(S) fetcher.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "fetching");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

/// Local file reader. Accepts plain paths and `file://` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl Fetch for FileFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let path = location.strip_prefix("file://").unwrap_or(location);
        debug!(path, "reading file");
        Ok(std::fs::read(Path::new(path))?)
    }
}

/// Dispatches on the location's scheme: `http(s)://` goes to the network,
/// `file://` and scheme-less locations to the file system.
pub struct DefaultFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl DefaultFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(config)?,
            file: FileFetcher,
        })
    }
}

impl Fetch for DefaultFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        match scheme(location) {
            Some("http" | "https") => self.http.fetch(location),
            Some("file") | None => self.file.fetch(location),
            Some(_) => Err(Error::UnsupportedSource(location.to_string())),
        }
    }
}

/// Lowercased URL scheme, if `location` has one.
pub(crate) fn scheme(location: &str) -> Option<&str> {
    let (scheme, _) = location.split_once("://")?;
    let valid = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    match (valid, scheme) {
        (false, _) => None,
        (true, s) if s.eq_ignore_ascii_case("http") => Some("http"),
        (true, s) if s.eq_ignore_ascii_case("https") => Some("https"),
        (true, s) if s.eq_ignore_ascii_case("file") => Some("file"),
        (true, s) => Some(s),
    }
}
