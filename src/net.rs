//! HTTPS retrieval of remote installer scripts.
use anyhow::{Context as _, Result};

/// Download seam used by the Homebrew bootstrap.
#[cfg_attr(test, mockall::automock)]
pub trait Fetch {
    /// Fetch `url` and return the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure, a non-success HTTP status,
    /// or a body that is not valid UTF-8.
    fn fetch_text(&self, url: &str) -> Result<String>;
}

/// [`Fetch`] implementation backed by a blocking `ureq` agent.
#[derive(Debug, Default)]
pub struct HttpFetcher;

impl Fetch for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let mut response = ureq::get(url)
            .call()
            .with_context(|| format!("requesting {url}"))?;
        response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("reading response body from {url}"))
    }
}
