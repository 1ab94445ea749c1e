//! Page source trait: how the target page's HTML is obtained.

use async_trait::async_trait;
use url::Url;

/// Errors that can occur while loading a target page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Timed out loading the dealer page")]
    Timeout,

    #[error("Dealer page responded with HTTP {0}")]
    Status(u16),

    #[error("Request to the dealer page failed: {0}")]
    Transport(String),

    #[error("Browser rendering failed: {0}")]
    Browser(String),
}

/// Retrieves the HTML of a target page.
///
/// Implementations own whatever resource they need for a single load (an HTTP
/// connection, a browser process) and must release it before returning,
/// whatever the outcome.
///
/// # Implementations
///
/// - [`crate::infrastructure::HttpPageSource`] - static HTTP GET
/// - `crate::infrastructure::BrowserPageSource` - headless Chrome render
///   (feature `browser`)
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Loads `url` and returns the document markup.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on network failure, timeout, non-success status
    /// or rendering failure.
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError>;

    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;
}
