//! Page source implementations.
//!
//! Provides two interchangeable [`PageSource`] backends, picked at startup by
//! [`FetchBackend`]:
//! - [`HttpPageSource`] - static HTTP GET (default)
//! - `BrowserPageSource` - headless Chrome render (cargo feature `browser`)

#[cfg(feature = "browser")]
mod browser;
mod http;

#[cfg(feature = "browser")]
pub use browser::BrowserPageSource;
pub use http::HttpPageSource;

use crate::domain::page_source::PageSource;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Which page source backend to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchBackend {
    #[default]
    Http,
    Browser,
}

impl FetchBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchBackend::Http => "http",
            FetchBackend::Browser => "browser",
        }
    }
}

impl fmt::Display for FetchBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FetchBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(FetchBackend::Http),
            "browser" => Ok(FetchBackend::Browser),
            other => anyhow::bail!("FETCH_BACKEND must be 'http' or 'browser', got '{}'", other),
        }
    }
}

/// Builds the page source for `backend`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, or if the browser
/// backend is requested from a binary compiled without the `browser` feature.
pub fn build_page_source(
    backend: FetchBackend,
    user_agent: &str,
    timeout: Duration,
) -> anyhow::Result<Arc<dyn PageSource>> {
    match backend {
        FetchBackend::Http => Ok(Arc::new(HttpPageSource::new(user_agent, timeout)?)),
        #[cfg(feature = "browser")]
        FetchBackend::Browser => Ok(Arc::new(BrowserPageSource::new(user_agent, timeout))),
        #[cfg(not(feature = "browser"))]
        FetchBackend::Browser => {
            anyhow::bail!("FETCH_BACKEND=browser requires building with `--features browser`")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("http".parse::<FetchBackend>().unwrap(), FetchBackend::Http);
        assert_eq!(
            " Browser ".parse::<FetchBackend>().unwrap(),
            FetchBackend::Browser
        );
        assert!("playwright".parse::<FetchBackend>().is_err());
    }

    #[test]
    fn test_backend_display_round_trip() {
        for backend in [FetchBackend::Http, FetchBackend::Browser] {
            assert_eq!(backend.to_string().parse::<FetchBackend>().unwrap(), backend);
        }
    }

    #[test]
    fn test_build_http_source() {
        let source = build_page_source(FetchBackend::Http, "test-agent", Duration::from_secs(5))
            .unwrap();
        assert_eq!(source.name(), "http");
    }

    #[cfg(not(feature = "browser"))]
    #[test]
    fn test_browser_requires_feature() {
        assert!(
            build_page_source(FetchBackend::Browser, "test-agent", Duration::from_secs(5))
                .is_err()
        );
    }
}
