//! Static HTTP page source backed by `reqwest`.

use crate::domain::page_source::{FetchError, PageSource};
use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Loads target pages with a single HTTP GET.
///
/// Sees only the server-rendered markup; content injected by client-side
/// scripts is invisible to it. The client is built once and reused, so
/// connections are pooled across requests.
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    /// Builds the HTTP client.
    ///
    /// # Arguments
    ///
    /// - `user_agent` - sent on every request; dealer sites serve reduced
    ///   markup to unknown agents
    /// - `timeout` - bound on the whole request, connect through body
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the TLS backend cannot be initialised.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        info!(timeout_secs = timeout.as_secs(), "HTTP page source ready");

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;

        let status = response.status();
        debug!(%url, %status, "Dealer page responded");

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
