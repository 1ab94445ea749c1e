#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use dealer_quote_links::application::services::LinkResolver;
use dealer_quote_links::domain::{FetchError, PageSource, TargetTemplate};
use dealer_quote_links::state::AppState;
use url::Url;

pub const QUOTE_PAGE: &str = r#"<!doctype html>
<html><body>
  <header><a href="/">Home</a><a href="/service">Book a Service</a></header>
  <main>
    <h2>Car Insurance</h2>
    <a class="button-solid" href="https://insurance.toyota.com.au/quote/quote-new?utm_campaign=x&utm_term=y">Get a Quote</a>
  </main>
</body></html>"#;

pub const EMPTY_PAGE: &str = "<html><body><p>Finance options coming soon</p></body></html>";

/// What the stub page source answers with.
#[derive(Clone)]
pub enum StubResponse {
    Html(String),
    Status(u16),
    Timeout,
}

/// Page source that returns a canned response and records the URLs it was
/// asked for.
pub struct StubPageSource {
    response: StubResponse,
    calls: AtomicUsize,
    last_url: std::sync::Mutex<Option<String>>,
}

impl StubPageSource {
    pub fn new(response: StubResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            last_url: std::sync::Mutex::new(None),
        }
    }

    pub fn html(html: &str) -> Self {
        Self::new(StubResponse::Html(html.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_url(&self) -> Option<String> {
        self.last_url.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for StubPageSource {
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_url.lock().unwrap() = Some(url.to_string());

        match &self.response {
            StubResponse::Html(html) => Ok(html.clone()),
            StubResponse::Status(code) => Err(FetchError::Status(*code)),
            StubResponse::Timeout => Err(FetchError::Timeout),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

pub fn create_test_state(source: Arc<StubPageSource>) -> AppState {
    let resolver = LinkResolver::new(source, TargetTemplate::default());
    AppState::new(resolver)
}
