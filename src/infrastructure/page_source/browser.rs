//! Headless Chrome page source backed by `chromiumoxide`.

use crate::domain::page_source::{FetchError, PageSource};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    EventLifecycleEvent, SetLifecycleEventsEnabledParams,
};
use chromiumoxide::listeners::EventStream;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

/// Lifecycle event Chrome emits once a frame has had no network activity for
/// 500 ms.
const NETWORK_IDLE: &str = "networkIdle";

/// Lifecycle event opening a new document in a frame.
const DOCUMENT_INIT: &str = "init";

/// A launched browser and the task driving its CDP connection.
type Session = (Browser, JoinHandle<()>);

/// Loads target pages in a freshly launched headless Chrome.
///
/// Sees the page after its scripts have run and the network has gone idle,
/// at the cost of one browser process per request. The process is closed on
/// every exit path: success, timeout or error.
pub struct BrowserPageSource {
    user_agent: String,
    timeout: Duration,
}

impl BrowserPageSource {
    /// Creates the page source.
    ///
    /// `timeout` bounds the whole load: browser launch, navigation, waiting
    /// for network idle and reading the DOM.
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        info!(timeout_secs = timeout.as_secs(), "Browser page source ready");
        Self {
            user_agent: user_agent.into(),
            timeout,
        }
    }

    fn config(&self) -> Result<BrowserConfig, FetchError> {
        BrowserConfig::builder()
            .arg(format!("--user-agent={}", self.user_agent))
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .build()
            .map_err(FetchError::Browser)
    }

    /// Launches Chrome into `session` and renders `url`.
    ///
    /// The session is stored before any page work starts, so the caller can
    /// release it even when this future is cancelled.
    async fn launch_and_render(
        &self,
        url: &Url,
        session: &mut Option<Session>,
    ) -> Result<String, FetchError> {
        let (browser, mut handler) = Browser::launch(self.config()?)
            .await
            .map_err(browser_error)?;

        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });
        let (browser, _) = session.insert((browser, handler_task));

        render(browser, url).await
    }
}

/// Opens a blank tab, navigates it to `url` and reads the DOM once the main
/// frame's network has gone idle.
async fn render(browser: &Browser, url: &Url) -> Result<String, FetchError> {
    let page = browser.new_page("about:blank").await.map_err(browser_error)?;

    page.execute(SetLifecycleEventsEnabledParams::new(true))
        .await
        .map_err(browser_error)?;
    let mut events = page
        .event_listener::<EventLifecycleEvent>()
        .await
        .map_err(browser_error)?;

    page.goto(url.as_str()).await.map_err(browser_error)?;
    wait_for_network_idle(&page, &mut events).await?;
    debug!(%url, "Network idle");

    let html = page.content().await.map_err(browser_error)?;

    if let Err(e) = page.close().await {
        debug!("Failed to close tab: {}", e);
    }

    Ok(html)
}

async fn wait_for_network_idle(
    page: &Page,
    events: &mut EventStream<EventLifecycleEvent>,
) -> Result<(), FetchError> {
    let main_frame = page.mainframe().await.map_err(browser_error)?;
    let mut tracker = IdleTracker::default();

    while let Some(event) = events.next().await {
        if main_frame.as_ref().is_some_and(|id| *id != event.frame_id) {
            continue;
        }
        if tracker.observe(&event.name) {
            return Ok(());
        }
    }

    Err(FetchError::Browser(
        "page closed before the network went idle".to_string(),
    ))
}

/// Follows lifecycle event names for one frame and reports when the document
/// opened by the navigation has gone network idle.
///
/// Idle events from the blank document that preceded the navigation are
/// ignored: only an idle after a fresh `init` counts.
#[derive(Debug, Default)]
struct IdleTracker {
    navigated: bool,
}

impl IdleTracker {
    fn observe(&mut self, name: &str) -> bool {
        match name {
            DOCUMENT_INIT => {
                self.navigated = true;
                false
            }
            NETWORK_IDLE => self.navigated,
            _ => false,
        }
    }
}

#[async_trait]
impl PageSource for BrowserPageSource {
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError> {
        let mut session = None;

        let result = match tokio::time::timeout(
            self.timeout,
            self.launch_and_render(url, &mut session),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        };

        if let Some((mut browser, handler_task)) = session.take() {
            if let Err(e) = browser.close().await {
                warn!("Failed to close browser: {}", e);
            }
            if let Err(e) = browser.wait().await {
                warn!("Failed to reap browser process: {}", e);
            }
            handler_task.abort();
        }

        result
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}

fn browser_error(err: impl std::fmt::Display) -> FetchError {
    FetchError::Browser(err.to_string())
}
