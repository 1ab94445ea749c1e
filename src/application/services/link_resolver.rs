//! Quote link resolution service.

use std::fmt;
use std::sync::Arc;

use tracing::{Instrument, Span, debug, field, info, info_span, warn};
use url::Url;

use crate::domain::quote_link::extract_quote_link;
use crate::domain::variant::derive_variant;
use crate::domain::{Campaign, Identifier, PageSource, TargetTemplate};
use crate::error::AppError;

/// Progress of a single resolution.
///
/// Runs `Validating -> Fetching -> Extracting -> Done`; any stage may end in
/// an [`AppError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Fetching,
    Extracting,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Validating => "validating",
            Stage::Fetching => "fetching",
            Stage::Extracting => "extracting",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful outcome: the extracted link, both campaign variants and the page
/// they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub source_url: String,
    pub service_url: String,
    pub parts_url: String,
    pub target_url: String,
}

/// Service turning a dealer identifier into campaign-tagged quote links.
///
/// Holds no per-request state. The page source is chosen at startup and shared
/// by all requests.
pub struct LinkResolver {
    source: Arc<dyn PageSource>,
    template: TargetTemplate,
}

impl LinkResolver {
    /// Creates a new resolver.
    pub fn new(source: Arc<dyn PageSource>, template: TargetTemplate) -> Self {
        Self { source, template }
    }

    pub fn template(&self) -> &TargetTemplate {
        &self.template
    }

    /// Name of the configured page source backend.
    pub fn backend(&self) -> &'static str {
        self.source.name()
    }

    /// Builds the dealer page URL for an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the identifier cannot form a host.
    pub fn target_url(&self, identifier: &Identifier) -> Result<Url, AppError> {
        self.template.build(identifier)
    }

    /// Resolves raw caller input end to end.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the identifier fails validation; no
    ///   fetch is attempted
    /// - [`AppError::LinkNotFound`] if the page loaded but no rule matched
    /// - [`AppError::Upstream`] if the page could not be loaded
    pub async fn resolve(&self, raw: &str) -> Result<Resolution, AppError> {
        let span = info_span!("resolve", input = raw.trim(), stage = field::Empty);

        let result = self.run(raw).instrument(span.clone()).await;

        span.in_scope(|| match &result {
            Ok(resolution) => info!(source_url = %resolution.source_url, "Quote link resolved"),
            Err(err) => warn!(
                kind = err.kind(),
                target_url = err.target_url(),
                error = %err,
                "Resolution failed"
            ),
        });

        result
    }

    async fn run(&self, raw: &str) -> Result<Resolution, AppError> {
        enter(Stage::Validating);
        let identifier = Identifier::parse(raw)?;
        let target_url = self.target_url(&identifier)?;

        let source_url = self.fetch_and_extract(&target_url).await?;

        if Url::parse(&source_url).is_err() {
            warn!(%source_url, "Quote link is not an absolute URL, variants left unchanged");
        }

        let resolution = Resolution {
            service_url: derive_variant(&source_url, Campaign::Service.tag()),
            parts_url: derive_variant(&source_url, Campaign::Parts.tag()),
            source_url,
            target_url: target_url.into(),
        };

        enter(Stage::Done);
        Ok(resolution)
    }

    /// Loads the target page and returns the quote link href, made absolute.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the page source fails and
    /// [`AppError::LinkNotFound`] if no selector rule matches.
    pub async fn fetch_and_extract(&self, target_url: &Url) -> Result<String, AppError> {
        enter(Stage::Fetching);
        let html = self
            .source
            .fetch_html(target_url)
            .await
            .map_err(|e| AppError::upstream(e.to_string(), target_url.as_str()))?;

        enter(Stage::Extracting);
        debug!(bytes = html.len(), "Page loaded");
        extract_quote_link(&html, target_url)
            .ok_or_else(|| AppError::link_not_found(target_url.as_str()))
    }
}

fn enter(stage: Stage) {
    Span::current().record("stage", stage.as_str());
    debug!(%stage, "Entering stage");
}
