//! Target page URL template.
//!
//! Every dealer has a vendor-hosted finance page at
//! `https://{identifier}.{host}/finance/car-insurance?src=menunavigation`.
//! The scheme and host are configurable; the path and query are fixed.

use crate::domain::identifier::Identifier;
use crate::error::{AppError, INVALID_IDENTIFIER_MESSAGE};
use url::Url;

/// Host that serves dealer pages in production.
pub const DEFAULT_DEALER_HOST: &str = "dealer.toyota.com.au";

pub const DEFAULT_DEALER_SCHEME: &str = "https";

/// Fixed path of the car insurance page.
pub const TARGET_PATH: &str = "/finance/car-insurance";

/// Fixed query string of the car insurance page.
pub const TARGET_QUERY: &str = "src=menunavigation";

/// Errors raised when configuring a [`TargetTemplate`].
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Only http and https schemes are allowed, got '{0}'")]
    UnsupportedScheme(String),

    #[error("Invalid dealer host '{0}'")]
    InvalidHost(String),
}

/// Builds target page URLs for validated identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTemplate {
    scheme: String,
    host: String,
}

impl TargetTemplate {
    /// Creates a template for the given scheme and parent host.
    ///
    /// `host` may carry a port (`localhost:8080`).
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnsupportedScheme`] for anything but
    /// `http`/`https` and [`TemplateError::InvalidHost`] if the host cannot
    /// carry a dealer subdomain (including hosts with a path).
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Result<Self, TemplateError> {
        let scheme = scheme.into();
        let host = host.into();

        if scheme != "http" && scheme != "https" {
            return Err(TemplateError::UnsupportedScheme(scheme));
        }

        // Probe with a label from the identifier alphabet.
        let probe = Url::parse(&format!("{scheme}://probe.{host}{TARGET_PATH}"))
            .map_err(|_| TemplateError::InvalidHost(host.clone()))?;
        if probe.path() != TARGET_PATH {
            return Err(TemplateError::InvalidHost(host));
        }

        Ok(Self { scheme, host })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Interpolates the identifier into the template.
    ///
    /// Pure and deterministic. Fails only for labels the URL host parser
    /// rejects despite passing the alphabet check (e.g. a malformed `xn--`
    /// punycode label).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the resulting URL does not parse.
    pub fn build(&self, identifier: &Identifier) -> Result<Url, AppError> {
        let raw = format!(
            "{}://{}.{}{}?{}",
            self.scheme, identifier, self.host, TARGET_PATH, TARGET_QUERY
        );

        Url::parse(&raw).map_err(|_| AppError::invalid_input(INVALID_IDENTIFIER_MESSAGE))
    }
}

impl Default for TargetTemplate {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_DEALER_SCHEME.to_string(),
            host: DEFAULT_DEALER_HOST.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> Identifier {
        Identifier::parse(raw).unwrap()
    }

    #[test]
    fn test_build_default_template() {
        let url = TargetTemplate::default()
            .build(&id("dubbocitytoyota"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://dubbocitytoyota.dealer.toyota.com.au/finance/car-insurance?src=menunavigation"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let template = TargetTemplate::default();
        let first = template.build(&id("city-toyota")).unwrap();
        let second = template.build(&id("city-toyota")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_distinct_identifiers() {
        let template = TargetTemplate::default();
        assert_ne!(
            template.build(&id("a")).unwrap(),
            template.build(&id("b")).unwrap()
        );
    }

    #[test]
    fn test_build_custom_host_with_port() {
        let template = TargetTemplate::new("http", "localhost:8080").unwrap();
        let url = template.build(&id("acme")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://acme.localhost:8080/finance/car-insurance?src=menunavigation"
        );
    }

    #[test]
    fn test_build_rejects_malformed_punycode_label() {
        let err = TargetTemplate::default().build(&id("xn--")).unwrap_err();

        assert!(matches!(err, AppError::InvalidInput { .. }));
        assert_eq!(err.to_string(), INVALID_IDENTIFIER_MESSAGE);
    }

    #[test]
    fn test_new_rejects_unknown_scheme() {
        assert!(matches!(
            TargetTemplate::new("ftp", DEFAULT_DEALER_HOST),
            Err(TemplateError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_new_rejects_bad_host() {
        assert!(matches!(
            TargetTemplate::new("https", "bad host"),
            Err(TemplateError::InvalidHost(_))
        ));
        assert!(matches!(
            TargetTemplate::new("https", "example.com/extra"),
            Err(TemplateError::InvalidHost(_))
        ));
    }
}
