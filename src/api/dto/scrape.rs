//! DTOs for the scrape endpoint.

use crate::application::services::Resolution;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to resolve a dealer's quote links.
#[derive(Debug, Deserialize, Validate)]
pub struct ScrapeRequest {
    /// Dealer subdomain slug, e.g. `dubbocitytoyota`.
    #[serde(rename = "baseDomain", default)]
    #[validate(required)]
    pub base_domain: Option<String>,
}

/// Quote link and its campaign variants.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub source_url: String,
    pub service_url: String,
    pub parts_url: String,
    pub dealer_page: String,
}

impl From<Resolution> for ScrapeResponse {
    fn from(resolution: Resolution) -> Self {
        Self {
            source_url: resolution.source_url,
            service_url: resolution.service_url,
            parts_url: resolution.parts_url,
            dealer_page: resolution.target_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_reads_camel_case_field() {
        let request: ScrapeRequest =
            serde_json::from_value(json!({ "baseDomain": "acme" })).unwrap();
        assert_eq!(request.base_domain.as_deref(), Some("acme"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_missing_field_fails_validation() {
        let request: ScrapeRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.base_domain.is_none());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_field_names() {
        let response = ScrapeResponse::from(Resolution {
            source_url: "s".to_string(),
            service_url: "sv".to_string(),
            parts_url: "p".to_string(),
            target_url: "t".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "sourceUrl": "s",
                "serviceUrl": "sv",
                "partsUrl": "p",
                "dealerPage": "t",
            })
        );
    }
}
