//! Application error type and its HTTP mapping.
//!
//! Every failure a resolution can end in is one of three kinds. Each maps to a
//! fixed status code and a flat JSON body; the two kinds that happen after the
//! target page is known always carry that URL for diagnostics.
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | [`AppError::InvalidInput`] | 400 | `{"error"}` |
//! | [`AppError::LinkNotFound`] | 404 | `{"error", "sourceUrl"}` |
//! | [`AppError::Upstream`] | 500 | `{"error", "dealerPage"}` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::ValidationErrors;

/// Message returned for any identifier that fails validation.
pub const INVALID_IDENTIFIER_MESSAGE: &str =
    "Invalid base domain. Use lowercase letters, digits, and hyphens only.";

/// Message returned when no selector rule located the quote link.
pub const LINK_NOT_FOUND_MESSAGE: &str = "Failed to locate the insurance quote link on the page.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The identifier is missing or outside `[a-z0-9-]+`.
    #[error("{message}")]
    InvalidInput { message: String },

    /// The target page was fetched but no selector rule matched.
    #[error("{}", LINK_NOT_FOUND_MESSAGE)]
    LinkNotFound { target_url: String },

    /// Network error, timeout, non-success status or rendering failure.
    #[error("{message}")]
    Upstream { message: String, target_url: String },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn link_not_found(target_url: impl Into<String>) -> Self {
        Self::LinkNotFound {
            target_url: target_url.into(),
        }
    }

    pub fn upstream(message: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            target_url: target_url.into(),
        }
    }

    /// Short machine-readable name of the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput { .. } => "invalid_input",
            AppError::LinkNotFound { .. } => "link_not_found",
            AppError::Upstream { .. } => "upstream_fetch_failure",
        }
    }

    /// The target page URL the failed attempt was made against, if one was built.
    pub fn target_url(&self) -> Option<&str> {
        match self {
            AppError::InvalidInput { .. } => None,
            AppError::LinkNotFound { target_url } | AppError::Upstream { target_url, .. } => {
                Some(target_url)
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::LinkNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(_: ValidationErrors) -> Self {
        AppError::invalid_input(INVALID_IDENTIFIER_MESSAGE)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::InvalidInput { message } => json!({ "error": message }),
            AppError::LinkNotFound { target_url } => json!({
                "error": self.to_string(),
                "sourceUrl": target_url,
            }),
            AppError::Upstream {
                message,
                target_url,
            } => json!({
                "error": message,
                "dealerPage": target_url,
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid_input("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::link_not_found("https://x.test/").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::upstream("timeout", "https://x.test/").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_target_url_carried_after_validation() {
        assert_eq!(AppError::invalid_input("bad").target_url(), None);
        assert_eq!(
            AppError::link_not_found("https://a.test/").target_url(),
            Some("https://a.test/")
        );
        assert_eq!(
            AppError::upstream("boom", "https://b.test/").target_url(),
            Some("https://b.test/")
        );
    }

    #[test]
    fn test_link_not_found_display() {
        let err = AppError::link_not_found("https://a.test/");
        assert_eq!(err.to_string(), LINK_NOT_FOUND_MESSAGE);
        assert_eq!(err.kind(), "link_not_found");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::upstream("boom", "https://b.test/").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
