//! Handler for the quote link endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::debug;
use validator::Validate;

use crate::api::dto::scrape::{ScrapeRequest, ScrapeResponse};
use crate::error::{AppError, INVALID_IDENTIFIER_MESSAGE};
use crate::state::AppState;

/// Resolves a dealer's insurance quote link and its campaign variants.
///
/// # Endpoint
///
/// `POST /api/scrape`
///
/// # Request Body
///
/// ```json
/// { "baseDomain": "dubbocitytoyota" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "sourceUrl": "https://insurance.toyota.com.au/quote/quote-new?utm_campaign=x&utm_term=y",
///   "serviceUrl": "https://insurance.toyota.com.au/quote/quote-new?utm_campaign=service_LP",
///   "partsUrl": "https://insurance.toyota.com.au/quote/quote-new?utm_campaign=parts_LP",
///   "dealerPage": "https://dubbocitytoyota.dealer.toyota.com.au/finance/car-insurance?src=menunavigation"
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: body is not JSON, `baseDomain` is missing or fails
///   validation; no fetch is attempted
/// - **404 Not Found**: page loaded but no quote link; body carries `sourceUrl`
/// - **500 Internal Server Error**: page could not be loaded; body carries `dealerPage`
pub async fn scrape_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!("Rejected scrape body: {}", rejection);
        AppError::invalid_input(INVALID_IDENTIFIER_MESSAGE)
    })?;

    payload.validate()?;

    let base_domain = payload.base_domain.unwrap_or_default();

    let resolution = state.resolver.resolve(&base_domain).await?;

    Ok(Json(resolution.into()))
}
