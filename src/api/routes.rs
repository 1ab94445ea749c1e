//! API route configuration.

use crate::api::handlers::scrape_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /scrape` - Resolve a dealer's quote link and campaign variants
pub fn routes() -> Router<AppState> {
    Router::new().route("/scrape", post(scrape_handler))
}
