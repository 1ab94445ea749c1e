//! Form page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::state::AppState;

/// Template for the form page.
///
/// Renders `templates/index.html`: one identifier input that posts to
/// `/api/scrape` and shows the two variant links or the error message.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Parent host shown next to the input, e.g. `dealer.toyota.com.au`.
    pub dealer_host: String,
}

/// Renders the form page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        dealer_host: state.resolver.template().host().to_string(),
    }
}
