mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::{QUOTE_PAGE, StubPageSource};
use dealer_quote_links::api::handlers::health_handler;
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint() {
    let state = common::create_test_state(Arc::new(StubPageSource::html(QUOTE_PAGE)));
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["backend"], "stub");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
