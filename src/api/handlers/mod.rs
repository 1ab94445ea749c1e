//! HTTP request handlers for API endpoints.

pub mod health;
pub mod scrape;

pub use health::health_handler;
pub use scrape::scrape_handler;
