//! # Dealer Quote Links
//!
//! Resolves a Toyota dealer's insurance quote link and derives the two
//! campaign-tagged variants used on service and parts landing pages.
//!
//! Given a dealer slug such as `dubbocitytoyota`, the service loads
//! `https://dubbocitytoyota.dealer.toyota.com.au/finance/car-insurance?src=menunavigation`,
//! finds the "Get a Quote" link with an ordered list of selector rules, and
//! rewrites its `utm_campaign` to `service_LP` and `parts_LP` with `utm_term`
//! removed.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Identifier, URL template, selector rules, variants
//! - **Application Layer** ([`application`]) - The [`LinkResolver`](application::services::LinkResolver)
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP and headless-browser page sources
//! - **API Layer** ([`api`]) - `POST /api/scrape`, DTOs, and middleware
//! - **Web Layer** ([`web`]) - HTML form page
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run
//! curl -X POST localhost:3000/api/scrape \
//!      -H 'content-type: application/json' \
//!      -d '{"baseDomain":"dubbocitytoyota"}'
//!
//! # Or without the server
//! cargo run --bin cli -- resolve dubbocitytoyota
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkResolver, Resolution};
    pub use crate::domain::{Campaign, FetchError, Identifier, PageSource, TargetTemplate};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
