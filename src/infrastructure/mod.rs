//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`page_source`] - HTTP and headless-browser page loading

pub mod page_source;

pub use page_source::{FetchBackend, HttpPageSource, build_page_source};
#[cfg(feature = "browser")]
pub use page_source::BrowserPageSource;
