//! Web layer for the browser-based form.
//!
//! Serves a single server-rendered page that submits the identifier to the
//! API. Uses Askama templates.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Route configuration

pub mod handlers;
pub mod routes;
