//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations: they validate input, call the
//! page source through its trait, and apply the domain rules to the result.
//!
//! # Available Services
//!
//! - [`services::link_resolver::LinkResolver`] - identifier to campaign links

pub mod services;
