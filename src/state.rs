//! Shared application state injected into handlers.

use crate::application::services::LinkResolver;
use std::sync::Arc;

/// State shared by all handlers.
///
/// Cheap to clone; the resolver is immutable after startup, so requests share
/// it without coordination.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<LinkResolver>,
}

impl AppState {
    pub fn new(resolver: LinkResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}
