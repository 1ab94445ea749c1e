//! HTML template rendering handlers for the web form.

mod index;

pub use index::{IndexTemplate, index_handler};
