//! Domain layer: the values a resolution works with and the rules applied to them.
//!
//! Nothing here performs I/O. The one outbound dependency, loading the dealer
//! page, is described by the [`page_source::PageSource`] trait and implemented in
//! [`crate::infrastructure`].
//!
//! # Modules
//!
//! - [`identifier`] - dealer slug validation
//! - [`target_page`] - dealer page URL template
//! - [`quote_link`] - ordered selector rules and link extraction
//! - [`variant`] - campaign rewriting of the quote link
//! - [`page_source`] - page loading trait and its error type

pub mod identifier;
pub mod page_source;
pub mod quote_link;
pub mod target_page;
pub mod variant;

pub use identifier::Identifier;
pub use page_source::{FetchError, PageSource};
pub use target_page::TargetTemplate;
pub use variant::Campaign;
