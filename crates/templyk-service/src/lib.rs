//! Template catalog service for Templyk.
//!
//! Thin, synchronous service layer over the content crate: it locates
//! template files beneath the configured prompt directory and resolves
//! them into validated [`Template`] records. The HTTP layer and any
//! other caller consume these functions directly; there is no shared
//! state and no caching.

pub mod catalog;

// Re-export the service surface at crate root
pub use catalog::{get_template, list_templates, Template};
