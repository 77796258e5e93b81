//! # templyk-api
//!
//! HTTP API server for the Templyk template workshop.
//!
//! This crate provides the HTTP surface over the catalog service and
//! the templatify transform:
//! - RESTful endpoints for the templates collection
//! - A generate endpoint forwarding raw markdown to `templatify`
//! - Request validation and error-to-status mapping

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod routes;
pub mod server;

pub use error::{Error, Result};
pub use server::{app, AppState, Server};
