//! Markdown parsing, frontmatter validation, and the templatify
//! transform.
//!
//! This crate holds the whole parse → rewrite → render pipeline that
//! turns a finished markdown document into a reusable template
//! skeleton. It performs no I/O: callers hand it text and options and
//! get text back, so concurrent invocations are fully independent.
//!
//! # Modules
//!
//! - [`markdown`]: node model, parser adapter, renderer, frontmatter
//! - [`templatify`]: the rewrite engine and entry point
//!
//! # Example
//!
//! ```rust
//! use templyk_content::{templatify, TemplatifyOptions, TokenStyle};
//!
//! let options = TemplatifyOptions {
//!     token_style: TokenStyle::Curly,
//!     ..TemplatifyOptions::default()
//! };
//! let out = templatify("# Notes\n\nSome prose.\n", &options).unwrap();
//! assert_eq!(out, "# Notes\n\n{{Paragraph 1}}\n");
//! ```

pub mod markdown;
pub mod templatify;

// Re-export commonly used types
pub use markdown::{
    extract_frontmatter, parse_document, render, validate_frontmatter, FrontmatterSplit, Node,
    TemplateFrontmatter,
};
pub use templatify::{templatify, TemplatifyOptions, TokenStyle, Verbosity};
