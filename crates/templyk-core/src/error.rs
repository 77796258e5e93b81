//! Error types for Templyk.

use thiserror::Error;

/// Result type alias for Templyk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the Templyk crates.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Frontmatter does not match the template schema.
    #[error("Schema error: key `{key}`: {message}")]
    Schema {
        /// The offending frontmatter key.
        key: String,
        /// What went wrong with it.
        message: String,
    },

    /// Input the parsing pipeline cannot tolerate.
    #[error("Parse error: {message}")]
    Parse {
        /// What could not be parsed.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic.
        message: String,
    },

    /// A template could not be located.
    #[error("Template not found: {path}")]
    TemplateNotFound {
        /// Path or reference that did not resolve.
        path: String,
    },

    /// Feature gap that is explicit rather than silently degraded.
    #[error("Not yet implemented: {0}")]
    NotImplemented(&'static str),

    /// I/O error (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns whether the caller can correct this error by fixing
    /// the request.
    ///
    /// Caller errors map to 4xx responses at the HTTP boundary; the
    /// rest map to 5xx.
    pub fn is_caller_error(&self) -> bool {
        match self {
            Error::Schema { .. } => true,
            Error::Parse { .. } => true,
            Error::TemplateNotFound { .. } => true,
            Error::Config { .. } => false,
            Error::NotImplemented(_) => false,
            Error::Io(_) => false,
        }
    }

    /// Creates a new schema error naming the offending key.
    pub fn schema<K, M>(key: K, message: M) -> Self
    where
        K: Into<String>,
        M: Into<String>,
    {
        Error::Schema {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new template-not-found error.
    pub fn not_found<S: Into<String>>(path: S) -> Self {
        Error::TemplateNotFound { path: path.into() }
    }
}
