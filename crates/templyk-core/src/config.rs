//! Environment-driven configuration.
//!
//! Templyk reads its configuration from `TEMPLYK_*` environment variables:
//!
//! - `TEMPLYK_ENV`: `dev` (default), `prod`, or `test`
//! - `TEMPLYK_MODE`: `local` (default) or `server`
//! - `TEMPLYK_PROMPT_DIR`: root directory of the template catalog
//!   (local mode only; supports `~` expansion)
//!
//! # Example
//!
//! ```rust
//! use templyk_core::config::{Config, Mode};
//!
//! let config = Config::from_vars(|key| match key {
//!     "TEMPLYK_MODE" => Some("local".to_string()),
//!     "TEMPLYK_PROMPT_DIR" => Some("/prompts".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.mode, Mode::Local);
//! assert_eq!(config.prompt_dir.unwrap().to_str(), Some("/prompts"));
//! ```

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable prefix for all Templyk settings.
pub const ENV_PREFIX: &str = "TEMPLYK";

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    /// Local development (default).
    #[default]
    Dev,
    /// Production deployment.
    Prod,
    /// Test runs.
    Test,
}

/// Where templates are sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Templates live on the local filesystem (default).
    #[default]
    Local,
    /// Templates are served remotely. Listing in this mode is an
    /// explicit feature gap, surfaced as `Error::NotImplemented`.
    Server,
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dev => write!(f, "dev"),
            Self::Prod => write!(f, "prod"),
            Self::Test => write!(f, "test"),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Server => write!(f, "server"),
        }
    }
}

/// Runtime configuration for the Templyk services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Deployment environment.
    #[serde(default)]
    pub env: Env,
    /// Template sourcing mode.
    #[serde(default)]
    pub mode: Mode,
    /// Root of the template catalog (local mode).
    #[serde(default)]
    pub prompt_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass closures over fixed maps so
    /// they never have to mutate process-global state.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup(&var_name("ENV")).as_deref() {
            None | Some("") => Env::default(),
            Some("dev") => Env::Dev,
            Some("prod") => Env::Prod,
            Some("test") => Env::Test,
            Some(other) => {
                return Err(Error::config(format!(
                    "unrecognized {} value `{other}` (expected dev, prod, or test)",
                    var_name("ENV")
                )));
            }
        };

        let mode = match lookup(&var_name("MODE")).as_deref() {
            None | Some("") => Mode::default(),
            Some("local") => Mode::Local,
            Some("server") => Mode::Server,
            Some(other) => {
                return Err(Error::config(format!(
                    "unrecognized {} value `{other}` (expected local or server)",
                    var_name("MODE")
                )));
            }
        };

        let prompt_dir = lookup(&var_name("PROMPT_DIR"))
            .filter(|v| !v.is_empty())
            .map(|v| PathBuf::from(shellexpand::tilde(&v).into_owned()));

        Ok(Self {
            env,
            mode,
            prompt_dir,
        })
    }

    /// Local-mode configuration rooted at the given prompt directory.
    pub fn local(prompt_dir: impl Into<PathBuf>) -> Self {
        Self {
            env: Env::default(),
            mode: Mode::Local,
            prompt_dir: Some(prompt_dir.into()),
        }
    }

    /// Server-mode configuration.
    pub fn server() -> Self {
        Self {
            env: Env::default(),
            mode: Mode::Server,
            prompt_dir: None,
        }
    }

    /// Returns `true` when templates are sourced remotely.
    pub fn is_server(&self) -> bool {
        self.mode == Mode::Server
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: Env::default(),
            mode: Mode::default(),
            prompt_dir: None,
        }
    }
}

fn var_name(suffix: &str) -> String {
    format!("{ENV_PREFIX}_{suffix}")
}
