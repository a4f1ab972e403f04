//! Crate-level error types.

use std::fmt;

/// Errors produced by the elastic-nav crate.
#[derive(Debug)]
pub enum NavError {
    /// A route key that is not present in the route table.
    RouteNotFound(String),
    /// A fragment fetch completed with a non-success status.
    FetchStatus {
        /// Path that was requested.
        path: String,
        /// HTTP status code returned.
        status: u16,
    },
    /// A fragment fetch failed before a response arrived.
    Network(String),
    /// Generic I/O failure (file-backed fragment sources, config files).
    Io(std::io::Error),
    /// TOML/JSON configuration parsing failure.
    ConfigParse(String),
    /// The configuration parsed but violates a route table invariant.
    InvalidConfig(String),
    /// A DOM or browser API call failed.
    Dom(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RouteNotFound(key) => write!(f, "no route for '{key}'"),
            Self::FetchStatus { path, status } => {
                write!(f, "fetch of {path} returned status {status}")
            }
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(msg) => {
                write!(f, "config parse error: {msg}")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Dom(msg) => write!(f, "DOM error: {msg}"),
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NavError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
