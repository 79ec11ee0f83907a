//! Error types
//!
//! One enum for every failure the server distinguishes. Startup code decides
//! which kinds are fatal; request handling turns them into status codes.

use hyper::StatusCode;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while configuring, starting, or serving
#[derive(Debug, Error)]
pub enum ServerError {
    /// Missing or invalid directory, address, or route definition
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Filesystem read/write/create failure
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Listening socket could not be set up
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// No route and no matching static file
    #[error("not found: {0}")]
    NotFound(String),

    /// Resolved static path escapes the web root
    #[error("path traversal rejected: {0}")]
    PathTraversalRejected(String),

    /// Configuration sources could not be read or deserialized
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

impl ServerError {
    /// Wrap an I/O error together with the path it concerns
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// HTTP status a request-scoped error is answered with
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::PathTraversalRejected(_) => StatusCode::NOT_FOUND,
            Self::Io { .. }
            | Self::Configuration(_)
            | Self::Bind { .. }
            | Self::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
