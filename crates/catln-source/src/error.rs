//! Error types for fetching and routing.

use std::path::PathBuf;

use catln_model::ModelError;
use thiserror::Error;

/// Failure to obtain a payload from a [`crate::DocumentSource`].
///
/// Payloads are kept as strings so a failed load can be stored in a
/// [`crate::LoadState`] and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("request for {url} failed with status {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    /// A dump file could not be read.
    #[error("failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// The response body is not JSON.
    #[error("invalid JSON from {origin}: {message}")]
    Json { origin: String, message: String },

    /// The requested path cannot be mapped onto the source.
    #[error("invalid source path '{0}'")]
    InvalidPath(String),
}

/// Reason a load ended in [`crate::LoadState::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The top-level response has more than two elements.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// The background fetch stopped before sending a response.
    #[error("request for '{path}' ended without a response")]
    NoResponse { path: String },
}

/// Failure to interpret a browser path.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("unknown route '{0}'")]
    UnknownRoute(String),

    #[error("empty page id in route '{0}'")]
    EmptyPage(String),

    #[error(transparent)]
    PageId(#[from] ModelError),
}
