use catln_model::ModelError;
use thiserror::Error;

/// Errors that stop a whole view from rendering.
///
/// Problems with single nodes are reported as diagnostics instead.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The payload does not have the shape the view expects.
    #[error(transparent)]
    Payload(#[from] ModelError),

    /// The requested documentation page is not in the document.
    #[error("unknown page '{page}'")]
    UnknownPage { page: String },

    /// The documentation payload contains no pages at all.
    #[error("the document has no pages")]
    NoPages,

    /// Writing HTML output failed.
    #[error("failed to write HTML: {0}")]
    Html(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
