use thiserror::Error;

/// Errors raised while decoding whole documents or identifiers.
///
/// Individual AST nodes never produce these; they decode to `Unrecognized`.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The payload of a view does not have the expected top-level shape.
    #[error("invalid {view} payload: {source}")]
    Payload {
        view: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A percent-encoded page id could not be decoded.
    #[error("invalid page id '{id}': {reason}")]
    InvalidPageId { id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
