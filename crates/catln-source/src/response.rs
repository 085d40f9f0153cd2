//! Decoding of the `[data, notes]` response envelope.

use catln_model::kind_of;
use serde_json::Value;
use tracing::warn;

use crate::error::LoadError;

/// A successfully decoded response.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    /// The view payload, absent when the server only sent notes.
    pub data: Option<Value>,
    /// Compiler notes shown below the view.
    pub notes: Value,
}

impl Loaded {
    fn empty() -> Self {
        Self {
            data: None,
            notes: Value::Null,
        }
    }
}

/// Splits a server response into its payload and notes.
///
/// `[data, notes]` carries a payload and `[notes]` carries only notes. An
/// empty array or a value that is not an array is ready with neither. Three
/// or more elements are malformed.
pub fn decode_response(response: Value) -> Result<Loaded, LoadError> {
    let items = match response {
        Value::Array(items) => items,
        other => {
            warn!(kind = kind_of(&other), "response is not an array, showing no data");
            return Ok(Loaded::empty());
        }
    };

    match <[Value; 2]>::try_from(items) {
        Ok([data, notes]) => Ok(Loaded {
            data: Some(data),
            notes,
        }),
        Err(items) => match <[Value; 1]>::try_from(items) {
            Ok([notes]) => Ok(Loaded { data: None, notes }),
            Err(items) if items.is_empty() => Ok(Loaded::empty()),
            Err(items) => Err(LoadError::MalformedResponse {
                reason: format!("expected at most 2 elements, found {}", items.len()),
            }),
        },
    }
}
