//! Helpers for the `{"tag", "contents"}` wire encoding.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A node whose tag is unknown or whose contents do not match its tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Unrecognized {
    /// The tag found on the node, if it had one.
    pub tag: Option<String>,
    /// Why the node could not be decoded.
    pub reason: String,
}

impl Unrecognized {
    pub fn unknown_tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            reason: format!("unknown tag '{tag}'"),
        }
    }

    pub fn malformed(tag: &str, reason: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.to_string()),
            reason: reason.into(),
        }
    }

    pub fn untagged(reason: impl Into<String>) -> Self {
        Self {
            tag: None,
            reason: reason.into(),
        }
    }

    /// True when the node carried a tag this model does not know about.
    pub fn is_unknown_tag(&self) -> bool {
        self.reason.starts_with("unknown tag")
    }
}

impl fmt::Display for Unrecognized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{tag}: {}", self.reason),
            None => write!(f, "{}", self.reason),
        }
    }
}

/// Splits a tagged node into its tag and contents.
///
/// Nullary variants may omit `contents`; they come back as `Value::Null`.
pub(crate) fn split_tagged(value: Value) -> Result<(String, Value), Unrecognized> {
    split_tagged_fields(value).map(|(tag, contents, _)| (tag, contents))
}

/// Like [`split_tagged`], also returning the fields beside `tag` and
/// `contents`.
pub(crate) fn split_tagged_fields(
    value: Value,
) -> Result<(String, Value, Map<String, Value>), Unrecognized> {
    match value {
        Value::Object(mut map) => {
            let tag = match map.remove("tag") {
                Some(Value::String(tag)) => tag,
                Some(other) => {
                    return Err(Unrecognized::untagged(format!(
                        "tag is not a string: {other}"
                    )));
                }
                None => return Err(Unrecognized::untagged("node has no tag")),
            };
            let contents = map.remove("contents").unwrap_or(Value::Null);
            Ok((tag, contents, map))
        }
        other => Err(Unrecognized::untagged(format!(
            "expected a tagged object, found {}",
            kind_of(&other)
        ))),
    }
}

/// Decodes the contents of a known tag, mapping failures to `Unrecognized`.
pub(crate) fn decode_contents<T: DeserializeOwned>(
    tag: &str,
    contents: Value,
) -> Result<T, Unrecognized> {
    serde_json::from_value(contents).map_err(|e| Unrecognized::malformed(tag, e.to_string()))
}

/// Reads a display name that is either a bare string or `{"contents": name}`.
pub(crate) fn name_text(value: &Value) -> Option<String> {
    match value {
        Value::String(name) => Some(name.clone()),
        Value::Object(map) => map.get("contents").and_then(name_text),
        _ => None,
    }
}

/// Textual form of a scalar JSON value the way the dumps print them.
///
/// Strings are shown without quotes, `null` as nothing, everything else as
/// compact JSON.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Short description of a JSON value's kind for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_tagged_defaults_missing_contents() {
        let (tag, contents) = split_tagged(json!({"tag": "NoGuard"})).unwrap();
        assert_eq!(tag, "NoGuard");
        assert_eq!(contents, Value::Null);
    }

    #[test]
    fn split_tagged_rejects_untagged_values() {
        let err = split_tagged(json!([1, 2])).unwrap_err();
        assert_eq!(err.tag, None);
        assert!(err.reason.contains("an array"));
    }

    #[test]
    fn split_tagged_fields_keeps_extra_fields() {
        let (tag, contents, rest) =
            split_tagged_fields(json!({"tag": "TupleVal", "name": "T", "args": {}})).unwrap();
        assert_eq!(tag, "TupleVal");
        assert_eq!(contents, Value::Null);
        assert_eq!(rest.get("name"), Some(&json!("T")));
        assert!(rest.contains_key("args"));
    }

    #[test]
    fn name_text_reads_nested_contents() {
        assert_eq!(name_text(&json!("Int")), Some("Int".to_string()));
        assert_eq!(
            name_text(&json!({"tag": "TVVar", "contents": "Int"})),
            Some("Int".to_string())
        );
        assert_eq!(name_text(&json!(3)), None);
    }

    #[test]
    fn scalar_text_matches_dump_printing() {
        assert_eq!(scalar_text(&json!("x")), "x");
        assert_eq!(scalar_text(&json!(42)), "42");
        assert_eq!(scalar_text(&json!(1.5)), "1.5");
        assert_eq!(scalar_text(&Value::Null), "");
    }
}
