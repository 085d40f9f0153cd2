//! Computed values attached to annotations.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::tagged::{Unrecognized, kind_of, split_tagged_fields};

/// Name of the annotation whose result is shown below the statement.
pub const PRINT_ANNOTATION: &str = "#print";

/// Argument of a print annotation that holds the printed value.
pub const PRINT_ARG: &str = "p";

/// Tuple name of a compiled artifact (`name` + `contents`).
pub const RESULT_TUPLE: &str = "CatlnResult";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Val {
    /// A named tuple: `{"tag": "TupleVal", "name": ..., "args": {...}}`.
    Tuple {
        name: String,
        args: IndexMap<String, Val>,
    },
    Str(String),
    Int(i64),
    Float(f64),
    NoVal,
    Unrecognized(Unrecognized),
}

/// A file produced by the compiler, e.g. `out.ll` with its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

impl Val {
    /// Name of a tuple value.
    pub fn tuple_name(&self) -> Option<&str> {
        match self {
            Val::Tuple { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn arg(&self, name: &str) -> Option<&Val> {
        match self {
            Val::Tuple { args, .. } => args.get(name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Val::Str(text) => Some(text),
            _ => None,
        }
    }

    /// The artifact carried by a `CatlnResult` tuple.
    pub fn artifact(&self) -> Option<Artifact> {
        if self.tuple_name() != Some(RESULT_TUPLE) {
            return None;
        }
        let name = self.arg("name")?.as_str()?;
        let contents = self.arg("contents")?.as_str()?;
        Some(Artifact::new(name, contents))
    }
}

impl From<Value> for Val {
    fn from(value: Value) -> Self {
        let (tag, contents, mut map) = match split_tagged_fields(value) {
            Ok(parts) => parts,
            Err(unrecognized) => return Val::Unrecognized(unrecognized),
        };
        match tag.as_str() {
            "TupleVal" => {
                let name = match map.remove("name") {
                    Some(Value::String(name)) => name,
                    _ => return Val::Unrecognized(Unrecognized::malformed(&tag, "tuple has no name")),
                };
                let args = match map.remove("args") {
                    Some(args) => match serde_json::from_value(args) {
                        Ok(args) => args,
                        Err(e) => {
                            return Val::Unrecognized(Unrecognized::malformed(&tag, e.to_string()));
                        }
                    },
                    None => IndexMap::new(),
                };
                Val::Tuple { name, args }
            }
            "StrVal" => match contents {
                Value::String(text) => Val::Str(text),
                other => Val::Unrecognized(Unrecognized::malformed(
                    &tag,
                    format!("expected text, found {}", kind_of(&other)),
                )),
            },
            "IntVal" => match contents.as_i64() {
                Some(number) => Val::Int(number),
                None => Val::Unrecognized(Unrecognized::malformed(&tag, "expected an integer")),
            },
            "FloatVal" => match contents.as_f64() {
                Some(number) => Val::Float(number),
                None => Val::Unrecognized(Unrecognized::malformed(&tag, "expected a number")),
            },
            "NoVal" => Val::NoVal,
            _ => Val::Unrecognized(Unrecognized::unknown_tag(&tag)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(name: &str, contents: &str) -> Value {
        json!({
            "tag": "TupleVal",
            "name": "CatlnResult",
            "args": {
                "name": {"tag": "StrVal", "contents": name},
                "contents": {"tag": "StrVal", "contents": contents}
            }
        })
    }

    #[test]
    fn decodes_print_tuple_with_nested_result() {
        let val = Val::from(json!({
            "tag": "TupleVal",
            "name": "#print",
            "args": {"p": result("out.ll", "ret i32 0")}
        }));
        assert_eq!(val.tuple_name(), Some(PRINT_ANNOTATION));
        let artifact = val.arg(PRINT_ARG).and_then(Val::artifact).unwrap();
        assert_eq!(artifact, Artifact::new("out.ll", "ret i32 0"));
    }

    #[test]
    fn artifact_requires_result_tuple() {
        let val = Val::from(json!({"tag": "TupleVal", "name": "Other", "args": {}}));
        assert_eq!(val.artifact(), None);
    }

    #[test]
    fn scalar_values_decode() {
        assert_eq!(Val::from(json!({"tag": "IntVal", "contents": 4})), Val::Int(4));
        assert_eq!(Val::from(json!({"tag": "FloatVal", "contents": 0.5})), Val::Float(0.5));
        assert_eq!(Val::from(json!({"tag": "NoVal"})), Val::NoVal);
    }

    #[test]
    fn untagged_value_is_unrecognized() {
        let val = Val::from(json!([1, 2]));
        assert!(matches!(val, Val::Unrecognized(ref u) if u.tag.is_none()));
        let val = Val::from(json!({"contents": 1}));
        assert!(matches!(val, Val::Unrecognized(ref u) if u.reason == "node has no tag"));
    }

    #[test]
    fn unknown_value_tag_is_unrecognized() {
        let val = Val::from(json!({"tag": "IOVal", "contents": 1}));
        assert!(matches!(val, Val::Unrecognized(ref u) if u.is_unknown_tag()));
    }
}
