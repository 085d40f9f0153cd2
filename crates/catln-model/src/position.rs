//! Source positions, their lookup keys, and node metadata.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::tagged::Unrecognized;
use crate::types::Type;

/// An opaque source location.
///
/// Positions are only ever compared through their [`PositionKey`]; the
/// encoding is never interpreted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Position(Value);

impl Position {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Canonical key: compact JSON with object keys sorted.
    pub fn key(&self) -> PositionKey {
        let mut out = String::new();
        write_canonical(&self.0, &mut out);
        PositionKey(out)
    }
}

/// Canonical, comparable form of a [`Position`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey(String);

impl PositionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (index, (key, item)) in entries.into_iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Metadata attached to objects, arguments, and expressions.
///
/// On the wire this is an array: element 0 is the node's type, element 1
/// its position. Remaining elements are kept in `raw` only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct Meta {
    pub tp: Type,
    pub position: Option<Position>,
    pub raw: Value,
}

impl From<Value> for Meta {
    fn from(value: Value) -> Self {
        let (tp, position) = match &value {
            Value::Array(items) => {
                let tp = items
                    .first()
                    .cloned()
                    .map_or(Type::Top, Type::from);
                let position = items
                    .get(1)
                    .filter(|position| !position.is_null())
                    .cloned()
                    .map(Position::new);
                (tp, position)
            }
            other => (
                Type::Unrecognized(Unrecognized::untagged(format!(
                    "meta is {}, expected an array",
                    crate::tagged::kind_of(other)
                ))),
                None,
            ),
        };
        Self {
            tp,
            position,
            raw: value,
        }
    }
}
