//! The type grammar: `TopType`, `TypeVar`, and `SumType`.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::tagged::{Unrecognized, decode_contents, name_text, split_tagged};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Type {
    /// The unconstrained type.
    Top,
    /// A named type variable.
    Var(String),
    /// Union of partial types, in wire order.
    Sum(Vec<SumPartial>),
    Unrecognized(Unrecognized),
}

/// One labeled alternative of a [`Type::Sum`].
#[derive(Debug, Clone, PartialEq)]
pub struct SumPartial {
    pub name: String,
    pub options: Vec<PartialOption>,
}

/// One shape a partial can take: its generic vars and named args.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(IndexMap<String, Type>, Value, IndexMap<String, Type>)")]
pub struct PartialOption {
    pub vars: IndexMap<String, Type>,
    pub props: Value,
    pub args: IndexMap<String, Type>,
}

impl From<(IndexMap<String, Type>, Value, IndexMap<String, Type>)> for PartialOption {
    fn from((vars, props, args): (IndexMap<String, Type>, Value, IndexMap<String, Type>)) -> Self {
        Self { vars, props, args }
    }
}

impl Type {
    pub fn var(name: impl Into<String>) -> Self {
        Type::Var(name.into())
    }

    /// True when the JSON value carries one of the type grammar's tags.
    pub fn is_type_node(value: &Value) -> bool {
        matches!(
            value.get("tag").and_then(Value::as_str),
            Some("TopType" | "TypeVar" | "SumType")
        )
    }
}

impl From<Value> for Type {
    fn from(value: Value) -> Self {
        let (tag, contents) = match split_tagged(value) {
            Ok(parts) => parts,
            Err(unrecognized) => return Type::Unrecognized(unrecognized),
        };
        match tag.as_str() {
            "TopType" => Type::Top,
            "TypeVar" => match name_text(&contents) {
                Some(name) => Type::Var(name),
                None => Type::Unrecognized(Unrecognized::malformed(
                    &tag,
                    format!("type variable has no name: {contents}"),
                )),
            },
            "SumType" => decode_sum(&tag, contents),
            _ => Type::Unrecognized(Unrecognized::unknown_tag(&tag)),
        }
    }
}

fn decode_sum(tag: &str, contents: Value) -> Type {
    let entries: Vec<(Value, Vec<PartialOption>)> = match decode_contents(tag, contents) {
        Ok(entries) => entries,
        Err(unrecognized) => return Type::Unrecognized(unrecognized),
    };
    let mut partials = Vec::with_capacity(entries.len());
    for (name, options) in entries {
        let Some(name) = name_text(&name) else {
            return Type::Unrecognized(Unrecognized::malformed(
                tag,
                format!("partial has no name: {name}"),
            ));
        };
        partials.push(SumPartial { name, options });
    }
    Type::Sum(partials)
}
