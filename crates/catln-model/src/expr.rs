//! Expressions, guards, and object (pattern) heads.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::position::{Meta, Position};
use crate::tagged::{Unrecognized, decode_contents, kind_of, scalar_text, split_tagged};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Expr {
    /// A literal constant.
    CExpr { meta: Meta, constant: Constant },
    /// A literal value (a name).
    Value { meta: Meta, name: String },
    /// `base(args)`.
    TupleApply {
        meta: Meta,
        base: Box<Expr>,
        args: Vec<TupleArg>,
    },
    Paren(Box<Expr>),
    /// `base.m1.m2`.
    Methods { base: Box<Expr>, methods: Vec<Expr> },
    IfThenElse {
        meta: Meta,
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Match {
        meta: Meta,
        subject: Box<Expr>,
        arms: Vec<PatternArm>,
    },
    Case {
        meta: Meta,
        subject: Box<Expr>,
        arms: Vec<PatternArm>,
    },
    Unrecognized(Unrecognized),
}

impl Expr {
    /// The expression's own metadata, if its variant carries one.
    pub fn meta(&self) -> Option<&Meta> {
        match self {
            Expr::CExpr { meta, .. }
            | Expr::Value { meta, .. }
            | Expr::TupleApply { meta, .. }
            | Expr::IfThenElse { meta, .. }
            | Expr::Match { meta, .. }
            | Expr::Case { meta, .. } => Some(meta),
            Expr::Paren(_) | Expr::Methods { .. } | Expr::Unrecognized(_) => None,
        }
    }

    /// Position of the expression's head.
    ///
    /// `Paren` and `Methods` carry no metadata and report the position of
    /// their inner and base expression respectively.
    pub fn position(&self) -> Option<&Position> {
        match self {
            Expr::Paren(inner) => inner.position(),
            Expr::Methods { base, .. } => base.position(),
            other => other.meta().and_then(|meta| meta.position.as_ref()),
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        let (tag, contents) = match split_tagged(value) {
            Ok(parts) => parts,
            Err(unrecognized) => return Expr::Unrecognized(unrecognized),
        };
        decode_expr(&tag, contents).unwrap_or_else(Expr::Unrecognized)
    }
}

fn decode_expr(tag: &str, contents: Value) -> Result<Expr, Unrecognized> {
    let expr = match tag {
        "RawCExpr" => {
            let (meta, constant) = decode_contents(tag, contents)?;
            Expr::CExpr { meta, constant }
        }
        "RawValue" => {
            let (meta, name): (Meta, Value) = decode_contents(tag, contents)?;
            Expr::Value {
                meta,
                name: scalar_text(&name),
            }
        }
        "RawTupleApply" => {
            let (meta, (_base_meta, base), args): (Meta, (Value, Expr), Vec<TupleArg>) =
                decode_contents(tag, contents)?;
            Expr::TupleApply {
                meta,
                base: Box::new(base),
                args,
            }
        }
        "RawParen" => Expr::Paren(Box::new(Expr::from(contents))),
        "RawMethods" => {
            let (base, methods): (Expr, Vec<Expr>) = decode_contents(tag, contents)?;
            Expr::Methods {
                base: Box::new(base),
                methods,
            }
        }
        "RawIfThenElse" => {
            let (meta, cond, then, otherwise): (Meta, Expr, Expr, Expr) =
                decode_contents(tag, contents)?;
            Expr::IfThenElse {
                meta,
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            }
        }
        "RawMatch" => {
            let (meta, subject, arms): (Meta, Expr, Vec<PatternArm>) =
                decode_contents(tag, contents)?;
            Expr::Match {
                meta,
                subject: Box::new(subject),
                arms,
            }
        }
        "RawCase" => {
            let (meta, subject, arms): (Meta, Expr, Vec<PatternArm>) =
                decode_contents(tag, contents)?;
            Expr::Case {
                meta,
                subject: Box::new(subject),
                arms,
            }
        }
        _ => return Err(Unrecognized::unknown_tag(tag)),
    };
    Ok(expr)
}

/// A literal constant, printed through its `contents`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Constant(pub Value);

impl Constant {
    pub fn text(&self) -> String {
        match &self.0 {
            Value::Object(map) => map.get("contents").map(scalar_text).unwrap_or_default(),
            other => scalar_text(other),
        }
    }
}

/// One argument of a tuple application.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum TupleArg {
    Named { name: String, value: Expr },
    Positional(Expr),
    Unrecognized(Unrecognized),
}

impl From<Value> for TupleArg {
    fn from(value: Value) -> Self {
        let (tag, contents) = match split_tagged(value) {
            Ok(parts) => parts,
            Err(unrecognized) => return TupleArg::Unrecognized(unrecognized),
        };
        match tag.as_str() {
            "RawTupleArgNamed" => match decode_contents::<(Value, Expr)>(&tag, contents) {
                Ok((name, value)) => TupleArg::Named {
                    name: scalar_text(&name),
                    value,
                },
                Err(unrecognized) => TupleArg::Unrecognized(unrecognized),
            },
            "RawTupleArgInfer" => TupleArg::Positional(Expr::from(contents)),
            _ => TupleArg::Unrecognized(Unrecognized::unknown_tag(&tag)),
        }
    }
}

/// Condition attached to an object to form a conditional pattern arm.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Guard {
    If(Expr),
    Else,
    None,
    Unrecognized(Unrecognized),
}

impl From<Value> for Guard {
    fn from(value: Value) -> Self {
        let (tag, contents) = match split_tagged(value) {
            Ok(parts) => parts,
            Err(unrecognized) => return Guard::Unrecognized(unrecognized),
        };
        match tag.as_str() {
            "IfGuard" => Guard::If(Expr::from(contents)),
            "ElseGuard" => Guard::Else,
            "NoGuard" => Guard::None,
            _ => Guard::Unrecognized(Unrecognized::unknown_tag(&tag)),
        }
    }
}

/// A binder or pattern head: `name<vars>(args)`.
///
/// Wire form: `[meta, basis, name, {var: meta}, {arg: [meta, ...]}]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Object {
    pub meta: Meta,
    pub basis: String,
    pub name: String,
    pub vars: IndexMap<String, Meta>,
    pub args: IndexMap<String, Meta>,
}

impl TryFrom<Value> for Object {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(format!("object is {}, expected an array", kind_of(&other))),
        };
        let mut items = items.into_iter();
        let (Some(meta), Some(basis), Some(name), Some(vars), Some(args)) = (
            items.next(),
            items.next(),
            items.next(),
            items.next(),
            items.next(),
        ) else {
            return Err("object needs meta, basis, name, vars and args".to_string());
        };
        let vars: IndexMap<String, Meta> =
            serde_json::from_value(vars).map_err(|e| format!("object vars: {e}"))?;
        let args: IndexMap<String, Value> =
            serde_json::from_value(args).map_err(|e| format!("object args: {e}"))?;
        let args = args
            .into_iter()
            .map(|(arg, entry)| {
                let meta = match entry {
                    Value::Array(mut parts) if !parts.is_empty() => Meta::from(parts.remove(0)),
                    other => Meta::from(other),
                };
                (arg, meta)
            })
            .collect();
        Ok(Self {
            meta: Meta::from(meta),
            basis: scalar_text(&basis),
            name: scalar_text(&name),
            vars,
            args,
        })
    }
}

/// A `match`/`case` arm: an object pattern and its guard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(Object, Guard)")]
pub struct PatternArm {
    pub object: Object,
    pub guard: Guard,
}

impl From<(Object, Guard)> for PatternArm {
    fn from((object, guard): (Object, Guard)) -> Self {
        Self { object, guard }
    }
}
