//! Top-level statements of a documentation page.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::expr::{Expr, Guard, Object};
use crate::tagged::{Unrecognized, decode_contents, scalar_text, split_tagged};
use crate::types::Type;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Statement {
    Decl(Decl),
    /// `class name<vars> = A | B`.
    MultiTypeDef {
        name: String,
        vars: IndexMap<String, Type>,
        options: Vec<Type>,
    },
    /// `data T`.
    TypeDef(Type),
    /// `instance T<vars> of Class`.
    ClassInstance {
        type_name: String,
        vars: IndexMap<String, Type>,
        class_name: String,
    },
    /// `class Name<vars>`.
    ClassDecl {
        name: String,
        vars: IndexMap<String, Type>,
    },
    /// A global annotation such as `#print(...)`.
    GlobalAnnot(Expr),
    /// Markdown prose from a source comment.
    Comment(String),
    Unrecognized(Unrecognized),
}

/// A declaration: `object guard [= expr]` plus nested sub-statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub object: Object,
    pub guard: Guard,
    pub sub_statements: Vec<DeclSubStatement>,
    pub expr: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum DeclSubStatement {
    Decl(Decl),
    Annot(Expr),
    Unrecognized(Unrecognized),
}

impl Decl {
    /// Wire form: `[[_, [object, guard]], subStatements, maybeExpr]`.
    fn decode(tag: &str, contents: Value) -> Result<Self, Unrecognized> {
        let ((_, (object, guard)), sub_statements, expr): (
            (Value, (Object, Guard)),
            Vec<DeclSubStatement>,
            Option<Expr>,
        ) = decode_contents(tag, contents)?;
        Ok(Self {
            object,
            guard,
            sub_statements,
            expr,
        })
    }
}

impl From<Value> for DeclSubStatement {
    fn from(value: Value) -> Self {
        let (tag, contents) = match split_tagged(value) {
            Ok(parts) => parts,
            Err(unrecognized) => return DeclSubStatement::Unrecognized(unrecognized),
        };
        match tag.as_str() {
            "RawDeclSubStatementDecl" => Decl::decode(&tag, contents)
                .map_or_else(DeclSubStatement::Unrecognized, DeclSubStatement::Decl),
            "RawDeclSubStatementAnnot" => DeclSubStatement::Annot(Expr::from(contents)),
            _ => DeclSubStatement::Unrecognized(Unrecognized::unknown_tag(&tag)),
        }
    }
}

impl From<Value> for Statement {
    fn from(value: Value) -> Self {
        let (tag, contents) = match split_tagged(value) {
            Ok(parts) => parts,
            Err(unrecognized) => return Statement::Unrecognized(unrecognized),
        };
        decode_statement(&tag, contents).unwrap_or_else(Statement::Unrecognized)
    }
}

fn decode_statement(tag: &str, contents: Value) -> Result<Statement, Unrecognized> {
    let statement = match tag {
        "RawDeclStatement" => Statement::Decl(Decl::decode(tag, contents)?),
        "MultiTypeDefStatement" => {
            let (name, vars, datas): (Value, IndexMap<String, Type>, Vec<Value>) =
                decode_contents(tag, contents)?;
            let options = datas.into_iter().map(first_type).collect();
            Statement::MultiTypeDef {
                name: scalar_text(&name),
                vars,
                options,
            }
        }
        "TypeDefStatement" => Statement::TypeDef(first_type(contents)),
        "RawClassDefStatement" => {
            let ((type_name, vars), class_name): ((Value, IndexMap<String, Type>), Value) =
                decode_contents(tag, contents)?;
            Statement::ClassInstance {
                type_name: scalar_text(&type_name),
                vars,
                class_name: scalar_text(&class_name),
            }
        }
        "RawClassDeclStatement" => {
            let (name, vars): (Value, IndexMap<String, Type>) = decode_contents(tag, contents)?;
            Statement::ClassDecl {
                name: scalar_text(&name),
                vars,
            }
        }
        "RawGlobalAnnot" => Statement::GlobalAnnot(Expr::from(contents)),
        "RawComment" => match contents {
            Value::String(text) => Statement::Comment(text),
            other => {
                return Err(Unrecognized::malformed(
                    tag,
                    format!("comment is not text: {other}"),
                ));
            }
        },
        _ => return Err(Unrecognized::unknown_tag(tag)),
    };
    Ok(statement)
}

/// Element 0 of a `[type, ...]` tuple, or the value itself when it is not one.
fn first_type(value: Value) -> Type {
    match value {
        Value::Array(mut items) if !items.is_empty() => Type::from(items.remove(0)),
        other => Type::from(other),
    }
}
