//! Whole payloads served by the compiler: documentation, program dumps,
//! constraint traces, and LLVM output.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::expr::{Expr, Guard, Object};
use crate::position::{Meta, Position};
use crate::statement::Statement;
use crate::tagged::{Unrecognized, kind_of, split_tagged};
use crate::value::Val;

/// Decodes the `data` of a ready response as the payload of `view`.
pub fn decode_payload<T: DeserializeOwned>(view: &'static str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| ModelError::Payload { view, source })
}

/// The documentation payload: `[pages, annotations]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(Vec<Page>, Vec<Annotation>)")]
pub struct Document {
    pub pages: Vec<Page>,
    pub annotations: Vec<Annotation>,
}

impl From<(Vec<Page>, Vec<Annotation>)> for Document {
    fn from((pages, annotations): (Vec<Page>, Vec<Annotation>)) -> Self {
        Self { pages, annotations }
    }
}

impl Document {
    pub fn page(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.name == name)
    }

    /// The page shown when none is selected: the last one served.
    pub fn default_page(&self) -> Option<&Page> {
        self.pages.last()
    }

    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.name.as_str())
    }
}

/// One documentation page: `[[meta, statements], name, deps]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "((Meta, Vec<Statement>), String, Value)")]
pub struct Page {
    pub name: String,
    pub meta: Meta,
    pub statements: Vec<Statement>,
    pub deps: Value,
}

impl From<((Meta, Vec<Statement>), String, Value)> for Page {
    fn from(((meta, statements), name, deps): ((Meta, Vec<Statement>), String, Value)) -> Self {
        Self {
            name,
            meta,
            statements,
            deps,
        }
    }
}

/// A computed value keyed by the position of the expression it annotates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(Expr, Val)")]
pub struct Annotation {
    pub expr: Expr,
    pub value: Val,
}

impl From<(Expr, Val)> for Annotation {
    fn from((expr, value): (Expr, Val)) -> Self {
        Self { expr, value }
    }
}

impl Annotation {
    pub fn position(&self) -> Option<&Position> {
        self.expr.position()
    }
}

/// A typechecked or desugared program: `[objects, ...]`.
///
/// Elements after the object list (class graph, annotations) are kept
/// undecoded in `extra`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Value>")]
pub struct ProgramDump {
    pub entries: Vec<ProgramEntry>,
    pub extra: Vec<Value>,
}

impl TryFrom<Vec<Value>> for ProgramDump {
    type Error = String;

    fn try_from(items: Vec<Value>) -> std::result::Result<Self, Self::Error> {
        let mut items = items.into_iter();
        let objects = match items.next() {
            Some(Value::Array(objects)) => objects,
            Some(other) => {
                return Err(format!("object list is {}, expected an array", kind_of(&other)));
            }
            None => return Err("program dump has no object list".to_string()),
        };
        Ok(Self {
            entries: objects.into_iter().map(ProgramEntry::from).collect(),
            extra: items.collect(),
        })
    }
}

/// One object of a program dump with its arrows: `[Object, [Arrow]]`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramEntry {
    Object { object: Object, arrows: Vec<Arrow> },
    Unrecognized(Unrecognized),
}

impl From<Value> for ProgramEntry {
    fn from(value: Value) -> Self {
        match serde_json::from_value::<(Object, Vec<Arrow>)>(value) {
            Ok((object, arrows)) => ProgramEntry::Object { object, arrows },
            Err(e) => ProgramEntry::Unrecognized(Unrecognized::untagged(format!(
                "program entry: {e}"
            ))),
        }
    }
}

/// One implementation of an object: `[meta, guard, [annotation], maybeExpr]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(Meta, Guard, Vec<Expr>, Option<Expr>)")]
pub struct Arrow {
    pub meta: Meta,
    pub guard: Guard,
    pub annotations: Vec<Expr>,
    pub expr: Option<Expr>,
}

impl From<(Meta, Guard, Vec<Expr>, Option<Expr>)> for Arrow {
    fn from((meta, guard, annotations, expr): (Meta, Guard, Vec<Expr>, Option<Expr>)) -> Self {
        Self {
            meta,
            guard,
            annotations,
            expr,
        }
    }
}

/// Solver steps of the constraint trace, each a list of constraints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ConstraintTrace {
    pub steps: Vec<Vec<Constraint>>,
}

/// A single solver constraint: `{"tag": name, "contents": operands}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Constraint {
    Tagged { name: String, operands: Vec<Value> },
    Unrecognized(Unrecognized),
}

impl From<Value> for Constraint {
    fn from(value: Value) -> Self {
        match split_tagged(value) {
            Ok((name, contents)) => {
                let operands = match contents {
                    Value::Array(operands) => operands,
                    Value::Null => Vec::new(),
                    single => vec![single],
                };
                Constraint::Tagged { name, operands }
            }
            Err(unrecognized) => Constraint::Unrecognized(unrecognized),
        }
    }
}

/// Generated LLVM code, one or more modules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct LlvmDump {
    pub modules: Vec<LlvmModule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlvmModule {
    pub name: String,
    pub code: String,
}

impl LlvmModule {
    /// Name to dispatch the module on, always ending in `.ll`.
    pub fn file_name(&self) -> String {
        if self.name.ends_with(".ll") {
            self.name.clone()
        } else {
            format!("{}.ll", self.name)
        }
    }
}

impl LlvmDump {
    /// Module name used when the dump is a single string.
    pub const SINGLE_MODULE: &'static str = "main.ll";
}

impl TryFrom<Value> for LlvmDump {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        let modules = match value {
            Value::String(code) => vec![LlvmModule {
                name: Self::SINGLE_MODULE.to_string(),
                code,
            }],
            Value::Object(files) => {
                let mut modules = Vec::with_capacity(files.len());
                for (name, code) in files {
                    let Value::String(code) = code else {
                        return Err(format!("module '{name}' is not text"));
                    };
                    modules.push(LlvmModule { name, code });
                }
                modules
            }
            other => {
                return Err(format!(
                    "llvm output is {}, expected text or a file map",
                    kind_of(&other)
                ));
            }
        };
        Ok(Self { modules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(line: u64) -> Value {
        json!([{"tag": "TopType"}, ["main.ct", [line, 1]]])
    }

    #[test]
    fn document_keeps_page_order() {
        let doc: Document = decode_payload(
            "docs",
            json!([
                [
                    [[meta(1), []], "std/list.ct", []],
                    [[meta(1), [{"tag": "RawComment", "contents": "# Hi"}]], "main.ct", ["std/list.ct"]]
                ],
                []
            ]),
        )
        .unwrap();
        assert_eq!(doc.page_names().collect::<Vec<_>>(), ["std/list.ct", "main.ct"]);
        assert_eq!(doc.default_page().map(|p| p.name.as_str()), Some("main.ct"));
        assert_eq!(doc.page("main.ct").unwrap().statements.len(), 1);
        assert!(doc.page("missing.ct").is_none());
    }

    #[test]
    fn document_with_wrong_shape_is_payload_error() {
        let err = decode_payload::<Document>("docs", json!({"pages": []})).unwrap_err();
        assert!(matches!(err, ModelError::Payload { view: "docs", .. }));
    }

    #[test]
    fn annotation_position_comes_from_expression_meta() {
        let annotation: Annotation = serde_json::from_value(json!([
            {"tag": "RawValue", "contents": [meta(7), "#print"]},
            {"tag": "StrVal", "contents": "hello"}
        ]))
        .unwrap();
        assert_eq!(annotation.position(), Some(&Position::new(json!(["main.ct", [7, 1]]))));
        assert_eq!(annotation.value, Val::Str("hello".to_string()));
    }

    #[test]
    fn program_dump_isolates_bad_entries() {
        let dump: ProgramDump = decode_payload(
            "typecheck",
            json!([
                [
                    [[meta(1), "FunctionObj", "id", {}, {"x": [meta(1)]}], [
                        [meta(2), {"tag": "NoGuard"}, [], {"tag": "RawValue", "contents": [meta(2), "x"]}]
                    ]],
                    "garbage"
                ],
                {"classes": []}
            ]),
        )
        .unwrap();
        assert_eq!(dump.entries.len(), 2);
        assert!(matches!(
            dump.entries[0],
            ProgramEntry::Object { ref object, ref arrows } if object.name == "id" && arrows.len() == 1
        ));
        assert!(matches!(dump.entries[1], ProgramEntry::Unrecognized(_)));
        assert_eq!(dump.extra, vec![json!({"classes": []})]);
    }

    #[test]
    fn constraint_operands_normalize() {
        let trace: ConstraintTrace = serde_json::from_value(json!([
            [{"tag": "EqualsKnown", "contents": [1, {"tag": "TopType"}]}, {"tag": "Done"}],
            [{"tag": "BoundedBy", "contents": 4}, 9]
        ]))
        .unwrap();
        assert_eq!(trace.steps.len(), 2);
        assert!(matches!(trace.steps[0][0], Constraint::Tagged { ref operands, .. } if operands.len() == 2));
        assert!(matches!(trace.steps[0][1], Constraint::Tagged { ref operands, .. } if operands.is_empty()));
        assert!(matches!(trace.steps[1][0], Constraint::Tagged { ref operands, .. } if operands == &vec![json!(4)]));
        assert!(matches!(trace.steps[1][1], Constraint::Unrecognized(_)));
    }

    #[test]
    fn llvm_dump_accepts_text_or_file_map() {
        let single: LlvmDump = serde_json::from_value(json!("define i32 @main()")).unwrap();
        assert_eq!(single.modules[0].file_name(), "main.ll");

        let many: LlvmDump =
            serde_json::from_value(json!({"b.ll": "b", "a": "a"})).unwrap();
        let names: Vec<String> = many.modules.iter().map(LlvmModule::file_name).collect();
        assert_eq!(names, ["b.ll", "a.ll"]);

        assert!(serde_json::from_value::<LlvmDump>(json!(3)).is_err());
    }
}
