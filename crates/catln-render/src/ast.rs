//! Rendering of the four AST grammars: types, objects, expressions, and
//! statements.
//!
//! Rendering is total. Nodes that failed to decode, or whose values cannot be
//! shown, become [`RenderedNode::Empty`] and leave a [`Diagnostic`] behind;
//! their siblings and ancestors render normally.
//!
//! [`Diagnostic`]: crate::diagnostics::Diagnostic

use catln_model::{
    Decl, DeclSubStatement, Expr, Guard, Meta, Object, PRINT_ANNOTATION, PRINT_ARG,
    PartialOption, PatternArm, RESULT_TUPLE, Statement, TupleArg, Type, Val,
};
use indexmap::IndexMap;

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::index::PositionIndex;
use crate::meta::{MetaRenderer, RawMeta, TypeMeta};
use crate::node::RenderedNode;
use crate::result_view::render_result;

/// Literal shown for the unconstrained type.
pub const TOP_TYPE: &str = "TopType";

/// Options shared by every view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show metas as received instead of as types.
    pub raw_meta: bool,
    /// Prefix declared objects with their basis and meta.
    pub object_details: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw_meta(mut self, raw_meta: bool) -> Self {
        self.raw_meta = raw_meta;
        self
    }

    pub fn with_object_details(mut self, object_details: bool) -> Self {
        self.object_details = object_details;
        self
    }

    pub fn meta_renderer(&self) -> &'static dyn MetaRenderer {
        if self.raw_meta { &RawMeta } else { &TypeMeta }
    }
}

/// Renders AST nodes of one document, collecting diagnostics as it goes.
pub struct AstRenderer<'a> {
    index: &'a PositionIndex,
    meta: &'a dyn MetaRenderer,
    details: bool,
    diagnostics: Diagnostics,
}

impl<'a> AstRenderer<'a> {
    pub fn new(index: &'a PositionIndex, options: RenderOptions) -> Self {
        Self {
            index,
            meta: options.meta_renderer(),
            details: options.object_details,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    pub(crate) fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn render_meta(&mut self, meta: &Meta) -> RenderedNode {
        let strategy = self.meta;
        strategy.render_meta(meta, self)
    }

    pub fn render_type(&mut self, tp: &Type) -> RenderedNode {
        match tp {
            Type::Top => RenderedNode::text(TOP_TYPE),
            Type::Var(name) => RenderedNode::text(name),
            Type::Sum(partials) => {
                let mut alternatives = Vec::new();
                for partial in partials {
                    for option in &partial.options {
                        alternatives.push(self.render_partial_option(&partial.name, option));
                    }
                }
                RenderedNode::join(alternatives, " | ")
            }
            Type::Unrecognized(node) => {
                self.diagnostics.unrecognized("type", node);
                RenderedNode::Empty
            }
        }
    }

    fn render_partial_option(&mut self, name: &str, option: &PartialOption) -> RenderedNode {
        let mut parts = vec![RenderedNode::text(name), self.render_type_vars(&option.vars)];
        let args: Vec<RenderedNode> = option
            .args
            .iter()
            .map(|(arg, tp)| labeled(self.render_type(tp), arg))
            .collect();
        parts.push(wrapped("(", args, ")"));
        RenderedNode::Inline(parts)
    }

    /// `<Type var, ...>`, or nothing when there are no vars.
    fn render_type_vars(&mut self, vars: &IndexMap<String, Type>) -> RenderedNode {
        if vars.is_empty() {
            return RenderedNode::Empty;
        }
        let vars: Vec<RenderedNode> = vars
            .iter()
            .map(|(var, tp)| labeled(self.render_type(tp), var))
            .collect();
        wrapped("<", vars, ">")
    }

    pub fn render_object(
        &mut self,
        object: &Object,
        meta: &dyn MetaRenderer,
        details: bool,
    ) -> RenderedNode {
        let mut parts = Vec::new();
        if details {
            let shown = meta.render_meta(&object.meta, self);
            parts.push(RenderedNode::Detail(Box::new(RenderedNode::Inline(vec![
                RenderedNode::text(&object.basis),
                RenderedNode::text(" - "),
                shown,
            ]))));
            parts.push(RenderedNode::text(" "));
        }
        parts.push(RenderedNode::text(&object.name));
        if !object.vars.is_empty() {
            let vars: Vec<RenderedNode> = object
                .vars
                .iter()
                .map(|(var, var_meta)| labeled(meta.render_meta(var_meta, self), var))
                .collect();
            parts.push(wrapped("<", vars, ">"));
        }
        if !object.args.is_empty() {
            let args: Vec<RenderedNode> = object
                .args
                .iter()
                .map(|(arg, arg_meta)| labeled(meta.render_meta(arg_meta, self), arg))
                .collect();
            parts.push(wrapped("(", args, ")"));
        }
        RenderedNode::Inline(parts)
    }

    pub fn render_guard(&mut self, guard: &Guard) -> RenderedNode {
        match guard {
            Guard::If(expr) => {
                RenderedNode::Inline(vec![RenderedNode::text(" if "), self.render_expr(expr)])
            }
            Guard::Else => RenderedNode::text(" else"),
            Guard::None => RenderedNode::Empty,
            Guard::Unrecognized(node) => {
                self.diagnostics.unrecognized("guard", node);
                RenderedNode::Empty
            }
        }
    }

    pub fn render_expr(&mut self, expr: &Expr) -> RenderedNode {
        match expr {
            Expr::CExpr { constant, .. } => RenderedNode::Text(constant.text()),
            Expr::Value { name, .. } => RenderedNode::text(name),
            Expr::TupleApply { base, args, .. } => {
                let base = self.render_expr(base);
                let args: Vec<RenderedNode> =
                    args.iter().map(|arg| self.render_tuple_arg(arg)).collect();
                RenderedNode::Inline(vec![base, wrapped("(", args, ")")])
            }
            Expr::Paren(inner) => RenderedNode::Inline(vec![
                RenderedNode::text("("),
                self.render_expr(inner),
                RenderedNode::text(")"),
            ]),
            Expr::Methods { base, methods } => {
                let mut parts = vec![self.render_expr(base)];
                for method in methods {
                    parts.push(RenderedNode::text("."));
                    parts.push(self.render_expr(method));
                }
                RenderedNode::Inline(parts)
            }
            Expr::IfThenElse {
                cond,
                then,
                otherwise,
                ..
            } => RenderedNode::Inline(vec![
                RenderedNode::text("if "),
                self.render_expr(cond),
                RenderedNode::text(" then "),
                self.render_expr(then),
                RenderedNode::text(" else "),
                self.render_expr(otherwise),
            ]),
            Expr::Match { subject, arms, .. } => self.render_pattern_match("match", subject, arms),
            Expr::Case { subject, arms, .. } => self.render_pattern_match("case", subject, arms),
            Expr::Unrecognized(node) => {
                self.diagnostics.unrecognized("expression", node);
                RenderedNode::Empty
            }
        }
    }

    fn render_tuple_arg(&mut self, arg: &TupleArg) -> RenderedNode {
        match arg {
            TupleArg::Named { name, value } => RenderedNode::Inline(vec![
                RenderedNode::text(name),
                RenderedNode::text(" = "),
                self.render_expr(value),
            ]),
            TupleArg::Positional(value) => self.render_expr(value),
            TupleArg::Unrecognized(node) => {
                self.diagnostics.unrecognized("tuple argument", node);
                RenderedNode::Empty
            }
        }
    }

    fn render_pattern_match(
        &mut self,
        keyword: &str,
        subject: &Expr,
        arms: &[PatternArm],
    ) -> RenderedNode {
        let strategy = self.meta;
        let subject = self.render_expr(subject);
        let arms: Vec<RenderedNode> = arms
            .iter()
            .map(|arm| {
                let object = self.render_object(&arm.object, strategy, false);
                let guard = self.render_guard(&arm.guard);
                RenderedNode::Inline(vec![object, guard])
            })
            .collect();
        RenderedNode::Inline(vec![
            RenderedNode::text(format!("{keyword} ")),
            subject,
            RenderedNode::text(" of"),
            RenderedNode::Indented(arms),
        ])
    }

    pub fn render_statements(&mut self, statements: &[Statement]) -> RenderedNode {
        RenderedNode::Block(
            statements
                .iter()
                .map(|statement| self.render_statement(statement))
                .collect(),
        )
    }

    pub fn render_statement(&mut self, statement: &Statement) -> RenderedNode {
        match statement {
            Statement::Decl(decl) => self.render_decl(decl),
            Statement::MultiTypeDef {
                name,
                vars,
                options,
            } => {
                let vars = self.render_type_vars(vars);
                let options: Vec<RenderedNode> =
                    options.iter().map(|tp| self.render_type(tp)).collect();
                RenderedNode::Inline(vec![
                    RenderedNode::text("class "),
                    RenderedNode::text(name),
                    vars,
                    RenderedNode::text(" = "),
                    RenderedNode::join(options, " | "),
                ])
            }
            Statement::TypeDef(tp) => {
                RenderedNode::Inline(vec![RenderedNode::text("data "), self.render_type(tp)])
            }
            Statement::ClassInstance {
                type_name,
                vars,
                class_name,
            } => RenderedNode::Inline(vec![
                RenderedNode::text("instance "),
                RenderedNode::text(type_name),
                self.render_type_vars(vars),
                RenderedNode::text(" of "),
                RenderedNode::text(class_name),
            ]),
            Statement::ClassDecl { name, vars } => RenderedNode::Inline(vec![
                RenderedNode::text("class "),
                RenderedNode::text(name),
                self.render_type_vars(vars),
            ]),
            Statement::GlobalAnnot(expr) => self.render_global_annot(expr),
            Statement::Comment(text) => RenderedNode::Prose(text.clone()),
            Statement::Unrecognized(node) => {
                self.diagnostics.unrecognized("statement", node);
                RenderedNode::Empty
            }
        }
    }

    fn render_decl(&mut self, decl: &Decl) -> RenderedNode {
        let strategy = self.meta;
        let details = self.details;
        let mut head = vec![
            self.render_object(&decl.object, strategy, details),
            self.render_guard(&decl.guard),
        ];
        if let Some(expr) = &decl.expr {
            head.push(RenderedNode::text(" = "));
            head.push(self.render_expr(expr));
        }
        let head = RenderedNode::Inline(head);
        if decl.sub_statements.is_empty() {
            return head;
        }
        let subs: Vec<RenderedNode> = decl
            .sub_statements
            .iter()
            .map(|sub| match sub {
                DeclSubStatement::Decl(inner) => self.render_decl(inner),
                DeclSubStatement::Annot(expr) => self.render_expr(expr),
                DeclSubStatement::Unrecognized(node) => {
                    self.diagnostics.unrecognized("sub-statement", node);
                    RenderedNode::Empty
                }
            })
            .collect();
        RenderedNode::Block(vec![head, RenderedNode::Indented(subs)])
    }

    fn render_global_annot(&mut self, expr: &Expr) -> RenderedNode {
        let shown = self.render_expr(expr);
        let index = self.index;
        let Some(value) = expr.position().and_then(|position| index.get(position)) else {
            let message = match expr.position() {
                Some(position) => format!("no annotation value at {}", position.key()),
                None => "annotation expression has no position".to_string(),
            };
            self.diagnostics
                .report(DiagnosticKind::MissingAnnotation, "statement", message);
            return RenderedNode::Block(vec![shown, RenderedNode::Empty]);
        };
        if value.tuple_name() != Some(PRINT_ANNOTATION) {
            return shown;
        }
        let printed = match value.arg(PRINT_ARG) {
            Some(printed) => self.render_val(printed),
            None => {
                self.diagnostics.report(
                    DiagnosticKind::UnknownValue,
                    "value",
                    format!("{PRINT_ANNOTATION} has no '{PRINT_ARG}' argument"),
                );
                RenderedNode::Empty
            }
        };
        RenderedNode::Block(vec![shown, printed])
    }

    pub fn render_val(&mut self, val: &Val) -> RenderedNode {
        match val {
            Val::Tuple { name, .. } if name == RESULT_TUPLE => match val.artifact() {
                Some(artifact) => render_result(&artifact),
                None => {
                    self.diagnostics.report(
                        DiagnosticKind::MalformedNode,
                        "value",
                        format!("{RESULT_TUPLE} needs text 'name' and 'contents' arguments"),
                    );
                    RenderedNode::Empty
                }
            },
            Val::Tuple { name, .. } => {
                self.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::UnknownValue,
                    grammar: "value",
                    tag: Some(name.clone()),
                    message: format!("unknown value tuple '{name}'"),
                });
                RenderedNode::Empty
            }
            Val::Str(text) => RenderedNode::text(text),
            Val::Int(number) => RenderedNode::Text(number.to_string()),
            Val::Float(number) => RenderedNode::Text(number.to_string()),
            Val::NoVal => RenderedNode::Empty,
            Val::Unrecognized(node) => {
                self.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::UnknownValue,
                    grammar: "value",
                    tag: node.tag.clone(),
                    message: node.reason.clone(),
                });
                RenderedNode::Empty
            }
        }
    }
}

/// `node label`, e.g. `Int x`.
fn labeled(node: RenderedNode, label: &str) -> RenderedNode {
    RenderedNode::Inline(vec![node, RenderedNode::text(" "), RenderedNode::text(label)])
}

/// `open item, item close`.
fn wrapped(open: &str, items: Vec<RenderedNode>, close: &str) -> RenderedNode {
    RenderedNode::Inline(vec![
        RenderedNode::text(open),
        RenderedNode::join(items, ", "),
        RenderedNode::text(close),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::to_text;
    use catln_model::Annotation;
    use serde_json::{Value, json};

    fn meta_at(line: u64) -> Value {
        json!([{"tag": "TopType"}, ["f.ct", [line, 1]]])
    }

    fn value_expr(line: u64, name: &str) -> Value {
        json!({"tag": "RawValue", "contents": [meta_at(line), name]})
    }

    fn render_one(statement: Value, annotations: Value) -> (String, Vec<Diagnostic>) {
        let annotations: Vec<Annotation> = serde_json::from_value(annotations).unwrap();
        let index = PositionIndex::build(&annotations);
        let mut renderer = AstRenderer::new(&index, RenderOptions::new());
        let node = renderer.render_statement(&Statement::from(statement));
        (to_text(&node), renderer.into_diagnostics().into_vec())
    }

    #[test]
    fn sum_type_renders_every_partial() {
        let tp = Type::from(json!({
            "tag": "SumType",
            "contents": [
                ["A", [[{}, {}, {}]]],
                ["B", [[{}, {}, {"x": {"tag": "TypeVar", "contents": "Int"}}]]]
            ]
        }));
        let index = PositionIndex::default();
        let mut renderer = AstRenderer::new(&index, RenderOptions::new());
        assert_eq!(to_text(&renderer.render_type(&tp)), "A() | B(Int x)");
        assert!(renderer.diagnostics().is_empty());
    }

    #[test]
    fn sum_type_shows_generic_vars() {
        let tp = Type::from(json!({
            "tag": "SumType",
            "contents": [["List", [[{"T": {"tag": "TopType"}}, {}, {"head": {"tag": "TypeVar", "contents": "T"}}]]]]
        }));
        let index = PositionIndex::default();
        let mut renderer = AstRenderer::new(&index, RenderOptions::new());
        assert_eq!(to_text(&renderer.render_type(&tp)), "List<TopType T>(T head)");
    }

    #[test]
    fn global_annotation_prints_its_value() {
        let (text, diagnostics) = render_one(
            json!({"tag": "RawGlobalAnnot", "contents": {"tag": "RawTupleApply", "contents": [
                meta_at(3),
                [meta_at(3), value_expr(3, "#print")],
                [{"tag": "RawTupleArgInfer", "contents": value_expr(3, "greeting")}]
            ]}}),
            json!([[
                value_expr(3, "#print"),
                {"tag": "TupleVal", "name": "#print", "args": {"p": {"tag": "StrVal", "contents": "hello"}}}
            ]]),
        );
        assert_eq!(text, "#print(greeting)\nhello");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn global_annotation_without_value_is_reported() {
        let (text, diagnostics) = render_one(
            json!({"tag": "RawGlobalAnnot", "contents": value_expr(3, "#print")}),
            json!([]),
        );
        assert_eq!(text, "#print");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingAnnotation);
    }

    #[test]
    fn non_print_annotation_shows_only_the_expression() {
        let (text, diagnostics) = render_one(
            json!({"tag": "RawGlobalAnnot", "contents": value_expr(5, "#assert")}),
            json!([[value_expr(5, "#assert"), {"tag": "TupleVal", "name": "#assert", "args": {}}]]),
        );
        assert_eq!(text, "#assert");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unknown_statement_yields_one_diagnostic() {
        let (text, diagnostics) = render_one(json!({"tag": "Bogus", "contents": 1}), json!([]));
        assert_eq!(text, "");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownTag);
        assert_eq!(diagnostics[0].tag.as_deref(), Some("Bogus"));
    }

    #[test]
    fn decl_renders_guard_value_and_nested_block() {
        let (text, diagnostics) = render_one(
            json!({"tag": "RawDeclStatement", "contents": [
                [meta_at(1), [
                    [meta_at(1), "FunctionObj", "abs", {}, {"x": [[{"tag": "TypeVar", "contents": "Int"}, null]]}],
                    {"tag": "IfGuard", "contents": value_expr(1, "positive")}
                ]],
                [
                    {"tag": "RawDeclSubStatementDecl", "contents": [
                        [meta_at(2), [[meta_at(2), "FunctionObj", "helper", {}, {}], {"tag": "ElseGuard"}]],
                        [],
                        {"tag": "RawCExpr", "contents": [meta_at(2), {"tag": "CInt", "contents": 0}]}
                    ]},
                    {"tag": "RawDeclSubStatementAnnot", "contents": value_expr(3, "#pure")}
                ],
                value_expr(1, "x")
            ]}),
            json!([]),
        );
        assert_eq!(text, "abs(Int x) if positive = x\n    helper else = 0\n    #pure");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn class_statements_render_keywords() {
        let (text, _) = render_one(
            json!({"tag": "MultiTypeDefStatement", "contents": [
                "Maybe",
                {"T": {"tag": "TopType"}},
                [[{"tag": "TypeVar", "contents": "Just"}], [{"tag": "TypeVar", "contents": "Nothing"}]]
            ]}),
            json!([]),
        );
        assert_eq!(text, "class Maybe<TopType T> = Just | Nothing");

        let (text, _) = render_one(
            json!({"tag": "RawClassDefStatement", "contents": [["Int", {}], "Number"]}),
            json!([]),
        );
        assert_eq!(text, "instance Int of Number");

        let (text, _) = render_one(
            json!({"tag": "TypeDefStatement", "contents": [{"tag": "TopType"}]}),
            json!([]),
        );
        assert_eq!(text, "data TopType");
    }

    #[test]
    fn match_arms_are_indented() {
        let index = PositionIndex::default();
        let mut renderer = AstRenderer::new(&index, RenderOptions::new());
        let expr = Expr::from(json!({"tag": "RawMatch", "contents": [
            meta_at(1),
            value_expr(1, "m"),
            [
                [[meta_at(2), "PatternObj", "Just", {}, {"v": [meta_at(2)]}], {"tag": "NoGuard"}],
                [[meta_at(3), "PatternObj", "Nothing", {}, {}], {"tag": "ElseGuard"}]
            ]
        ]}));
        assert_eq!(
            to_text(&renderer.render_expr(&expr)),
            "match m of\n    Just(TopType v)\n    Nothing else"
        );
    }

    #[test]
    fn case_arms_are_indented() {
        let index = PositionIndex::default();
        let mut renderer = AstRenderer::new(&index, RenderOptions::new());
        let expr = Expr::from(json!({"tag": "RawCase", "contents": [
            meta_at(1),
            value_expr(1, "s"),
            [
                [[meta_at(2), "PatternObj", "Just", {}, {"v": [meta_at(2)]}], {"tag": "IfGuard", "contents": value_expr(2, "ok")}],
                [[meta_at(3), "PatternObj", "Nothing", {}, {}], {"tag": "ElseGuard"}]
            ]
        ]}));
        assert_eq!(
            to_text(&renderer.render_expr(&expr)),
            "case s of\n    Just(TopType v) if ok\n    Nothing else"
        );
        assert!(renderer.diagnostics().is_empty());
    }

    #[test]
    fn unknown_guard_reports_once() {
        let index = PositionIndex::default();
        let mut renderer = AstRenderer::new(&index, RenderOptions::new());
        let expr = Expr::from(json!({"tag": "RawMatch", "contents": [
            meta_at(1),
            value_expr(1, "m"),
            [[[meta_at(2), "PatternObj", "Just", {}, {}], {"tag": "WhenGuard", "contents": 1}]]
        ]}));
        assert_eq!(to_text(&renderer.render_expr(&expr)), "match m of\n    Just");
        let diagnostics = renderer.into_diagnostics().into_vec();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownTag);
        assert_eq!(diagnostics[0].tag.as_deref(), Some("WhenGuard"));
    }

    #[test]
    fn unknown_tuple_arg_reports_once() {
        let index = PositionIndex::default();
        let mut renderer = AstRenderer::new(&index, RenderOptions::new());
        let expr = Expr::from(json!({"tag": "RawTupleApply", "contents": [
            meta_at(1),
            [meta_at(1), value_expr(1, "f")],
            [
                {"tag": "RawTupleArgSpread", "contents": value_expr(1, "xs")},
                {"tag": "RawTupleArgInfer", "contents": value_expr(1, "y")}
            ]
        ]}));
        let text = to_text(&renderer.render_expr(&expr));
        assert!(text.starts_with("f("), "{text}");
        assert!(text.contains('y'), "{text}");
        let diagnostics = renderer.into_diagnostics().into_vec();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownTag);
        assert_eq!(diagnostics[0].tag.as_deref(), Some("RawTupleArgSpread"));
    }

    #[test]
    fn multi_line_string_stays_in_its_block() {
        let (text, diagnostics) = render_one(
            json!({"tag": "RawDeclStatement", "contents": [
                [meta_at(1), [[meta_at(1), "FunctionObj", "main", {}, {}], {"tag": "NoGuard"}]],
                [
                    {"tag": "RawDeclSubStatementDecl", "contents": [
                        [meta_at(2), [[meta_at(2), "FunctionObj", "helper", {}, {}], {"tag": "NoGuard"}]],
                        [],
                        {"tag": "RawCExpr", "contents": [meta_at(2), {"tag": "CStr", "contents": "a\nb"}]}
                    ]}
                ],
                {"tag": "RawCExpr", "contents": [meta_at(1), {"tag": "CInt", "contents": 0}]}
            ]}),
            json!([]),
        );
        assert_eq!(text, "main = 0\n    helper = a\n    b");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn expressions_render_structurally() {
        let index = PositionIndex::default();
        let mut renderer = AstRenderer::new(&index, RenderOptions::new());
        let expr = Expr::from(json!({"tag": "RawIfThenElse", "contents": [
            meta_at(1),
            {"tag": "RawParen", "contents": value_expr(1, "c")},
            {"tag": "RawMethods", "contents": [value_expr(1, "xs"), [value_expr(1, "head"), value_expr(1, "show")]]},
            {"tag": "RawTupleApply", "contents": [
                meta_at(1),
                [meta_at(1), value_expr(1, "f")],
                [{"tag": "RawTupleArgNamed", "contents": ["n", {"tag": "RawCExpr", "contents": [meta_at(1), {"tag": "CStr", "contents": "s"}]}]}]
            ]}
        ]}));
        assert_eq!(
            to_text(&renderer.render_expr(&expr)),
            "if (c) then xs.head.show else f(n = s)"
        );
    }

    #[test]
    fn object_details_show_basis_and_meta() {
        let index = PositionIndex::default();
        let options = RenderOptions::new().with_object_details(true);
        let mut renderer = AstRenderer::new(&index, options);
        let object: Object = serde_json::from_value(json!([
            [{"tag": "TypeVar", "contents": "Int"}, null],
            "FunctionObj",
            "succ",
            {},
            {"n": [[{"tag": "TypeVar", "contents": "Int"}, null]]}
        ]))
        .unwrap();
        let node = renderer.render_object(&object, &TypeMeta, true);
        assert_eq!(to_text(&node), "[FunctionObj - Int] succ(Int n)");

        let node = renderer.render_object(&object, &RawMeta, false);
        assert_eq!(
            to_text(&node),
            r#"succ([{"tag":"TypeVar","contents":"Int"},null] n)"#
        );
    }

    #[test]
    fn values_render_or_report() {
        let index = PositionIndex::default();
        let mut renderer = AstRenderer::new(&index, RenderOptions::new());
        let result = Val::from(json!({
            "tag": "TupleVal",
            "name": "CatlnResult",
            "args": {"name": {"tag": "StrVal", "contents": "out.ll"}, "contents": {"tag": "StrVal", "contents": "ret i32 0"}}
        }));
        assert!(matches!(renderer.render_val(&result), RenderedNode::Code { .. }));
        assert_eq!(renderer.render_val(&Val::Int(3)), RenderedNode::text("3"));
        assert_eq!(renderer.render_val(&Val::NoVal), RenderedNode::Empty);

        let unknown = Val::from(json!({"tag": "TupleVal", "name": "Mystery", "args": {}}));
        assert_eq!(renderer.render_val(&unknown), RenderedNode::Empty);
        let diagnostics = renderer.into_diagnostics().into_vec();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownValue);
    }

    #[test]
    fn rendering_is_idempotent() {
        let statement = Statement::from(json!({"tag": "RawGlobalAnnot", "contents": value_expr(3, "x")}));
        let annotations: Vec<Annotation> = serde_json::from_value(json!([
            [value_expr(3, "x"), {"tag": "TupleVal", "name": "#print", "args": {"p": {"tag": "IntVal", "contents": 1}}}]
        ]))
        .unwrap();
        let index = PositionIndex::build(&annotations);
        let mut renderer = AstRenderer::new(&index, RenderOptions::new());
        let first = renderer.render_statement(&statement);
        let second = renderer.render_statement(&statement);
        assert_eq!(first, second);
    }
}
