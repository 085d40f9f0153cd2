//! Whole views over the payloads the compiler serves.

use catln_model::{
    Arrow, Artifact, Constraint, ConstraintTrace, Document, LlvmDump, Meta, ProgramDump,
    ProgramEntry, Type, decode_payload, encode_page_id,
};
use serde_json::Value;
use tracing::debug;

use crate::ast::{AstRenderer, RenderOptions};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{RenderError, Result};
use crate::index::PositionIndex;
use crate::node::RenderedNode;
use crate::page_tree::{PageTree, TocEntry};
use crate::result_view::render_result;

/// Path prefix of documentation page links.
pub const DOCS_PATH: &str = "/docs";

/// A rendered view and everything that went wrong while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub title: String,
    pub body: RenderedNode,
    pub diagnostics: Vec<Diagnostic>,
}

impl RenderedView {
    pub fn new(title: impl Into<String>, body: RenderedNode) -> Self {
        Self {
            title: title.into(),
            body,
            diagnostics: Vec::new(),
        }
    }

    /// Appends the notes that came with the response, if any.
    pub fn with_notes(mut self, notes: &Value) -> Self {
        let notes = render_notes(notes);
        if !notes.is_empty() {
            self.body = RenderedNode::Block(vec![self.body, notes]);
        }
        self
    }

    /// Heading followed by the body, as written to output.
    pub fn page(&self) -> RenderedNode {
        RenderedNode::Block(vec![
            RenderedNode::Heading {
                level: 1,
                text: self.title.clone(),
            },
            self.body.clone(),
        ])
    }
}

/// Link target of a documentation page.
pub fn docs_href(page: &str) -> String {
    format!("{DOCS_PATH}/{}", encode_page_id(page))
}

pub fn pending_view(title: &str) -> RenderedView {
    RenderedView::new(title, RenderedNode::text("Loading..."))
}

pub fn error_view(title: &str, message: &str) -> RenderedView {
    RenderedView::new(title, RenderedNode::Text(format!("Error: {message}")))
}

/// Documentation view: table of contents and one page, the last page when
/// `page` is `None`.
pub fn render_docs(
    data: Value,
    page: Option<&str>,
    options: RenderOptions,
) -> Result<RenderedView> {
    let document: Document = decode_payload("docs", data)?;
    render_document(&document, page, options)
}

pub fn render_document(
    document: &Document,
    page: Option<&str>,
    options: RenderOptions,
) -> Result<RenderedView> {
    let selected = match page {
        Some(name) => document.page(name).ok_or_else(|| RenderError::UnknownPage {
            page: name.to_string(),
        })?,
        None => document.default_page().ok_or(RenderError::NoPages)?,
    };
    debug!(page = %selected.name, pages = document.pages.len(), "rendering documentation page");

    let (tree, conflicts) = PageTree::build(document.page_names());
    let index = PositionIndex::build(&document.annotations);
    let mut renderer = AstRenderer::new(&index, options);
    for conflict in conflicts {
        renderer
            .diagnostics_mut()
            .report(DiagnosticKind::MalformedNode, "page", conflict.to_string());
    }
    let statements = renderer.render_statements(&selected.statements);

    let body = RenderedNode::Block(vec![
        RenderedNode::Heading {
            level: 2,
            text: "Contents".to_string(),
        },
        render_toc(&tree.entries(), &selected.name),
        RenderedNode::Heading {
            level: 2,
            text: selected.name.clone(),
        },
        statements,
    ]);
    Ok(RenderedView {
        title: "Docs".to_string(),
        body,
        diagnostics: renderer.into_diagnostics().into_vec(),
    })
}

/// Nested listing of pages; the selected page is marked with `*`.
pub fn render_toc(entries: &[TocEntry], current: &str) -> RenderedNode {
    let mut levels: Vec<Vec<RenderedNode>> = vec![Vec::new()];
    for entry in entries {
        while levels.len() > entry.depth + 1 {
            close_level(&mut levels);
        }
        let node = match &entry.path {
            Some(path) => {
                let link = RenderedNode::Link {
                    label: entry.label.clone(),
                    href: docs_href(path),
                };
                let marker = if path == current { "* " } else { "  " };
                RenderedNode::Inline(vec![RenderedNode::text(marker), link])
            }
            None => RenderedNode::Text(format!("  {}/", entry.label)),
        };
        if let Some(level) = levels.last_mut() {
            level.push(node);
        }
        if entry.path.is_none() {
            levels.push(Vec::new());
        }
    }
    while levels.len() > 1 {
        close_level(&mut levels);
    }
    RenderedNode::Block(levels.pop().unwrap_or_default())
}

fn close_level(levels: &mut Vec<Vec<RenderedNode>>) {
    if let Some(children) = levels.pop()
        && let Some(parent) = levels.last_mut()
    {
        parent.push(RenderedNode::Indented(children));
    }
}

/// Program view over a typechecked or desugared dump.
pub fn render_program(
    title: &str,
    view: &'static str,
    data: Value,
    options: RenderOptions,
) -> Result<RenderedView> {
    let dump: ProgramDump = decode_payload(view, data)?;
    let index = PositionIndex::default();
    let mut renderer = AstRenderer::new(&index, options);
    let strategy = options.meta_renderer();
    let mut objects = Vec::with_capacity(dump.entries.len());
    for entry in &dump.entries {
        match entry {
            ProgramEntry::Object { object, arrows } => {
                let head = renderer.render_object(object, strategy, options.object_details);
                let arrows: Vec<RenderedNode> = arrows
                    .iter()
                    .map(|arrow| render_arrow(&mut renderer, arrow))
                    .collect();
                objects.push(RenderedNode::Block(vec![head, RenderedNode::Indented(arrows)]));
            }
            ProgramEntry::Unrecognized(node) => {
                renderer.diagnostics_mut().unrecognized("program entry", node);
            }
        }
    }
    Ok(RenderedView {
        title: title.to_string(),
        body: RenderedNode::Block(objects),
        diagnostics: renderer.into_diagnostics().into_vec(),
    })
}

/// `-> meta guard [= expr]`, with the arrow's annotations below it.
fn render_arrow(renderer: &mut AstRenderer<'_>, arrow: &Arrow) -> RenderedNode {
    let mut head = vec![
        RenderedNode::text("-> "),
        renderer.render_meta(&arrow.meta),
        renderer.render_guard(&arrow.guard),
    ];
    if let Some(expr) = &arrow.expr {
        head.push(RenderedNode::text(" = "));
        head.push(renderer.render_expr(expr));
    }
    let head = RenderedNode::Inline(head);
    if arrow.annotations.is_empty() {
        return head;
    }
    let annotations = arrow
        .annotations
        .iter()
        .map(|annotation| renderer.render_expr(annotation))
        .collect();
    RenderedNode::Block(vec![head, RenderedNode::Indented(annotations)])
}

/// Constraint solving trace, one numbered block per solver step.
pub fn render_constrain(data: Value, options: RenderOptions) -> Result<RenderedView> {
    let trace: ConstraintTrace = decode_payload("constrain", data)?;
    let index = PositionIndex::default();
    let mut renderer = AstRenderer::new(&index, options);
    let steps = trace
        .steps
        .iter()
        .enumerate()
        .map(|(step, constraints)| {
            let constraints = constraints
                .iter()
                .map(|constraint| render_constraint(&mut renderer, constraint))
                .collect();
            RenderedNode::Block(vec![
                RenderedNode::Text(format!("Step {}", step + 1)),
                RenderedNode::Indented(constraints),
            ])
        })
        .collect();
    Ok(RenderedView {
        title: "Constrain".to_string(),
        body: RenderedNode::Block(steps),
        diagnostics: renderer.into_diagnostics().into_vec(),
    })
}

fn render_constraint(renderer: &mut AstRenderer<'_>, constraint: &Constraint) -> RenderedNode {
    match constraint {
        Constraint::Tagged { name, operands } => {
            let operands: Vec<RenderedNode> = operands
                .iter()
                .map(|operand| render_operand(renderer, operand))
                .collect();
            RenderedNode::Inline(vec![
                RenderedNode::text(name),
                RenderedNode::text("("),
                RenderedNode::join(operands, ", "),
                RenderedNode::text(")"),
            ])
        }
        Constraint::Unrecognized(node) => {
            renderer.diagnostics_mut().unrecognized("constraint", node);
            RenderedNode::Empty
        }
    }
}

/// Types and metas render through the AST renderer, anything else as JSON.
fn render_operand(renderer: &mut AstRenderer<'_>, operand: &Value) -> RenderedNode {
    if Type::is_type_node(operand) {
        return renderer.render_type(&Type::from(operand.clone()));
    }
    match operand {
        Value::Array(items) if items.first().is_some_and(Type::is_type_node) => {
            renderer.render_meta(&Meta::from(operand.clone()))
        }
        other => RenderedNode::Text(other.to_string()),
    }
}

/// Generated LLVM modules, each shown as code.
pub fn render_llvm(data: Value) -> Result<RenderedView> {
    let dump: LlvmDump = decode_payload("llvm", data)?;
    let modules = dump
        .modules
        .iter()
        .map(|module| {
            let artifact = Artifact::new(module.file_name(), module.code.clone());
            RenderedNode::Block(vec![
                RenderedNode::Heading {
                    level: 2,
                    text: module.name.clone(),
                },
                render_result(&artifact),
            ])
        })
        .collect();
    Ok(RenderedView::new("LLVM", RenderedNode::Block(modules)))
}

/// Notes sent alongside a response, one per line.
pub fn render_notes(notes: &Value) -> RenderedNode {
    let items: Vec<&Value> = match notes {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };
    if items.is_empty() {
        return RenderedNode::Empty;
    }
    let lines = items
        .into_iter()
        .map(|note| match note {
            Value::String(message) => RenderedNode::Text(format!("- {message}")),
            other => RenderedNode::Text(format!("- {other}")),
        })
        .collect();
    RenderedNode::Block(vec![
        RenderedNode::Heading {
            level: 2,
            text: "Notes".to_string(),
        },
        RenderedNode::Block(lines),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::to_text;
    use serde_json::json;

    fn meta(line: u64) -> Value {
        json!([{"tag": "TopType"}, ["main.ct", [line, 1]]])
    }

    fn page(name: &str, deps: Value) -> Value {
        json!([[meta(0), []], name, deps])
    }

    fn document() -> Value {
        json!([
            [
                [[meta(0), [{"tag": "TypeDefStatement", "contents": [{"tag": "TypeVar", "contents": "Nil"}]}]], "std/list.ct", []],
                [[meta(0), [{"tag": "RawComment", "contents": "Hello"}, {"tag": "Bogus"}]], "main.ct", []]
            ],
            []
        ])
    }

    #[test]
    fn docs_default_to_the_last_page() {
        let view = render_docs(document(), None, RenderOptions::new()).unwrap();
        assert_eq!(
            to_text(&view.page()),
            "# Docs\n## Contents\n* main.ct\n  std/\n      list.ct\n## main.ct\nHello"
        );
        assert_eq!(view.diagnostics.len(), 1);
    }

    #[test]
    fn docs_render_a_selected_page() {
        let view = render_docs(document(), Some("std/list.ct"), RenderOptions::new()).unwrap();
        assert!(to_text(&view.body).ends_with("## std/list.ct\ndata Nil"));
        assert!(view.diagnostics.is_empty());
    }

    #[test]
    fn unknown_page_is_an_error() {
        let err = render_docs(document(), Some("nope.ct"), RenderOptions::new()).unwrap_err();
        assert!(matches!(err, RenderError::UnknownPage { ref page } if page == "nope.ct"));
    }

    #[test]
    fn conflicting_page_name_only_drops_its_entry() {
        let data = json!([
            [page("a", json!([])), page("a/b.ct", json!([])), page("main.ct", json!([]))],
            []
        ]);
        let view = render_docs(data, Some("main.ct"), RenderOptions::new()).unwrap();
        let text = to_text(&view.body);
        assert!(text.contains("* main.ct"), "{text}");
        assert!(text.contains("  a"), "{text}");
        assert!(!text.contains("b.ct"), "{text}");
        assert_eq!(view.diagnostics.len(), 1);
        assert_eq!(view.diagnostics[0].kind, DiagnosticKind::MalformedNode);
    }

    #[test]
    fn toc_links_are_percent_encoded() {
        let (tree, _) = PageTree::build(["std/list.ct"]);
        let toc = render_toc(&tree.entries(), "");
        let RenderedNode::Block(lines) = toc else {
            panic!("expected a block");
        };
        let RenderedNode::Indented(children) = &lines[1] else {
            panic!("expected nested pages");
        };
        assert!(matches!(
            &children[0],
            RenderedNode::Inline(parts) if parts[1] == RenderedNode::Link {
                label: "list.ct".to_string(),
                href: "/docs/std%2Flist.ct".to_string(),
            }
        ));
    }

    #[test]
    fn program_view_lists_objects_with_arrows() {
        let data = json!([[
            [
                [[{"tag": "TypeVar", "contents": "Int"}, null], "FunctionObj", "inc", {}, {"n": [[{"tag": "TypeVar", "contents": "Int"}, null]]}],
                [[[{"tag": "TypeVar", "contents": "Int"}, null], {"tag": "NoGuard"}, [], {"tag": "RawValue", "contents": [meta(2), "n"]}]]
            ],
            ["not", "an", "object"]
        ]]);
        let options = RenderOptions::new().with_object_details(true);
        let view = render_program("Typecheck", "typecheck", data, options).unwrap();
        assert_eq!(
            to_text(&view.body),
            "[FunctionObj - Int] inc(Int n)\n    -> Int = n"
        );
        assert_eq!(view.diagnostics.len(), 1);
    }

    #[test]
    fn constrain_view_numbers_steps() {
        let data = json!([
            [{"tag": "EqualsKnown", "contents": [3, {"tag": "TypeVar", "contents": "Int"}]}],
            [{"tag": "ArrowTo", "contents": [[{"tag": "TopType"}, null], "x"]}]
        ]);
        let view = render_constrain(data, RenderOptions::new()).unwrap();
        assert_eq!(
            to_text(&view.body),
            "Step 1\n    EqualsKnown(3, Int)\nStep 2\n    ArrowTo(TopType, \"x\")"
        );
    }

    #[test]
    fn llvm_view_shows_code_blocks() {
        let view = render_llvm(json!({"main": "ret i32 0"})).unwrap();
        let RenderedNode::Block(modules) = &view.body else {
            panic!("expected a block");
        };
        assert!(matches!(
            &modules[0],
            RenderedNode::Block(parts) if matches!(parts[1], RenderedNode::Code { ref language, .. } if language == "llvm")
        ));
    }

    #[test]
    fn notes_are_listed_after_the_view() {
        let view = RenderedView::new("LLVM", RenderedNode::text("body"))
            .with_notes(&json!(["warning: unused", {"pos": 1}]));
        assert_eq!(
            to_text(&view.body),
            "body\n## Notes\n- warning: unused\n- {\"pos\":1}"
        );
        let quiet = RenderedView::new("LLVM", RenderedNode::text("body")).with_notes(&json!([]));
        assert_eq!(quiet.body, RenderedNode::text("body"));
    }

    #[test]
    fn malformed_payload_is_a_payload_error() {
        let err = render_llvm(json!(42)).unwrap_err();
        assert!(matches!(err, RenderError::Payload(_)));
    }
}
