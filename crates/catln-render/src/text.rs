//! Plain-text writer for rendered trees.

use crate::node::RenderedNode;

const INDENT: &str = "    ";

/// Lines collected so far; `open` means inline content may extend the last one.
#[derive(Default)]
struct Lines {
    lines: Vec<(usize, String)>,
    open: bool,
}

impl Lines {
    /// Extends the open line; each newline in `text` starts another line
    /// at `indent`.
    fn append(&mut self, indent: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut pieces = text.split('\n');
        if let Some(first) = pieces.next() {
            self.extend(indent, first);
        }
        for piece in pieces {
            self.lines.push((indent, piece.to_string()));
            self.open = true;
        }
    }

    fn extend(&mut self, indent: usize, text: &str) {
        if self.open
            && let Some((_, line)) = self.lines.last_mut()
        {
            line.push_str(text);
            return;
        }
        self.lines.push((indent, text.to_string()));
        self.open = true;
    }

    fn push_line(&mut self, indent: usize, text: &str) {
        self.lines.push((indent, text.to_string()));
        self.open = false;
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn verbatim(&mut self, indent: usize, text: &str) {
        self.close();
        for line in text.lines() {
            self.push_line(indent, line);
        }
    }

    fn finish(self) -> String {
        self.lines
            .into_iter()
            .map(|(indent, text)| {
                if text.is_empty() {
                    text
                } else {
                    format!("{}{text}", INDENT.repeat(indent))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders `node` as text: one line per block child, four spaces per
/// indentation level, no trailing newline.
pub fn to_text(node: &RenderedNode) -> String {
    let mut lines = Lines::default();
    write_node(node, 0, &mut lines);
    lines.finish()
}

fn write_node(node: &RenderedNode, indent: usize, out: &mut Lines) {
    match node {
        RenderedNode::Empty => {}
        RenderedNode::Text(text) => out.append(indent, text),
        RenderedNode::Inline(children) => {
            for child in children {
                write_node(child, indent, out);
            }
        }
        RenderedNode::Block(children) => write_lines(children, indent, out),
        RenderedNode::Indented(children) => write_lines(children, indent + 1, out),
        RenderedNode::Detail(inner) => {
            out.append(indent, "[");
            write_node(inner, indent, out);
            out.append(indent, "]");
        }
        RenderedNode::Heading { level, text } => {
            out.close();
            let marks = "#".repeat(usize::from(*level).max(1));
            out.push_line(indent, &format!("{marks} {text}"));
        }
        RenderedNode::Link { label, .. } => out.append(indent, label),
        RenderedNode::Prose(text) | RenderedNode::Preformatted(text) => {
            out.verbatim(indent, text);
        }
        RenderedNode::Code { code, .. } => out.verbatim(indent, code),
        RenderedNode::Embedded { title, document } => {
            out.close();
            out.push_line(indent, &format!("--- {title} ---"));
            out.verbatim(indent, document);
        }
    }
}

fn write_lines(children: &[RenderedNode], indent: usize, out: &mut Lines) {
    out.close();
    for child in children {
        write_node(child, indent, out);
        out.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RenderedNode {
        RenderedNode::text(s)
    }

    #[test]
    fn block_children_get_their_own_lines() {
        let node = RenderedNode::Block(vec![
            RenderedNode::Inline(vec![text("a"), text(" = "), text("b")]),
            RenderedNode::Empty,
            text("c"),
        ]);
        assert_eq!(to_text(&node), "a = b\nc");
    }

    #[test]
    fn indentation_nests() {
        let node = RenderedNode::Block(vec![
            text("outer"),
            RenderedNode::Indented(vec![
                text("inner"),
                RenderedNode::Indented(vec![text("deepest")]),
            ]),
        ]);
        assert_eq!(to_text(&node), "outer\n    inner\n        deepest");
    }

    #[test]
    fn multi_line_text_keeps_the_indentation() {
        let node = RenderedNode::Block(vec![
            text("f"),
            RenderedNode::Indented(vec![RenderedNode::Inline(vec![
                text("= \"a"),
                text("\nb\""),
            ])]),
        ]);
        assert_eq!(to_text(&node), "f\n    = \"a\n    b\"");
    }

    #[test]
    fn inline_text_after_a_block_starts_a_new_line() {
        let node = RenderedNode::Inline(vec![
            text("match x of"),
            RenderedNode::Indented(vec![text("A")]),
            text("rest"),
        ]);
        assert_eq!(to_text(&node), "match x of\n    A\nrest");
    }

    #[test]
    fn verbatim_bodies_keep_their_lines() {
        let node = RenderedNode::Block(vec![
            RenderedNode::Indented(vec![RenderedNode::Code {
                language: "llvm".to_string(),
                code: "define i32 @main() {\n  ret i32 0\n}".to_string(),
            }]),
            RenderedNode::Embedded {
                title: "out.html".to_string(),
                document: "<b>x</b>".to_string(),
            },
        ]);
        assert_eq!(
            to_text(&node),
            "    define i32 @main() {\n      ret i32 0\n    }\n--- out.html ---\n<b>x</b>"
        );
    }

    #[test]
    fn blank_prose_lines_have_no_indent() {
        let node = RenderedNode::Indented(vec![RenderedNode::Prose("# Title\n\nBody".to_string())]);
        assert_eq!(to_text(&node), "    # Title\n\n    Body");
    }
}
