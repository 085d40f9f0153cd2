//! The structural tree every view renders into.
//!
//! Renderers never produce strings directly; the text and HTML writers walk
//! this tree instead.

/// A rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedNode {
    /// Renders as nothing; stands in for subtrees that could not be decoded.
    Empty,
    Text(String),
    /// Children laid out on one line.
    Inline(Vec<RenderedNode>),
    /// Children laid out one per line.
    Block(Vec<RenderedNode>),
    /// Like [`RenderedNode::Block`], one level deeper.
    Indented(Vec<RenderedNode>),
    /// Secondary information, e.g. an object's basis and inferred type.
    Detail(Box<RenderedNode>),
    Heading { level: u8, text: String },
    Link { label: String, href: String },
    /// Markdown prose.
    Prose(String),
    /// Source code tagged with its language.
    Code { language: String, code: String },
    /// A standalone document shown in place, e.g. generated HTML.
    Embedded { title: String, document: String },
    Preformatted(String),
}

impl RenderedNode {
    pub fn text(text: impl Into<String>) -> Self {
        RenderedNode::Text(text.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RenderedNode::Empty => true,
            RenderedNode::Text(text) => text.is_empty(),
            RenderedNode::Inline(children)
            | RenderedNode::Block(children)
            | RenderedNode::Indented(children) => children.iter().all(RenderedNode::is_empty),
            _ => false,
        }
    }

    /// Joins `items` with `separator` into one inline node.
    pub fn join(items: impl IntoIterator<Item = RenderedNode>, separator: &str) -> Self {
        let mut children = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                children.push(RenderedNode::text(separator));
            }
            children.push(item);
        }
        RenderedNode::Inline(children)
    }
}
