//! Display of compiled artifacts, chosen by file name.

use catln_model::Artifact;

use crate::node::RenderedNode;

/// Language tag of generated LLVM code blocks.
pub const LLVM_LANGUAGE: &str = "llvm";

/// How an artifact is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// Generated code, shown as a tagged code block.
    Code(&'static str),
    /// A standalone HTML document shown in place.
    Embedded,
    /// Anything else, shown as plain preformatted text.
    Plain,
}

/// Suffix dispatch, checked in order; the first match wins.
const DISPATCH: &[(&str, ResultKind)] = &[
    (".ll", ResultKind::Code(LLVM_LANGUAGE)),
    (".html", ResultKind::Embedded),
];

pub fn classify(file_name: &str) -> ResultKind {
    DISPATCH
        .iter()
        .find(|(suffix, _)| file_name.ends_with(suffix))
        .map_or(ResultKind::Plain, |(_, kind)| *kind)
}

pub fn render_result(artifact: &Artifact) -> RenderedNode {
    match classify(&artifact.name) {
        ResultKind::Code(language) => RenderedNode::Code {
            language: language.to_string(),
            code: artifact.contents.clone(),
        },
        ResultKind::Embedded => RenderedNode::Embedded {
            title: artifact.name.clone(),
            document: artifact.contents.clone(),
        },
        ResultKind::Plain => RenderedNode::Preformatted(artifact.contents.clone()),
    }
}
