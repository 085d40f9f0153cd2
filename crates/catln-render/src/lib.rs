//! Rendering of Catln compiler dumps.
//!
//! Views decode a payload with `catln-model`, render it into a
//! [`RenderedNode`] tree with the [`AstRenderer`], and hand the tree to the
//! text or HTML writer. Documentation pages additionally use a
//! [`PageTree`] for the table of contents and a [`PositionIndex`] to find
//! the values of print annotations.

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod html;
pub mod index;
pub mod meta;
pub mod node;
pub mod page_tree;
pub mod result_view;
pub mod text;
pub mod views;

pub use ast::{AstRenderer, RenderOptions};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{RenderError, Result};
pub use html::{html_document, to_html};
pub use index::PositionIndex;
pub use meta::{MetaRenderer, RawMeta, TypeMeta};
pub use node::RenderedNode;
pub use page_tree::{MAIN_PAGE, PageTree, PageTreeError, TocEntry};
pub use result_view::{ResultKind, classify, render_result};
pub use text::to_text;
pub use views::{
    RenderedView, docs_href, error_view, pending_view, render_constrain, render_docs,
    render_document, render_llvm, render_notes, render_program, render_toc,
};
