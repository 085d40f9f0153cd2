//! Strategies for showing the metadata of objects and their arguments.

use catln_model::Meta;

use crate::ast::AstRenderer;
use crate::node::RenderedNode;

/// Renders the [`Meta`] attached to an object, a variable, or an argument.
pub trait MetaRenderer {
    fn render_meta(&self, meta: &Meta, renderer: &mut AstRenderer<'_>) -> RenderedNode;
}

/// Shows the type carried by the meta, i.e. the checked signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMeta;

impl MetaRenderer for TypeMeta {
    fn render_meta(&self, meta: &Meta, renderer: &mut AstRenderer<'_>) -> RenderedNode {
        renderer.render_type(&meta.tp)
    }
}

/// Shows the meta exactly as received, as compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawMeta;

impl MetaRenderer for RawMeta {
    fn render_meta(&self, meta: &Meta, _renderer: &mut AstRenderer<'_>) -> RenderedNode {
        RenderedNode::Text(meta.raw.to_string())
    }
}
