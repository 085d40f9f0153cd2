//! Turning a load state into the view shown for a route.

use catln_render::{
    RenderOptions, RenderedNode, RenderedView, error_view, pending_view, render_constrain,
    render_docs, render_llvm, render_program,
};
use catln_source::{LoadState, Route, View};
use serde_json::Value;
use tracing::warn;

/// The view for a route and whether it shows an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOutcome {
    pub view: RenderedView,
    pub failed: bool,
}

/// Builds exactly one of the pending view, the error view or the content
/// for `route`.
pub fn build_view(route: &Route, state: &LoadState, options: RenderOptions) -> ViewOutcome {
    let title = route.view.title();
    match state {
        LoadState::Pending => ViewOutcome {
            view: pending_view(title),
            failed: false,
        },
        LoadState::Error(error) => ViewOutcome {
            view: error_view(title, &error.to_string()),
            failed: true,
        },
        LoadState::Ready(loaded) => {
            let (view, failed) = match &loaded.data {
                Some(data) => match render_data(route, data.clone(), options) {
                    Ok(view) => (view, false),
                    Err(error) => {
                        warn!(route = %route, %error, "view could not be rendered");
                        (error_view(title, &error.to_string()), true)
                    }
                },
                None => (RenderedView::new(title, RenderedNode::Empty), false),
            };
            ViewOutcome {
                view: view.with_notes(&loaded.notes),
                failed,
            }
        }
    }
}

/// Renders the payload of a ready response with the view `route` selects.
pub fn render_data(
    route: &Route,
    data: Value,
    options: RenderOptions,
) -> catln_render::Result<RenderedView> {
    let view = route.view;
    match view {
        View::Typecheck => render_program(
            view.title(),
            view.name(),
            data,
            options.with_object_details(true),
        ),
        View::Desugar => render_program(view.title(), view.name(), data, options),
        View::Constrain => render_constrain(data, options),
        View::Llvm => render_llvm(data),
        View::Docs => render_docs(data, route.page.as_deref(), options),
    }
}
