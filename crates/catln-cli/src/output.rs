//! Writing rendered views.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use catln_render::{RenderedView, html_document, to_text};

/// Output format of rendered views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    /// A standalone HTML document.
    Html,
}

/// The whole view, title included, in `format`.
pub fn format_view(view: &RenderedView, format: OutputFormat) -> catln_render::Result<String> {
    match format {
        OutputFormat::Text => {
            let mut text = to_text(&view.page());
            text.push('\n');
            Ok(text)
        }
        OutputFormat::Html => html_document(&view.title, &view.page()),
    }
}

/// Writes `contents` to `path`, or to stdout when there is no path.
pub fn write_output(path: Option<&Path>, contents: &str) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, contents),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()
        }
    }
}
