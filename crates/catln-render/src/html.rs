//! HTML writer for rendered trees.

use std::fmt::Display;

use pulldown_cmark::{Event as MarkdownEvent, Parser, html::push_html};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{RenderError, Result};
use crate::node::RenderedNode;

const STYLE: &str = "body { font-family: sans-serif; } \
    .indented { margin-left: 4em; } \
    .detail { color: #777; } \
    iframe { width: 100%; border: 1px solid #ccc; }";

fn xml_error(err: impl Display) -> RenderError {
    RenderError::Html(err.to_string())
}

struct HtmlWriter {
    writer: Writer<Vec<u8>>,
}

impl HtmlWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer
            .write_event(Event::Start(element))
            .map_err(xml_error)
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_error)
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)
    }

    /// Writes already-escaped markup.
    fn raw(&mut self, html: &str) -> Result<()> {
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(html)))
            .map_err(xml_error)
    }

    fn element(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attributes)?;
        self.text(text)?;
        self.end(name)
    }

    fn node(&mut self, node: &RenderedNode) -> Result<()> {
        match node {
            RenderedNode::Empty => Ok(()),
            RenderedNode::Text(text) => self.text(text),
            RenderedNode::Inline(children) => {
                self.start("span", &[])?;
                for child in children {
                    self.node(child)?;
                }
                self.end("span")
            }
            RenderedNode::Block(children) => self.lines(children, &[]),
            RenderedNode::Indented(children) => self.lines(children, &[("class", "indented")]),
            RenderedNode::Detail(inner) => {
                self.start("span", &[("class", "detail")])?;
                self.node(inner)?;
                self.end("span")
            }
            RenderedNode::Heading { level, text } => {
                let tag = format!("h{}", (*level).clamp(1, 6));
                self.element(&tag, &[], text)
            }
            RenderedNode::Link { label, href } => {
                self.element("a", &[("href", href.as_str())], label)
            }
            RenderedNode::Prose(markdown) => {
                let mut html = String::new();
                push_html(&mut html, Parser::new(markdown).map(escape_raw_html));
                self.start("div", &[("class", "prose")])?;
                self.raw(&html)?;
                self.end("div")
            }
            RenderedNode::Code { language, code } => {
                let class = format!("language-{language}");
                self.start("pre", &[])?;
                self.element("code", &[("class", class.as_str())], code)?;
                self.end("pre")
            }
            RenderedNode::Embedded { title, document } => {
                let attributes = [("title", title.as_str()), ("srcdoc", document.as_str())];
                self.start("iframe", &attributes)?;
                self.end("iframe")
            }
            RenderedNode::Preformatted(text) => self.element("pre", &[], text),
        }
    }

    /// A `div` holding one line per child; block-level children are their
    /// own line already.
    fn lines(&mut self, children: &[RenderedNode], attributes: &[(&str, &str)]) -> Result<()> {
        self.start("div", attributes)?;
        for child in children {
            if child.is_empty() {
                continue;
            }
            if is_block_level(child) {
                self.node(child)?;
            } else {
                self.start("div", &[])?;
                self.node(child)?;
                self.end("div")?;
            }
        }
        self.end("div")
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner()).map_err(xml_error)
    }
}

/// Raw HTML in comments is shown as text, never passed through.
fn escape_raw_html(event: MarkdownEvent<'_>) -> MarkdownEvent<'_> {
    match event {
        MarkdownEvent::Html(html) | MarkdownEvent::InlineHtml(html) => MarkdownEvent::Text(html),
        other => other,
    }
}

fn is_block_level(node: &RenderedNode) -> bool {
    matches!(
        node,
        RenderedNode::Block(_)
            | RenderedNode::Indented(_)
            | RenderedNode::Heading { .. }
            | RenderedNode::Prose(_)
            | RenderedNode::Code { .. }
            | RenderedNode::Preformatted(_)
    )
}

/// Renders `node` as an HTML fragment.
pub fn to_html(node: &RenderedNode) -> Result<String> {
    let mut writer = HtmlWriter::new();
    writer.node(node)?;
    writer.finish()
}

/// Renders `node` as a complete HTML page titled `title`.
pub fn html_document(title: &str, node: &RenderedNode) -> Result<String> {
    let mut writer = HtmlWriter::new();
    writer
        .writer
        .write_event(Event::DocType(BytesText::from_escaped("html")))
        .map_err(xml_error)?;
    writer.start("html", &[])?;
    writer.start("head", &[])?;
    writer
        .writer
        .write_event(Event::Empty(
            BytesStart::new("meta").with_attributes([("charset", "utf-8")]),
        ))
        .map_err(xml_error)?;
    writer.element("title", &[], title)?;
    writer.element("style", &[], STYLE)?;
    writer.end("head")?;
    writer.start("body", &[])?;
    writer.node(node)?;
    writer.end("body")?;
    writer.end("html")?;
    writer.finish()
}
