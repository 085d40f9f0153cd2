//! Non-fatal problems found while rendering a document.

use std::fmt;

use catln_model::Unrecognized;
use tracing::warn;

/// What went wrong with a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The node's tag is not part of its grammar.
    UnknownTag,
    /// The tag is known but its contents have the wrong shape.
    MalformedNode,
    /// A global annotation has no computed value at its position.
    MissingAnnotation,
    /// A computed value has an unknown tag or tuple name.
    UnknownValue,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::UnknownTag => "unknown-tag",
            DiagnosticKind::MalformedNode => "malformed-node",
            DiagnosticKind::MissingAnnotation => "missing-annotation",
            DiagnosticKind::UnknownValue => "unknown-value",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Grammar the node belongs to: `statement`, `expression`, `type`, ...
    pub grammar: &'static str,
    pub tag: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.grammar, self.kind)?;
        if let Some(tag) = &self.tag {
            write!(f, " '{tag}'")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Collects diagnostics in the order they were found, logging each one.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!(
            kind = %diagnostic.kind,
            grammar = diagnostic.grammar,
            tag = diagnostic.tag.as_deref().unwrap_or(""),
            "{}",
            diagnostic.message
        );
        self.items.push(diagnostic);
    }

    pub fn unrecognized(&mut self, grammar: &'static str, node: &Unrecognized) {
        let kind = if node.is_unknown_tag() {
            DiagnosticKind::UnknownTag
        } else {
            DiagnosticKind::MalformedNode
        };
        self.push(Diagnostic {
            kind,
            grammar,
            tag: node.tag.clone(),
            message: node.reason.clone(),
        });
    }

    pub fn report(
        &mut self,
        kind: DiagnosticKind,
        grammar: &'static str,
        message: impl Into<String>,
    ) {
        self.push(Diagnostic {
            kind,
            grammar,
            tag: None,
            message: message.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_nodes_map_to_kinds() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.unrecognized("statement", &Unrecognized::unknown_tag("Bogus"));
        diagnostics.unrecognized("type", &Unrecognized::malformed("SumType", "expected a list"));
        let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, [DiagnosticKind::UnknownTag, DiagnosticKind::MalformedNode]);
        assert_eq!(
            diagnostics.iter().next().unwrap().to_string(),
            "statement unknown-tag 'Bogus': unknown tag 'Bogus'"
        );
    }
}
