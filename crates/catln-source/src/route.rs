//! Mapping browser paths to views and server paths.

use std::fmt;
use std::str::FromStr;

use catln_model::{decode_page_id, encode_page_id};

use crate::error::RouteError;

/// The views the WebDocs application offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Typecheck,
    Desugar,
    Constrain,
    Llvm,
    Docs,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Typecheck,
        View::Desugar,
        View::Constrain,
        View::Llvm,
        View::Docs,
    ];

    /// Server path that serves the payload of this view.
    #[must_use]
    pub fn source_path(self) -> &'static str {
        match self {
            Self::Typecheck => "/typecheck",
            Self::Desugar => "/desugar",
            Self::Constrain => "/constrain",
            Self::Llvm => "/llvm",
            Self::Docs => "/pages",
        }
    }

    /// Short name used in logs and payload errors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Typecheck => "typecheck",
            Self::Desugar => "desugar",
            Self::Constrain => "constrain",
            Self::Llvm => "llvm",
            Self::Docs => "docs",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Typecheck => "Typecheck",
            Self::Desugar => "Desugar",
            Self::Constrain => "Constrain",
            Self::Llvm => "LLVM",
            Self::Docs => "Docs",
        }
    }
}

/// A parsed browser path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub view: View,
    /// Selected documentation page, already decoded.
    pub page: Option<String>,
}

impl Route {
    #[must_use]
    pub fn new(view: View) -> Self {
        Self { view, page: None }
    }

    #[must_use]
    pub fn docs_page(page: impl Into<String>) -> Self {
        Self {
            view: View::Docs,
            page: Some(page.into()),
        }
    }

    /// Parses `/`, `/desugar`, `/constrain`, `/llvm`, `/docs` and
    /// `/docs/<page id>`. Query strings and fragments are ignored.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim()
            .trim_matches('/');

        let view = match trimmed {
            "" | "typecheck" => View::Typecheck,
            "desugar" => View::Desugar,
            "constrain" => View::Constrain,
            "llvm" => View::Llvm,
            "docs" => View::Docs,
            _ => {
                let Some(id) = trimmed.strip_prefix("docs/") else {
                    return Err(RouteError::UnknownRoute(path.to_string()));
                };
                if id.contains('/') {
                    return Err(RouteError::UnknownRoute(path.to_string()));
                }
                let page = decode_page_id(id)?;
                if page.is_empty() {
                    return Err(RouteError::EmptyPage(path.to_string()));
                }
                return Ok(Self::docs_page(page));
            }
        };
        Ok(Self::new(view))
    }

    /// Server path that serves the payload of this route.
    #[must_use]
    pub fn source_path(&self) -> &'static str {
        self.view.source_path()
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.view, &self.page) {
            (View::Typecheck, _) => f.write_str("/"),
            (View::Docs, Some(page)) => write!(f, "/docs/{}", encode_page_id(page)),
            (view, _) => write!(f, "/{}", view.name()),
        }
    }
}
