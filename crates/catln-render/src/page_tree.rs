//! Table of contents built from slash-delimited page names.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

/// Page that is listed first at whichever level it appears.
pub const MAIN_PAGE: &str = "main.ct";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageTreeError {
    /// A segment is used both as a page and as a directory at the same level.
    #[error("page '{page}' uses '{segment}' both as a page and as a directory")]
    SegmentConflict { page: String, segment: String },
}

/// A directory of pages, or a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTree {
    Directory(BTreeMap<String, PageTree>),
    Page,
}

/// One line of the depth-first listing of a [`PageTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub depth: usize,
    pub label: String,
    /// Full page name for pages, `None` for directories.
    pub path: Option<String>,
}

impl Default for PageTree {
    fn default() -> Self {
        PageTree::Directory(BTreeMap::new())
    }
}

impl PageTree {
    /// Builds the tree for a set of page names.
    ///
    /// Names are placed in sorted order, so the result depends only on the
    /// set. A name that conflicts with one already placed is left out and
    /// returned with the tree.
    pub fn build<'a>(
        page_names: impl IntoIterator<Item = &'a str>,
    ) -> (PageTree, Vec<PageTreeError>) {
        let names: BTreeSet<&str> = page_names.into_iter().collect();
        let mut root = BTreeMap::new();
        let mut conflicts = Vec::new();
        for page in names {
            if let Err(conflict) = insert(&mut root, page) {
                conflicts.push(conflict);
            }
        }
        (PageTree::Directory(root), conflicts)
    }

    /// Children in listing order: `main.ct` first, then the rest by name.
    pub fn ordered_children(&self) -> Vec<(&str, &PageTree)> {
        let PageTree::Directory(children) = self else {
            return Vec::new();
        };
        let mut ordered: Vec<(&str, &PageTree)> = children
            .iter()
            .map(|(segment, child)| (segment.as_str(), child))
            .collect();
        if let Some(main_pos) = ordered.iter().position(|(segment, _)| *segment == MAIN_PAGE) {
            let main = ordered.remove(main_pos);
            ordered.insert(0, main);
        }
        ordered
    }

    /// Depth-first listing in the order the table of contents shows it.
    pub fn entries(&self) -> Vec<TocEntry> {
        let mut entries = Vec::new();
        collect_entries(self, "", 0, &mut entries);
        entries
    }

    /// Names of every page in the tree, in listing order.
    pub fn page_names(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| entry.path)
            .collect()
    }
}

fn insert(root: &mut BTreeMap<String, PageTree>, page: &str) -> Result<(), PageTreeError> {
    let conflict = |segment: &str| PageTreeError::SegmentConflict {
        page: page.to_string(),
        segment: segment.to_string(),
    };
    let mut segments: Vec<&str> = page.split('/').collect();
    let leaf = segments.pop().unwrap_or_default();

    let mut level = root;
    for segment in segments {
        let child = level
            .entry(segment.to_string())
            .or_insert_with(PageTree::default);
        level = match child {
            PageTree::Directory(children) => children,
            PageTree::Page => return Err(conflict(segment)),
        };
    }
    match level.get(leaf) {
        Some(PageTree::Directory(_)) => Err(conflict(leaf)),
        Some(PageTree::Page) => Ok(()),
        None => {
            level.insert(leaf.to_string(), PageTree::Page);
            Ok(())
        }
    }
}

fn collect_entries(tree: &PageTree, prefix: &str, depth: usize, out: &mut Vec<TocEntry>) {
    for (segment, child) in tree.ordered_children() {
        let path = if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{prefix}/{segment}")
        };
        match child {
            PageTree::Page => out.push(TocEntry {
                depth,
                label: segment.to_string(),
                path: Some(path),
            }),
            PageTree::Directory(_) => {
                out.push(TocEntry {
                    depth,
                    label: segment.to_string(),
                    path: None,
                });
                collect_entries(child, &path, depth + 1, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(tree: &PageTree) -> Vec<&str> {
        tree.ordered_children().into_iter().map(|(s, _)| s).collect()
    }

    #[test]
    fn builds_directories_from_prefixes() {
        let tree = tree(&["std/list.ct", "std/data/maybe.ct", "main.ct"]);
        assert_eq!(labels(&tree), ["main.ct", "std"]);
        let entries = tree.entries();
        let listing: Vec<(usize, &str, Option<&str>)> = entries
            .iter()
            .map(|e| (e.depth, e.label.as_str(), e.path.as_deref()))
            .collect();
        assert_eq!(
            listing,
            [
                (0, "main.ct", Some("main.ct")),
                (0, "std", None),
                (1, "data", None),
                (2, "maybe.ct", Some("std/data/maybe.ct")),
                (1, "list.ct", Some("std/list.ct")),
            ]
        );
    }

    #[test]
    fn main_page_goes_first_in_subdirectories() {
        let tree = tree(&["lib/a.ct", "lib/main.ct", "lib/z.ct"]);
        let (_, lib) = tree.ordered_children()[0];
        assert_eq!(labels(lib), ["main.ct", "a.ct", "z.ct"]);
    }

    #[test]
    fn main_directory_also_goes_first() {
        let tree = tree(&["a.ct", "main.ct/inner.ct"]);
        assert_eq!(labels(&tree), ["main.ct", "a.ct"]);
    }

    fn tree(names: &[&str]) -> PageTree {
        let (tree, conflicts) = PageTree::build(names.iter().copied());
        assert!(conflicts.is_empty(), "{conflicts:?}");
        tree
    }

    #[test]
    fn conflicting_name_is_left_out() {
        let (tree, conflicts) = PageTree::build(["a", "a/b.ct", "main.ct"]);
        assert_eq!(
            conflicts,
            [PageTreeError::SegmentConflict {
                page: "a/b.ct".to_string(),
                segment: "a".to_string()
            }]
        );
        assert_eq!(tree.page_names(), ["main.ct", "a"]);

        let (reversed, _) = PageTree::build(["main.ct", "a/b.ct", "a"]);
        assert_eq!(reversed, tree);
    }

    #[test]
    fn page_blocks_deeper_names_below_it() {
        let (tree, conflicts) = PageTree::build(["x/y", "x/y/z/w.ct"]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(
            tree.entries().len(),
            2,
            "only x/ and x/y should be listed: {:?}",
            tree.entries()
        );
    }

    #[test]
    fn duplicate_names_are_ignored() {
        let once = tree(&["x/y.ct"]);
        let twice = tree(&["x/y.ct", "x/y.ct"]);
        assert_eq!(once, twice);
        assert_eq!(once.page_names(), ["x/y.ct"]);
    }
}
