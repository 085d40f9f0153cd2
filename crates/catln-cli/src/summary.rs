use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use catln_model::{Document, Page};
use catln_render::{PageTree, docs_href};
use serde_json::Value;
use tracing::warn;

/// Table of the pages in a documentation payload, in table-of-contents order.
///
/// Pages whose names clash with a directory are left out with a warning.
pub fn page_table(document: &Document) -> Table {
    let (tree, conflicts) = PageTree::build(document.page_names());
    for conflict in conflicts {
        warn!(%conflict, "page left out of the table");
    }
    let default = document.default_page().map(|page| page.name.as_str());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Page"),
        header_cell("Statements"),
        header_cell("Dependencies"),
        header_cell("Link"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    for name in tree.page_names() {
        let Some(page) = document.page(&name) else {
            continue;
        };
        let name_cell = if Some(name.as_str()) == default {
            Cell::new(&name).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&name)
        };
        table.add_row(vec![
            name_cell,
            Cell::new(page.statements.len()),
            Cell::new(dependency_count(page)),
            Cell::new(docs_href(&name)).fg(Color::Blue),
        ]);
    }
    table
}

fn dependency_count(page: &Page) -> usize {
    match &page.deps {
        Value::Array(deps) => deps.len(),
        Value::Object(deps) => deps.len(),
        Value::Null => 0,
        _ => 1,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use catln_model::decode_payload;
    use serde_json::json;

    use super::*;

    fn page(name: &str, deps: Value) -> Value {
        json!([[[{"tag": "TopType"}, null], []], name, deps])
    }

    #[test]
    fn pages_are_listed_in_contents_order() {
        let document: Document = decode_payload(
            "docs",
            json!([[page("std/eq.ct", json!([])), page("main.ct", json!(["std/eq.ct"]))], []]),
        )
        .unwrap();
        let rendered = page_table(&document).to_string();
        let main = rendered.find("main.ct").unwrap();
        let eq = rendered.find("std/eq.ct").unwrap();
        assert!(main < eq, "{rendered}");
        assert!(rendered.contains("/docs/std%2Feq.ct"));
    }
}
