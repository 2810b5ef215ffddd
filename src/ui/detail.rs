//! Plain-text table details for the detail and related-tables panels.

use crate::catalog::Table;
use crate::graph::SchemaSnapshot;

/// Detail panel text while nothing is selected
pub const DETAIL_PLACEHOLDER: &str = "Click on a node to see details.";

/// Related panel text for a selected table without neighbors
pub const NO_RELATED_TABLES: &str = "No related tables.";

/// Format a table as its name, a dash underline and one line per column.
///
/// ```text
/// orders
/// ------
/// - id: INTEGER
/// - user_id: INTEGER buyer
/// ```
pub fn format_table_details(table: &Table) -> String {
    let mut lines = Vec::with_capacity(table.columns.len() + 2);
    lines.push(table.name.clone());
    lines.push("-".repeat(table.name.chars().count()));

    for col in &table.columns {
        let mut line = format!("- {}: {}", col.name, col.col_type);
        if let Some(comment) = col.comment.as_deref().filter(|c| !c.is_empty()) {
            line.push(' ');
            line.push_str(comment);
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Details of every neighbor of `table`, name-sorted, separated by a blank line
pub fn format_related_tables(snapshot: &SchemaSnapshot, table: &str) -> String {
    let blocks: Vec<String> = snapshot
        .neighbors(table)
        .into_iter()
        .filter_map(|name| snapshot.table(name))
        .map(format_table_details)
        .collect();

    if blocks.is_empty() {
        NO_RELATED_TABLES.to_string()
    } else {
        blocks.join("\n\n")
    }
}

/// Text of the detail and related panels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panels {
    pub detail: String,
    pub related: String,
}

impl Panels {
    /// Panels for the current selection; an unknown table counts as no selection
    pub fn for_selection(snapshot: &SchemaSnapshot, selection: Option<&str>) -> Self {
        match selection.and_then(|name| snapshot.table(name)) {
            Some(table) => Self {
                detail: format_table_details(table),
                related: format_related_tables(snapshot, &table.name),
            },
            None => Self::unselected(),
        }
    }

    pub fn unselected() -> Self {
        Self {
            detail: DETAIL_PLACEHOLDER.to_string(),
            related: String::new(),
        }
    }
}
