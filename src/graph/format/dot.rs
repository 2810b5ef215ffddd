//! Graphviz DOT format output for ERD diagrams.

use crate::catalog::Table;
use crate::graph::view::GraphView;

/// Generate DOT format output with ERD-style tables showing all columns
pub fn to_dot(view: &GraphView<'_>) -> String {
    let mut output = String::new();

    output.push_str("digraph ERD {\n");
    output.push_str("  graph [pad=\"0.5\", nodesep=\"1\", ranksep=\"1.5\"];\n");
    output.push_str("  rankdir=LR;\n");
    output.push_str("  node [shape=none, margin=0];\n");
    output.push_str("  edge [arrowhead=crow, arrowtail=none, dir=both];\n\n");

    for table in &view.tables {
        output.push_str(&format!(
            "  {} [label=<{}>];\n",
            escape_dot_id(&table.name),
            table_label(view, table)
        ));
    }

    if !view.edges.is_empty() {
        output.push('\n');
    }

    // Edges leave from the reference column's port
    for edge in &view.edges {
        let dep = edge.dependency;
        output.push_str(&format!(
            "  {}:{} -> {} [label=\"{}\"];\n",
            escape_dot_id(&dep.source),
            escape_dot_id(&dep.column),
            escape_dot_id(&dep.target),
            dep.column.replace('"', "\\\"")
        ));
    }

    output.push_str("}\n");
    output
}

/// HTML-like table label
fn table_label(view: &GraphView<'_>, table: &Table) -> String {
    let mut html = String::new();

    html.push_str("<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"4\">");
    html.push_str(&format!(
        "<TR><TD BGCOLOR=\"#4a5568\" COLSPAN=\"3\"><FONT COLOR=\"white\"><B>{}</B></FONT></TD></TR>",
        escape_html(&table.name)
    ));

    for col in &table.columns {
        let comment = col
            .comment
            .as_deref()
            .map(|c| format!(" <FONT COLOR=\"#888888\">{}</FONT>", escape_html(c)))
            .unwrap_or_default();

        html.push_str("<TR>");
        html.push_str(&format!(
            "<TD ALIGN=\"LEFT\" PORT=\"{}\">{}{}</TD>",
            escape_html(&col.name),
            escape_html(&col.name),
            comment
        ));
        html.push_str(&format!(
            "<TD ALIGN=\"LEFT\"><FONT COLOR=\"#666666\">{}</FONT></TD>",
            escape_html(&col.col_type)
        ));
        html.push_str(&format!(
            "<TD ALIGN=\"CENTER\">{}</TD>",
            view.key_marker(&table.name, &col.name).unwrap_or_default()
        ));
        html.push_str("</TR>");
    }

    html.push_str("</TABLE>");
    html
}

/// Escape a string for use in DOT HTML labels
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape a string for use as a DOT node ID
fn escape_dot_id(s: &str) -> String {
    if s.chars().all(|c| c.is_alphanumeric() || c == '_') && !s.is_empty() {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
