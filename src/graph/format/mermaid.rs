//! Mermaid erDiagram format output.

use crate::graph::view::GraphView;

/// Every inferred reference is drawn as many-to-one
const MANY_TO_ONE: &str = "}o--||";

/// Generate Mermaid erDiagram from a graph view
pub fn to_mermaid(view: &GraphView<'_>) -> String {
    let mut output = String::new();

    output.push_str("erDiagram\n");

    for table in &view.tables {
        let safe_name = escape_mermaid_id(&table.name);
        output.push_str(&format!("    {} {{\n", safe_name));

        for col in &table.columns {
            let col_type = escape_mermaid_type(&col.col_type);
            let col_name = escape_mermaid_id(&col.name);

            match view.key_marker(&table.name, &col.name) {
                Some(marker) => output.push_str(&format!(
                    "        {} {} {}\n",
                    col_type, col_name, marker
                )),
                None => output.push_str(&format!("        {} {}\n", col_type, col_name)),
            }
        }

        output.push_str("    }\n");
    }

    if !view.edges.is_empty() {
        output.push('\n');
    }

    for edge in &view.edges {
        let dep = edge.dependency;
        output.push_str(&format!(
            "    {} {} {} : \"{}\"\n",
            escape_mermaid_id(&dep.source),
            MANY_TO_ONE,
            escape_mermaid_id(&dep.target),
            escape_mermaid_label(&dep.column)
        ));
    }

    output
}

/// Escape a string for use as a Mermaid entity ID
fn escape_mermaid_id(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Escape a relationship label; Mermaid spells a double quote as `#quot;`
fn escape_mermaid_label(s: &str) -> String {
    s.replace('"', "#quot;")
}

/// Escape a type string for Mermaid (no spaces, special chars)
fn escape_mermaid_type(s: &str) -> String {
    // Drop the length/precision suffix
    let base = match s.find('(') {
        Some(paren_pos) => &s[..paren_pos],
        None => s,
    };
    escape_mermaid_id(base.trim())
}
