//! JSON format output for the schema graph.

use crate::graph::infer::PRIMARY_KEY_COLUMN;
use crate::graph::view::GraphView;
use serde::Serialize;

/// JSON representation of the graph
#[derive(Debug, Serialize)]
pub struct ErdJson {
    pub tables: Vec<TableJson>,
    pub relationships: Vec<RelationshipJson>,
    pub stats: ErdStats,
}

/// JSON representation of a table with full column details
#[derive(Debug, Serialize)]
pub struct TableJson {
    pub name: String,
    pub columns: Vec<ColumnJson>,
}

/// JSON representation of a column
#[derive(Debug, Serialize)]
pub struct ColumnJson {
    pub name: String,
    #[serde(rename = "type")]
    pub col_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub is_primary_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references_table: Option<String>,
}

/// JSON representation of an inferred relationship
#[derive(Debug, Serialize)]
pub struct RelationshipJson {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
}

/// Graph statistics
#[derive(Debug, Serialize)]
pub struct ErdStats {
    pub table_count: usize,
    pub column_count: usize,
    pub relationship_count: usize,
}

/// Generate JSON output from a graph view
pub fn to_json(view: &GraphView<'_>) -> String {
    let erd = build_erd_json(view);
    serde_json::to_string_pretty(&erd).unwrap_or_else(|_| "{}".to_string())
}

/// Build the JSON structure
pub fn build_erd_json(view: &GraphView<'_>) -> ErdJson {
    let tables = view
        .tables
        .iter()
        .map(|table| TableJson {
            name: table.name.clone(),
            columns: table
                .columns
                .iter()
                .map(|col| ColumnJson {
                    name: col.name.clone(),
                    col_type: col.col_type.clone(),
                    comment: col.comment.clone(),
                    is_primary_key: col.name == PRIMARY_KEY_COLUMN,
                    references_table: view
                        .reference_target(&table.name, &col.name)
                        .map(str::to_string),
                })
                .collect(),
        })
        .collect();

    let relationships = view
        .edges
        .iter()
        .map(|e| RelationshipJson {
            from_table: e.dependency.source.clone(),
            from_column: e.dependency.column.clone(),
            to_table: e.dependency.target.clone(),
        })
        .collect();

    ErdJson {
        tables,
        relationships,
        stats: ErdStats {
            table_count: view.table_count(),
            column_count: view.column_count(),
            relationship_count: view.edge_count(),
        },
    }
}
