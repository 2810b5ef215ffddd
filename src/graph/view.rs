//! Filtered graph view and Cytoscape element building.

use crate::catalog::Table;
use crate::graph::infer::{Dependency, PRIMARY_KEY_COLUMN};
use crate::graph::snapshot::SchemaSnapshot;
use ahash::AHashSet;
use serde::Serialize;

/// An edge kept by a view, with its position in the snapshot's dependency list
#[derive(Debug, Clone, Copy)]
pub struct ViewEdge<'a> {
    pub index: usize,
    pub dependency: &'a Dependency,
}

impl ViewEdge<'_> {
    /// Stable element id; the index keeps duplicate edges apart
    pub fn id(&self) -> String {
        format!(
            "{}->{}#{}",
            self.dependency.source, self.dependency.target, self.index
        )
    }
}

/// Tables whose name matches a filter, and the edges between them
#[derive(Debug)]
pub struct GraphView<'a> {
    /// Matching tables sorted by name
    pub tables: Vec<&'a Table>,
    /// Dependencies whose both endpoints matched
    pub edges: Vec<ViewEdge<'a>>,
    names: AHashSet<&'a str>,
}

impl<'a> GraphView<'a> {
    /// Apply a case-insensitive substring filter on table names.
    ///
    /// The empty filter keeps every table.
    pub fn filtered(snapshot: &'a SchemaSnapshot, filter: &str) -> Self {
        let needle = filter.to_lowercase();

        let tables: Vec<&Table> = snapshot
            .tables()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .collect();
        let names: AHashSet<&str> = tables.iter().map(|t| t.name.as_str()).collect();

        let edges = snapshot
            .dependencies()
            .iter()
            .enumerate()
            .filter(|(_, d)| {
                names.contains(d.source.as_str()) && names.contains(d.target.as_str())
            })
            .map(|(index, dependency)| ViewEdge { index, dependency })
            .collect();

        Self {
            tables,
            edges,
            names,
        }
    }

    /// Whether a table survived the filter
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names of the tables in the view, sorted
    pub fn table_names(&self) -> Vec<&'a str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Table referenced by `table.column` through an edge of this view
    pub fn reference_target(&self, table: &str, column: &str) -> Option<&'a str> {
        self.edges
            .iter()
            .find(|e| e.dependency.source == table && e.dependency.column == column)
            .map(|e| e.dependency.target.as_str())
    }

    /// Key marker for a column: `PK`, `FK` or nothing
    pub fn key_marker(&self, table: &str, column: &str) -> Option<&'static str> {
        if column == PRIMARY_KEY_COLUMN {
            Some("PK")
        } else if self.reference_target(table, column).is_some() {
            Some("FK")
        } else {
            None
        }
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Node and edge elements for the graph widget, without styling classes
    pub fn elements(&self) -> Vec<Element> {
        let nodes = self.tables.iter().map(|t| Element::node(&t.name));
        let edges = self.edges.iter().map(Element::edge);
        nodes.chain(edges).collect()
    }
}

/// Cytoscape element group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementGroup {
    Nodes,
    Edges,
}

/// Cytoscape element `data` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementData {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

/// One node or edge of the rendered graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub group: ElementGroup,
    pub data: ElementData,
    /// Style classes (`selected`, `neighbor`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<&'static str>,
}

impl Element {
    pub fn node(table: &str) -> Self {
        Self {
            group: ElementGroup::Nodes,
            data: ElementData {
                id: table.to_string(),
                label: Some(table.to_string()),
                source: None,
                target: None,
                column: None,
            },
            classes: Vec::new(),
        }
    }

    pub fn edge(edge: &ViewEdge<'_>) -> Self {
        Self {
            group: ElementGroup::Edges,
            data: ElementData {
                id: edge.id(),
                label: None,
                source: Some(edge.dependency.source.clone()),
                target: Some(edge.dependency.target.clone()),
                column: Some(edge.dependency.column.clone()),
            },
            classes: Vec::new(),
        }
    }

    pub fn is_node(&self) -> bool {
        self.group == ElementGroup::Nodes
    }

    /// Whether this is an edge incident to `table`
    pub fn touches(&self, table: &str) -> bool {
        self.data.source.as_deref() == Some(table)
            || self.data.target.as_deref() == Some(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRow;
    use crate::graph::infer::ReferenceMatching;

    fn create_test_snapshot() -> SchemaSnapshot {
        SchemaSnapshot::from_rows(
            vec![
                CatalogRow::new("Customer", "id", "INTEGER", None),
                CatalogRow::new("customer_note", "id", "INTEGER", None),
                CatalogRow::new("customer_note", "Customer_id", "INTEGER", None),
                CatalogRow::new("invoice", "id", "INTEGER", None),
                CatalogRow::new("invoice", "Customer_id", "INTEGER", None),
                CatalogRow::new("invoice", "Customer_id", "INTEGER", None),
            ],
            ReferenceMatching::Exact,
        )
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let snapshot = create_test_snapshot();
        let view = snapshot.view("");
        assert_eq!(view.table_count(), 3);
        assert_eq!(view.edge_count(), 3);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let snapshot = create_test_snapshot();
        let view = snapshot.view("CUSTOMER");
        assert_eq!(view.table_names(), vec!["Customer", "customer_note"]);
        assert_eq!(view.edge_count(), 1);
        assert!(view.contains("Customer"));
        assert!(!view.contains("invoice"));
    }

    #[test]
    fn test_edges_need_both_endpoints() {
        let snapshot = create_test_snapshot();
        let view = snapshot.view("invoice");
        assert_eq!(view.table_count(), 1);
        assert_eq!(view.edge_count(), 0);
    }

    #[test]
    fn test_no_match() {
        let snapshot = create_test_snapshot();
        let view = snapshot.view("zzz");
        assert!(view.is_empty());
        assert!(view.elements().is_empty());
    }

    #[test]
    fn test_duplicate_edges_get_distinct_ids() {
        let snapshot = create_test_snapshot();
        let view = snapshot.view("");
        let ids: AHashSet<String> = view.edges.iter().map(ViewEdge::id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_key_markers() {
        let snapshot = create_test_snapshot();
        let view = snapshot.view("");
        assert_eq!(view.key_marker("invoice", "id"), Some("PK"));
        assert_eq!(view.key_marker("invoice", "Customer_id"), Some("FK"));
        assert_eq!(view.reference_target("invoice", "Customer_id"), Some("Customer"));

        let narrowed = snapshot.view("invoice");
        assert_eq!(narrowed.key_marker("invoice", "Customer_id"), None);
    }

    #[test]
    fn test_elements_json_shape() {
        let snapshot = create_test_snapshot();
        let elements = snapshot.view("note").elements();
        let json = serde_json::to_value(&elements).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"group": "nodes", "data": {"id": "customer_note", "label": "customer_note"}}
            ])
        );
    }
}
