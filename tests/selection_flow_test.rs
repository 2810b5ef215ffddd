//! End-to-end selection behavior over a snapshot built from catalog rows.

use schema_graph::catalog::CatalogRow;
use schema_graph::graph::{ReferenceMatching, SchemaSnapshot};
use schema_graph::ui::{Action, Highlight, Store, UiState};
use std::sync::Arc;

fn ecommerce_rows() -> Vec<CatalogRow> {
    vec![
        CatalogRow::new("categories", "id", "int(11)", None),
        CatalogRow::new("categories", "name", "varchar(64)", None),
        CatalogRow::new("order_items", "id", "int(11)", None),
        CatalogRow::new("order_items", "order_id", "int(11)", None),
        CatalogRow::new("order_items", "product_id", "int(11)", None),
        CatalogRow::new("orders", "id", "int(11)", None),
        CatalogRow::new("orders", "user_id", "int(11)", Some("buyer")),
        CatalogRow::new("products", "id", "int(11)", None),
        CatalogRow::new("products", "category_id", "int(11)", None),
        CatalogRow::new("users", "id", "int(11)", None),
        CatalogRow::new("users", "email", "varchar(255)", Some("")),
    ]
}

fn store(matching: ReferenceMatching) -> Store {
    let snapshot = SchemaSnapshot::from_rows(ecommerce_rows(), matching);
    Store::new(Arc::new(snapshot), UiState::default())
}

fn tap(table: &str) -> Action {
    Action::GraphTap {
        table: table.to_string(),
    }
}

#[test]
fn test_exact_matching_finds_no_plural_references() {
    let store = store(ReferenceMatching::Exact);
    assert_eq!(store.snapshot().dependency_count(), 0);

    store.dispatch(&tap("orders"));
    let view = store.view();
    assert_eq!(view.related, "No related tables.");
    assert_eq!(view.detail, "orders\n------\n- id: int(11)\n- user_id: int(11) buyer");
}

#[test]
fn test_selecting_a_junction_table() {
    let store = store(ReferenceMatching::Plural);
    store.dispatch(&Action::ListPick {
        table: "order_items".to_string(),
    });
    let view = store.view();

    let highlighted: Vec<_> = view
        .list
        .iter()
        .map(|item| (item.name.as_str(), item.highlight))
        .collect();
    assert_eq!(
        highlighted,
        vec![
            ("categories", None),
            ("order_items", Some(Highlight::Selected)),
            ("orders", Some(Highlight::Neighbor)),
            ("products", Some(Highlight::Neighbor)),
            ("users", None),
        ]
    );
    assert_eq!(
        view.related,
        "orders\n------\n- id: int(11)\n- user_id: int(11) buyer\n\n\
         products\n--------\n- id: int(11)\n- category_id: int(11)"
    );
}

#[test]
fn test_tap_after_pick_wins_and_stale_tap_clears() {
    let store = store(ReferenceMatching::Plural);
    store.dispatch(&Action::ListPick {
        table: "users".to_string(),
    });
    store.dispatch(&tap("categories"));
    assert_eq!(store.view().selected.as_deref(), Some("categories"));
    assert!(store.view().related.starts_with("products\n--------"));

    assert!(store.dispatch(&tap("dropped_table")));
    let view = store.view();
    assert_eq!(view.selected, None);
    assert_eq!(view.detail, "Click on a node to see details.");
    assert!(view.elements.iter().all(|e| e.classes.is_empty()));
}

#[test]
fn test_empty_comment_adds_nothing() {
    let store = store(ReferenceMatching::Plural);
    store.dispatch(&tap("users"));
    assert!(store.view().detail.ends_with("- email: varchar(255)"));
}

#[test]
fn test_filter_hides_edges_to_hidden_tables() {
    let store = store(ReferenceMatching::Plural);
    store.dispatch(&tap("orders"));
    store.dispatch(&Action::SetFilter {
        filter: "Order".to_string(),
    });

    let view = store.view();
    let edges: Vec<_> = view.elements.iter().filter(|e| !e.is_node()).collect();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].classes, vec!["neighbor"]);
    assert_eq!(view.selected.as_deref(), Some("orders"));
}

#[test]
fn test_self_referencing_table_is_its_own_related_table() {
    let snapshot = SchemaSnapshot::from_rows(
        vec![
            CatalogRow::new("employee", "id", "int(11)", None),
            CatalogRow::new("employee", "employee_id", "int(11)", Some("manager")),
        ],
        ReferenceMatching::Exact,
    );
    let store = Store::new(Arc::new(snapshot), UiState::default());
    assert_eq!(store.snapshot().neighbors("employee"), vec!["employee"]);

    store.dispatch(&tap("employee"));
    let view = store.view();
    assert_eq!(view.related, view.detail);
    assert_eq!(
        view.related,
        "employee\n--------\n- id: int(11)\n- employee_id: int(11) manager"
    );

    // The selected tier wins over the neighbor tier
    assert_eq!(view.list[0].highlight, Some(Highlight::Selected));
    let node = view.elements.iter().find(|e| e.is_node()).unwrap();
    assert_eq!(node.classes, vec!["selected"]);
    let edge = view.elements.iter().find(|e| !e.is_node()).unwrap();
    assert_eq!(edge.classes, vec!["neighbor"]);
}
