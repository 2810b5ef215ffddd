//! Catalog loading from a real DuckDB database file.

use schema_graph::catalog::{CatalogSource, DuckDbCatalog};
use schema_graph::config::{DatabaseConfig, Driver};
use schema_graph::graph::{ReferenceMatching, SchemaSnapshot};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_library_db(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("library.duckdb");
    let conn = duckdb::Connection::open(&path).unwrap();
    conn.execute_batch(
        r#"
CREATE TABLE publisher (id INTEGER, name VARCHAR);
CREATE TABLE author (id INTEGER, name VARCHAR, mentor_id INTEGER);
CREATE TABLE book (
    id INTEGER,
    title VARCHAR(200),
    author_id INTEGER,
    publisher_id INTEGER,
    price DECIMAL(10,2)
);
CREATE TABLE review (id INTEGER, book_id INTEGER, reviewer_id INTEGER, body VARCHAR);
COMMENT ON COLUMN book.title IS 'working title';
COMMENT ON COLUMN review.reviewer_id IS '';
"#,
    )
    .unwrap();
    drop(conn);
    path
}

fn duckdb_config(path: &Path) -> DatabaseConfig {
    DatabaseConfig {
        driver: Driver::Duckdb,
        path: Some(path.to_path_buf()),
        ..Default::default()
    }
}

#[test]
fn test_rows_follow_catalog_order() {
    let dir = TempDir::new().unwrap();
    let path = create_library_db(&dir);
    let catalog = DuckDbCatalog::connect(&duckdb_config(&path)).unwrap();
    assert_eq!(catalog.schema(), "main");

    let rows = catalog.fetch_rows().unwrap();
    assert_eq!(rows.len(), 14);

    let book: Vec<_> = rows
        .iter()
        .filter(|r| r.table_name == "book")
        .map(|r| r.column_name.as_str())
        .collect();
    assert_eq!(book, vec!["id", "title", "author_id", "publisher_id", "price"]);
}

#[test]
fn test_snapshot_from_duckdb() {
    let dir = TempDir::new().unwrap();
    let path = create_library_db(&dir);
    let catalog = DuckDbCatalog::connect(&duckdb_config(&path)).unwrap();
    let snapshot = SchemaSnapshot::load(&catalog, ReferenceMatching::Exact).unwrap();

    assert_eq!(snapshot.table_count(), 4);
    // book -> author, book -> publisher, review -> book; mentor_id and reviewer_id dangle
    assert_eq!(snapshot.dependency_count(), 3);
    assert_eq!(snapshot.neighbors("book"), vec!["author", "publisher", "review"]);

    let book = snapshot.table("book").unwrap();
    let title = &book.columns[1];
    assert_eq!(title.col_type, "VARCHAR");
    assert_eq!(title.comment.as_deref(), Some("working title"));
    assert_eq!(book.columns[4].col_type, "DECIMAL(10,2)");

    let review = snapshot.table("review").unwrap();
    assert_eq!(review.columns[2].comment, None);
}

#[test]
fn test_plural_matching_against_duckdb() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shop.duckdb");
    let conn = duckdb::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE customers (id INTEGER);
         CREATE TABLE categories (id INTEGER, category_id INTEGER);
         CREATE TABLE invoices (id INTEGER, customer_id INTEGER);",
    )
    .unwrap();
    drop(conn);

    let catalog = DuckDbCatalog::connect(&duckdb_config(&path)).unwrap();

    let exact = SchemaSnapshot::load(&catalog, ReferenceMatching::Exact).unwrap();
    assert_eq!(exact.dependency_count(), 0);

    let plural = SchemaSnapshot::load(&catalog, ReferenceMatching::Plural).unwrap();
    assert!(plural.are_neighbors("invoices", "customers"));
    assert_eq!(plural.neighbors("categories"), vec!["categories"]);
    assert_eq!(plural.dependency_count(), 2);
}

#[test]
fn test_missing_schema_yields_empty_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = create_library_db(&dir);
    let config = DatabaseConfig {
        schema: Some("archive".to_string()),
        ..duckdb_config(&path)
    };
    let catalog = DuckDbCatalog::connect(&config).unwrap();
    let snapshot = SchemaSnapshot::load(&catalog, ReferenceMatching::Exact).unwrap();
    assert!(snapshot.is_empty());
}

#[test]
fn test_connect_error_names_target() {
    let dir = TempDir::new().unwrap();
    let config = duckdb_config(&dir.path().join("missing").join("nothing.duckdb"));
    let err = DuckDbCatalog::connect(&config).err().unwrap();
    assert!(err.to_string().contains("nothing.duckdb"));
}
