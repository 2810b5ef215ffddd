//! Schema loading from a database catalog.
//!
//! A catalog source yields flat `(table, column, type, comment)` rows in
//! table/ordinal order; [`group_rows`] folds them into tables that keep the
//! column order of the catalog.

mod loader;

pub use loader::DuckDbCatalog;

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while reading the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to open catalog connection to {target}: {source}")]
    Connect {
        target: String,
        source: duckdb::Error,
    },

    #[error("failed to load the {extension} extension: {source}")]
    Extension {
        extension: &'static str,
        source: duckdb::Error,
    },

    #[error("catalog query failed: {0}")]
    Query(#[from] duckdb::Error),
}

/// One row of catalog metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub table_name: String,
    pub column_name: String,
    pub column_type: String,
    pub column_comment: Option<String>,
}

impl CatalogRow {
    pub fn new(table: &str, column: &str, col_type: &str, comment: Option<&str>) -> Self {
        Self {
            table_name: table.to_string(),
            column_name: column.to_string(),
            column_type: col_type.to_string(),
            column_comment: comment.map(str::to_string),
        }
    }
}

/// A column of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub col_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Column {
    pub fn new(name: &str, col_type: &str) -> Self {
        Self {
            name: name.to_string(),
            col_type: col_type.to_string(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = normalize_comment(Some(comment.to_string()));
        self
    }
}

/// A table and its columns in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: &str, columns: Vec<Column>) -> Self {
        Self {
            name: name.to_string(),
            columns,
        }
    }
}

/// Anything that can produce catalog rows
pub trait CatalogSource {
    fn fetch_rows(&self) -> Result<Vec<CatalogRow>, CatalogError>;
}

impl CatalogSource for Vec<CatalogRow> {
    fn fetch_rows(&self) -> Result<Vec<CatalogRow>, CatalogError> {
        Ok(self.clone())
    }
}

/// Group catalog rows into tables keyed by name.
///
/// Column order within a table follows row order.
pub fn group_rows<I>(rows: I) -> BTreeMap<String, Table>
where
    I: IntoIterator<Item = CatalogRow>,
{
    let mut tables: BTreeMap<String, Table> = BTreeMap::new();

    for row in rows {
        let table = tables
            .entry(row.table_name.clone())
            .or_insert_with(|| Table {
                name: row.table_name.clone(),
                columns: Vec::new(),
            });

        table.columns.push(Column {
            name: row.column_name,
            col_type: row.column_type,
            comment: normalize_comment(row.column_comment),
        });
    }

    tables
}

/// Catalogs report "no comment" as either NULL or an empty string
fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment.filter(|c| !c.is_empty())
}
