//! Catalog reader backed by an embedded DuckDB connection.
//!
//! DuckDB files are attached directly; MySQL and PostgreSQL servers are
//! attached through DuckDB's scanner extensions. In every case the attached
//! database is read-only. DuckDB metadata comes from `duckdb_columns()`, while
//! server metadata is queried on the server itself so declared types such as
//! `varchar(255)` and column comments come through unchanged.

use super::{CatalogError, CatalogRow, CatalogSource};
use crate::config::{DatabaseConfig, Driver};
use duckdb::Connection;

/// Name the source database is attached under
const CATALOG_ALIAS: &str = "schema_graph_src";

const MYSQL_COLUMNS: &str = "\
SELECT TABLE_NAME AS table_name, COLUMN_NAME AS column_name, \
COLUMN_TYPE AS column_type, COLUMN_COMMENT AS column_comment, \
ORDINAL_POSITION AS ordinal_position \
FROM INFORMATION_SCHEMA.COLUMNS WHERE TABLE_SCHEMA = {schema}";

const POSTGRES_COLUMNS: &str = "\
SELECT c.table_name::text AS table_name, c.column_name::text AS column_name, \
format_type(a.atttypid, a.atttypmod) AS column_type, \
col_description(a.attrelid, a.attnum) AS column_comment, \
c.ordinal_position::int AS ordinal_position \
FROM information_schema.columns c \
JOIN pg_catalog.pg_namespace n ON n.nspname = c.table_schema \
JOIN pg_catalog.pg_class k ON k.relnamespace = n.oid AND k.relname = c.table_name \
JOIN pg_catalog.pg_attribute a ON a.attrelid = k.oid AND a.attname = c.column_name \
WHERE c.table_schema = {schema}";

/// Reads table/column metadata from an attached database
pub struct DuckDbCatalog {
    conn: Connection,
    driver: Driver,
    schema: String,
}

impl DuckDbCatalog {
    /// Open an in-memory DuckDB and attach the configured database read-only
    pub fn connect(config: &DatabaseConfig) -> Result<Self, CatalogError> {
        let target = config.describe();
        let conn = Connection::open_in_memory().map_err(|source| CatalogError::Connect {
            target: target.clone(),
            source,
        })?;

        if let Some(extension) = scanner_extension(config.driver) {
            conn.execute_batch(&format!("INSTALL {extension}; LOAD {extension};"))
                .map_err(|source| CatalogError::Extension { extension, source })?;
        }

        conn.execute_batch(&attach_statement(config))
            .map_err(|source| CatalogError::Connect { target, source })?;

        Ok(Self {
            conn,
            driver: config.driver,
            schema: config.effective_schema(),
        })
    }

    /// Schema the catalog query filters on
    pub fn schema(&self) -> &str {
        &self.schema
    }
}

impl CatalogSource for DuckDbCatalog {
    fn fetch_rows(&self) -> Result<Vec<CatalogRow>, CatalogError> {
        let mut stmt = self.conn.prepare(&catalog_query(self.driver, &self.schema))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CatalogRow {
                    table_name: row.get(0)?,
                    column_name: row.get(1)?,
                    column_type: row.get(2)?,
                    column_comment: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn scanner_extension(driver: Driver) -> Option<&'static str> {
    match driver {
        Driver::Mysql => Some("mysql"),
        Driver::Postgres => Some("postgres"),
        Driver::Duckdb => None,
    }
}

/// Ordered `(table, column, type, comment)` query for the attached source
fn catalog_query(driver: Driver, schema: &str) -> String {
    let remote = |function: &str, template: &str| {
        let inner = template.replace("{schema}", &quote_literal(schema));
        format!(
            "SELECT table_name, column_name, column_type, column_comment \
             FROM {function}('{CATALOG_ALIAS}', {}) \
             ORDER BY table_name, ordinal_position",
            quote_literal(&inner)
        )
    };

    match driver {
        Driver::Duckdb => format!(
            "SELECT table_name, column_name, data_type, comment \
             FROM duckdb_columns() \
             WHERE database_name = '{CATALOG_ALIAS}' AND schema_name = {} \
             ORDER BY table_name, column_index",
            quote_literal(schema)
        ),
        Driver::Mysql => remote("mysql_query", MYSQL_COLUMNS),
        Driver::Postgres => remote("postgres_query", POSTGRES_COLUMNS),
    }
}

/// Build the `ATTACH` statement for the configured driver
fn attach_statement(config: &DatabaseConfig) -> String {
    match config.driver {
        Driver::Duckdb => {
            let path = config
                .path
                .as_deref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!(
                "ATTACH {} AS {CATALOG_ALIAS} (READ_ONLY)",
                quote_literal(&path)
            )
        }
        Driver::Mysql => format!(
            "ATTACH {} AS {CATALOG_ALIAS} (TYPE mysql, READ_ONLY)",
            quote_literal(&connection_string(config, "database"))
        ),
        Driver::Postgres => format!(
            "ATTACH {} AS {CATALOG_ALIAS} (TYPE postgres, READ_ONLY)",
            quote_literal(&connection_string(config, "dbname"))
        ),
    }
}

/// `key=value` connection string understood by the mysql and postgres scanners
fn connection_string(config: &DatabaseConfig, database_key: &str) -> String {
    let mut parts = vec![format!("host={}", connection_value(&config.host))];
    if let Some(port) = config.effective_port() {
        parts.push(format!("port={port}"));
    }
    if let Some(ref user) = config.user {
        parts.push(format!("user={}", connection_value(user)));
    }
    if let Some(ref password) = config.password {
        parts.push(format!("password={}", connection_value(password)));
    }
    if let Some(ref database) = config.database {
        parts.push(format!("{database_key}={}", connection_value(database)));
    }
    parts.join(" ")
}

/// Quote a connection-string value when it contains spaces or quotes
fn connection_value(value: &str) -> String {
    if !value.is_empty() && !value.contains([' ', '\'', '\\']) {
        return value.to_string();
    }
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
