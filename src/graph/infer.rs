//! Naming-convention foreign key inference.
//!
//! A column named `<table>_id` is taken to reference `<table>` when a table
//! of that exact name exists. The column literally named `id` is the
//! primary key and never a reference. Self references and repeated edges
//! between the same pair are kept as-is.
//!
//! [`ReferenceMatching::Plural`] additionally resolves `user_id` to a table
//! named `users` (or `categories` for `category_id`) when no exact match
//! exists.

use crate::catalog::Table;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything up to a trailing `_id`
static REFERENCE_COLUMN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)_id$").unwrap());

/// Name of the column treated as the primary key
pub const PRIMARY_KEY_COLUMN: &str = "id";

/// How a `<name>_id` prefix is matched against table names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceMatching {
    /// The prefix must equal a table name
    #[default]
    Exact,
    /// Exact match first, then the English plural of the prefix
    Plural,
}

impl ReferenceMatching {
    /// Resolve a reference prefix to a known table name
    pub fn resolve<'a>(
        self,
        prefix: &str,
        tables: &'a BTreeMap<String, Table>,
    ) -> Option<&'a str> {
        if let Some((name, _)) = tables.get_key_value(prefix) {
            return Some(name.as_str());
        }
        if self == ReferenceMatching::Exact {
            return None;
        }
        plural_forms(prefix).into_iter().find_map(|candidate| {
            tables
                .get_key_value(&candidate)
                .map(|(name, _)| name.as_str())
        })
    }
}

impl std::str::FromStr for ReferenceMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(ReferenceMatching::Exact),
            "plural" => Ok(ReferenceMatching::Plural),
            _ => Err(format!(
                "Unknown matching mode: {}. Valid options: exact, plural",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReferenceMatching {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceMatching::Exact => write!(f, "exact"),
            ReferenceMatching::Plural => write!(f, "plural"),
        }
    }
}

fn plural_forms(singular: &str) -> Vec<String> {
    let mut forms = vec![format!("{singular}s"), format!("{singular}es")];
    if let Some(stem) = singular.strip_suffix('y') {
        forms.push(format!("{stem}ies"));
    }
    forms
}

/// A directed edge: `source` has a column that references `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Dependency {
    /// Table owning the reference column
    pub source: String,
    /// Referenced table
    pub target: String,
    /// Column the edge was inferred from
    pub column: String,
}

impl Dependency {
    pub fn new(source: &str, target: &str, column: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            column: column.to_string(),
        }
    }

    /// `(source, target)` pair
    pub fn pair(&self) -> (&str, &str) {
        (self.source.as_str(), self.target.as_str())
    }

    /// Whether the edge starts or ends at `table`
    pub fn touches(&self, table: &str) -> bool {
        self.source == table || self.target == table
    }

    /// The endpoint opposite `table`, if the edge touches it
    pub fn other_end(&self, table: &str) -> Option<&str> {
        if self.source == table {
            Some(self.target.as_str())
        } else if self.target == table {
            Some(self.source.as_str())
        } else {
            None
        }
    }
}

/// Table a column name points at, if it follows the `<table>_id` convention
pub fn referenced_table_name(column: &str) -> Option<&str> {
    if column == PRIMARY_KEY_COLUMN {
        return None;
    }
    REFERENCE_COLUMN_RE
        .captures(column)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Infer dependencies for every table, in table then column order
pub fn infer_dependencies(
    tables: &BTreeMap<String, Table>,
    matching: ReferenceMatching,
) -> Vec<Dependency> {
    let mut dependencies = Vec::new();

    for (name, table) in tables {
        for column in &table.columns {
            let Some(prefix) = referenced_table_name(&column.name) else {
                continue;
            };
            if let Some(target) = matching.resolve(prefix, tables) {
                dependencies.push(Dependency::new(name, target, &column.name));
            }
        }
    }

    dependencies
}
