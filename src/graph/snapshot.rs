//! Immutable schema snapshot shared by every consumer.
//!
//! Built once per process from the catalog: tables keyed by name, the
//! inferred dependency list and an undirected neighbor index over it.

use crate::catalog::{group_rows, CatalogError, CatalogRow, CatalogSource, Table};
use crate::graph::infer::{infer_dependencies, Dependency, ReferenceMatching};
use crate::graph::view::GraphView;
use ahash::AHashMap;
use std::collections::{BTreeMap, BTreeSet};

/// Tables plus inferred dependencies, never mutated after construction
#[derive(Debug, Default)]
pub struct SchemaSnapshot {
    tables: BTreeMap<String, Table>,
    dependencies: Vec<Dependency>,
    /// Tables linked to each table by any dependency, in either direction
    neighbors: AHashMap<String, BTreeSet<String>>,
}

impl SchemaSnapshot {
    /// Build a snapshot and infer its dependencies
    pub fn new(tables: BTreeMap<String, Table>, matching: ReferenceMatching) -> Self {
        let dependencies = infer_dependencies(&tables, matching);
        Self::with_dependencies(tables, dependencies)
    }

    /// Build a snapshot from explicit dependencies.
    ///
    /// Dependencies with an endpoint outside `tables` are dropped.
    pub fn with_dependencies(
        tables: BTreeMap<String, Table>,
        dependencies: Vec<Dependency>,
    ) -> Self {
        let dependencies: Vec<Dependency> = dependencies
            .into_iter()
            .filter(|d| tables.contains_key(&d.source) && tables.contains_key(&d.target))
            .collect();

        let mut neighbors: AHashMap<String, BTreeSet<String>> = AHashMap::new();
        // A self-reference makes a table its own neighbor
        for dep in &dependencies {
            neighbors
                .entry(dep.source.clone())
                .or_default()
                .insert(dep.target.clone());
            neighbors
                .entry(dep.target.clone())
                .or_default()
                .insert(dep.source.clone());
        }

        Self {
            tables,
            dependencies,
            neighbors,
        }
    }

    /// Group catalog rows and infer dependencies
    pub fn from_rows<I>(rows: I, matching: ReferenceMatching) -> Self
    where
        I: IntoIterator<Item = CatalogRow>,
    {
        Self::new(group_rows(rows), matching)
    }

    /// Run the catalog query once and build the snapshot
    pub fn load(
        source: &dyn CatalogSource,
        matching: ReferenceMatching,
    ) -> Result<Self, CatalogError> {
        let rows = source.fetch_rows()?;
        log::debug!("catalog returned {} column rows", rows.len());
        Ok(Self::from_rows(rows, matching))
    }

    /// Get table by name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// All tables sorted by name
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn table_map(&self) -> &BTreeMap<String, Table> {
        &self.tables
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Tables linked to `name` by a dependency in either direction, sorted.
    ///
    /// Unknown tables have no neighbors.
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        self.neighbors
            .get(name)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether `a` and `b` share a dependency
    pub fn are_neighbors(&self, a: &str, b: &str) -> bool {
        self.neighbors.get(a).is_some_and(|set| set.contains(b))
    }

    /// Filtered view for the graph widget and exporters
    pub fn view(&self, filter: &str) -> GraphView<'_> {
        GraphView::filtered(self, filter)
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    pub fn column_count(&self) -> usize {
        self.tables.values().map(|t| t.columns.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
