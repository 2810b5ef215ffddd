//! Schema graph: dependency inference, the shared snapshot, filtered views
//! and export formats.
//!
//! This module provides:
//! - `<table>_id` naming-convention dependency inference
//! - An immutable [`SchemaSnapshot`] with a neighbor index
//! - Case-insensitive name filtering into a [`GraphView`]
//! - Export formats: JSON, Mermaid, DOT

pub mod format;
pub mod infer;
pub mod snapshot;
pub mod view;

pub use format::{to_dot, to_json, to_mermaid, OutputFormat};
pub use infer::{infer_dependencies, Dependency, ReferenceMatching};
pub use snapshot::SchemaSnapshot;
pub use view::{Element, ElementGroup, GraphView};
