//! Export formats for the inferred schema graph.

mod dot;
pub(crate) mod json;
mod mermaid;

pub use dot::to_dot;
pub use json::to_json;
pub use mermaid::to_mermaid;
#[allow(unused_imports)]
pub use json::{ColumnJson, ErdJson, ErdStats, RelationshipJson, TableJson};

use crate::graph::view::GraphView;
use std::fmt;
use std::str::FromStr;

/// Output format for graph export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format for programmatic use
    #[default]
    Json,
    /// Mermaid erDiagram format
    Mermaid,
    /// Graphviz DOT format (ERD style)
    Dot,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            _ => Err(format!(
                "Unknown format: {}. Valid options: json, mermaid, dot",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Mermaid => write!(f, "mermaid"),
            OutputFormat::Dot => write!(f, "dot"),
        }
    }
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Mermaid => "mmd",
            OutputFormat::Dot => "dot",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "mmd" | "mermaid" => Some(OutputFormat::Mermaid),
            "dot" | "gv" => Some(OutputFormat::Dot),
            _ => None,
        }
    }

    /// Render a view in this format
    pub fn render(&self, view: &GraphView<'_>) -> String {
        match self {
            OutputFormat::Json => to_json(view),
            OutputFormat::Mermaid => to_mermaid(view),
            OutputFormat::Dot => to_dot(view),
        }
    }
}
