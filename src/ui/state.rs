//! UI state and the reducer that is the only way to change it.

use crate::graph::SchemaSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Graph layout algorithm, named as the graph widget names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphLayout {
    /// Force-directed
    #[default]
    Cose,
    /// Hierarchical
    Breadthfirst,
    Circle,
    /// Radial
    Concentric,
    Grid,
}

impl GraphLayout {
    pub const ALL: [GraphLayout; 5] = [
        GraphLayout::Cose,
        GraphLayout::Breadthfirst,
        GraphLayout::Circle,
        GraphLayout::Concentric,
        GraphLayout::Grid,
    ];

    /// Label shown in the layout selector
    pub fn label(self) -> &'static str {
        match self {
            GraphLayout::Cose => "COSE",
            GraphLayout::Breadthfirst => "Breadthfirst",
            GraphLayout::Circle => "Circle",
            GraphLayout::Concentric => "Concentric",
            GraphLayout::Grid => "Grid",
        }
    }
}

impl FromStr for GraphLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cose" | "force" => Ok(GraphLayout::Cose),
            "breadthfirst" | "hierarchical" => Ok(GraphLayout::Breadthfirst),
            "circle" | "circular" => Ok(GraphLayout::Circle),
            "concentric" | "radial" => Ok(GraphLayout::Concentric),
            "grid" => Ok(GraphLayout::Grid),
            _ => Err(format!(
                "Unknown layout: {}. Valid options: cose, breadthfirst, circle, concentric, grid",
                s
            )),
        }
    }
}

impl fmt::Display for GraphLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphLayout::Cose => write!(f, "cose"),
            GraphLayout::Breadthfirst => write!(f, "breadthfirst"),
            GraphLayout::Circle => write!(f, "circle"),
            GraphLayout::Concentric => write!(f, "concentric"),
            GraphLayout::Grid => write!(f, "grid"),
        }
    }
}

/// Everything the page derives its contents from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiState {
    /// Selected table, if any
    pub selection: Option<String>,
    /// Case-insensitive table name filter
    pub filter: String,
    pub layout: GraphLayout,
}

impl UiState {
    pub fn with_layout(layout: GraphLayout) -> Self {
        Self {
            layout,
            ..Default::default()
        }
    }
}

/// A user interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// A table was picked in the filtered list
    ListPick { table: String },
    /// A node was tapped in the graph
    GraphTap { table: String },
    /// The empty canvas was tapped
    ClearSelection,
    SetFilter { filter: String },
    SetLayout { layout: GraphLayout },
}

/// Apply `action` to `state`, returning whether anything changed.
///
/// List picks and graph taps write the same slot; the latest one wins.
/// Selecting a table that is not in the snapshot leaves nothing selected.
pub fn reduce(state: &mut UiState, action: &Action, snapshot: &SchemaSnapshot) -> bool {
    match action {
        Action::ListPick { table } | Action::GraphTap { table } => {
            let selection = snapshot.contains(table).then(|| table.clone());
            replace(&mut state.selection, selection)
        }
        Action::ClearSelection => replace(&mut state.selection, None),
        Action::SetFilter { filter } => replace(&mut state.filter, filter.clone()),
        Action::SetLayout { layout } => replace(&mut state.layout, *layout),
    }
}

/// Pure form of [`reduce`]
pub fn next_state(prior: &UiState, action: &Action, snapshot: &SchemaSnapshot) -> UiState {
    let mut next = prior.clone();
    reduce(&mut next, action, snapshot);
    next
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
