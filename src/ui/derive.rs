//! Everything the page shows, derived from a snapshot and a [`UiState`].

use crate::graph::{Element, GraphView, SchemaSnapshot};
use crate::ui::detail::Panels;
use crate::ui::state::{GraphLayout, UiState};
use ahash::AHashMap;
use serde::Serialize;

/// Node color without highlight
pub const BASE_NODE_COLOR: &str = "#CCCCCC";
/// Edge color without highlight
pub const BASE_EDGE_COLOR: &str = "#DDDDDD";

/// Highlight tier of a table or edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Selected,
    Neighbor,
}

impl Highlight {
    pub fn color(self) -> &'static str {
        match self {
            Highlight::Selected => "#F39C12",
            Highlight::Neighbor => "#F7DC6F",
        }
    }

    /// Style class carried by graph elements
    pub fn class(self) -> &'static str {
        match self {
            Highlight::Selected => "selected",
            Highlight::Neighbor => "neighbor",
        }
    }
}

/// The selection if it names a table of the snapshot
pub fn resolve_selection<'a>(snapshot: &SchemaSnapshot, state: &'a UiState) -> Option<&'a str> {
    state
        .selection
        .as_deref()
        .filter(|name| snapshot.contains(name))
}

/// Highlight tier per table: the selection and its neighbors
pub fn highlights<'a>(
    snapshot: &'a SchemaSnapshot,
    selection: Option<&'a str>,
) -> AHashMap<&'a str, Highlight> {
    let mut tiers = AHashMap::new();
    if let Some(selected) = selection {
        for neighbor in snapshot.neighbors(selected) {
            tiers.insert(neighbor, Highlight::Neighbor);
        }
        tiers.insert(selected, Highlight::Selected);
    }
    tiers
}

/// One entry of the filtered table list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
}

/// Filtered table names, sorted, with their highlight tier
pub fn list_items(snapshot: &SchemaSnapshot, state: &UiState) -> Vec<ListItem> {
    let tiers = highlights(snapshot, resolve_selection(snapshot, state));
    items_in_view(&snapshot.view(&state.filter), &tiers)
}

fn items_in_view(view: &GraphView<'_>, tiers: &AHashMap<&str, Highlight>) -> Vec<ListItem> {
    view.table_names()
        .into_iter()
        .map(|name| ListItem {
            name: name.to_string(),
            highlight: tiers.get(name).copied(),
        })
        .collect()
}

/// Graph elements of the filtered view, classed by highlight tier.
///
/// Edges incident to the selected table take the neighbor tier.
pub fn graph_elements(snapshot: &SchemaSnapshot, state: &UiState) -> Vec<Element> {
    let selection = resolve_selection(snapshot, state);
    let tiers = highlights(snapshot, selection);
    elements_in_view(&snapshot.view(&state.filter), &tiers, selection)
}

fn elements_in_view(
    view: &GraphView<'_>,
    tiers: &AHashMap<&str, Highlight>,
    selection: Option<&str>,
) -> Vec<Element> {
    let mut elements = view.elements();

    for element in &mut elements {
        let tier = if element.is_node() {
            tiers.get(element.data.id.as_str()).copied()
        } else {
            selection
                .filter(|selected| element.touches(selected))
                .map(|_| Highlight::Neighbor)
        };
        if let Some(tier) = tier {
            element.classes.push(tier.class());
        }
    }

    elements
}

/// Layout option for the selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutOption {
    pub value: GraphLayout,
    pub label: &'static str,
}

/// Counts over the filtered view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewStats {
    pub tables: usize,
    pub visible_tables: usize,
    pub relationships: usize,
    pub visible_relationships: usize,
}

/// Complete render input for the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub filter: String,
    pub layout: GraphLayout,
    pub layouts: Vec<LayoutOption>,
    /// Selected table, `None` when nothing or an unknown table is selected
    pub selected: Option<String>,
    pub list: Vec<ListItem>,
    pub elements: Vec<Element>,
    pub detail: String,
    pub related: String,
    pub stats: ViewStats,
}

/// Derive the full view model
pub fn view_model(snapshot: &SchemaSnapshot, state: &UiState) -> ViewModel {
    let selected = resolve_selection(snapshot, state);
    let panels = Panels::for_selection(snapshot, selected);
    let tiers = highlights(snapshot, selected);
    let view = snapshot.view(&state.filter);

    ViewModel {
        filter: state.filter.clone(),
        layout: state.layout,
        layouts: GraphLayout::ALL
            .iter()
            .map(|&value| LayoutOption {
                value,
                label: value.label(),
            })
            .collect(),
        selected: selected.map(str::to_string),
        list: items_in_view(&view, &tiers),
        elements: elements_in_view(&view, &tiers, selected),
        detail: panels.detail,
        related: panels.related,
        stats: ViewStats {
            tables: snapshot.table_count(),
            visible_tables: view.table_count(),
            relationships: snapshot.dependency_count(),
            visible_relationships: view.edge_count(),
        },
    }
}
