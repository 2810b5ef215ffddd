//! Interactive explorer state: selection, filter, layout and the panels
//! and graph styling derived from them.

pub mod derive;
pub mod detail;
pub mod state;
pub mod store;

pub use derive::{view_model, Highlight, ListItem, ViewModel};
pub use detail::{format_related_tables, format_table_details, Panels};
pub use state::{reduce, Action, GraphLayout, UiState};
pub use store::Store;
