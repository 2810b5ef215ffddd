use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};

use super::page::render_page;
use super::AppState;
use crate::catalog::Table;
use crate::graph::Element;
use crate::ui::{format_related_tables, format_table_details, Action, ViewModel};

pub async fn index_handler(State(app_state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&app_state.title, &app_state.source))
}

pub async fn health_check(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = app_state.store.snapshot();
    Json(serde_json::json!({
        "service": "schema-graph",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "tables": snapshot.table_count(),
        "relationships": snapshot.dependency_count(),
    }))
}

pub async fn view_handler(State(app_state): State<Arc<AppState>>) -> Json<ViewModel> {
    Json(app_state.store.view())
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub changed: bool,
    #[serde(flatten)]
    pub view: ViewModel,
}

pub async fn actions_handler(
    State(app_state): State<Arc<AppState>>,
    Json(action): Json<Action>,
) -> Json<ActionResponse> {
    let changed = app_state.store.dispatch(&action);
    Json(ActionResponse {
        changed,
        view: app_state.store.view(),
    })
}

#[derive(Debug, Serialize)]
pub struct TableResponse<'a> {
    #[serde(flatten)]
    pub table: &'a Table,
    pub neighbors: Vec<&'a str>,
    pub detail: String,
    pub related: String,
}

pub async fn table_handler(
    State(app_state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let snapshot = app_state.store.snapshot();
    let Some(table) = snapshot.table(&name) else {
        log::debug!("table lookup miss: {}", name);
        return Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("Unknown table: {}", name)
            })),
        ));
    };

    let response = TableResponse {
        table,
        neighbors: snapshot.neighbors(&table.name),
        detail: format_table_details(table),
        related: format_related_tables(snapshot, &table.name),
    };
    serde_json::to_value(&response).map(Json).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct ElementsQuery {
    #[serde(default)]
    pub filter: String,
}

/// Unstyled elements for a filter, independent of the shared state
pub async fn elements_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ElementsQuery>,
) -> Json<Vec<Element>> {
    Json(app_state.store.snapshot().view(&query.filter).elements())
}
