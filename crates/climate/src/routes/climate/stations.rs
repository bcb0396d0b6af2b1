use std::sync::Arc;

use axum::{extract::State, Json};

use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Distinct ids of stations with observations", content_type = "application/json", body = Vec<String>)
    ))]
pub async fn stations(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.summary.station_ids.iter().cloned().collect())
}
