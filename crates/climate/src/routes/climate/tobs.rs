use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{routes::Error, AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations of the most active station over the trailing year of data", content_type = "application/json", body = Vec<TemperatureObservation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read observations", body = crate::routes::ErrorBody)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, Error> {
    let summary = &state.summary;
    let observations = state
        .climate_db
        .observations_for_station(
            &summary.active_station,
            summary.cutoff_date,
            summary.most_recent_date,
        )
        .await?;

    Ok(Json(
        observations
            .into_iter()
            .map(|o| TemperatureObservation {
                date: o.date,
                tobs: o.tobs,
            })
            .collect(),
    ))
}
