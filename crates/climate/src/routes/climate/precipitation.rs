use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{routes::Error, AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Precipitation {
    pub date: String,
    pub prcp: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation for every station over the trailing year of data", content_type = "application/json", body = Vec<Precipitation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read observations", body = crate::routes::ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Precipitation>>, Error> {
    let summary = &state.summary;
    let observations = state
        .climate_db
        .observations_in_range(summary.cutoff_date, Some(summary.most_recent_date))
        .await?;

    Ok(Json(
        observations
            .into_iter()
            .map(|o| Precipitation {
                date: o.date,
                prcp: o.prcp,
            })
            .collect(),
    ))
}
