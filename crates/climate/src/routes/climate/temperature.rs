use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use log::debug;
use time::Date;

use crate::{dates::parse_date, routes::Error, stats::TemperatureSummary, AppState};

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
         ("start" = String, Path, description = "First date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Lowest, highest and average temperature from start onwards", content_type = "application/json", body = TemperatureSummary),
        (status = BAD_REQUEST, description = "Malformed date or no temperature observations in range", body = crate::routes::ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read observations", body = crate::routes::ErrorBody)
    ))]
pub async fn temperature_since(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureSummary>, Error> {
    let start = parse_date(&start)?;
    summarize(&state, start, None).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
         ("start" = String, Path, description = "First date to include, YYYY-MM-DD"),
         ("end" = String, Path, description = "Last date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Lowest, highest and average temperature between start and end inclusive", content_type = "application/json", body = TemperatureSummary),
        (status = BAD_REQUEST, description = "Malformed dates, start after end, or no temperature observations in range", body = crate::routes::ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read observations", body = crate::routes::ErrorBody)
    ))]
pub async fn temperature_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureSummary>, Error> {
    let start = parse_date(&start)?;
    let end = parse_date(&end)?;
    if start > end {
        return Err(Error::BadRequest(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }
    summarize(&state, start, Some(end)).await.map(Json)
}

async fn summarize(
    state: &AppState,
    start: Date,
    end: Option<Date>,
) -> Result<TemperatureSummary, Error> {
    let temperatures: Vec<f64> = state
        .climate_db
        .observations_in_range(start, end)
        .await?
        .into_iter()
        .filter_map(|o| o.tobs)
        .collect();
    debug!(
        "summarizing {} temperature observations from {} to {:?}",
        temperatures.len(),
        start,
        end
    );

    Ok(TemperatureSummary::from_values(&temperatures)?)
}

/// Catches date ranges typed with slashes, e.g. `/api/v1.0/2017/08/23`
pub async fn malformed_range() -> Error {
    Error::BadRequest(String::from(
        "expected /api/v1.0/<start> or /api/v1.0/<start>/<end> with dates as YYYY-MM-DD",
    ))
}
