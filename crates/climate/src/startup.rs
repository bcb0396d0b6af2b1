use crate::{
    db::{ClimateAccess, ClimateData, Tables},
    index_handler, malformed_range, not_found, precipitation, routes, stations,
    summary::ClimateSummary,
    temperature_between, temperature_since, tobs,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub climate_db: Arc<dyn ClimateData>,
    pub summary: Arc<ClimateSummary>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::precipitation::precipitation,
        routes::climate::stations::stations,
        routes::climate::tobs::tobs,
        routes::climate::temperature::temperature_since,
        routes::climate::temperature::temperature_between,
    ),
    components(
        schemas(
                routes::climate::precipitation::Precipitation,
                routes::climate::tobs::TemperatureObservation,
                crate::stats::TemperatureSummary,
                routes::error::ErrorBody,
        )
    ),
    tags(
        (name = "climate api", description = "a read-only RESTful api over weather station precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(database: &str, tables: Tables) -> Result<AppState, anyhow::Error> {
    let climate_db: Arc<dyn ClimateData> = Arc::new(
        ClimateAccess::new(database, tables)
            .await
            .map_err(|e| anyhow!("error opening climate dataset {}: {}", database, e))?,
    );
    app_state_from(climate_db).await
}

/// Computes the startup summary over any data source
pub async fn app_state_from(climate_db: Arc<dyn ClimateData>) -> Result<AppState, anyhow::Error> {
    let summary = ClimateSummary::compute(climate_db.as_ref())
        .await
        .map_err(|e| anyhow!("error summarizing climate dataset: {}", e))?;

    Ok(AppState {
        climate_db,
        summary: Arc::new(summary),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        // Path the first release served precipitation under
        .route("/Resources/hawaii.sqlite", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temperature_since))
        .route("/api/v1.0/{start}/{end}", get(temperature_between))
        .route("/api/v1.0/{start}/{end}/{*rest}", get(malformed_range))
        .fallback(not_found)
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
