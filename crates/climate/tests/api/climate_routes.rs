use crate::helpers::{content_type, get, spawn_app, KANEOHE, OBSERVATIONS, WAIHEE, WAIKIKI};
use axum::http::StatusCode;
use climate::{ErrorBody, Precipitation, TemperatureObservation, TemperatureSummary};
use serde_json::from_slice;
use std::collections::HashSet;

#[tokio::test]
async fn home_lists_available_routes() {
    let test_app = spawn_app().await;

    let (status, headers, body) = get(&test_app.app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type(&headers).starts_with("text/html"));
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("/api/v1.0/precipitation"));
    assert!(html.contains("/api/v1.0/stations"));
    assert!(html.contains("/api/v1.0/tobs"));
    assert!(html.contains("/Resources/hawaii.sqlite"));
    assert!(html.contains(WAIHEE));
}

#[tokio::test]
async fn precipitation_covers_trailing_year_inclusive() {
    let test_app = spawn_app().await;

    let (status, headers, body) = get(&test_app.app, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type(&headers), "application/json");
    let records: Vec<Precipitation> = from_slice(&body).unwrap();
    let expected = OBSERVATIONS
        .iter()
        .filter(|(_, date, _, _)| *date >= "2016-08-23" && *date <= "2017-08-23")
        .count();
    assert_eq!(records.len(), expected);
    assert_eq!(records.len(), 8);
    for record in &records {
        assert!(
            record.date.as_str() >= "2016-08-23" && record.date.as_str() <= "2017-08-23",
            "{} is outside the window",
            record.date
        );
    }
    // Both window edges are included
    assert!(records.iter().any(|r| r.date == "2016-08-23"));
    assert!(records.iter().any(|r| r.date == "2017-08-23"));
    // Missing precipitation is served as null
    assert!(records
        .iter()
        .any(|r| r.date == "2017-08-18" && r.prcp.is_none()));
}

#[tokio::test]
async fn legacy_precipitation_path_serves_same_data() {
    let test_app = spawn_app().await;

    let (_, _, current) = get(&test_app.app, "/api/v1.0/precipitation").await;
    let (status, _, legacy) = get(&test_app.app, "/Resources/hawaii.sqlite").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(current, legacy);
}

#[tokio::test]
async fn stations_are_distinct() {
    let test_app = spawn_app().await;

    let (status, _, body) = get(&test_app.app, "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    let stations: Vec<String> = from_slice(&body).unwrap();
    let unique: HashSet<&String> = stations.iter().collect();
    assert_eq!(unique.len(), stations.len());
    assert_eq!(stations.len(), 3);
    for station in [WAIKIKI, KANEOHE, WAIHEE] {
        assert!(stations.iter().any(|s| s == station));
    }
}

#[tokio::test]
async fn tobs_returns_most_active_station_trailing_year() {
    let test_app = spawn_app().await;
    assert_eq!(test_app.state.summary.active_station, WAIHEE);

    let (status, _, body) = get(&test_app.app, "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    let records: Vec<TemperatureObservation> = from_slice(&body).unwrap();
    let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(
        dates,
        vec!["2016-08-23", "2017-01-01", "2017-08-18", "2017-08-22"]
    );
    assert_eq!(records[0].tobs, Some(77.0));
}

#[tokio::test]
async fn temperature_since_start() {
    let test_app = spawn_app().await;

    let (status, headers, body) = get(&test_app.app, "/api/v1.0/2017-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type(&headers), "application/json");
    let summary: TemperatureSummary = from_slice(&body).unwrap();
    // 62, 79, 76, 81, 74 with the null reading skipped
    assert_eq!(summary.lowest, 62.0);
    assert_eq!(summary.highest, 81.0);
    assert_eq!(summary.average, 74.4);
}

#[tokio::test]
async fn temperature_between_is_inclusive() {
    let test_app = spawn_app().await;

    let (status, _, body) = get(&test_app.app, "/api/v1.0/2016-08-23/2016-08-23").await;

    assert_eq!(status, StatusCode::OK);
    let summary: TemperatureSummary = from_slice(&body).unwrap();
    assert_eq!(summary.lowest, 77.0);
    assert_eq!(summary.highest, 81.0);
    assert_eq!(summary.average, 79.0);
}

#[tokio::test]
async fn temperature_summary_is_ordered_for_valid_ranges() {
    let test_app = spawn_app().await;

    for uri in [
        "/api/v1.0/2010-01-01",
        "/api/v1.0/2010-01-01/2017-08-23",
        "/api/v1.0/2012-06-01/2016-08-23",
        "/api/v1.0/2016-08-22/2017-07-04",
    ] {
        let (status, _, body) = get(&test_app.app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        let summary: TemperatureSummary = from_slice(&body).unwrap();
        assert!(summary.highest >= summary.lowest, "{uri}");
        assert!(
            summary.lowest <= summary.average && summary.average <= summary.highest,
            "{uri}"
        );
    }
}

#[tokio::test]
async fn malformed_dates_are_bad_requests() {
    let test_app = spawn_app().await;

    for uri in [
        "/api/v1.0/notadate",
        "/api/v1.0/2017%2F08%2F23",
        "/api/v1.0/2017-13-01",
        "/api/v1.0/2017-01-01/notadate",
        "/api/v1.0/2017-1-1/2017-08-23",
        "/api/v1.0/2017/08/23",
        "/api/v1.0/+2017-08-23",
        "/api/v1.0/-2017-08-23",
        "/api/v1.0/2016-08-23/+2017-08-23",
    ] {
        let (status, headers, body) = get(&test_app.app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(content_type(&headers), "application/json");
        let error: ErrorBody = from_slice(&body).unwrap();
        assert!(!error.error.is_empty());
    }
}

#[tokio::test]
async fn start_after_end_is_a_bad_request() {
    let test_app = spawn_app().await;

    let (status, _, body) = get(&test_app.app, "/api/v1.0/2017-08-23/2016-08-23").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorBody = from_slice(&body).unwrap();
    assert!(error.error.contains("after"));
}

#[tokio::test]
async fn empty_ranges_are_bad_requests() {
    let test_app = spawn_app().await;

    for uri in [
        "/api/v1.0/2030-01-01",
        "/api/v1.0/2030-01-01/2031-01-01",
        // Only reading on this day has no temperature
        "/api/v1.0/2017-05-05/2017-05-05",
    ] {
        let (status, _, body) = get(&test_app.app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let error: ErrorBody = from_slice(&body).unwrap();
        assert!(error.error.contains("insufficient data"), "{uri}");
    }
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let test_app = spawn_app().await;

    let (status, headers, body) = get(&test_app.app, "/api/v2.0/stations").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type(&headers), "application/json");
    let error: ErrorBody = from_slice(&body).unwrap();
    assert!(!error.error.is_empty());
}
