// Integration tests for API endpoints, served over the in-memory fixture


use axum::http::StatusCode;
use axum_test::TestServer;
use pv_analytics_api::routes::create_router;
use serde_json::{json, Value};
use std::sync::Arc;
use test_helpers::*;

fn seeded() -> Arc<MemoryFixture> {
    let fixture = MemoryFixture::new();
    fixture.add_plant(1, "Solar Plant Alpha");
    fixture.add_plant(2, "Empty Plant");
    fixture.add_inverter(1, 1);
    fixture.add_inverter(2, 1);
    fixture.add_readings([
        reading(1, ts(15, 10, 0), Some(1000.0), Some(24.0)),
        reading(1, ts(15, 10, 10), Some(2000.0), Some(26.5)),
        reading(1, ts(15, 12, 0), None, None),
        reading(1, ts(16, 9, 0), Some(600.754), None),
        reading(2, ts(15, 9, 0), Some(1500.0), Some(30.0)),
        reading(2, ts(15, 10, 0), Some(1500.0), Some(31.0)),
    ]);
    fixture
}

fn server(fixture: &Arc<MemoryFixture>) -> TestServer {
    TestServer::new(create_router(fixture.state())).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = server(&seeded());

    let response = server.get("/health").await;
    response.assert_status(StatusCode::OK);
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_max_power_by_day() {
    let server = server(&seeded());

    let response = server
        .get("/api/v1/analytics/inverters/1/max-power-by-day")
        .add_query_param("start_date", "2023-01-15")
        .add_query_param("end_date", "2023-01-16")
        .await;

    response.assert_status(StatusCode::OK);
    response.assert_json(&json!({
        "data": [
            { "day": "2023-01-15", "maxActivePower": 2000.0 },
            { "day": "2023-01-16", "maxActivePower": 600.75 },
        ]
    }));
}

#[tokio::test]
async fn test_avg_temperature_by_day_omits_empty_days() {
    let server = server(&seeded());

    let response = server
        .get("/api/v1/analytics/inverters/1/avg-temperature-by-day")
        .add_query_param("startDate", "2023-01-15")
        .add_query_param("endDate", "2023-01-16")
        .await;

    response.assert_status(StatusCode::OK);
    response.assert_json(&json!({
        "data": [
            { "day": "2023-01-15", "averageTemperature": 25.25 },
        ]
    }));
}

#[tokio::test]
async fn test_inverter_generation_with_legacy_params() {
    let server = server(&seeded());

    let response = server
        .get("/api/v1/analytics/inverters/1/generation")
        .add_query_param("data_inicio", "2023-01-15")
        .add_query_param("data_fim", "2023-01-15")
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["totalWh"], 250.0);
    assert_eq!(body["entityId"], 1);
    assert_eq!(body["entityType"], "inverter");
    assert!(body["startDate"].as_str().unwrap().starts_with("2023-01-15T00:00:00"));
}

#[tokio::test]
async fn test_plant_generation_sums_inverters() {
    let server = server(&seeded());

    let response = server
        .get("/api/v1/analytics/plants/1/generation")
        .add_query_param("start_date", "2023-01-15")
        .add_query_param("end_date", "2023-01-15")
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    // 250 Wh from inverter 1 plus 1500 Wh from inverter 2
    assert_eq!(body["totalWh"], 1750.0);
    assert_eq!(body["entityType"], "plant");
}

#[tokio::test]
async fn test_empty_plant_generation_is_zero() {
    let fixture = seeded();
    let server = server(&fixture);

    let response = server
        .get("/api/v1/analytics/plants/2/generation")
        .add_query_param("start_date", "2023-01-15")
        .add_query_param("end_date", "2023-01-16")
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["totalWh"], 0.0);
    assert_eq!(body["entityId"], 2);
    assert_eq!(fixture.read_count(), 0);
}

#[tokio::test]
async fn test_unknown_entities_are_not_found() {
    let server = server(&seeded());

    for path in [
        "/api/v1/analytics/inverters/999999/max-power-by-day",
        "/api/v1/analytics/inverters/999999/avg-temperature-by-day",
        "/api/v1/analytics/inverters/999999/generation",
        "/api/v1/analytics/plants/999999/generation",
    ] {
        let response = server
            .get(path)
            .add_query_param("start_date", "2023-01-15")
            .add_query_param("end_date", "2023-01-16")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("999999"));
    }
}

#[tokio::test]
async fn test_invalid_ranges_are_bad_requests() {
    let fixture = seeded();
    let server = server(&fixture);

    let response = server
        .get("/api/v1/analytics/inverters/1/generation")
        .add_query_param("start_date", "2023-01-16")
        .add_query_param("end_date", "2023-01-15")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body.get("error").is_some());

    let response = server
        .get("/api/v1/analytics/inverters/1/max-power-by-day")
        .add_query_param("start_date", "2023-01-15")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/v1/analytics/plants/1/generation")
        .add_query_param("start_date", "not-a-date")
        .add_query_param("end_date", "2023-01-15")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(fixture.read_count(), 0);
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let fixture = seeded();
    fixture.fail_reads();
    let server = server(&fixture);

    let response = server
        .get("/api/v1/analytics/inverters/1/max-power-by-day")
        .add_query_param("start_date", "2023-01-15")
        .add_query_param("end_date", "2023-01-16")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "Reading store unavailable" }));
}

#[tokio::test]
async fn test_plant_directory() {
    let server = server(&seeded());

    let response = server.get("/api/v1/plants").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Solar Plant Alpha", "Empty Plant"]);

    let response = server.get("/api/v1/plants/1").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["id"], 1);

    server
        .get("/api/v1/plants/42")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inverter_directory() {
    let fixture = seeded();
    fixture.add_plant(3, "Solar Plant Beta");
    fixture.add_inverter(7, 3);
    let server = server(&fixture);

    let response = server.get("/api/v1/inverters").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 3);

    let response = server
        .get("/api/v1/inverters")
        .add_query_param("plant_id", "3")
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    let inverters = body.as_array().unwrap();
    assert_eq!(inverters.len(), 1);
    assert_eq!(inverters[0]["id"], 7);
    assert_eq!(inverters[0]["plantName"], "Solar Plant Beta");

    let response = server.get("/api/v1/inverters/2").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["plantId"], 1);

    server
        .get("/api/v1/inverters/999999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_path_and_query_get_json_errors() {
    let fixture = seeded();
    let server = server(&fixture);

    let response = server
        .get("/api/v1/analytics/inverters/abc/generation")
        .add_query_param("start_date", "2023-01-15")
        .add_query_param("end_date", "2023-01-15")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());

    // the legacy alias and the canonical name together are a duplicate field
    let response = server
        .get("/api/v1/analytics/inverters/1/max-power-by-day")
        .add_query_param("start_date", "2023-01-15")
        .add_query_param("data_inicio", "2023-01-15")
        .add_query_param("end_date", "2023-01-16")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());

    let response = server
        .get("/api/v1/inverters")
        .add_query_param("plant_id", "north")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());

    server
        .get("/api/v1/plants/1.5")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(fixture.read_count(), 0);
}
