use crate::handlers::{analytics, directory, health, AppState};
use axum::{extract::Request, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new().route("/health", get(health::health));

    let analytics_routes = Router::new()
        .route(
            "/api/v1/analytics/inverters/{inverter_id}/max-power-by-day",
            get(analytics::max_power_by_day),
        )
        .route(
            "/api/v1/analytics/inverters/{inverter_id}/avg-temperature-by-day",
            get(analytics::avg_temperature_by_day),
        )
        .route(
            "/api/v1/analytics/inverters/{inverter_id}/generation",
            get(analytics::inverter_generation),
        )
        .route(
            "/api/v1/analytics/plants/{plant_id}/generation",
            get(analytics::plant_generation),
        );

    let directory_routes = Router::new()
        .route("/api/v1/plants", get(directory::list_plants))
        .route("/api/v1/plants/{plant_id}", get(directory::get_plant))
        .route("/api/v1/inverters", get(directory::list_inverters))
        .route("/api/v1/inverters/{inverter_id}", get(directory::get_inverter));

    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            tracing::span!(
                Level::INFO,
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_request(|_request: &Request, _span: &tracing::Span| {
            tracing::event!(Level::DEBUG, "received request");
        })
        .on_response(
            |response: &axum::response::Response,
             latency: std::time::Duration,
             _span: &tracing::Span| {
                tracing::event!(
                    Level::INFO,
                    status = response.status().as_u16(),
                    latency = ?latency,
                    "request completed"
                );
            },
        )
        .on_failure(
            |_error: tower_http::classify::ServerErrorsFailureClass,
             _latency: std::time::Duration,
             _span: &tracing::Span| {
                tracing::event!(Level::ERROR, "request failed");
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(analytics_routes)
        .merge(directory_routes)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(trace).layer(CorsLayer::permissive()))
}
