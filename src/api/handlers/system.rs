use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::api::{state::AppState, types::HealthResponse};

/// GET /health -- model and uptime summary
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        started_at: state.metrics.started_at(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.service.info().clone(),
        predictions_served: state.metrics.total_predictions(),
    })
}

/// GET /healthz -- liveness check; the model is loaded before the server binds
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /metrics -- Prometheus text exposition
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        state.metrics.render_prometheus(),
    )
}
