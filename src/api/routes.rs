use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS applies to the JSON API only; the form is same-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/predict", post(handlers::predict_json))
        .layer(cors);

    Router::new()
        // Form page
        .route("/", get(handlers::index).post(handlers::submit_form))
        // System endpoints
        .route("/health", get(handlers::health_handler))
        .route("/healthz", get(handlers::liveness_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .merge(api)
        .with_state(state)
}
