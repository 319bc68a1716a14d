use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Form, Json,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::{
    form::{render_page, Outcome},
    state::AppState,
    types::*,
};
use crate::domain::{CellFeatures, Diagnosis};
use crate::error::{ClassifierError, Result};

fn classify(state: &AppState, request_id: &str, features: &CellFeatures) -> Result<Diagnosis> {
    match state.service.predict_cancer(features) {
        Ok(diagnosis) => {
            state.metrics.record_prediction(diagnosis);
            debug!(request_id, %diagnosis, features = ?features.to_array(), "prediction served");
            Ok(diagnosis)
        }
        Err(e) => {
            state.metrics.inc_prediction_errors();
            warn!(request_id, error = %e, "prediction failed");
            Err(e)
        }
    }
}

fn error_status(err: &ClassifierError) -> StatusCode {
    match err {
        ClassifierError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// GET / -- empty form
pub async fn index() -> Html<String> {
    Html(render_page(&CellFeatures::default(), &Outcome::Empty))
}

/// POST / -- form submission
pub async fn submit_form(
    State(state): State<AppState>,
    Form(features): Form<CellFeatures>,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4().to_string();
    match classify(&state, &request_id, &features) {
        Ok(diagnosis) => (
            StatusCode::OK,
            Html(render_page(&features, &Outcome::Predicted(diagnosis))),
        ),
        Err(e) => (
            error_status(&e),
            Html(render_page(&features, &Outcome::Failed(e.to_string()))),
        ),
    }
}

/// POST /api/predict
pub async fn predict_json(
    State(state): State<AppState>,
    Json(features): Json<CellFeatures>,
) -> std::result::Result<Json<PredictResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4().to_string();
    classify(&state, &request_id, &features)
        .map(|diagnosis| Json(PredictResponse::new(request_id, diagnosis)))
        .map_err(|e| {
            (
                error_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })
}
