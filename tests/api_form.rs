use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use cytoclass::{
    api::{create_router, AppState},
    error::Result,
    ClassPredictor, DiagnosisService,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Returns a fixed class id and records every batch it sees.
struct RecordingModel {
    class_id: i64,
    seen: Mutex<Vec<Vec<Vec<f64>>>>,
}

impl RecordingModel {
    fn new(class_id: i64) -> Arc<Self> {
        Arc::new(Self {
            class_id,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn batches(&self) -> Vec<Vec<Vec<f64>>> {
        self.seen.lock().unwrap().clone()
    }
}

impl ClassPredictor for RecordingModel {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<i64>> {
        self.seen.lock().unwrap().push(rows.to_vec());
        Ok(vec![self.class_id; rows.len()])
    }
}

fn shipped_router() -> Router {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("model/breast_cancer_svm_pipeline.json");
    let service = DiagnosisService::load(path).unwrap();
    create_router(AppState::new(service))
}

fn router_with(model: Arc<RecordingModel>) -> Router {
    create_router(AppState::new(DiagnosisService::new(model)))
}

const BENIGN_FORM: &str = "clump_thickness=5&uniformity_cell_size=1&uniformity_cell_shape=1\
&marginal_adhesion=1&single_epithelial_cell_size=2&bare_nuclei=1&bland_chromatin=3\
&normal_nucleoli=1&mitoses=1";

fn malignant_json() -> Value {
    json!({
        "clump_thickness": 10,
        "uniformity_cell_size": 10,
        "uniformity_cell_shape": 10,
        "marginal_adhesion": 8,
        "single_epithelial_cell_size": 6,
        "bare_nuclei": 10,
        "bland_chromatin": 8,
        "normal_nucleoli": 10,
        "mitoses": 1
    })
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn index_renders_empty_form() {
    let app = shipped_router();
    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Breast Cancer Classification"));
    assert!(body.contains("Enter the details to correctly identify cell type?"));
    assert_eq!(body.matches("type=\"range\"").count(), 9);
    assert!(!body.contains("id=\"prediction\""));
}

#[tokio::test]
async fn form_submission_shows_label() {
    let app = shipped_router();
    let (status, body) = send(&app, form_request(BENIGN_FORM)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<div class=\"top\" id=\"prediction\">benign</div>"));
    assert!(body.contains("<li class=\"other\">malignant</li>"));
    // Sliders keep the submitted values
    assert!(body.contains("name=\"bland_chromatin\" min=\"1\" max=\"10\" step=\"1\" value=\"3\""));
}

#[tokio::test]
async fn json_predict_returns_label_and_ranking() {
    let app = shipped_router();
    let (status, body) = send(&app, json_request(&malignant_json())).await;
    assert_eq!(status, StatusCode::OK);

    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["label"], "malignant");
    assert_eq!(v["class_id"], 1);
    assert_eq!(v["ranking"][0]["label"], "malignant");
    assert_eq!(v["ranking"][1]["label"], "benign");
    assert_eq!(v["ranking"].as_array().unwrap().len(), 2);
    assert!(!v["request_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn features_reach_the_model_in_form_order() {
    let model = RecordingModel::new(0);
    let app = router_with(Arc::clone(&model));

    // Fields deliberately posted out of order
    let body = "mitoses=1&normal_nucleoli=1&bland_chromatin=3&bare_nuclei=1\
&single_epithelial_cell_size=2&marginal_adhesion=1&uniformity_cell_shape=1\
&uniformity_cell_size=1&clump_thickness=5";
    let (status, _) = send(&app, form_request(body)).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        model.batches(),
        vec![vec![vec![5.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 1.0]]]
    );
}

#[tokio::test]
async fn unknown_class_id_is_reported_as_error() {
    let app = router_with(RecordingModel::new(2));

    let (status, body) = send(&app, json_request(&malignant_json())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert!(v["error"].as_str().unwrap().contains("Unknown class id: 2"));

    let (status, body) = send(&app, form_request(BENIGN_FORM)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("class=\"error\""));
    assert!(!body.contains("id=\"prediction\""));
}

#[tokio::test]
async fn malformed_input_is_rejected_before_inference() {
    let model = RecordingModel::new(0);
    let app = router_with(Arc::clone(&model));

    let mut missing = malignant_json();
    missing.as_object_mut().unwrap().remove("mitoses");
    let (status, _) = send(&app, json_request(&missing)).await;
    assert!(status.is_client_error(), "status {status}");

    let (status, _) = send(&app, form_request("clump_thickness=abc")).await;
    assert!(status.is_client_error(), "status {status}");

    assert!(model.batches().is_empty());
}

#[tokio::test]
async fn non_finite_form_values_are_not_classified() {
    let app = shipped_router();
    for bad in ["NaN", "inf", "-inf"] {
        let body = format!(
            "clump_thickness={bad}&uniformity_cell_size=10&uniformity_cell_shape=10\
&marginal_adhesion=10&single_epithelial_cell_size=10&bare_nuclei=10&bland_chromatin=10\
&normal_nucleoli=10&mitoses=10"
        );
        let (status, body) = send(&app, form_request(&body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "value {bad}");
        assert!(!body.contains("id=\"prediction\""), "value {bad}");
        assert!(body.contains("class=\"error\""), "value {bad}");
    }

    let (_, body) = send(&app, get("/metrics")).await;
    assert!(body.contains("cytoclass_prediction_errors_total 3"));
    assert!(body.contains(r#"cytoclass_predictions_total{label="benign"} 0"#));
}

#[tokio::test]
async fn health_and_metrics_reflect_traffic() {
    let app = shipped_router();

    let (status, _) = send(&app, get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);

    send(&app, form_request(BENIGN_FORM)).await;
    send(&app, json_request(&malignant_json())).await;
    send(&app, json_request(&malignant_json())).await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["status"], "ok");
    let started_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(v["started_at"].clone()).unwrap();
    assert!(started_at <= chrono::Utc::now());
    assert_eq!(v["model"]["kernel"], "rbf");
    assert_eq!(v["predictions_served"], 3);

    let (status, body) = send(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"cytoclass_predictions_total{label="benign"} 1"#));
    assert!(body.contains(r#"cytoclass_predictions_total{label="malignant"} 2"#));
    assert!(body.contains("cytoclass_prediction_errors_total 0"));
}
