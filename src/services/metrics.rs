use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::Diagnosis;

/// Metrics collector for observability
pub struct Metrics {
    /// Predictions that returned "benign"
    pub benign_predictions: AtomicU64,
    /// Predictions that returned "malignant"
    pub malignant_predictions: AtomicU64,
    /// Predictions that failed inside the model or label mapping
    pub prediction_errors: AtomicU64,
    /// When the process started serving
    started_at: DateTime<Utc>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            benign_predictions: AtomicU64::new(0),
            malignant_predictions: AtomicU64::new(0),
            prediction_errors: AtomicU64::new(0),
            started_at: Utc::now(),
        }
    }

    pub fn record_prediction(&self, diagnosis: Diagnosis) {
        let counter = match diagnosis {
            Diagnosis::Benign => &self.benign_predictions,
            Diagnosis::Malignant => &self.malignant_predictions,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_prediction_errors(&self) {
        self.prediction_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }

    pub fn total_predictions(&self) -> u64 {
        self.benign_predictions.load(Ordering::Relaxed)
            + self.malignant_predictions.load(Ordering::Relaxed)
    }

    /// Prometheus text exposition
    pub fn render_prometheus(&self) -> String {
        format!(
            r#"# HELP cytoclass_uptime_seconds Uptime in seconds
# TYPE cytoclass_uptime_seconds counter
cytoclass_uptime_seconds {}

# HELP cytoclass_predictions_total Predictions served, by label
# TYPE cytoclass_predictions_total counter
cytoclass_predictions_total{{label="benign"}} {}
cytoclass_predictions_total{{label="malignant"}} {}

# HELP cytoclass_prediction_errors_total Failed predictions
# TYPE cytoclass_prediction_errors_total counter
cytoclass_prediction_errors_total {}
"#,
            self.uptime_seconds(),
            self.benign_predictions.load(Ordering::Relaxed),
            self.malignant_predictions.load(Ordering::Relaxed),
            self.prediction_errors.load(Ordering::Relaxed),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
