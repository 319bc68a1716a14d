use std::sync::Arc;

use crate::predictor::DiagnosisService;
use crate::services::Metrics;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded model context; read-only for the life of the process
    pub service: Arc<DiagnosisService>,

    /// Request counters
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(service: DiagnosisService) -> Self {
        Self {
            service: Arc::new(service),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Get system uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.metrics.uptime_seconds()
    }
}
