use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Diagnosis;
use crate::predictor::ModelInfo;

// ============================================================================
// Prediction Types
// ============================================================================

/// One entry of the label widget; the predicted class is ranked first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedLabel {
    pub label: Diagnosis,
    pub rank: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub request_id: String,
    pub label: Diagnosis,
    pub class_id: i64,
    pub ranking: Vec<RankedLabel>,
}

impl PredictResponse {
    pub fn new(request_id: String, diagnosis: Diagnosis) -> Self {
        Self {
            request_id,
            label: diagnosis,
            class_id: diagnosis.class_id(),
            ranking: ranking(diagnosis),
        }
    }
}

/// Predicted class first, then the other one.
pub fn ranking(diagnosis: Diagnosis) -> Vec<RankedLabel> {
    vec![
        RankedLabel {
            label: diagnosis,
            rank: 1,
        },
        RankedLabel {
            label: diagnosis.other(),
            rank: 2,
        },
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Health Check Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub version: String,
    pub model: ModelInfo,
    pub predictions_served: u64,
}
