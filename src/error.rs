use thiserror::Error;

/// Main error type for the classifier service
#[derive(Error, Debug)]
pub enum ClassifierError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Model artifact errors
    #[error("Model load failed for {path}: {reason}")]
    ModelLoad { path: String, reason: String },

    #[error("Invalid model artifact: {0}")]
    InvalidModel(String),

    // Inference errors
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Model returned no prediction")]
    EmptyPrediction,

    #[error("Unknown class id: {0}")]
    UnknownClassId(i64),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for ClassifierError
pub type Result<T> = std::result::Result<T, ClassifierError>;
