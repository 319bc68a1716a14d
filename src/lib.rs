pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ml;
pub mod predictor;
pub mod services;

pub use api::{create_router, AppState};
pub use config::AppConfig;
pub use domain::{CellFeatures, Diagnosis};
pub use error::{ClassifierError, Result};
pub use ml::SvmPipeline;
pub use predictor::{ClassPredictor, DiagnosisService, ModelInfo};
