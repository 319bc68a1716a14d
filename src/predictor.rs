//! Prediction entry point: feature assembly, inference call, label mapping.

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{CellFeatures, Diagnosis};
use crate::error::{ClassifierError, Result};
use crate::ml::SvmPipeline;

/// A loaded model that maps a batch of feature rows to class ids.
///
/// Implementations must be safe to call concurrently through a shared
/// reference.
#[cfg_attr(test, mockall::automock)]
pub trait ClassPredictor: Send + Sync {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<i64>>;
}

/// Descriptive info about the loaded model, for health reporting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelInfo {
    pub path: Option<String>,
    pub kernel: Option<String>,
    pub n_support: Option<usize>,
    pub version: Option<String>,
}

/// Immutable prediction context built once at startup and shared by reference.
#[derive(Clone)]
pub struct DiagnosisService {
    model: Arc<dyn ClassPredictor>,
    info: ModelInfo,
}

impl std::fmt::Debug for DiagnosisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosisService")
            .field("info", &self.info)
            .finish()
    }
}

impl DiagnosisService {
    pub fn new(model: Arc<dyn ClassPredictor>) -> Self {
        Self {
            model,
            info: ModelInfo::default(),
        }
    }

    pub fn with_info(mut self, info: ModelInfo) -> Self {
        self.info = info;
        self
    }

    /// Deserialize the pipeline artifact at `path`. Called once per process.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let pipeline = SvmPipeline::from_file(path)?;
        let info = ModelInfo {
            path: Some(path.display().to_string()),
            kernel: Some(pipeline.kernel().name().to_string()),
            n_support: Some(pipeline.n_support()),
            version: pipeline.version().map(str::to_string),
        };
        Ok(Self::new(Arc::new(pipeline)).with_info(info))
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    /// Classify one patient's measurements.
    pub fn predict_cancer(&self, features: &CellFeatures) -> Result<Diagnosis> {
        let rows = vec![features.to_row()];
        let class_ids = self.model.predict(&rows)?;
        let class_id = class_ids
            .first()
            .copied()
            .ok_or(ClassifierError::EmptyPrediction)?;
        Diagnosis::from_class_id(class_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CellFeatures {
        CellFeatures::from_array([5.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 1.0])
    }

    fn service_returning(ids: Vec<i64>) -> DiagnosisService {
        let mut mock = MockClassPredictor::new();
        mock.expect_predict().returning(move |_| Ok(ids.clone()));
        DiagnosisService::new(Arc::new(mock))
    }

    #[test]
    fn submits_single_row_in_input_order() {
        let mut mock = MockClassPredictor::new();
        mock.expect_predict()
            .withf(|rows| {
                rows.len() == 1 && rows[0] == vec![5.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 1.0]
            })
            .times(1)
            .returning(|_| Ok(vec![0]));
        let service = DiagnosisService::new(Arc::new(mock));

        assert_eq!(service.predict_cancer(&sample()).unwrap(), Diagnosis::Benign);
    }

    #[test]
    fn maps_class_ids_to_labels() {
        assert_eq!(
            service_returning(vec![0]).predict_cancer(&sample()).unwrap().as_str(),
            "benign"
        );
        assert_eq!(
            service_returning(vec![1]).predict_cancer(&sample()).unwrap().as_str(),
            "malignant"
        );
    }

    #[test]
    fn unexpected_class_id_is_an_error() {
        // Anything other than 0 used to fall through to "malignant".
        let err = service_returning(vec![2]).predict_cancer(&sample()).unwrap_err();
        assert!(matches!(err, ClassifierError::UnknownClassId(2)));
    }

    #[test]
    fn empty_batch_is_an_error() {
        let err = service_returning(vec![]).predict_cancer(&sample()).unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyPrediction));
    }

    #[test]
    fn model_errors_propagate() {
        let mut mock = MockClassPredictor::new();
        mock.expect_predict()
            .returning(|_| Err(ClassifierError::Validation("bad row".to_string())));
        let service = DiagnosisService::new(Arc::new(mock));
        assert!(matches!(
            service.predict_cancer(&sample()),
            Err(ClassifierError::Validation(_))
        ));
    }

    #[test]
    fn each_prediction_calls_the_model_once() {
        let mut mock = MockClassPredictor::new();
        mock.expect_predict().times(3).returning(|_| Ok(vec![1]));
        let service = DiagnosisService::new(Arc::new(mock));
        for _ in 0..3 {
            assert_eq!(
                service.predict_cancer(&sample()).unwrap(),
                Diagnosis::Malignant
            );
        }
    }
}
