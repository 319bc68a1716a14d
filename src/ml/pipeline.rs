//! Pre-fitted classification pipeline (standard scaler + kernel SVM).
//!
//! The pipeline is produced at training time and shipped as a JSON artifact.
//! It is loaded once at startup, validated up front, and never mutated.
//!
//! Decision function on a standardized row `z`:
//! `f(z) = Σ dual_coef[i]·k(sv[i], z) + intercept`; the predicted class is
//! `classes[1]` when `f(z) > 0`, otherwise `classes[0]`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::FEATURE_KEYS;
use crate::error::{ClassifierError, Result};
use crate::ml::Kernel;
use crate::predictor::ClassPredictor;

pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// Per-feature z-score standardization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvmClassifier {
    pub kernel: Kernel,
    /// Shape: [n_support][n_features], in standardized space.
    pub support_vectors: Vec<Vec<f64>>,
    /// One coefficient per support vector.
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
    /// [negative class, positive class]
    pub classes: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvmPipeline {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub scaler: StandardScaler,
    pub classifier: SvmClassifier,

    /// Optional free-form metadata (versioning, training info, etc).
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl SvmPipeline {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ClassifierError::ModelLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let model: Self = serde_json::from_str(&content).map_err(|e| {
            ClassifierError::ModelLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        model.validate().map_err(ClassifierError::InvalidModel)?;
        Ok(model)
    }

    pub fn input_dim(&self) -> usize {
        self.feature_names.len()
    }

    pub fn n_support(&self) -> usize {
        self.classifier.support_vectors.len()
    }

    pub fn kernel(&self) -> Kernel {
        self.classifier.kernel
    }

    /// Version string from the artifact metadata, if any.
    pub fn version(&self) -> Option<&str> {
        self.metadata.get("version").and_then(|v| v.as_str())
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(format!(
                "unsupported format_version {} (expected {})",
                self.format_version, SUPPORTED_FORMAT_VERSION
            ));
        }
        if self.feature_names.len() != FEATURE_KEYS.len() {
            return Err(format!(
                "feature_names length {} != {}",
                self.feature_names.len(),
                FEATURE_KEYS.len()
            ));
        }
        for (idx, (got, want)) in self.feature_names.iter().zip(FEATURE_KEYS).enumerate() {
            if got != want {
                return Err(format!(
                    "feature_names[{idx}] is {got:?}, expected {want:?}"
                ));
            }
        }

        let dim = self.input_dim();
        if self.scaler.mean.len() != dim {
            return Err(format!(
                "scaler mean length {} != input dim {dim}",
                self.scaler.mean.len()
            ));
        }
        if self.scaler.scale.len() != dim {
            return Err(format!(
                "scaler scale length {} != input dim {dim}",
                self.scaler.scale.len()
            ));
        }
        if self.scaler.mean.iter().any(|v| !v.is_finite()) {
            return Err("scaler mean must be finite".to_string());
        }
        if self.scaler.scale.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err("scaler scale must be finite and > 0".to_string());
        }

        let clf = &self.classifier;
        clf.kernel.validate()?;
        if clf.support_vectors.is_empty() {
            return Err("support_vectors must not be empty".to_string());
        }
        if clf.dual_coef.len() != clf.support_vectors.len() {
            return Err(format!(
                "dual_coef length {} != support vector count {}",
                clf.dual_coef.len(),
                clf.support_vectors.len()
            ));
        }
        for (idx, sv) in clf.support_vectors.iter().enumerate() {
            if sv.len() != dim {
                return Err(format!(
                    "support_vectors[{idx}] len {} != input dim {dim}",
                    sv.len()
                ));
            }
            if sv.iter().any(|v| !v.is_finite()) {
                return Err(format!("support_vectors[{idx}] contain non-finite values"));
            }
        }
        if clf.dual_coef.iter().any(|v| !v.is_finite()) {
            return Err("dual_coef contain non-finite values".to_string());
        }
        if !clf.intercept.is_finite() {
            return Err("intercept must be finite".to_string());
        }
        if clf.classes.len() != 2 {
            return Err(format!(
                "binary classifier needs exactly 2 classes, got {}",
                clf.classes.len()
            ));
        }
        if clf.classes[0] == clf.classes[1] {
            return Err("classes must be distinct".to_string());
        }
        Ok(())
    }

    /// Raw SVM margin for one row in original (unscaled) feature space.
    pub fn decision_function(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.input_dim() {
            return Err(ClassifierError::Validation(format!(
                "pipeline input dim mismatch: got {}, expected {}",
                row.len(),
                self.input_dim()
            )));
        }
        if let Some(idx) = row.iter().position(|v| !v.is_finite()) {
            return Err(ClassifierError::Validation(format!(
                "feature {} is not a finite number: {}",
                self.feature_names[idx], row[idx]
            )));
        }

        let z = self.scaler.transform(row);
        let clf = &self.classifier;
        let sum: f64 = clf
            .support_vectors
            .iter()
            .zip(&clf.dual_coef)
            .map(|(sv, coef)| coef * clf.kernel.apply(sv, &z))
            .sum();
        Ok(sum + clf.intercept)
    }

    fn predict_row(&self, row: &[f64]) -> Result<i64> {
        let margin = self.decision_function(row)?;
        if !margin.is_finite() {
            return Err(ClassifierError::Validation(format!(
                "decision function is not finite: {margin}"
            )));
        }
        let classes = &self.classifier.classes;
        Ok(if margin > 0.0 { classes[1] } else { classes[0] })
    }
}

impl ClassPredictor for SvmPipeline {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<i64>> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}
