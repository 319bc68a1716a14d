//! SVM kernel functions.
//!
//! Parameters follow the usual libsvm conventions:
//! - linear:  k(x, y) = x·y
//! - rbf:     k(x, y) = exp(-γ||x-y||²)
//! - poly:    k(x, y) = (γ x·y + coef0)^degree
//! - sigmoid: k(x, y) = tanh(γ x·y + coef0)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kernel {
    Linear,
    Rbf {
        gamma: f64,
    },
    Poly {
        gamma: f64,
        #[serde(default)]
        coef0: f64,
        degree: u32,
    },
    Sigmoid {
        gamma: f64,
        #[serde(default)]
        coef0: f64,
    },
}

impl Kernel {
    pub fn name(&self) -> &'static str {
        match self {
            Kernel::Linear => "linear",
            Kernel::Rbf { .. } => "rbf",
            Kernel::Poly { .. } => "poly",
            Kernel::Sigmoid { .. } => "sigmoid",
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        match *self {
            Kernel::Linear => Ok(()),
            Kernel::Rbf { gamma } => check_gamma(gamma),
            Kernel::Poly {
                gamma,
                coef0,
                degree,
            } => {
                check_gamma(gamma)?;
                if !coef0.is_finite() {
                    return Err("poly coef0 must be finite".to_string());
                }
                if degree == 0 {
                    return Err("poly degree must be >= 1".to_string());
                }
                Ok(())
            }
            Kernel::Sigmoid { gamma, coef0 } => {
                check_gamma(gamma)?;
                if !coef0.is_finite() {
                    return Err("sigmoid coef0 must be finite".to_string());
                }
                Ok(())
            }
        }
    }

    /// Evaluate k(x, y). Callers guarantee equal lengths.
    #[inline]
    pub fn apply(&self, x: &[f64], y: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), y.len());
        match *self {
            Kernel::Linear => dot(x, y),
            Kernel::Rbf { gamma } => {
                let sq_dist: f64 = x.iter().zip(y).map(|(a, b)| (a - b) * (a - b)).sum();
                (-gamma * sq_dist).exp()
            }
            Kernel::Poly {
                gamma,
                coef0,
                degree,
            } => (gamma * dot(x, y) + coef0).powi(degree as i32),
            Kernel::Sigmoid { gamma, coef0 } => (gamma * dot(x, y) + coef0).tanh(),
        }
    }
}

fn check_gamma(gamma: f64) -> std::result::Result<(), String> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(format!("kernel gamma must be finite and > 0, got {gamma}"));
    }
    Ok(())
}

#[inline]
fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}
