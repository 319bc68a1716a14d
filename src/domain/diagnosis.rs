use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

/// Predicted cell type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diagnosis {
    Benign,
    Malignant,
}

impl Diagnosis {
    /// Map a raw model class id. Ids outside {0, 1} are rejected.
    pub fn from_class_id(class_id: i64) -> Result<Self> {
        match class_id {
            0 => Ok(Diagnosis::Benign),
            1 => Ok(Diagnosis::Malignant),
            other => Err(ClassifierError::UnknownClassId(other)),
        }
    }

    pub fn class_id(&self) -> i64 {
        match self {
            Diagnosis::Benign => 0,
            Diagnosis::Malignant => 1,
        }
    }

    /// Get the opposite class
    pub fn other(&self) -> Self {
        match self {
            Diagnosis::Benign => Diagnosis::Malignant,
            Diagnosis::Malignant => Diagnosis::Benign,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::Benign => "benign",
            Diagnosis::Malignant => "malignant",
        }
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
