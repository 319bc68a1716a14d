use serde::{Deserialize, Serialize};

/// Number of attributes the pipeline was trained on
pub const FEATURE_COUNT: usize = 9;

/// Slider bounds presented by the form
pub const FEATURE_MIN: u8 = 1;
pub const FEATURE_MAX: u8 = 10;

/// Feature keys in training order.
pub const FEATURE_KEYS: [&str; FEATURE_COUNT] = [
    "clump_thickness",
    "uniformity_cell_size",
    "uniformity_cell_shape",
    "marginal_adhesion",
    "single_epithelial_cell_size",
    "bare_nuclei",
    "bland_chromatin",
    "normal_nucleoli",
    "mitoses",
];

/// Human-readable labels, aligned with `FEATURE_KEYS`.
pub const FEATURE_LABELS: [&str; FEATURE_COUNT] = [
    "Clump Thickness",
    "Uniformity of Cell Size",
    "Uniformity of Cell Shape",
    "Marginal Adhesion",
    "Single Epithelial Cell Size",
    "Bare Nuclei",
    "Bland Chromatin",
    "Normal Nucleoli",
    "Mitoses",
];

/// One patient's nine cytology measurements.
///
/// Values are semantically integers in [1, 10]. The bounds are enforced by the
/// form, not here: any finite number is passed through to the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellFeatures {
    pub clump_thickness: f64,
    pub uniformity_cell_size: f64,
    pub uniformity_cell_shape: f64,
    pub marginal_adhesion: f64,
    pub single_epithelial_cell_size: f64,
    pub bare_nuclei: f64,
    pub bland_chromatin: f64,
    pub normal_nucleoli: f64,
    pub mitoses: f64,
}

impl CellFeatures {
    /// Build from values given in training order.
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [
            clump_thickness,
            uniformity_cell_size,
            uniformity_cell_shape,
            marginal_adhesion,
            single_epithelial_cell_size,
            bare_nuclei,
            bland_chromatin,
            normal_nucleoli,
            mitoses,
        ] = values;
        Self {
            clump_thickness,
            uniformity_cell_size,
            uniformity_cell_shape,
            marginal_adhesion,
            single_epithelial_cell_size,
            bare_nuclei,
            bland_chromatin,
            normal_nucleoli,
            mitoses,
        }
    }

    /// Values in training order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.clump_thickness,
            self.uniformity_cell_size,
            self.uniformity_cell_shape,
            self.marginal_adhesion,
            self.single_epithelial_cell_size,
            self.bare_nuclei,
            self.bland_chromatin,
            self.normal_nucleoli,
            self.mitoses,
        ]
    }

    /// Single model input row.
    pub fn to_row(&self) -> Vec<f64> {
        self.to_array().to_vec()
    }
}

impl Default for CellFeatures {
    /// Every slider at its minimum.
    fn default() -> Self {
        Self::from_array([FEATURE_MIN as f64; FEATURE_COUNT])
    }
}
