use serde::{Deserialize, Serialize};

use crate::band::Band;
use crate::error::FlockError;

/// Øyeblikksbilde av statistikken for de gyldige vektene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub mean: f64,
    pub median: f64,
    /// Utvalgsstandardavvik (n−1). `None` når n = 1.
    pub std_dev: Option<f64>,
    /// std_dev / mean · 100. `None` når std_dev mangler eller mean = 0.
    pub coefficient_of_variation: Option<f64>,
    pub band: Band,
    pub below_band: usize,
    pub in_band: usize,
    pub above_band: usize,
    /// in_band / count · 100
    pub uniformity: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achieved_uniformity: Option<f64>,
}

impl OptimizationResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn failure(err: &FlockError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            reason: Some(err.code().to_string()),
            ..Default::default()
        }
    }

    pub fn with_adjusted(mut self, adjusted_count: usize, achieved_uniformity: f64) -> Self {
        self.adjusted_count = Some(adjusted_count);
        self.achieved_uniformity = Some(achieved_uniformity);
        self
    }
}
