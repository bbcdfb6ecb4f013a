//! Fitted standard scaler: `z = (x - mean) / scale` per column.

use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;
use crate::features::{FeatureVector, N_FEATURES};

/// Per-feature affine transform fit offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Training mean of each column.
    pub mean: Vec<f64>,
    /// Training standard deviation of each column.
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        if self.mean.len() != N_FEATURES || self.scale.len() != N_FEATURES {
            return Err(ArtifactError::InconsistentArtifacts(format!(
                "scaler has {} means and {} scales, expected {N_FEATURES} of each",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err(ArtifactError::InconsistentArtifacts(
                "scaler parameters must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Scale one row.
    ///
    /// A zero scale marks a constant training column and is treated as 1.
    pub fn transform(&self, x: &FeatureVector) -> FeatureVector {
        let mut out = [0.0_f64; N_FEATURES];
        for (i, value) in out.iter_mut().enumerate() {
            let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            *value = (x.0[i] - self.mean[i]) / scale;
        }
        FeatureVector(out)
    }
}
