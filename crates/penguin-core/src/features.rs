//! Raw form input and the fixed-order feature vector fed to the model.

use serde::{Deserialize, Serialize};

/// Number of model input columns.
pub const N_FEATURES: usize = 5;

/// Training-time column order. The assembled vector, the scaler parameters
/// and the classifier weights all follow this order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "Culmen Length (mm)",
    "Culmen Depth (mm)",
    "Flipper Length (mm)",
    "Body Mass (g)",
    "Sex_encoded",
];

/// The five values submitted from the form, before any encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenguinMeasurements {
    /// Bill (culmen) length in millimetres.
    pub culmen_length_mm: f64,
    /// Bill (culmen) depth in millimetres.
    pub culmen_depth_mm: f64,
    /// Flipper length in millimetres.
    pub flipper_length_mm: f64,
    /// Body mass in grams.
    pub body_mass_g: f64,
    /// Sex label, one of the sex encoder's classes.
    pub sex: String,
}

/// An ordered model input row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; N_FEATURES]);

impl FeatureVector {
    /// Assemble the canonical column order from the four measurements and
    /// the already-encoded sex code.
    pub fn assemble(
        culmen_length_mm: f64,
        culmen_depth_mm: f64,
        flipper_length_mm: f64,
        body_mass_g: f64,
        sex_code: usize,
    ) -> Self {
        Self([
            culmen_length_mm,
            culmen_depth_mm,
            flipper_length_mm,
            body_mass_g,
            sex_code as f64,
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Return a copy with columns `a` and `b` exchanged.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= N_FEATURES`.
    pub fn swapped(mut self, a: usize, b: usize) -> Self {
        self.0.swap(a, b);
        self
    }
}
