//! The encode → assemble → scale → predict → decode chain.
//!
//! [`Predictor`] owns the four fitted objects and is immutable after
//! construction, so one instance can serve any number of sessions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifacts::{ArtifactPaths, Artifacts};
use crate::classifier::{Classifier, ClassifierModel, argmax};
use crate::encoding::LabelEncoder;
use crate::error::{ArtifactError, PredictError};
use crate::features::{FeatureVector, N_FEATURES, PenguinMeasurements};
use crate::report::PredictionReport;
use crate::scaling::StandardScaler;

/// Probability assigned to one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub species: String,
    pub probability: f64,
}

/// Decoded model output for one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Species with the highest probability (lowest index on ties).
    pub species: String,
    /// That probability as a percentage, in `[0, 100]`.
    pub confidence_percent: f64,
    /// The full distribution, in species-encoder order.
    pub probabilities: Vec<ClassProbability>,
}

/// The loaded model components, cross-checked against each other.
#[derive(Debug, Clone)]
pub struct Predictor {
    classifier: ClassifierModel,
    scaler: StandardScaler,
    species_encoder: LabelEncoder,
    sex_encoder: LabelEncoder,
}

impl Predictor {
    /// Validate each component and their agreement on widths and classes.
    pub fn new(artifacts: Artifacts) -> Result<Self, ArtifactError> {
        let Artifacts {
            classifier,
            scaler,
            species_encoder,
            sex_encoder,
        } = artifacts;

        scaler.validate()?;
        species_encoder.validate()?;
        sex_encoder.validate()?;
        classifier.validate()?;

        if classifier.n_features() != N_FEATURES {
            return Err(ArtifactError::InconsistentArtifacts(format!(
                "classifier expects {} features, pipeline assembles {N_FEATURES}",
                classifier.n_features()
            )));
        }
        if classifier.n_classes() != species_encoder.len() {
            return Err(ArtifactError::InconsistentArtifacts(format!(
                "classifier predicts {} classes but species encoder knows {}",
                classifier.n_classes(),
                species_encoder.len()
            )));
        }

        Ok(Self {
            classifier,
            scaler,
            species_encoder,
            sex_encoder,
        })
    }

    /// Load all four artifacts from explicit paths.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let predictor = Self::new(Artifacts::load(paths)?)?;
        tracing::info!(
            species = ?predictor.species_encoder.classes(),
            sexes = ?predictor.sex_encoder.classes(),
            "model and preprocessing objects loaded"
        );
        Ok(predictor)
    }

    /// Load all four artifacts from their default names inside `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        Self::load(&ArtifactPaths::in_dir(dir))
    }

    pub fn species_encoder(&self) -> &LabelEncoder {
        &self.species_encoder
    }

    pub fn sex_encoder(&self) -> &LabelEncoder {
        &self.sex_encoder
    }

    /// Legal sex labels, in encoder order.
    pub fn sex_options(&self) -> &[String] {
        self.sex_encoder.classes()
    }

    /// Encode sex, assemble the canonical column order, and scale.
    pub fn encode_and_scale(
        &self,
        culmen_length_mm: f64,
        culmen_depth_mm: f64,
        flipper_length_mm: f64,
        body_mass_g: f64,
        sex: &str,
    ) -> Result<FeatureVector, PredictError> {
        let sex_code = self.sex_encoder.transform(sex)?;
        let raw = FeatureVector::assemble(
            culmen_length_mm,
            culmen_depth_mm,
            flipper_length_mm,
            body_mass_g,
            sex_code,
        );
        Ok(self.scale(&raw))
    }

    /// Apply the fitted scaler to an already assembled row.
    pub fn scale(&self, raw: &FeatureVector) -> FeatureVector {
        self.scaler.transform(raw)
    }

    /// Classify a scaled row and decode the winning class.
    pub fn predict(&self, scaled: &FeatureVector) -> Result<Prediction, PredictError> {
        let proba = self.classifier.predict_proba(scaled.as_slice());
        let code = argmax(&proba);
        let species = self.species_encoder.inverse_transform(code)?.to_string();
        let confidence_percent = (proba.get(code).copied().unwrap_or(0.0) * 100.0).clamp(0.0, 100.0);

        let probabilities = self
            .species_encoder
            .classes()
            .iter()
            .zip(&proba)
            .map(|(species, &probability)| ClassProbability {
                species: species.clone(),
                probability,
            })
            .collect();

        Ok(Prediction {
            species,
            confidence_percent,
            probabilities,
        })
    }

    /// Run the whole chain for one form submission.
    pub fn predict_measurements(
        &self,
        input: &PenguinMeasurements,
    ) -> Result<Prediction, PredictError> {
        let scaled = self.encode_and_scale(
            input.culmen_length_mm,
            input.culmen_depth_mm,
            input.flipper_length_mm,
            input.body_mass_g,
            &input.sex,
        )?;
        self.predict(&scaled)
    }

    /// Run the chain and pair the result with the echoed input.
    pub fn report(&self, input: &PenguinMeasurements) -> Result<PredictionReport, PredictError> {
        let prediction = self.predict_measurements(input)?;
        Ok(PredictionReport::new(prediction, input.clone()))
    }
}
