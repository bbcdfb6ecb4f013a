//! Penguin Core — domain layer for the species predictor.
//!
//! This crate holds the fitted preprocessing objects (label encoders and the
//! standard scaler), the classifiers, the form control domains, and the
//! encode → scale → predict pipeline. No networking or UI dependencies.

pub mod artifacts;
pub mod classifier;
pub mod controls;
pub mod encoding;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod report;
pub mod scaling;

// Re-exports for convenience.
pub use artifacts::{ArtifactKind, ArtifactPaths, Artifacts};
pub use classifier::{Classifier, ClassifierModel};
pub use controls::{ChoiceControl, Domain, FormSchema, Measurement, NumericControl};
pub use encoding::LabelEncoder;
pub use error::{ArtifactError, PredictError};
pub use features::{FEATURE_NAMES, FeatureVector, N_FEATURES, PenguinMeasurements};
pub use pipeline::{ClassProbability, Prediction, Predictor};
pub use report::PredictionReport;
pub use scaling::StandardScaler;
