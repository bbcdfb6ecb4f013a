//! Textual result report: prediction plus an echo of the submitted values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::controls::Measurement;
use crate::features::PenguinMeasurements;
use crate::pipeline::{ClassProbability, Prediction};

/// What the result panel shows after a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub species: String,
    /// Confidence percentage, unrounded. Display rounds to two decimals.
    pub confidence_percent: f64,
    pub probabilities: Vec<ClassProbability>,
    /// The submitted values, unchanged.
    pub input: PenguinMeasurements,
}

impl PredictionReport {
    pub fn new(prediction: Prediction, input: PenguinMeasurements) -> Self {
        Self {
            species: prediction.species,
            confidence_percent: prediction.confidence_percent,
            probabilities: prediction.probabilities,
            input,
        }
    }

    /// Confidence formatted as `"87.12%"`.
    pub fn confidence_label(&self) -> String {
        format!("{:.2}%", self.confidence_percent)
    }

    /// One `label: value unit` line per numeric input, then sex.
    pub fn input_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = Measurement::ALL
            .iter()
            .map(|m| {
                format!(
                    "{}: {} {}",
                    m.label(),
                    m.domain().format(m.value_of(&self.input)),
                    m.unit()
                )
            })
            .collect();
        lines.push(format!("Sex: {}", self.input.sex));
        lines
    }
}

impl fmt::Display for PredictionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predicted species: {}", self.species)?;
        writeln!(f, "Confidence: {}", self.confidence_label())?;
        writeln!(f, "---")?;
        for line in self.input_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
