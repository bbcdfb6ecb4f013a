//! Logistic regression with softmax (multiclass) or sigmoid (binary) link.

use serde::{Deserialize, Serialize};

use super::{Classifier, softmax_inplace};
use crate::error::ArtifactError;

/// Fitted linear model: one coefficient row and intercept per class.
///
/// A model with a single row is binary: its logit is the score of class 1
/// and class 0 receives the complement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Coefficients, `[n_rows][n_features]`.
    pub coef: Vec<Vec<f64>>,
    /// Intercepts, `[n_rows]`.
    pub intercept: Vec<f64>,
}

impl LogisticRegression {
    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        let Some(first) = self.coef.first() else {
            return Err(ArtifactError::InconsistentArtifacts(
                "logistic model has no coefficient rows".to_string(),
            ));
        };
        if first.is_empty() || self.coef.iter().any(|row| row.len() != first.len()) {
            return Err(ArtifactError::InconsistentArtifacts(
                "logistic coefficient rows must be non-empty and equally long".to_string(),
            ));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(ArtifactError::InconsistentArtifacts(format!(
                "logistic model has {} coefficient rows but {} intercepts",
                self.coef.len(),
                self.intercept.len()
            )));
        }
        let finite = self.coef.iter().flatten().chain(&self.intercept).all(|v| v.is_finite());
        if !finite {
            return Err(ArtifactError::InconsistentArtifacts(
                "logistic coefficients and intercepts must be finite".to_string(),
            ));
        }
        Ok(())
    }

    fn decision_function(&self, x: &[f64]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn n_classes(&self) -> usize {
        if self.coef.len() == 1 { 2 } else { self.coef.len() }
    }

    fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        let mut scores = self.decision_function(x);
        if scores.len() == 1 {
            let score = scores[0];
            let p = if score.is_nan() { 0.5 } else { 1.0 / (1.0 + (-score).exp()) };
            return vec![1.0 - p, p];
        }
        softmax_inplace(&mut scores);
        scores
    }
}
