//! Fitted classifiers mapping a scaled feature row to class probabilities.

pub mod forest;
pub mod logistic;

use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;

pub use forest::{ForestClassifier, Tree, TreeNode};
pub use logistic::LogisticRegression;

/// A fitted decision function over a fixed label space.
pub trait Classifier {
    /// Number of classes in the output distribution.
    fn n_classes(&self) -> usize;

    /// Number of input columns the model was fit on.
    fn n_features(&self) -> usize;

    /// Probability of each class for one scaled row. Sums to 1.
    fn predict_proba(&self, x: &[f64]) -> Vec<f64>;
}

/// The classifier artifact as stored on disk, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    /// Multinomial (or binary) logistic regression.
    Logistic(LogisticRegression),
    /// Averaged ensemble of decision trees.
    Forest(ForestClassifier),
}

impl ClassifierModel {
    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        match self {
            Self::Logistic(model) => model.validate(),
            Self::Forest(model) => model.validate(),
        }
    }
}

impl Classifier for ClassifierModel {
    fn n_classes(&self) -> usize {
        match self {
            Self::Logistic(model) => model.n_classes(),
            Self::Forest(model) => model.n_classes(),
        }
    }

    fn n_features(&self) -> usize {
        match self {
            Self::Logistic(model) => model.n_features(),
            Self::Forest(model) => model.n_features(),
        }
    }

    fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        match self {
            Self::Logistic(model) => model.predict_proba(x),
            Self::Forest(model) => model.predict_proba(x),
        }
    }
}

/// Index of the largest value. Ties go to the lowest index; NaN never wins.
///
/// Returns 0 for an empty slice.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] || values[best].is_nan() {
            best = i;
        }
    }
    best
}

/// Softmax in place, shifted by the maximum for numerical stability.
///
/// Always leaves a valid distribution: NaN logits get zero mass, `+inf`
/// logits split the mass equally, and a row with no finite or `+inf`
/// logit becomes uniform.
pub fn softmax_inplace(values: &mut [f64]) {
    if values.is_empty() {
        return;
    }

    let max_val = values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NEG_INFINITY, f64::max);

    if max_val.is_infinite() {
        let n = values.len() as f64;
        let winners = values.iter().filter(|v| **v == max_val).count() as f64;
        for val in values.iter_mut() {
            *val = if max_val == f64::NEG_INFINITY {
                1.0 / n
            } else if *val == max_val {
                1.0 / winners
            } else {
                0.0
            };
        }
        return;
    }

    let mut sum = 0.0_f64;
    for val in values.iter_mut() {
        *val = if val.is_nan() { 0.0 } else { (*val - max_val).exp() };
        sum += *val;
    }

    if sum > 0.0 {
        for val in values.iter_mut() {
            *val /= sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_picks_largest() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), 1);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn test_argmax_tie_goes_to_lowest_index() {
        assert_eq!(argmax(&[0.25, 0.375, 0.375]), 1);
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0]), 0);
    }

    #[test]
    fn test_argmax_skips_nan() {
        assert_eq!(argmax(&[f64::NAN, 0.2, 0.1]), 1);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let mut values = vec![1.0, 2.0, 3.0];
        softmax_inplace(&mut values);
        let sum: f64 = values.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(values[2] > values[1] && values[1] > values[0]);
    }

    #[test]
    fn test_softmax_large_logits_stay_finite() {
        let mut values = vec![1000.0, 1001.0, 1002.0];
        softmax_inplace(&mut values);
        assert!(values.iter().all(|v| v.is_finite()));
        let sum: f64 = values.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_softmax_infinite_logit_takes_all_mass() {
        let mut values = vec![f64::INFINITY, 3.0, -2.0];
        softmax_inplace(&mut values);
        assert_eq!(values, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_softmax_infinite_logits_share_mass() {
        let mut values = vec![1.0, f64::INFINITY, f64::INFINITY];
        softmax_inplace(&mut values);
        assert_eq!(values, vec![0.0, 0.5, 0.5]);
        assert_eq!(argmax(&values), 1);
    }

    #[test]
    fn test_softmax_nan_logit_gets_no_mass() {
        let mut values = vec![f64::NAN, 0.0, 0.0];
        softmax_inplace(&mut values);
        assert_eq!(values, vec![0.0, 0.5, 0.5]);

        let mut values = vec![f64::NAN, f64::NEG_INFINITY];
        softmax_inplace(&mut values);
        assert_eq!(values, vec![0.5, 0.5]);
    }

    #[test]
    fn test_model_kind_tag() {
        let json = r#"{"kind": "logistic", "coef": [[1.0], [-1.0]], "intercept": [0.0, 0.0]}"#;
        let model: ClassifierModel = serde_json::from_str(json).unwrap();
        assert!(matches!(model, ClassifierModel::Logistic(_)));
        assert_eq!(model.n_classes(), 2);
        assert_eq!(model.n_features(), 1);
    }
}
