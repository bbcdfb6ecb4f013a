//! Decision-tree ensembles with per-leaf class weights.
//!
//! Trees are stored as flat node arrays with the root at index 0. A split
//! sends a row left when `x[feature] <= threshold`. Leaves hold class
//! weights (sample counts or fractions); each leaf is normalized to a
//! distribution and the ensemble averages the trees.

use serde::{Deserialize, Serialize};

use super::Classifier;
use crate::error::ArtifactError;

/// One node of a flat tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

/// A single fitted decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk from the root to a leaf and return its normalized distribution.
    ///
    /// `None` when the walk leaves the node array, reads past the row, runs
    /// longer than the tree has nodes, or lands on a leaf of the wrong width.
    fn leaf_distribution(&self, x: &[f64], n_classes: usize) -> Option<Vec<f64>> {
        let mut node = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(node)? {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if *x.get(*feature)? <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { value } if value.len() == n_classes => {
                    return Some(normalize(value, n_classes));
                }
                TreeNode::Leaf { .. } => return None,
            }
        }
        None
    }

    /// Children must point strictly forward so every walk terminates.
    fn validate(&self, index: usize, n_classes: usize, n_features: usize) -> Result<(), ArtifactError> {
        if self.nodes.is_empty() {
            return Err(ArtifactError::InconsistentArtifacts(format!("tree {index} has no nodes")));
        }
        for (id, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= n_features {
                        return Err(ArtifactError::InconsistentArtifacts(format!(
                            "tree {index} node {id} splits on feature {feature}, model has {n_features}"
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= id || child >= self.nodes.len() {
                            return Err(ArtifactError::InconsistentArtifacts(format!(
                                "tree {index} node {id} has invalid child {child}"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes || value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(ArtifactError::InconsistentArtifacts(format!(
                            "tree {index} leaf {id} must hold {n_classes} non-negative weights"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Averaged ensemble of trees. A single tree is a one-member forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestClassifier {
    pub n_classes: usize,
    pub n_features: usize,
    pub trees: Vec<Tree>,
}

impl ForestClassifier {
    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        if self.n_classes < 2 {
            return Err(ArtifactError::InconsistentArtifacts(format!(
                "forest must have at least 2 classes, found {}",
                self.n_classes
            )));
        }
        if self.trees.is_empty() {
            return Err(ArtifactError::InconsistentArtifacts(
                "forest has no trees".to_string(),
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.n_classes, self.n_features)?;
        }
        Ok(())
    }
}

impl Classifier for ForestClassifier {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        let mut proba = vec![0.0_f64; self.n_classes];
        for tree in &self.trees {
            let dist = tree
                .leaf_distribution(x, self.n_classes)
                .unwrap_or_else(|| uniform(self.n_classes));
            for (acc, p) in proba.iter_mut().zip(dist) {
                *acc += p;
            }
        }
        let n_trees = self.trees.len().max(1) as f64;
        for p in &mut proba {
            *p /= n_trees;
        }
        proba
    }
}

/// All-zero leaves become uniform.
fn normalize(weights: &[f64], n_classes: usize) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total > 0.0 && total.is_finite() && weights.iter().all(|w| *w >= 0.0) {
        weights.iter().map(|w| w / total).collect()
    } else {
        uniform(n_classes)
    }
}

fn uniform(n_classes: usize) -> Vec<f64> {
    vec![1.0 / n_classes as f64; n_classes]
}
