//! Fitted predictive models
//!
//! Supports linear models and ensembles of regression trees. Trees are
//! stored as flat node arrays with node 0 as the root; a split sends rows
//! with `x[feature] <= threshold` to `left`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Predictor};

/// Model artifact as exported by the training side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Linear(m) => m.validate(),
            Self::TreeEnsemble(m) => m.validate(),
        }
    }

    pub fn into_predictor(self) -> Arc<dyn Predictor> {
        match self {
            Self::Linear(m) => Arc::new(m),
            Self::TreeEnsemble(m) => Arc::new(m),
        }
    }
}

/// `intercept + Σ coefficients[i] * x[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("'coefficients' must not be empty".to_string());
        }

        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("model parameters must be finite".to_string());
        }

        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, DomainError> {
        rows.iter()
            .map(|row| {
                check_width(row, self.coefficients.len(), self.name())?;
                Ok(row
                    .iter()
                    .zip(&self.coefficients)
                    .map(|(x, c)| x * c)
                    .sum::<f64>()
                    + self.intercept)
            })
            .collect()
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn name(&self) -> &'static str {
        "LinearModel"
    }
}

/// How per-tree outputs combine into one prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Random-forest style averaging
    #[default]
    Mean,
    /// Boosting style accumulation on top of `base_score`
    Sum,
}

/// A single tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Walk from the root to a leaf; every step moves to a higher index
    ///
    /// Trees built in code skip load-time validation, so a missing node,
    /// a missing feature or a backward link is reported instead of followed.
    fn evaluate(&self, row: &[f64]) -> Result<f64, String> {
        let mut index = 0;

        loop {
            match self.nodes.get(index) {
                None => return Err(format!("node {} does not exist", index)),
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = row.get(*feature).ok_or_else(|| {
                        format!("node {} splits on missing feature {}", index, feature)
                    })?;
                    let next = if x <= threshold { *left } else { *right };

                    if next <= index {
                        return Err(format!("node {} points back to node {}", index, next));
                    }
                    index = next;
                }
            }
        }
    }

    fn validate(&self, position: usize, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err(format!("tree {} has no nodes", position));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { value } if !value.is_finite() => {
                    return Err(format!("tree {} node {} has a non-finite value", position, index));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "tree {} node {} splits on feature {} but the model has {} features",
                            position, index, feature, n_features
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("tree {} node {} has a NaN threshold", position, index));
                    }
                    // Children must come after their parent, which rules out cycles
                    for child in [left, right] {
                        if *child <= index || *child >= self.nodes.len() {
                            return Err(format!(
                                "tree {} node {} points to invalid child {}",
                                position, index, child
                            ));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Ensemble of regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub n_features: usize,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<RegressionTree>,
}

impl TreeEnsemble {
    pub fn new(n_features: usize, aggregation: Aggregation, trees: Vec<RegressionTree>) -> Self {
        Self {
            n_features,
            aggregation,
            base_score: 0.0,
            trees,
        }
    }

    pub fn with_base_score(mut self, base_score: f64) -> Self {
        self.base_score = base_score;
        self
    }

    fn validate(&self) -> Result<(), String> {
        if self.n_features == 0 {
            return Err("'n_features' must be positive".to_string());
        }

        if self.trees.is_empty() {
            return Err("'trees' must not be empty".to_string());
        }

        if !self.base_score.is_finite() {
            return Err("'base_score' must be finite".to_string());
        }

        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(position, tree)| tree.validate(position, self.n_features))
    }

    fn evaluate(&self, row: &[f64]) -> Result<f64, DomainError> {
        if self.trees.is_empty() {
            return Err(DomainError::inference("model", "ensemble has no trees"));
        }

        let mut total = 0.0;
        for (position, tree) in self.trees.iter().enumerate() {
            total += tree.evaluate(row).map_err(|e| {
                DomainError::inference("model", format!("tree {}: {}", position, e))
            })?;
        }

        Ok(match self.aggregation {
            Aggregation::Mean => self.base_score + total / self.trees.len() as f64,
            Aggregation::Sum => self.base_score + total,
        })
    }
}

impl Predictor for TreeEnsemble {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, DomainError> {
        rows.iter()
            .map(|row| {
                check_width(row, self.n_features, self.name())?;
                self.evaluate(row)
            })
            .collect()
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn name(&self) -> &'static str {
        "TreeEnsemble"
    }
}

fn check_width(row: &[f64], expected: usize, name: &str) -> Result<(), DomainError> {
    if row.len() != expected {
        return Err(DomainError::inference(
            "model",
            format!(
                "X has {} features, but {} is expecting {} features as input",
                row.len(),
                name,
                expected
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> RegressionTree {
        RegressionTree::new(vec![
            TreeNode::Split {
                feature,
                threshold,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { value: low },
            TreeNode::Leaf { value: high },
        ])
    }

    #[test]
    fn test_linear_model_predict() {
        let model = LinearModel::new(vec![2.0, -1.0, 0.5, 0.0], 10.0);

        let outputs = model
            .predict(&[vec![1.0, 2.0, 4.0, 100.0], vec![0.0, 0.0, 0.0, 0.0]])
            .unwrap();

        assert_eq!(outputs, vec![12.0, 10.0]);
    }

    #[test]
    fn test_linear_model_width_mismatch() {
        let model = LinearModel::new(vec![1.0, 1.0], 0.0);

        let err = model.predict(&[vec![1.0]]).unwrap_err();

        assert!(err.to_string().contains("LinearModel is expecting 2 features"));
    }

    #[test]
    fn test_tree_ensemble_mean() {
        let model = TreeEnsemble::new(
            2,
            Aggregation::Mean,
            vec![stump(0, 0.0, 10.0, 20.0), stump(1, 5.0, 30.0, 40.0)],
        );

        assert_eq!(model.predict(&[vec![-1.0, 6.0]]).unwrap(), vec![25.0]);
        assert_eq!(model.predict(&[vec![1.0, 5.0]]).unwrap(), vec![25.0]);
        assert_eq!(model.predict(&[vec![1.0, 6.0]]).unwrap(), vec![30.0]);
    }

    #[test]
    fn test_tree_ensemble_sum_with_base_score() {
        let model = TreeEnsemble::new(
            1,
            Aggregation::Sum,
            vec![stump(0, 0.5, -1.0, 1.0), stump(0, 0.5, -0.5, 0.5)],
        )
        .with_base_score(50.0);

        assert_eq!(model.predict(&[vec![1.0]]).unwrap(), vec![51.5]);
        assert_eq!(model.predict(&[vec![0.0]]).unwrap(), vec![48.5]);
    }

    #[test]
    fn test_tree_validation_rejects_backward_child() {
        let tree = RegressionTree::new(vec![
            TreeNode::Leaf { value: 1.0 },
            TreeNode::Split {
                feature: 0,
                threshold: 0.0,
                left: 0,
                right: 0,
            },
        ]);
        let model = ModelArtifact::TreeEnsemble(TreeEnsemble::new(1, Aggregation::Mean, vec![tree]));

        let err = model.validate().unwrap_err();

        assert!(err.contains("invalid child 0"));
    }

    #[test]
    fn test_tree_validation_rejects_unknown_feature() {
        let model = ModelArtifact::TreeEnsemble(TreeEnsemble::new(
            2,
            Aggregation::Mean,
            vec![stump(3, 0.0, 1.0, 2.0)],
        ));

        assert!(model.validate().unwrap_err().contains("feature 3"));
    }

    #[test]
    fn test_unvalidated_empty_tree_is_inference_error() {
        let model = TreeEnsemble::new(1, Aggregation::Mean, vec![RegressionTree::new(vec![])]);

        let err = model.predict(&[vec![0.0]]).unwrap_err();

        assert!(matches!(err, DomainError::Inference { .. }));
        assert!(err.to_string().contains("tree 0: node 0 does not exist"));
    }

    #[test]
    fn test_unvalidated_backward_link_is_inference_error() {
        let tree = RegressionTree::new(vec![
            TreeNode::Split {
                feature: 0,
                threshold: 0.0,
                left: 1,
                right: 2,
            },
            TreeNode::Split {
                feature: 0,
                threshold: 0.0,
                left: 0,
                right: 0,
            },
            TreeNode::Leaf { value: 5.0 },
        ]);
        let model = TreeEnsemble::new(1, Aggregation::Mean, vec![tree]);

        let err = model.predict(&[vec![-1.0]]).unwrap_err();
        assert!(err.to_string().contains("node 1 points back to node 0"));

        assert_eq!(model.predict(&[vec![1.0]]).unwrap(), vec![5.0]);
    }

    #[test]
    fn test_unvalidated_missing_feature_is_inference_error() {
        let model = TreeEnsemble::new(2, Aggregation::Sum, vec![stump(3, 0.0, 1.0, 2.0)]);

        let err = model.predict(&[vec![0.0, 0.0]]).unwrap_err();

        assert!(err.to_string().contains("splits on missing feature 3"));
    }

    #[test]
    fn test_unvalidated_empty_ensemble_is_inference_error() {
        let model = TreeEnsemble::new(1, Aggregation::Mean, vec![]);

        let err = model.predict(&[vec![0.0]]).unwrap_err();

        assert!(err.to_string().contains("ensemble has no trees"));
    }

    #[test]
    fn test_tree_ensemble_deserialization() {
        let json = r#"{
            "kind": "tree_ensemble",
            "n_features": 4,
            "trees": [
                {"nodes": [
                    {"split": {"feature": 0, "threshold": 0.5, "left": 1, "right": 2}},
                    {"leaf": {"value": 61.0}},
                    {"leaf": {"value": 88.0}}
                ]}
            ]
        }"#;

        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        artifact.validate().unwrap();
        let predictor = artifact.into_predictor();

        assert_eq!(predictor.n_features(), 4);
        assert_eq!(predictor.predict(&[vec![1.0, 0.0, 0.0, 0.0]]).unwrap(), vec![88.0]);
    }

    #[test]
    fn test_linear_deserialization_defaults_intercept() {
        let artifact: ModelArtifact =
            serde_json::from_str(r#"{"kind":"linear","coefficients":[1.0,2.0]}"#).unwrap();

        assert_eq!(artifact, ModelArtifact::Linear(LinearModel::new(vec![1.0, 2.0], 0.0)));
    }

    #[test]
    fn test_linear_validation_rejects_empty() {
        let artifact = ModelArtifact::Linear(LinearModel::new(vec![], 1.0));

        assert!(artifact.validate().is_err());
    }
}
