use crate::error::{AppError, Result};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pre-fit mapping from a scaled feature vector to an integer class
pub trait CoverClassifier: Send + Sync {
    /// Number of features the classifier expects
    fn n_features(&self) -> usize;

    /// Predict the class of a single scaled vector
    fn predict(&self, features: ArrayView1<f64>) -> Result<i64>;
}

/// Node arrays of one fitted CART tree.
///
/// A node is a leaf when both children are `-1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class counts or fractions, `n_classes` wide
    pub value: Vec<Vec<f64>>,
}

/// On-disk form of a fitted random forest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    /// Class labels in the column order of every `value` row
    pub classes: Vec<i64>,
    pub n_features: usize,
    pub trees: Vec<TreeArtifact>,
}

const TREE_LEAF: i64 = -1;

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Normalised class distribution
        distribution: Array1<f64>,
    },
}

/// A single decision tree; routes left when `x[feature] <= threshold`
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn from_artifact(
        artifact: &TreeArtifact,
        n_classes: usize,
        n_features: usize,
    ) -> std::result::Result<Self, String> {
        let n_nodes = artifact.children_left.len();
        if n_nodes == 0 {
            return Err("tree has no nodes".to_string());
        }
        if artifact.children_right.len() != n_nodes
            || artifact.feature.len() != n_nodes
            || artifact.threshold.len() != n_nodes
            || artifact.value.len() != n_nodes
        {
            return Err(format!(
                "node arrays disagree in length (expected {})",
                n_nodes
            ));
        }

        let child = |idx: i64| -> std::result::Result<usize, String> {
            if idx >= 0 && (idx as usize) < n_nodes {
                Ok(idx as usize)
            } else {
                Err(format!("child index {} out of range", idx))
            }
        };

        let mut nodes = Vec::with_capacity(n_nodes);
        for i in 0..n_nodes {
            let left = artifact.children_left[i];
            let right = artifact.children_right[i];

            if left == TREE_LEAF && right == TREE_LEAF {
                let row = &artifact.value[i];
                if row.len() != n_classes {
                    return Err(format!(
                        "leaf {} has {} class values, expected {}",
                        i,
                        row.len(),
                        n_classes
                    ));
                }
                let total: f64 = row.iter().sum();
                if !total.is_finite() || total <= 0.0 {
                    return Err(format!("leaf {} has an empty class distribution", i));
                }
                nodes.push(Node::Leaf {
                    distribution: Array1::from(row.clone()) / total,
                });
            } else {
                let feature = artifact.feature[i];
                if feature < 0 || feature as usize >= n_features {
                    return Err(format!("node {} splits on unknown feature {}", i, feature));
                }
                nodes.push(Node::Split {
                    feature: feature as usize,
                    threshold: artifact.threshold[i],
                    left: child(left)?,
                    right: child(right)?,
                });
            }
        }

        Ok(Self { nodes })
    }

    /// Class distribution of the leaf `features` lands in
    fn leaf_distribution(&self, features: ArrayView1<f64>) -> Result<&Array1<f64>> {
        let mut idx = 0;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes
        for _ in 0..=self.nodes.len() {
            match &self.nodes[idx] {
                Node::Leaf { distribution } => return Ok(distribution),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }

        Err(AppError::Prediction(
            "tree traversal did not reach a leaf".to_string(),
        ))
    }
}

/// Random forest classifier: averages leaf class distributions across trees
/// and returns the class with the highest mean probability (first on ties).
#[derive(Debug, Clone)]
pub struct RandomForestClassifier {
    classes: Vec<i64>,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForestClassifier {
    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self> {
        if artifact.classes.is_empty() {
            return Err(AppError::Validation("forest has no classes".to_string()));
        }
        if artifact.trees.is_empty() {
            return Err(AppError::Validation("forest has no trees".to_string()));
        }
        if artifact.n_features == 0 {
            return Err(AppError::Validation("forest has no features".to_string()));
        }

        let n_classes = artifact.classes.len();
        let trees = artifact
            .trees
            .iter()
            .enumerate()
            .map(|(i, tree)| {
                DecisionTree::from_artifact(tree, n_classes, artifact.n_features)
                    .map_err(|e| AppError::Validation(format!("tree {}: {}", i, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            classes: artifact.classes,
            n_features: artifact.n_features,
            trees,
        })
    }

    /// Load a forest artifact from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| AppError::Artifact {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let artifact: ForestArtifact =
            serde_json::from_str(&raw).map_err(|e| AppError::Artifact {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Self::from_artifact(artifact).map_err(|e| AppError::Artifact {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Mean class probabilities, in `classes()` order
    pub fn predict_proba(&self, features: ArrayView1<f64>) -> Result<Array1<f64>> {
        if features.len() != self.n_features {
            return Err(AppError::Prediction(format!(
                "classifier expects {} features, got {}",
                self.n_features,
                features.len()
            )));
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(AppError::Prediction(
                "feature vector contains non-finite values".to_string(),
            ));
        }

        let mut proba = Array1::<f64>::zeros(self.classes.len());
        for tree in &self.trees {
            proba += tree.leaf_distribution(features)?;
        }
        proba /= self.trees.len() as f64;

        Ok(proba)
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl CoverClassifier for RandomForestClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: ArrayView1<f64>) -> Result<i64> {
        let proba = self.predict_proba(features)?;

        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }

        Ok(self.classes[best])
    }
}
