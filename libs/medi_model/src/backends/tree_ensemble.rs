//! Majority-vote ensemble of binary decision trees (random-forest style).
//!
//! Nodes are stored flat per tree; node 0 is the root and every child index
//! must be greater than its parent's, so traversal always terminates.

use crate::backend::{classification_output, take_input, BackendError, ModelBackend, Tensor};
use crate::metadata::ModelMetadata;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// `x[feature] <= threshold` goes left.
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        class: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn predict(&self, x: &[f32]) -> usize {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    fn check(&self, tree: usize, n_features: usize, n_classes: usize) -> Result<(), BackendError> {
        let bad = |msg: String| Err(BackendError::LoadError(format!("tree {tree}: {msg}")));
        if self.nodes.is_empty() {
            return bad("no nodes".into());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Leaf { class } if *class >= n_classes => {
                    return bad(format!("node {i} class {class} >= n_classes {n_classes}"));
                }
                Node::Split { feature, .. } if *feature >= n_features => {
                    return bad(format!("node {i} feature {feature} >= n_features {n_features}"));
                }
                Node::Split { threshold, .. } if !threshold.is_finite() => {
                    return bad(format!("node {i} threshold is not finite"));
                }
                Node::Split { left, right, .. }
                    if *left <= i || *right <= i || *left >= self.nodes.len() || *right >= self.nodes.len() =>
                {
                    return bad(format!("node {i} has invalid children ({left}, {right})"));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Params {
    n_features: usize,
    n_classes: usize,
    trees: Vec<Tree>,
}

impl Params {
    fn check(&self) -> Result<(), BackendError> {
        if self.n_features == 0 || self.n_classes == 0 {
            return Err(BackendError::LoadError(
                "n_features and n_classes must be positive".into(),
            ));
        }
        if self.trees.is_empty() {
            return Err(BackendError::LoadError("ensemble has no trees".into()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check(i, self.n_features, self.n_classes)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TreeEnsembleBackend {
    params: Option<Params>,
}

impl TreeEnsembleBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an already-loaded backend from in-memory trees.
    pub fn from_trees(
        n_features: usize,
        n_classes: usize,
        trees: Vec<Tree>,
    ) -> Result<Self, BackendError> {
        let params = Params {
            n_features,
            n_classes,
            trees,
        };
        params.check()?;
        Ok(Self {
            params: Some(params),
        })
    }
}

impl ModelBackend for TreeEnsembleBackend {
    fn load_model(
        &mut self,
        model_bytes: &[u8],
        metadata: &ModelMetadata,
    ) -> Result<(), BackendError> {
        let params: Params = serde_json::from_slice(model_bytes)
            .map_err(|e| BackendError::LoadError(format!("{}: {e}", metadata.id)))?;
        params.check()?;
        log::debug!(
            "loaded tree_ensemble model {} ({} trees, {} classes)",
            metadata.id,
            params.trees.len(),
            params.n_classes
        );
        self.params = Some(params);
        Ok(())
    }

    fn infer(
        &self,
        mut inputs: HashMap<String, Tensor>,
    ) -> Result<HashMap<String, Tensor>, BackendError> {
        let params = self
            .params
            .as_ref()
            .ok_or_else(|| BackendError::InferenceError("Model not loaded".into()))?;
        let x = take_input(&mut inputs, params.n_features)?;

        let mut votes = vec![0u32; params.n_classes];
        for tree in &params.trees {
            votes[tree.predict(&x)] += 1;
        }
        let n = params.trees.len() as f32;
        let probabilities = votes.into_iter().map(|v| v as f32 / n).collect();

        Ok(classification_output(probabilities))
    }

    fn backend_name(&self) -> &str {
        "tree_ensemble"
    }

    fn is_loaded(&self) -> bool {
        self.params.is_some()
    }

    fn n_features(&self) -> Option<usize> {
        self.params.as_ref().map(|p| p.n_features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CLASS, INPUT, PROBABILITIES};

    fn stump(feature: usize, threshold: f32, left: usize, right: usize) -> Tree {
        Tree {
            nodes: vec![
                Node::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { class: left },
                Node::Leaf { class: right },
            ],
        }
    }

    fn request(x: Vec<f32>) -> HashMap<String, Tensor> {
        let mut inputs = HashMap::new();
        inputs.insert(INPUT.to_string(), Tensor::vector(INPUT, x));
        inputs
    }

    #[test]
    fn majority_vote_wins() {
        let backend = TreeEnsembleBackend::from_trees(
            2,
            3,
            vec![stump(0, 50.0, 0, 2), stump(0, 60.0, 0, 2), stump(1, 95.0, 1, 0)],
        )
        .unwrap();
        let out = backend.infer(request(vec![70.0, 99.0])).unwrap();
        assert_eq!(out[CLASS].data, vec![2.0]);
        let p = &out[PROBABILITIES].data;
        assert!((p[2] - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn threshold_is_inclusive_on_left() {
        let backend = TreeEnsembleBackend::from_trees(1, 2, vec![stump(0, 38.0, 0, 1)]).unwrap();
        let out = backend.infer(request(vec![38.0])).unwrap();
        assert_eq!(out[CLASS].data, vec![0.0]);
    }

    #[test]
    fn backward_child_index_is_rejected() {
        let tree = Tree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 1,
                },
                Node::Leaf { class: 0 },
            ],
        };
        let err = TreeEnsembleBackend::from_trees(1, 2, vec![tree]).unwrap_err();
        assert!(matches!(err, BackendError::LoadError(_)));
    }

    #[test]
    fn leaf_class_must_fit_declared_classes() {
        let err = TreeEnsembleBackend::from_trees(1, 2, vec![stump(0, 1.0, 0, 5)]).unwrap_err();
        assert!(err.to_string().contains("class 5"));
    }

    #[test]
    fn nodes_deserialize_untagged() {
        let tree: Tree = serde_json::from_str(
            r#"{"nodes":[{"feature":0,"threshold":1.5,"left":1,"right":2},{"class":0},{"class":1}]}"#,
        )
        .unwrap();
        assert_eq!(tree, stump(0, 1.5, 0, 1));
    }
}
