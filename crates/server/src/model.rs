//! Classifier adapter for the pre-trained outcome model.
//!
//! The model is a tree ensemble exported by the offline training pipeline.
//! Artifacts ending in `.json` are read as JSON, anything else as bincode.
//! The artifact is loaded once at startup and never mutated afterwards.

use chess_core::{FeatureVector, NUM_FEATURES};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Maps a feature vector to a raw outcome label.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> &str;

    fn name(&self) -> &str {
        "classifier"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to access model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode model artifact: {0}")]
    Decode(String),

    #[error("failed to encode model artifact: {0}")]
    Encode(String),

    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// Go to `left` when `features[feature] <= threshold`, else `right`.
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    /// Per-class weights (sample counts or probabilities), in `classes` order.
    Leaf { class_weights: Vec<f32> },
}

/// A single tree stored as a flat node array; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn leaf_for(&self, features: &[i8]) -> &[f32] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split { feature, threshold, left, right } => {
                    let value = f32::from(features[*feature]);
                    idx = if value <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { class_weights } => return class_weights,
            }
        }
    }

    fn validate(&self, tree_idx: usize, n_classes: usize) -> Result<(), ModelError> {
        let invalid = |node: usize, msg: String| {
            ModelError::Invalid(format!("tree {tree_idx}, node {node}: {msg}"))
        };

        if self.nodes.is_empty() {
            return Err(ModelError::Invalid(format!("tree {tree_idx} has no nodes")));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split { feature, threshold, left, right } => {
                    if *feature >= NUM_FEATURES {
                        return Err(invalid(idx, format!("feature index {feature} out of range")));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(idx, "threshold is not finite".into()));
                    }
                    // Children must point forward, which also rules out cycles.
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(invalid(idx, format!("child index {child} is invalid")));
                        }
                    }
                }
                TreeNode::Leaf { class_weights } => {
                    if class_weights.len() != n_classes {
                        let msg = format!(
                            "expected {n_classes} class weights, got {}",
                            class_weights.len()
                        );
                        return Err(invalid(idx, msg));
                    }
                    if class_weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        let msg = "class weights must be finite and non-negative";
                        return Err(invalid(idx, msg.into()));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Random-forest style classifier: averages normalised leaf distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    pub classes: Vec<String>,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl ForestModel {
    /// Build a model and check it against the feature layout.
    pub fn new(classes: Vec<String>, trees: Vec<DecisionTree>) -> Result<Self, ModelError> {
        let model = Self { classes, n_features: NUM_FEATURES, trees };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::Invalid("model has no classes".into()));
        }
        if self.n_features != NUM_FEATURES {
            return Err(ModelError::Invalid(format!(
                "model expects {} features, extractor produces {NUM_FEATURES}",
                self.n_features
            )));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("model has no trees".into()));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(idx, self.classes.len())?;
        }
        Ok(())
    }

    /// Load and validate an artifact from disk.
    ///
    /// The file is read fully before decoding so that length prefixes in a
    /// foreign or corrupt file are bounded by the bytes actually present.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let model: ForestModel = if is_json(path) {
            serde_json::from_slice(&bytes).map_err(|e| ModelError::Decode(e.to_string()))?
        } else {
            bincode::deserialize(&bytes).map_err(|e| ModelError::Decode(e.to_string()))?
        };
        model.validate()?;
        Ok(model)
    }

    /// Write the artifact in the format implied by the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        if is_json(path) {
            serde_json::to_writer_pretty(writer, self)
                .map_err(|e| ModelError::Encode(e.to_string()))
        } else {
            bincode::serialize_into(writer, self).map_err(|e| ModelError::Encode(e.to_string()))
        }
    }

    /// Mean class probabilities across all trees.
    pub fn predict_proba(&self, features: &FeatureVector) -> Vec<f32> {
        let mut totals = vec![0.0f32; self.classes.len()];
        for tree in &self.trees {
            let weights = tree.leaf_for(features.as_slice());
            let sum: f32 = weights.iter().sum();
            if sum > 0.0 {
                for (total, w) in totals.iter_mut().zip(weights) {
                    *total += w / sum;
                }
            }
        }
        let n_trees = self.trees.len() as f32;
        totals.iter_mut().for_each(|t| *t /= n_trees);
        totals
    }
}

impl Classifier for ForestModel {
    fn predict(&self, features: &FeatureVector) -> &str {
        let proba = self.predict_proba(features);
        // First class wins ties
        let mut best = 0;
        for (idx, p) in proba.iter().enumerate().skip(1) {
            if *p > proba[best] {
                best = idx;
            }
        }
        &self.classes[best]
    }

    fn name(&self) -> &str {
        "forest"
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
