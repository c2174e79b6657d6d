//! Backend implementations for exported classifier families

pub mod softmax_linear;
pub mod tree_ensemble;

pub use softmax_linear::SoftmaxLinearBackend;
pub use tree_ensemble::TreeEnsembleBackend;

use crate::backend::ModelBackend;

/// Fresh, unloaded backend for an artifact `kind` string.
pub fn backend_for_kind(kind: &str) -> Option<Box<dyn ModelBackend>> {
    match kind {
        "softmax_linear" => Some(Box::new(SoftmaxLinearBackend::new())),
        "tree_ensemble" => Some(Box::new(TreeEnsembleBackend::new())),
        _ => None,
    }
}
