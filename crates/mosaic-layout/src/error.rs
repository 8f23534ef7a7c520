//! Error types for tree lookups, gestures, and configuration.

use thiserror::Error;

use crate::node::MosaicPath;

/// Failure of a tree operation. No partially edited tree is ever returned
/// alongside an error: validation always precedes patching.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MosaicError {
    /// The path does not resolve against the tree. `depth` is the number of
    /// branches that resolved before the walk hit a leaf or an absent tree.
    #[error("path {path} does not resolve (stopped at depth {depth})")]
    PathNotFound { path: MosaicPath, depth: usize },
    #[error(transparent)]
    InvalidGesture(#[from] InvalidGesture),
    #[error(transparent)]
    InvariantViolation(#[from] InvariantViolation),
}

/// Structurally impossible user request, rejected before any edit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidGesture {
    #[error("cannot drop node {path} onto itself")]
    DropOntoSelf { path: MosaicPath },
    #[error("drop target {destination_path} is an ancestor of dragged node {source_path}")]
    DropOntoAncestor {
        source_path: MosaicPath,
        destination_path: MosaicPath,
    },
    #[error("drop target {destination_path} lies inside dragged node {source_path}")]
    DropOntoDescendant {
        source_path: MosaicPath,
        destination_path: MosaicPath,
    },
    #[error("the root has no parent to collapse into")]
    DetachRoot,
    #[error("node {path} is not a split parent")]
    NotAParent { path: MosaicPath },
    #[error("split percentage {value} is not a finite number")]
    NonFiniteSplit { value: f64 },
}

/// Tree shape that breaks an invariant the type system cannot enforce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("leaf at {path} duplicates the leaf at {first_seen}")]
    DuplicateLeaf {
        path: MosaicPath,
        first_seen: MosaicPath,
    },
    #[error("split at {path} has percentage {value} outside [0, 100]")]
    SplitOutOfRange { path: MosaicPath, value: f64 },
}

/// Errors that can occur when loading or validating a [`MosaicConfig`].
///
/// [`MosaicConfig`]: crate::config::MosaicConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
