//! Path-addressed, non-mutating tree patches.
//!
//! A patch names a node by [`MosaicPath`] and says what to do with it. The
//! patcher rebuilds only the spine from the root to each patched node; every
//! other subtree is shared with the input through its [`Arc`].
//!
//! Patches are applied deepest-first (stable by descending path length), so a
//! structural edit higher up never invalidates the path of a deeper edit in the
//! same batch before that edit has run.

use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{MAX_SPLIT_PERCENTAGE, MIN_SPLIT_PERCENTAGE, clamp_split_percentage};
use crate::error::{InvalidGesture, MosaicError};
use crate::node::{MosaicDirection, MosaicNode, MosaicParent, MosaicPath};

type TransformFn<T> =
    dyn Fn(&MosaicNode<T>, &MosaicPath) -> Result<MosaicNode<T>, MosaicError> + Send + Sync;

/// Pure function from the addressed subtree (and its path) to a replacement.
pub struct NodeTransform<T>(Arc<TransformFn<T>>);

impl<T> NodeTransform<T> {
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(&MosaicNode<T>, &MosaicPath) -> Result<MosaicNode<T>, MosaicError>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(transform))
    }

    fn apply(&self, node: &MosaicNode<T>, path: &MosaicPath) -> Result<MosaicNode<T>, MosaicError> {
        (self.0)(node, path)
    }
}

impl<T> Clone for NodeTransform<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for NodeTransform<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NodeTransform(..)")
    }
}

/// Subset of a parent's own fields to overwrite. Children are never touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<MosaicDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_percentage: Option<f64>,
}

impl ParentAttributes {
    #[must_use]
    pub const fn split_percentage(split_percentage: f64) -> Self {
        Self {
            direction: None,
            split_percentage: Some(split_percentage),
        }
    }

    #[must_use]
    pub const fn direction(direction: MosaicDirection) -> Self {
        Self {
            direction: Some(direction),
            split_percentage: None,
        }
    }

    fn merge_into<T>(self, parent: &MosaicParent<T>) -> Result<MosaicParent<T>, MosaicError> {
        let mut merged = MosaicParent {
            direction: parent.direction,
            first: Arc::clone(&parent.first),
            second: Arc::clone(&parent.second),
            split_percentage: parent.split_percentage,
        };
        if let Some(direction) = self.direction {
            merged.direction = direction;
        }
        if let Some(value) = self.split_percentage {
            merged.split_percentage = Some(clamp_split_percentage(
                value,
                MIN_SPLIT_PERCENTAGE,
                MAX_SPLIT_PERCENTAGE,
            )?);
        }
        Ok(merged)
    }
}

/// What a patch does to the node at its path.
#[derive(Debug, Clone)]
pub enum MosaicOperation<T> {
    /// Substitute the subtree wholesale.
    Replace(MosaicNode<T>),
    /// Update fields of a parent; fails against a leaf.
    MergeAttributes(ParentAttributes),
    /// Compute the replacement from the current subtree.
    Transform(NodeTransform<T>),
}

/// Stable operation discriminator used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MosaicOperationKind {
    Replace,
    MergeAttributes,
    Transform,
}

/// One path-addressed edit.
#[derive(Debug, Clone)]
pub struct MosaicPatch<T> {
    pub path: MosaicPath,
    pub operation: MosaicOperation<T>,
}

impl<T> MosaicPatch<T> {
    #[must_use]
    pub fn replace(path: MosaicPath, node: MosaicNode<T>) -> Self {
        Self {
            path,
            operation: MosaicOperation::Replace(node),
        }
    }

    #[must_use]
    pub fn merge(path: MosaicPath, attributes: ParentAttributes) -> Self {
        Self {
            path,
            operation: MosaicOperation::MergeAttributes(attributes),
        }
    }

    #[must_use]
    pub fn transform(path: MosaicPath, transform: NodeTransform<T>) -> Self {
        Self {
            path,
            operation: MosaicOperation::Transform(transform),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> MosaicOperationKind {
        match self.operation {
            MosaicOperation::Replace(_) => MosaicOperationKind::Replace,
            MosaicOperation::MergeAttributes(_) => MosaicOperationKind::MergeAttributes,
            MosaicOperation::Transform(_) => MosaicOperationKind::Transform,
        }
    }
}

/// Apply `patches` to `tree` and return the patched copy.
///
/// `tree` is never modified. On error nothing is returned but the error, so a
/// partially patched tree can never escape.
pub fn apply_patches<T, I>(tree: &MosaicNode<T>, patches: I) -> Result<MosaicNode<T>, MosaicError>
where
    T: Clone,
    I: IntoIterator<Item = MosaicPatch<T>>,
{
    let mut patches = patches.into_iter().collect::<Vec<_>>();
    patches.sort_by_key(|patch| Reverse(patch.path.len()));

    let mut current = tree.clone();
    for patch in patches {
        tracing::trace!(path = %patch.path, kind = ?patch.kind(), "applying mosaic patch");
        current = patch_at(&current, &patch.path, patch.operation)?;
    }
    Ok(current)
}

/// Descend to `path`, apply `operation` there, and rebuild the spine above it
/// bottom-up. Both passes use an explicit stack so tree depth is bounded only by
/// memory.
fn patch_at<T: Clone>(
    root: &MosaicNode<T>,
    path: &MosaicPath,
    operation: MosaicOperation<T>,
) -> Result<MosaicNode<T>, MosaicError> {
    let mut spine = Vec::with_capacity(path.len());
    let mut current = root;
    for (depth, branch) in path.iter().enumerate() {
        match current {
            MosaicNode::Parent(parent) => {
                spine.push((parent, branch));
                current = parent.child(branch);
            }
            MosaicNode::Leaf(_) => {
                return Err(MosaicError::PathNotFound {
                    path: path.clone(),
                    depth,
                });
            }
        }
    }

    let mut rebuilt = apply_operation(current, path, operation)?;
    while let Some((parent, branch)) = spine.pop() {
        rebuilt = MosaicNode::Parent(parent.with_child(branch, rebuilt));
    }
    Ok(rebuilt)
}

fn apply_operation<T: Clone>(
    node: &MosaicNode<T>,
    path: &MosaicPath,
    operation: MosaicOperation<T>,
) -> Result<MosaicNode<T>, MosaicError> {
    match operation {
        MosaicOperation::Replace(replacement) => Ok(replacement),
        MosaicOperation::MergeAttributes(attributes) => match node {
            MosaicNode::Parent(parent) => Ok(MosaicNode::Parent(attributes.merge_into(parent)?)),
            MosaicNode::Leaf(_) => Err(InvalidGesture::NotAParent { path: path.clone() }.into()),
        },
        MosaicOperation::Transform(transform) => transform.apply(node, path),
    }
}
