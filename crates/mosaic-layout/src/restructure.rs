//! Gesture-level restructuring.
//!
//! Each user gesture (add a pane, drag one onto another, resize, remove,
//! auto-arrange) becomes a small batch of [`MosaicPatch`]es computed from the
//! current tree. Every gesture validates its inputs before the first patch is
//! applied, and the input tree is never modified, so a rejected gesture leaves
//! the caller holding exactly the tree it had.
//!
//! The `create_*` builders expose the patches themselves for callers that
//! batch or inspect them; [`MosaicEngine`] wraps them with configured bounds
//! and applies the result.

use serde::{Deserialize, Serialize};

use crate::balanced::balanced_tree;
use crate::config::MosaicConfig;
use crate::error::{ConfigError, InvalidGesture, MosaicError};
use crate::leaves::leaves;
use crate::node::{
    Corner, DEFAULT_SPLIT_PERCENTAGE, MosaicBranch, MosaicDirection, MosaicNode, MosaicParent,
    MosaicPath,
};
use crate::patch::{MosaicPatch, NodeTransform, ParentAttributes, apply_patches};
use crate::path::{node_at_path, parent_at_path, path_to_corner};

/// Where a dragged node lands relative to the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPosition {
    Left,
    Right,
    Top,
    Bottom,
    /// Exchange the dragged node and the target in place.
    Swap,
}

impl DropPosition {
    /// Split axis and child order for edge drops; `None` for [`Self::Swap`].
    #[must_use]
    pub const fn edge_placement(self) -> Option<(MosaicDirection, MosaicPlacement)> {
        match self {
            Self::Left => Some((MosaicDirection::Row, MosaicPlacement::IncomingFirst)),
            Self::Right => Some((MosaicDirection::Row, MosaicPlacement::ExistingFirst)),
            Self::Top => Some((MosaicDirection::Column, MosaicPlacement::IncomingFirst)),
            Self::Bottom => Some((MosaicDirection::Column, MosaicPlacement::ExistingFirst)),
            Self::Swap => None,
        }
    }
}

/// Placement of an incoming node relative to an existing node inside a new
/// split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MosaicPlacement {
    ExistingFirst,
    IncomingFirst,
}

impl MosaicPlacement {
    fn ordered<N>(self, existing: N, incoming: N) -> (N, N) {
        match self {
            Self::ExistingFirst => (existing, incoming),
            Self::IncomingFirst => (incoming, existing),
        }
    }

    /// Placement that puts a new pane on the `corner` side of a split along
    /// `direction`.
    #[must_use]
    pub const fn toward_corner(corner: Corner, direction: MosaicDirection) -> Self {
        let leading = match direction {
            MosaicDirection::Row => corner.is_left(),
            MosaicDirection::Column => corner.is_top(),
        };
        if leading {
            Self::IncomingFirst
        } else {
            Self::ExistingFirst
        }
    }
}

/// Patch that detaches the node at `path` by collapsing its parent into the
/// surviving sibling.
pub fn create_remove_patch<T>(
    tree: &MosaicNode<T>,
    path: &MosaicPath,
) -> Result<MosaicPatch<T>, MosaicError>
where
    T: Clone + 'static,
{
    node_at_path(Some(tree), path)?;
    let (Some(parent_path), Some(removed)) = (path.parent(), path.last()) else {
        return Err(InvalidGesture::DetachRoot.into());
    };
    let survivor = removed.other();
    let collapse = NodeTransform::new(move |node: &MosaicNode<T>, at: &MosaicPath| match node {
        MosaicNode::Parent(parent) => Ok(parent.child(survivor).clone()),
        MosaicNode::Leaf(_) => Err(InvalidGesture::NotAParent { path: at.clone() }.into()),
    });
    Ok(MosaicPatch::transform(parent_path, collapse))
}

/// Patch setting the split of the parent at `path`, clamped into `config`.
pub fn create_resize_patch<T>(
    tree: &MosaicNode<T>,
    path: &MosaicPath,
    split_percentage: f64,
    config: &MosaicConfig,
) -> Result<MosaicPatch<T>, MosaicError> {
    parent_at_path(Some(tree), path)?;
    let clamped = config.clamp_split(split_percentage)?;
    Ok(MosaicPatch::merge(
        path.clone(),
        ParentAttributes::split_percentage(clamped),
    ))
}

/// Patch that collapses the node at `path` to zero size by pushing its
/// parent's split all the way to the other child.
pub fn create_hide_patch<T>(
    tree: &MosaicNode<T>,
    path: &MosaicPath,
) -> Result<MosaicPatch<T>, MosaicError> {
    node_at_path(Some(tree), path)?;
    let (Some(parent_path), Some(branch)) = (path.parent(), path.last()) else {
        return Err(InvalidGesture::DetachRoot.into());
    };
    let split = match branch {
        MosaicBranch::First => 0.0,
        MosaicBranch::Second => 100.0,
    };
    Ok(MosaicPatch::merge(
        parent_path,
        ParentAttributes::split_percentage(split),
    ))
}

/// Patches giving the node at `path` `percentage` of its parent at every level
/// from the root down, each value clamped into `config`.
pub fn create_expand_patches<T>(
    tree: &MosaicNode<T>,
    path: &MosaicPath,
    percentage: f64,
    config: &MosaicConfig,
) -> Result<Vec<MosaicPatch<T>>, MosaicError> {
    node_at_path(Some(tree), path)?;
    let mut patches = Vec::with_capacity(path.len());
    let mut prefix = MosaicPath::root();
    for branch in path.iter() {
        let share = match branch {
            MosaicBranch::First => percentage,
            MosaicBranch::Second => 100.0 - percentage,
        };
        patches.push(MosaicPatch::merge(
            prefix.clone(),
            ParentAttributes::split_percentage(config.clamp_split(share)?),
        ));
        prefix.push(branch);
    }
    Ok(patches)
}

/// Restructure engine: one method per gesture, each a pure function from the
/// current tree to the next.
#[derive(Debug, Clone, Default)]
pub struct MosaicEngine {
    config: MosaicConfig,
}

impl MosaicEngine {
    /// Engine with validated bounds.
    pub fn new(config: MosaicConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Add a pane next to the one occupying `corner`.
    ///
    /// The new split runs across the corner pane's parent axis and the new
    /// pane lands on the corner's side. An absent tree becomes a two-pane row
    /// with an explicit even split; `create_leaf` is then called twice.
    pub fn insert_at_corner<T, F>(
        &self,
        tree: Option<&MosaicNode<T>>,
        corner: Corner,
        mut create_leaf: F,
    ) -> Result<MosaicNode<T>, MosaicError>
    where
        T: Clone,
        F: FnMut() -> T,
    {
        let _span = tracing::debug_span!("mosaic_gesture", gesture = "insert_at_corner", ?corner)
            .entered();

        let Some(root) = tree else {
            let first = MosaicNode::Leaf(create_leaf());
            let second = MosaicNode::Leaf(create_leaf());
            return Ok(MosaicParent::new(MosaicDirection::Row, first, second)
                .with_split_percentage(DEFAULT_SPLIT_PERCENTAGE)
                .into());
        };

        let path = path_to_corner(root, corner);
        let direction = match path.parent() {
            Some(parent_path) => parent_at_path(Some(root), &parent_path)?.direction.other(),
            None => MosaicDirection::Row,
        };
        let existing = node_at_path(Some(root), &path)?.clone();
        let incoming = MosaicNode::Leaf(create_leaf());
        let (first, second) =
            MosaicPlacement::toward_corner(corner, direction).ordered(existing, incoming);

        tracing::debug!(%path, ?direction, "inserting pane at corner");
        apply_patches(
            root,
            [MosaicPatch::replace(
                path,
                MosaicNode::split(direction, first, second),
            )],
        )
    }

    /// Wrap the node at `path` in a new split with `new_leaf` as its second
    /// child.
    pub fn split<T: Clone>(
        &self,
        tree: &MosaicNode<T>,
        path: &MosaicPath,
        direction: MosaicDirection,
        new_leaf: T,
    ) -> Result<MosaicNode<T>, MosaicError> {
        let _span =
            tracing::debug_span!("mosaic_gesture", gesture = "split", %path, ?direction).entered();
        let existing = node_at_path(Some(tree), path)
            .map_err(rejected)?
            .clone();
        apply_patches(
            tree,
            [MosaicPatch::replace(
                path.clone(),
                MosaicNode::split(direction, existing, MosaicNode::Leaf(new_leaf)),
            )],
        )
    }

    /// Move the node at `source` next to the node at `destination`.
    ///
    /// Drops onto the source itself, onto one of its ancestors, or into its own
    /// subtree are rejected before anything is edited. Edge drops detach the
    /// source (collapsing its parent into the sibling), re-resolve the
    /// destination in the pruned tree, and wrap it together with the source in
    /// a new split. [`DropPosition::Swap`] exchanges the two subtrees.
    pub fn drag<T>(
        &self,
        tree: &MosaicNode<T>,
        source: &MosaicPath,
        destination: &MosaicPath,
        position: DropPosition,
    ) -> Result<MosaicNode<T>, MosaicError>
    where
        T: Clone + 'static,
    {
        let _span = tracing::debug_span!(
            "mosaic_gesture",
            gesture = "drag",
            %source,
            %destination,
            ?position
        )
        .entered();

        check_drop(source, destination).map_err(rejected)?;
        let moved = node_at_path(Some(tree), source).map_err(rejected)?.clone();
        let target = node_at_path(Some(tree), destination).map_err(rejected)?;

        let Some((direction, placement)) = position.edge_placement() else {
            return apply_patches(
                tree,
                [
                    MosaicPatch::replace(source.clone(), target.clone()),
                    MosaicPatch::replace(destination.clone(), moved),
                ],
            );
        };

        let pruned = apply_patches(tree, [create_remove_patch(tree, source)?])?;
        let rebased = rebase_after_detach(source, destination);
        let target = node_at_path(Some(&pruned), &rebased)?.clone();
        let (first, second) = placement.ordered(target, moved);

        tracing::debug!(%rebased, ?direction, "re-inserting dragged node");
        apply_patches(
            &pruned,
            [MosaicPatch::replace(
                rebased,
                MosaicNode::split(direction, first, second),
            )],
        )
    }

    /// Set the split of the parent at `path`, clamped into configured bounds.
    pub fn resize<T: Clone>(
        &self,
        tree: &MosaicNode<T>,
        path: &MosaicPath,
        split_percentage: f64,
    ) -> Result<MosaicNode<T>, MosaicError> {
        let _span = tracing::debug_span!("mosaic_gesture", gesture = "resize", %path, split_percentage)
            .entered();
        let patch =
            create_resize_patch(tree, path, split_percentage, &self.config).map_err(rejected)?;
        apply_patches(tree, [patch])
    }

    /// Remove the node at `path`. Removing the root yields the absent tree.
    pub fn remove<T>(
        &self,
        tree: &MosaicNode<T>,
        path: &MosaicPath,
    ) -> Result<Option<MosaicNode<T>>, MosaicError>
    where
        T: Clone + 'static,
    {
        let _span = tracing::debug_span!("mosaic_gesture", gesture = "remove", %path).entered();
        if path.is_root() {
            return Ok(None);
        }
        let patch = create_remove_patch(tree, path).map_err(rejected)?;
        apply_patches(tree, [patch]).map(Some)
    }

    /// Give the node at `path` `percentage` of the space at every level.
    pub fn expand<T: Clone>(
        &self,
        tree: &MosaicNode<T>,
        path: &MosaicPath,
        percentage: f64,
    ) -> Result<MosaicNode<T>, MosaicError> {
        let _span =
            tracing::debug_span!("mosaic_gesture", gesture = "expand", %path, percentage).entered();
        let patches =
            create_expand_patches(tree, path, percentage, &self.config).map_err(rejected)?;
        apply_patches(tree, patches)
    }

    /// Collapse the node at `path` to zero size without removing it.
    pub fn hide<T: Clone>(
        &self,
        tree: &MosaicNode<T>,
        path: &MosaicPath,
    ) -> Result<MosaicNode<T>, MosaicError> {
        let _span = tracing::debug_span!("mosaic_gesture", gesture = "hide", %path).entered();
        let patch = create_hide_patch(tree, path).map_err(rejected)?;
        apply_patches(tree, [patch])
    }

    /// Rebuild a balanced tree from the current reading order, discarding all
    /// split percentages.
    #[must_use]
    pub fn auto_arrange<T: Clone>(&self, tree: Option<&MosaicNode<T>>) -> Option<MosaicNode<T>> {
        let _span = tracing::debug_span!("mosaic_gesture", gesture = "auto_arrange").entered();
        balanced_tree(leaves(tree))
    }
}

fn check_drop(source: &MosaicPath, destination: &MosaicPath) -> Result<(), InvalidGesture> {
    if source == destination {
        return Err(InvalidGesture::DropOntoSelf {
            path: source.clone(),
        });
    }
    if destination.is_ancestor_of(source) {
        return Err(InvalidGesture::DropOntoAncestor {
            source_path: source.clone(),
            destination_path: destination.clone(),
        });
    }
    if source.is_ancestor_of(destination) {
        return Err(InvalidGesture::DropOntoDescendant {
            source_path: source.clone(),
            destination_path: destination.clone(),
        });
    }
    Ok(())
}

/// Destination path after the source has been detached.
///
/// Detaching collapses the source's parent into its sibling, so a destination
/// that ran through that parent loses the branch that selected the sibling.
fn rebase_after_detach(source: &MosaicPath, destination: &MosaicPath) -> MosaicPath {
    let mut rebased = destination.clone();
    if let Some(parent) = source.parent()
        && destination.starts_with(&parent)
    {
        rebased.remove(parent.len());
    }
    rebased
}

fn rejected(err: impl Into<MosaicError>) -> MosaicError {
    let err = err.into();
    tracing::debug!(error = %err, "mosaic gesture rejected");
    err
}
