//! Path resolution, corner navigation, and orientation helpers.

use crate::error::{InvalidGesture, MosaicError};
use crate::node::{Corner, MosaicBranch, MosaicDirection, MosaicNode, MosaicParent, MosaicPath};

/// Resolve `path` against `tree`.
///
/// The empty path returns the root. Fails with [`MosaicError::PathNotFound`]
/// when the tree is absent or a branch meets a leaf before the path is
/// exhausted.
pub fn node_at_path<'a, T>(
    tree: Option<&'a MosaicNode<T>>,
    path: &MosaicPath,
) -> Result<&'a MosaicNode<T>, MosaicError> {
    let not_found = |depth| MosaicError::PathNotFound {
        path: path.clone(),
        depth,
    };
    let mut current = tree.ok_or_else(|| not_found(0))?;
    for (depth, branch) in path.iter().enumerate() {
        match current {
            MosaicNode::Parent(parent) => current = parent.child(branch),
            MosaicNode::Leaf(_) => return Err(not_found(depth)),
        }
    }
    Ok(current)
}

/// Resolve `path` and require the addressed node to be a parent.
pub fn parent_at_path<'a, T>(
    tree: Option<&'a MosaicNode<T>>,
    path: &MosaicPath,
) -> Result<&'a MosaicParent<T>, MosaicError> {
    node_at_path(tree, path)?
        .as_parent()
        .ok_or_else(|| InvalidGesture::NotAParent { path: path.clone() }.into())
}

/// Path to the pane occupying `corner`.
///
/// At each parent the walk takes `first` when the parent's axis matches the
/// corner's leading side (left for rows, top for columns) and `second`
/// otherwise, stopping at a leaf.
#[must_use]
pub fn path_to_corner<T>(tree: &MosaicNode<T>, corner: Corner) -> MosaicPath {
    let mut path = MosaicPath::root();
    let mut current = tree;
    while let MosaicNode::Parent(parent) = current {
        let leading = match parent.direction {
            MosaicDirection::Row => corner.is_left(),
            MosaicDirection::Column => corner.is_top(),
        };
        let branch = if leading {
            MosaicBranch::First
        } else {
            MosaicBranch::Second
        };
        path.push(branch);
        current = parent.child(branch);
    }
    path
}

/// Path to the leaf holding `value`, if present.
#[must_use]
pub fn path_to_leaf<T: PartialEq>(tree: Option<&MosaicNode<T>>, value: &T) -> Option<MosaicPath> {
    tree?
        .walk()
        .find_map(|(path, node)| (node.as_leaf() == Some(value)).then_some(path))
}

/// `Row` becomes `Column` and vice versa.
#[must_use]
pub const fn other_direction(direction: MosaicDirection) -> MosaicDirection {
    direction.other()
}

/// `First` becomes `Second` and vice versa.
#[must_use]
pub const fn other_branch(branch: MosaicBranch) -> MosaicBranch {
    branch.other()
}
