//! Minimal-height reconstruction from a flat leaf list.

use crate::node::{MosaicDirection, MosaicNode};

/// Build a minimal-height tree whose reading order is `leaves`.
///
/// The list is halved recursively, with the first half taking the extra
/// element for odd counts. Directions alternate per level starting at `Row`.
/// Split percentages are left unset (even). Returns `None` for an empty list
/// and the bare leaf for a single element.
#[must_use]
pub fn balanced_tree<T, I>(leaves: I) -> Option<MosaicNode<T>>
where
    I: IntoIterator<Item = T>,
{
    balanced_tree_with_direction(leaves, MosaicDirection::Row)
}

/// Like [`balanced_tree`], choosing the root direction.
#[must_use]
pub fn balanced_tree_with_direction<T, I>(leaves: I, start: MosaicDirection) -> Option<MosaicNode<T>>
where
    I: IntoIterator<Item = T>,
{
    build(leaves.into_iter().collect(), start)
}

fn build<T>(mut leaves: Vec<T>, direction: MosaicDirection) -> Option<MosaicNode<T>> {
    if leaves.len() <= 1 {
        return leaves.pop().map(MosaicNode::Leaf);
    }
    let second = leaves.split_off(leaves.len().div_ceil(2));
    let next = direction.other();
    Some(MosaicNode::split(
        direction,
        build(leaves, next)?,
        build(second, next)?,
    ))
}
