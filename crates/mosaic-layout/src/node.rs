//! Mosaic tree model.
//!
//! A layout is a strictly binary tree: leaves carry an opaque, caller-owned
//! pane identifier and every parent splits its area between exactly two
//! children along one axis. Trees are immutable values. Children are held in
//! [`Arc`] so that edits rebuild only the spine above the edit point and share
//! every untouched subtree with the previous snapshot.
//!
//! The serialized shape matches the classic mosaic JSON form: a leaf is the
//! bare value and a parent is an object with `direction`, `first`, `second`,
//! and an optional `splitPercentage`.

use std::fmt;
use std::hash::Hash;
use std::mem;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{InvariantViolation, MosaicError};

/// Split share used when a parent carries no explicit percentage.
pub const DEFAULT_SPLIT_PERCENTAGE: f64 = 50.0;

/// Axis along which a parent arranges its two children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MosaicDirection {
    /// Children side by side, `first` on the left.
    Row,
    /// Children stacked, `first` on top.
    Column,
}

impl MosaicDirection {
    /// The perpendicular axis.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Row => Self::Column,
            Self::Column => Self::Row,
        }
    }
}

/// Which child of a parent to descend into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MosaicBranch {
    First,
    Second,
}

impl MosaicBranch {
    /// The sibling branch.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
        }
    }
}

/// Branch sequence from the root to a node. The empty path is the root.
///
/// Paths are positional: any structural edit above or along a path may
/// invalidate it, so callers recompute paths from the current tree instead of
/// holding on to them across gestures.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MosaicPath(Vec<MosaicBranch>);

impl MosaicPath {
    /// Path addressing the root node.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn new(branches: Vec<MosaicBranch>) -> Self {
        Self(branches)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[MosaicBranch] {
        &self.0
    }

    /// Number of branches, which is also the depth of the addressed node.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when this path addresses the root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Final branch taken, `None` for the root.
    #[must_use]
    pub fn last(&self) -> Option<MosaicBranch> {
        self.0.last().copied()
    }

    /// Path of the enclosing parent, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, prefix) = self.0.split_last()?;
        Some(Self(prefix.to_vec()))
    }

    /// Path of the sibling under the same parent, `None` for the root.
    #[must_use]
    pub fn sibling(&self) -> Option<Self> {
        let (last, prefix) = self.0.split_last()?;
        let mut branches = prefix.to_vec();
        branches.push(last.other());
        Some(Self(branches))
    }

    /// Extend this path by one branch.
    #[must_use]
    pub fn child(&self, branch: MosaicBranch) -> Self {
        let mut branches = self.0.clone();
        branches.push(branch);
        Self(branches)
    }

    /// True when `prefix` is an ancestor of, or equal to, this path.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// True when this path addresses a strict ancestor of `other`.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.len() < other.len() && other.starts_with(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = MosaicBranch> + '_ {
        self.0.iter().copied()
    }

    pub(crate) fn push(&mut self, branch: MosaicBranch) {
        self.0.push(branch);
    }

    pub(crate) fn remove(&mut self, index: usize) -> MosaicBranch {
        self.0.remove(index)
    }
}

impl From<Vec<MosaicBranch>> for MosaicPath {
    fn from(branches: Vec<MosaicBranch>) -> Self {
        Self(branches)
    }
}

impl<const N: usize> From<[MosaicBranch; N]> for MosaicPath {
    fn from(branches: [MosaicBranch; N]) -> Self {
        Self(branches.to_vec())
    }
}

impl FromIterator<MosaicBranch> for MosaicPath {
    fn from_iter<I: IntoIterator<Item = MosaicBranch>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AsRef<[MosaicBranch]> for MosaicPath {
    fn as_ref(&self) -> &[MosaicBranch] {
        &self.0
    }
}

impl fmt::Display for MosaicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for branch in &self.0 {
            write!(f, "/{}", branch.as_str())?;
        }
        Ok(())
    }
}

/// One of the four extreme positions of the overall layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    #[must_use]
    pub const fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }
}

/// Split node with exactly two children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicParent<T> {
    pub direction: MosaicDirection,
    pub first: Arc<MosaicNode<T>>,
    pub second: Arc<MosaicNode<T>>,
    /// Share of the primary axis given to `first`, in `[0, 100]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_percentage: Option<f64>,
}

impl<T> MosaicParent<T> {
    /// Parent with an implicit even split.
    #[must_use]
    pub fn new(direction: MosaicDirection, first: MosaicNode<T>, second: MosaicNode<T>) -> Self {
        Self {
            direction,
            first: Arc::new(first),
            second: Arc::new(second),
            split_percentage: None,
        }
    }

    #[must_use]
    pub fn with_split_percentage(mut self, split_percentage: f64) -> Self {
        self.split_percentage = Some(split_percentage);
        self
    }

    /// Child on the given branch.
    #[must_use]
    pub fn child(&self, branch: MosaicBranch) -> &MosaicNode<T> {
        match branch {
            MosaicBranch::First => &self.first,
            MosaicBranch::Second => &self.second,
        }
    }

    /// Shared handle to the child on the given branch.
    #[must_use]
    pub fn child_arc(&self, branch: MosaicBranch) -> &Arc<MosaicNode<T>> {
        match branch {
            MosaicBranch::First => &self.first,
            MosaicBranch::Second => &self.second,
        }
    }

    /// Effective split share, falling back to an even split.
    #[must_use]
    pub fn split_percentage_or_default(&self) -> f64 {
        self.split_percentage.unwrap_or(DEFAULT_SPLIT_PERCENTAGE)
    }

    /// Copy of this parent with one child replaced. The other child is shared.
    #[must_use]
    pub(crate) fn with_child(&self, branch: MosaicBranch, child: MosaicNode<T>) -> Self {
        let child = Arc::new(child);
        let (first, second) = match branch {
            MosaicBranch::First => (child, Arc::clone(&self.second)),
            MosaicBranch::Second => (Arc::clone(&self.first), child),
        };
        Self {
            direction: self.direction,
            first,
            second,
            split_percentage: self.split_percentage,
        }
    }
}

/// Releases uniquely owned descendants with an explicit stack, so dropping a
/// degenerate (list-shaped) tree cannot exhaust the call stack. Each detached
/// parent has its child slots pointed at a shared leaf before it is dropped.
impl<T> Drop for MosaicParent<T> {
    fn drop(&mut self) {
        fn owns_subtree<T>(child: &mut Arc<MosaicNode<T>>) -> bool {
            Arc::get_mut(child).is_some_and(|node| node.is_parent())
        }
        if !owns_subtree(&mut self.first) && !owns_subtree(&mut self.second) {
            return;
        }
        let mut leftmost = &self.first;
        while let MosaicNode::Parent(parent) = leftmost.as_ref() {
            leftmost = &parent.first;
        }
        let placeholder = Arc::clone(leftmost);
        let mut pending = vec![
            mem::replace(&mut self.first, Arc::clone(&placeholder)),
            mem::replace(&mut self.second, Arc::clone(&placeholder)),
        ];
        while let Some(child) = pending.pop() {
            if let Some(MosaicNode::Parent(mut parent)) = Arc::into_inner(child) {
                pending.push(mem::replace(&mut parent.first, Arc::clone(&placeholder)));
                pending.push(mem::replace(&mut parent.second, Arc::clone(&placeholder)));
            }
        }
    }
}

/// A mosaic layout tree. The absent tree (`None` at the call sites) is the only
/// representation of "no panes".
///
/// Traversal, patching, layout and drop all run on explicit stacks; tree depth
/// is bounded by memory rather than by the call stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MosaicNode<T> {
    Parent(MosaicParent<T>),
    Leaf(T),
}

impl<T> MosaicNode<T> {
    /// Build a parent node with an even split.
    #[must_use]
    pub fn split(direction: MosaicDirection, first: Self, second: Self) -> Self {
        Self::Parent(MosaicParent::new(direction, first, second))
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    #[must_use]
    pub const fn is_parent(&self) -> bool {
        matches!(self, Self::Parent(_))
    }

    #[must_use]
    pub const fn as_leaf(&self) -> Option<&T> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Parent(_) => None,
        }
    }

    #[must_use]
    pub const fn as_parent(&self) -> Option<&MosaicParent<T>> {
        match self {
            Self::Parent(parent) => Some(parent),
            Self::Leaf(_) => None,
        }
    }

    /// Number of leaves in this subtree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.iter_leaves().count()
    }

    /// Number of parent levels on the longest root-to-leaf path. A lone leaf
    /// has height 0.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0_usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Self::Leaf(_) => deepest = deepest.max(depth),
                Self::Parent(parent) => {
                    stack.push((parent.child(MosaicBranch::First), depth + 1));
                    stack.push((parent.child(MosaicBranch::Second), depth + 1));
                }
            }
        }
        deepest
    }

    /// Check the invariants the type system cannot express: leaf uniqueness
    /// and split percentages within `[0, 100]`.
    ///
    /// Intended for trees that arrive from outside the engine, such as
    /// deserialized snapshots.
    pub fn validate(&self) -> Result<(), MosaicError>
    where
        T: Hash + Eq,
    {
        let mut seen: FxHashMap<&T, MosaicPath> = FxHashMap::default();
        for (path, node) in self.walk() {
            match node {
                Self::Leaf(value) => {
                    if let Some(first_seen) = seen.get(value) {
                        return Err(InvariantViolation::DuplicateLeaf {
                            path,
                            first_seen: first_seen.clone(),
                        }
                        .into());
                    }
                    let _ = seen.insert(value, path);
                }
                Self::Parent(parent) => {
                    if let Some(value) = parent.split_percentage
                        && !(0.0..=100.0).contains(&value)
                    {
                        return Err(InvariantViolation::SplitOutOfRange { path, value }.into());
                    }
                }
            }
        }
        Ok(())
    }
}

impl<T> From<MosaicParent<T>> for MosaicNode<T> {
    fn from(parent: MosaicParent<T>) -> Self {
        Self::Parent(parent)
    }
}
