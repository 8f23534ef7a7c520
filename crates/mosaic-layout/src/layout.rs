//! Percentage-space geometry.
//!
//! [`solve_layout`] resolves a tree into one rectangle per pane and one divider
//! per split, expressed as insets from the container edges in percent. A
//! presentation layer scales these to its own units; nothing here knows about
//! pixels or cells.

use serde::{Deserialize, Serialize};

use crate::config::{MAX_SPLIT_PERCENTAGE, MIN_SPLIT_PERCENTAGE};
use crate::node::{MosaicBranch, MosaicDirection, MosaicNode, MosaicPath};

const EPSILON: f64 = 1e-9;

/// Rectangle given as distances from each container edge, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::FULL
    }
}

impl BoundingBox {
    /// The whole container.
    pub const FULL: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    #[must_use]
    pub fn width(&self) -> f64 {
        100.0 - self.left - self.right
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        100.0 - self.top - self.bottom
    }

    /// Share of the container's area, in percent.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height() / 100.0
    }

    /// Divide along `direction`, giving `split_percentage` of this box to the
    /// first half.
    #[must_use]
    pub fn split(&self, split_percentage: f64, direction: MosaicDirection) -> (Self, Self) {
        match direction {
            MosaicDirection::Row => {
                let width = self.width();
                let absolute = width * split_percentage / 100.0;
                (
                    Self {
                        right: self.right + width - absolute,
                        ..*self
                    },
                    Self {
                        left: self.left + absolute,
                        ..*self
                    },
                )
            }
            MosaicDirection::Column => {
                let height = self.height();
                let absolute = height * split_percentage / 100.0;
                (
                    Self {
                        bottom: self.bottom + height - absolute,
                        ..*self
                    },
                    Self {
                        top: self.top + absolute,
                        ..*self
                    },
                )
            }
        }
    }

    /// Whether the point `(x, y)`, in percent from the top-left corner, lies
    /// inside this box. Edges are inclusive.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        (self.left..=100.0 - self.right).contains(&x) && (self.top..=100.0 - self.bottom).contains(&y)
    }

    /// Whether `other` lies entirely inside this box.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.top + EPSILON >= self.top
            && other.right + EPSILON >= self.right
            && other.bottom + EPSILON >= self.bottom
            && other.left + EPSILON >= self.left
    }
}

/// Solved rectangle of one pane.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayout<'a, T> {
    pub path: MosaicPath,
    pub leaf: &'a T,
    pub bounds: BoundingBox,
}

/// Solved divider of one split.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitLayout {
    pub path: MosaicPath,
    pub direction: MosaicDirection,
    /// Box shared by both children.
    pub bounds: BoundingBox,
    /// Divider offset from the container's left (`Row`) or top (`Column`)
    /// edge, in percent.
    pub position: f64,
}

/// Geometry of a whole tree.
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicLayout<'a, T> {
    tiles: Vec<TileLayout<'a, T>>,
    splits: Vec<SplitLayout>,
}

impl<'a, T> MosaicLayout<'a, T> {
    /// Pane rectangles in reading order.
    #[must_use]
    pub fn tiles(&self) -> &[TileLayout<'a, T>] {
        &self.tiles
    }

    /// Split dividers in pre-order.
    #[must_use]
    pub fn splits(&self) -> &[SplitLayout] {
        &self.splits
    }

    #[must_use]
    pub fn tile(&self, path: &MosaicPath) -> Option<&TileLayout<'a, T>> {
        self.tiles.iter().find(|tile| &tile.path == path)
    }

    /// Pane under the point `(x, y)`. Panes collapsed to zero size are
    /// skipped.
    #[must_use]
    pub fn tile_at(&self, x: f64, y: f64) -> Option<&TileLayout<'a, T>> {
        self.tiles
            .iter()
            .filter(|tile| tile.bounds.area() > 0.0)
            .find(|tile| tile.bounds.contains_point(x, y))
    }
}

/// Resolve `tree` into pane rectangles and split dividers over the full
/// container. An absent tree has no geometry.
///
/// Splits are read with [`MosaicParent::split_percentage_or_default`] and
/// clamped into `[0, 100]`.
///
/// [`MosaicParent::split_percentage_or_default`]: crate::node::MosaicParent::split_percentage_or_default
#[must_use]
pub fn solve_layout<T>(tree: Option<&MosaicNode<T>>) -> MosaicLayout<'_, T> {
    let mut layout = MosaicLayout {
        tiles: Vec::new(),
        splits: Vec::new(),
    };
    let Some(root) = tree else {
        return layout;
    };

    let mut stack = vec![(root, MosaicPath::root(), BoundingBox::FULL)];
    while let Some((node, path, bounds)) = stack.pop() {
        let parent = match node {
            MosaicNode::Leaf(leaf) => {
                layout.tiles.push(TileLayout { path, leaf, bounds });
                continue;
            }
            MosaicNode::Parent(parent) => parent,
        };

        let split = parent
            .split_percentage_or_default()
            .clamp(MIN_SPLIT_PERCENTAGE, MAX_SPLIT_PERCENTAGE);
        let (first_bounds, second_bounds) = bounds.split(split, parent.direction);
        let position = match parent.direction {
            MosaicDirection::Row => first_bounds.left + first_bounds.width(),
            MosaicDirection::Column => first_bounds.top + first_bounds.height(),
        };

        // Second is pushed first so tiles come out in reading order.
        stack.push((
            parent.child(MosaicBranch::Second),
            path.child(MosaicBranch::Second),
            second_bounds,
        ));
        stack.push((
            parent.child(MosaicBranch::First),
            path.child(MosaicBranch::First),
            first_bounds,
        ));
        layout.splits.push(SplitLayout {
            path,
            direction: parent.direction,
            bounds,
            position,
        });
    }
    layout
}
