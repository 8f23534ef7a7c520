//! Read-only traversals in canonical reading order.
//!
//! Every traversal visits `first` before `second` at each parent, which is the
//! left-to-right, top-to-bottom order panes appear on screen. The balanced
//! builder and auto-arrange rely on this order being stable.

use crate::node::{MosaicBranch, MosaicNode, MosaicPath};

/// Leaf values of `tree` in reading order; empty for the absent tree.
#[must_use]
pub fn leaves<T: Clone>(tree: Option<&MosaicNode<T>>) -> Vec<T> {
    tree.map(|root| root.iter_leaves().cloned().collect())
        .unwrap_or_default()
}

/// `(path, leaf)` pairs in reading order; empty for the absent tree.
#[must_use]
pub fn leaf_paths<T>(tree: Option<&MosaicNode<T>>) -> Vec<(MosaicPath, &T)> {
    let Some(root) = tree else {
        return Vec::new();
    };
    root.walk()
        .filter_map(|(path, node)| node.as_leaf().map(|leaf| (path, leaf)))
        .collect()
}

impl<T> MosaicNode<T> {
    /// Borrowing iterator over leaf values in reading order.
    #[must_use]
    pub fn iter_leaves(&self) -> Leaves<'_, T> {
        Leaves { stack: vec![self] }
    }

    /// Pre-order walk yielding every node with its path.
    #[must_use]
    pub fn walk(&self) -> Walk<'_, T> {
        Walk {
            stack: vec![(MosaicPath::root(), self)],
        }
    }
}

/// Iterator returned by [`MosaicNode::iter_leaves`].
///
/// Uses an explicit stack so degenerate (list-shaped) trees cannot exhaust
/// the call stack.
#[derive(Debug, Clone)]
pub struct Leaves<'a, T> {
    stack: Vec<&'a MosaicNode<T>>,
}

impl<'a, T> Iterator for Leaves<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                MosaicNode::Leaf(value) => return Some(value),
                MosaicNode::Parent(parent) => {
                    self.stack.push(parent.child(MosaicBranch::Second));
                    self.stack.push(parent.child(MosaicBranch::First));
                }
            }
        }
        None
    }
}

/// Iterator returned by [`MosaicNode::walk`].
#[derive(Debug, Clone)]
pub struct Walk<'a, T> {
    stack: Vec<(MosaicPath, &'a MosaicNode<T>)>,
}

impl<'a, T> Iterator for Walk<'a, T> {
    type Item = (MosaicPath, &'a MosaicNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        if let MosaicNode::Parent(parent) = node {
            for branch in [MosaicBranch::Second, MosaicBranch::First] {
                self.stack.push((path.child(branch), parent.child(branch)));
            }
        }
        Some((path, node))
    }
}
