#![forbid(unsafe_code)]

//! Recursive split-pane layouts.
//!
//! A layout is an immutable binary tree: every [`MosaicNode`] is either a leaf
//! carrying an opaque pane identifier or a parent that divides its rectangle
//! between two children along a [`MosaicDirection`]. Nodes are addressed by
//! [`MosaicPath`], the branch choices taken from the root.
//!
//! Edits never mutate a tree. Gestures on [`MosaicEngine`] compute
//! [`MosaicPatch`]es, [`apply_patches`] rebuilds the touched spine, and every
//! untouched subtree is shared with the previous snapshot.
//!
//! ```
//! use mosaic_layout::{Corner, DropPosition, MosaicEngine, MosaicPath, leaves};
//! use mosaic_layout::MosaicBranch::{First, Second};
//!
//! let engine = MosaicEngine::default();
//! let mut next = 0;
//! let mut mint = || {
//!     next += 1;
//!     next
//! };
//!
//! let tree = engine.insert_at_corner(None, Corner::TopRight, &mut mint)?;
//! let tree = engine.insert_at_corner(Some(&tree), Corner::BottomRight, &mut mint)?;
//! assert_eq!(leaves(Some(&tree)), vec![1, 2, 3]);
//!
//! let tree = engine.drag(
//!     &tree,
//!     &MosaicPath::from([Second, Second]),
//!     &MosaicPath::from([First]),
//!     DropPosition::Left,
//! )?;
//! assert_eq!(leaves(Some(&tree)), vec![3, 1, 2]);
//! # Ok::<(), mosaic_layout::MosaicError>(())
//! ```

pub mod balanced;
pub mod config;
pub mod error;
pub mod layout;
pub mod leaves;
pub mod node;
pub mod patch;
pub mod path;
pub mod restructure;

pub use balanced::{balanced_tree, balanced_tree_with_direction};
pub use config::{MAX_SPLIT_PERCENTAGE, MIN_SPLIT_PERCENTAGE, MosaicConfig};
pub use error::{ConfigError, InvalidGesture, InvariantViolation, MosaicError};
pub use layout::{BoundingBox, MosaicLayout, SplitLayout, TileLayout, solve_layout};
pub use leaves::{leaf_paths, leaves};
pub use node::{
    Corner, DEFAULT_SPLIT_PERCENTAGE, MosaicBranch, MosaicDirection, MosaicNode, MosaicParent,
    MosaicPath,
};
pub use patch::{
    MosaicOperation, MosaicOperationKind, MosaicPatch, NodeTransform, ParentAttributes,
    apply_patches,
};
pub use path::{
    node_at_path, other_branch, other_direction, parent_at_path, path_to_corner, path_to_leaf,
};
pub use restructure::{
    DropPosition, MosaicEngine, MosaicPlacement, create_expand_patches, create_hide_patch,
    create_remove_patch, create_resize_patch,
};
