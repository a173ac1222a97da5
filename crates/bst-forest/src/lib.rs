//! Arena-based ordered maps.
//!
//! Two maps share one core ([`OrderedMap`]):
//!
//! - [`BstMap`]: plain binary search tree; insert and remove never reshape
//!   the tree beyond linking and splicing.
//! - [`AvlMap`]: AVL tree; every node stores a balance factor
//!   (`height(right) - height(left)`) and inserts/removes rebalance with
//!   single or double rotations.
//!
//! Instead of raw pointers, every link is an `Option<u32>` index into a
//! `Vec` arena owned by the map. Downward links own their subtree; parent
//! links are back-references used only for walking.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`] and [`KvNode`] traits, [`Side`] |
//! | [`util`] | link helpers, `first` / `next` / `prev`, splice, height checks |
//! | [`map`] | [`OrderedMap`], [`TreeOps`], [`Cursor`], [`Iter`] |
//! | [`bst`] | [`BstMap`] over [`TreeNode`] |
//! | [`avl`] | [`AvlMap`] over [`AvlNode`], rotations and fixups |
//! | [`error`] | [`MapError`], [`TreeError`] |

pub mod avl;
pub mod bst;
pub mod error;
pub mod map;
pub mod tree_node;
pub mod types;
pub mod util;

pub use avl::{AvlMap, AvlNode, AvlNodeLike};
pub use bst::BstMap;
pub use error::{MapError, TreeError};
pub use map::{Cursor, Iter, OrderedMap, TreeOps};
pub use tree_node::TreeNode;
pub use types::{KvNode, Node, Side};
