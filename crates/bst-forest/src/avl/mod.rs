//! Self-balancing AVL tree.

pub mod avl_map;
pub mod types;
pub mod util;

pub use avl_map::{AvlCursor, AvlIter, AvlMap, AvlOps};
pub use types::{AvlNode, AvlNodeLike};
pub use util::{assert_balance, rotate, rotate_left, rotate_right};
