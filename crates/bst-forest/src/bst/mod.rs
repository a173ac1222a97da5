//! Unbalanced binary search tree.

pub mod bst_map;

pub use bst_map::{BstCursor, BstIter, BstMap, PlainOps};
