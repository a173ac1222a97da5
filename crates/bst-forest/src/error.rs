//! Error types.

use thiserror::Error;

use crate::types::Side;

/// Errors returned by map accessors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// Bounds-checked keyed access on a key that is not in the map.
    #[error("Invalid key")]
    KeyNotFound,
}

/// Structural invariant violations reported by `validate()`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Tree reaches {reachable} nodes but the arena holds {stored}")]
    SizeMismatch { reachable: usize, stored: usize },
    #[error("Root has parent")]
    RootHasParent,
    #[error("Broken parent link on {side} child of node {node}")]
    BrokenParentLink { node: u32, side: Side },
    #[error("Node order violated at node {node}")]
    OrderViolated { node: u32 },
    #[error("Balance factor mismatch at node {node}: expected {expected}, got {actual}")]
    BalanceMismatch { node: u32, expected: i32, actual: i8 },
    #[error("AVL balance violated at node {node}")]
    Unbalanced { node: u32 },
}
