//! Node trait definitions.
//!
//! Nodes live in a [`Vec`]-backed arena owned by the map. Each link is an
//! `Option<u32>` index into that arena. Downward links (`l`, `r`) carry
//! ownership; `p` is a back-reference used only for walking the tree.

/// Parent / left / right links.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Key/value node interface used by map-like structures.
pub trait KvNode<K, V>: Node {
    /// Builds a detached node holding the entry.
    fn from_entry(key: K, value: V) -> Self;
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    /// Mutable access to both halves of the entry, used when two nodes
    /// exchange their contents.
    fn entry_mut(&mut self) -> (&mut K, &mut V);
    fn into_entry(self) -> (K, V);
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Unit balance-factor contribution of a subtree on this side
    /// (`height(right) - height(left)` convention).
    pub fn unit(self) -> i8 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}
