//! Link-level tree utilities shared by the plain and the balanced tree.
//!
//! Every function takes the arena as a slice and works with indices, so the
//! same helpers serve [`TreeNode`](crate::TreeNode) and
//! [`AvlNode`](crate::avl::AvlNode) alike.

pub mod print;
pub mod swap;

use std::cmp::Ordering;

use crate::types::{KvNode, Node, Side};

pub use print::print;
pub use swap::swap_entries;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

#[inline]
pub(crate) fn child<N: Node>(arena: &[N], idx: u32, side: Side) -> Option<u32> {
    match side {
        Side::Left => get_l(arena, idx),
        Side::Right => get_r(arena, idx),
    }
}

#[inline]
pub(crate) fn set_child<N: Node>(arena: &mut [N], idx: u32, side: Side, v: Option<u32>) {
    match side {
        Side::Left => set_l(arena, idx, v),
        Side::Right => set_r(arena, idx, v),
    }
}

/// Side of its parent that `node` hangs from, or `None` for the root.
pub fn side_of<N: Node>(arena: &[N], node: u32) -> Option<Side> {
    let p = get_p(arena, node)?;
    if get_l(arena, p) == Some(node) {
        Some(Side::Left)
    } else {
        Some(Side::Right)
    }
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Finds a node by key.
pub fn find<K, V, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(key, arena[i as usize].key()) {
            Ordering::Equal => return Some(i),
            Ordering::Less => get_l(arena, i),
            Ordering::Greater => get_r(arena, i),
        };
    }
    None
}

/// Attaches a detached `node` into the empty `side` slot of `parent`.
pub fn attach<N: Node>(arena: &mut [N], node: u32, parent: u32, side: Side) {
    debug_assert!(child(arena, parent, side).is_none(), "slot is occupied");
    set_child(arena, parent, side, Some(node));
    set_p(arena, node, Some(parent));
}

/// Puts `with` into the tree position currently held by `node`.
///
/// Only the link between `node`'s parent and the position is rewritten;
/// `node`'s own links are left untouched. Returns the new root.
pub fn replace<N: Node>(
    arena: &mut [N],
    root: Option<u32>,
    node: u32,
    with: Option<u32>,
) -> Option<u32> {
    let p = get_p(arena, node);
    if let Some(w) = with {
        set_p(arena, w, p);
    }
    match p {
        None => with,
        Some(p) => {
            if get_l(arena, p) == Some(node) {
                set_l(arena, p, with);
            } else {
                set_r(arena, p, with);
            }
            root
        }
    }
}

/// Unlinks a node that has at most one child, lifting that child into its
/// place. The node ends up fully detached. Returns the new root.
pub fn splice<N: Node>(arena: &mut [N], root: Option<u32>, node: u32) -> Option<u32> {
    let l = get_l(arena, node);
    let r = get_r(arena, node);
    assert!(
        l.is_none() || r.is_none(),
        "splice requires a node with at most one child"
    );
    let root = replace(arena, root, node, l.or(r));
    set_p(arena, node, None);
    set_l(arena, node, None);
    set_r(arena, node, None);
    root
}

/// Number of nodes on the longest downward path from `node` (empty = 0).
pub fn height<N: Node>(arena: &[N], node: Option<u32>) -> usize {
    match node {
        None => 0,
        Some(i) => 1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i))),
    }
}

fn balanced_height<N: Node>(arena: &[N], node: Option<u32>) -> Option<usize> {
    let Some(i) = node else {
        return Some(0);
    };
    let lh = balanced_height(arena, get_l(arena, i))?;
    let rh = balanced_height(arena, get_r(arena, i))?;
    if lh.abs_diff(rh) > 1 {
        return None;
    }
    Some(1 + lh.max(rh))
}

/// Whether left and right subtree heights differ by at most one at every
/// node. Heights are recomputed from the links, not read from any stored
/// balance factor.
pub fn is_balanced<N: Node>(arena: &[N], root: Option<u32>) -> bool {
    balanced_height(arena, root).is_some()
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    match root {
        None => 0,
        Some(i) => 1 + size(arena, get_l(arena, i)) + size(arena, get_r(arena, i)),
    }
}
