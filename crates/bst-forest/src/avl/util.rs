use tracing::trace;

use crate::error::TreeError;
use crate::types::{Node, Side};
use crate::util::{attach, child, get_l, get_p, set_child, set_p, side_of, splice};

use super::types::AvlNodeLike;

#[inline]
fn bf<K, V, N>(arena: &[N], i: u32) -> i8
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].bf()
}

#[inline]
fn set_bf<K, V, N>(arena: &mut [N], i: u32, v: i8)
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].set_bf(v);
}

/// Single rotation that moves `node` one level down towards `dir`,
/// promoting its child on the opposite side. Purely structural: balance
/// factors are left to the caller. Returns the new root.
pub fn rotate<N: Node>(arena: &mut [N], root: u32, node: u32, dir: Side) -> u32 {
    let up = child(arena, node, dir.opposite()).expect("rotation requires a child to promote");
    let inner = child(arena, up, dir);
    let p = get_p(arena, node);

    set_p(arena, up, p);
    let root = match p {
        None => up,
        Some(p) => {
            let slot = if get_l(arena, p) == Some(node) {
                Side::Left
            } else {
                Side::Right
            };
            set_child(arena, p, slot, Some(up));
            root
        }
    };

    set_child(arena, node, dir.opposite(), inner);
    if let Some(inner) = inner {
        set_p(arena, inner, Some(node));
    }
    set_child(arena, up, dir, Some(node));
    set_p(arena, node, Some(up));

    trace!(pivot = node, promoted = up, direction = %dir, "rotate");
    root
}

pub fn rotate_left<N: Node>(arena: &mut [N], root: u32, node: u32) -> u32 {
    rotate(arena, root, node, Side::Left)
}

pub fn rotate_right<N: Node>(arena: &mut [N], root: u32, node: u32) -> u32 {
    rotate(arena, root, node, Side::Right)
}

/// Balance factors after a zig-zag double rotation.
///
/// `top` was the overloaded node, `mid` its child on the heavy side, `pivot`
/// the inner grandchild that ends up on top. `u` is the unit balance of the
/// heavy side and `pivot_bf` the pivot's balance before rotating.
fn set_zig_zag_balances<K, V, N>(
    arena: &mut [N],
    top: u32,
    mid: u32,
    pivot: u32,
    pivot_bf: i8,
    u: i8,
) where
    N: AvlNodeLike<K, V>,
{
    let (top_bf, mid_bf) = if pivot_bf == u {
        (-u, 0)
    } else if pivot_bf == -u {
        (0, u)
    } else {
        (0, 0)
    };
    set_bf(arena, top, top_bf);
    set_bf(arena, mid, mid_bf);
    set_bf(arena, pivot, 0);
}

/// Links `node` under `parent` and restores the AVL invariant.
/// Returns the new root.
pub fn insert<K, V, N>(arena: &mut [N], root: u32, node: u32, parent: u32, side: Side) -> u32
where
    N: AvlNodeLike<K, V>,
{
    attach(arena, node, parent, side);
    if bf(arena, parent) != 0 {
        // The new leaf fills the empty side; the subtree height is unchanged.
        set_bf(arena, parent, 0);
        return root;
    }
    set_bf(arena, parent, side.unit());
    insert_fix(arena, root, node)
}

/// Walks up from `child` after its parent's subtree grew by one level.
fn insert_fix<K, V, N>(arena: &mut [N], root: u32, mut child: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    loop {
        let Some(parent) = get_p(arena, child) else {
            return root;
        };
        let Some(grandparent) = get_p(arena, parent) else {
            return root;
        };
        let parent_side = side_of(arena, parent).expect("parent below grandparent has a side");
        let u = parent_side.unit();
        let gbf = bf(arena, grandparent) + u;
        set_bf(arena, grandparent, gbf);

        match gbf {
            0 => return root,
            -1 | 1 => child = parent,
            _ => {
                let child_side = side_of(arena, child).expect("child below parent has a side");
                let root = if child_side == parent_side {
                    let root = rotate(arena, root, grandparent, parent_side.opposite());
                    set_bf(arena, parent, 0);
                    set_bf(arena, grandparent, 0);
                    root
                } else {
                    let child_bf = bf(arena, child);
                    let root = rotate(arena, root, parent, parent_side);
                    let root = rotate(arena, root, grandparent, parent_side.opposite());
                    set_zig_zag_balances(arena, grandparent, parent, child, child_bf, u);
                    root
                };
                trace!(node = grandparent, "insert fixup rebalanced");
                return root;
            }
        }
    }
}

/// Unlinks `node` (at most one child) and restores the AVL invariant.
/// Returns the new root.
pub fn remove<K, V, N>(arena: &mut [N], root: Option<u32>, node: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let (Some(parent), Some(side)) = (get_p(arena, node), side_of(arena, node)) else {
        return splice(arena, root, node);
    };
    let root = splice(arena, root, node)?;
    Some(remove_fix(arena, root, parent, -side.unit()))
}

/// Walks up from `n` after its subtree on one side lost a level. `diff` is
/// the change to `n`'s balance: `+1` when the left side shrank, `-1` when
/// the right side did.
fn remove_fix<K, V, N>(arena: &mut [N], mut root: u32, n: u32, diff: i8) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let mut curr = Some(n);
    let mut diff = diff;
    while let Some(n) = curr {
        // Captured before any rotation moves `n`.
        let parent = get_p(arena, n);
        let ndiff = side_of(arena, n).map_or(0, |s| -s.unit());

        let nbf = bf(arena, n) + diff;
        match nbf {
            -1 | 1 => {
                set_bf(arena, n, nbf);
                return root;
            }
            0 => set_bf(arena, n, 0),
            _ => {
                let heavy = if nbf < 0 { Side::Left } else { Side::Right };
                let u = heavy.unit();
                let c = child(arena, n, heavy).expect("heavy side has a child");
                let cbf = bf(arena, c);
                if cbf == u {
                    root = rotate(arena, root, n, heavy.opposite());
                    set_bf(arena, n, 0);
                    set_bf(arena, c, 0);
                } else if cbf == 0 {
                    root = rotate(arena, root, n, heavy.opposite());
                    set_bf(arena, n, u);
                    set_bf(arena, c, -u);
                    trace!(node = n, "remove fixup stopped after rotation");
                    return root;
                } else {
                    let g = child(arena, c, heavy.opposite()).expect("inner grandchild exists");
                    let gbf = bf(arena, g);
                    root = rotate(arena, root, c, heavy);
                    root = rotate(arena, root, n, heavy.opposite());
                    set_zig_zag_balances(arena, n, c, g, gbf, u);
                }
            }
        }
        curr = parent;
        diff = ndiff;
    }
    root
}

fn checked_height<K, V, N>(arena: &[N], node: Option<u32>) -> Result<i32, TreeError>
where
    N: AvlNodeLike<K, V>,
{
    let Some(i) = node else {
        return Ok(0);
    };
    let lh = checked_height(arena, arena[i as usize].l())?;
    let rh = checked_height(arena, arena[i as usize].r())?;
    let expected = rh - lh;
    let actual = bf(arena, i);
    if i32::from(actual) != expected {
        return Err(TreeError::BalanceMismatch {
            node: i,
            expected,
            actual,
        });
    }
    if !(-1..=1).contains(&actual) {
        return Err(TreeError::Unbalanced { node: i });
    }
    Ok(1 + lh.max(rh))
}

/// Checks that every stored balance factor matches the recomputed height
/// difference and stays within `-1..=1`.
pub fn assert_balance<K, V, N>(arena: &[N], root: Option<u32>) -> Result<(), TreeError>
where
    N: AvlNodeLike<K, V>,
{
    checked_height(arena, root).map(|_| ())
}
