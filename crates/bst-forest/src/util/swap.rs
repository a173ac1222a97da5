use crate::types::KvNode;

/// Exchanges the key and value stored at `x` and `y`.
///
/// Links are untouched, so each tree position keeps its parent, children
/// and any per-position data such as an AVL balance factor. Used by
/// two-children removal to move the doomed entry into its in-order
/// predecessor's slot.
pub fn swap_entries<K, V, N: KvNode<K, V>>(arena: &mut [N], x: u32, y: u32) {
    if x == y {
        return;
    }
    let (lo, hi) = if x < y { (x, y) } else { (y, x) };
    let (head, tail) = arena.split_at_mut(hi as usize);
    let (lk, lv) = head[lo as usize].entry_mut();
    let (hk, hv) = tail[0].entry_mut();
    std::mem::swap(lk, hk);
    std::mem::swap(lv, hv);
}
