use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::error::{MapError, TreeError};
use crate::types::{KvNode, Side};
use crate::util::{self, first, get_l, get_p, get_r, last, next, prev, set_l, set_p, set_r};

/// Structural hooks that differ between the plain and the balanced tree.
///
/// The map core does key comparison, descent and entry bookkeeping; the
/// implementor decides what linking and unlinking a node does to the shape
/// of the tree.
pub trait TreeOps<K, V, N>
where
    N: KvNode<K, V>,
{
    /// Links the detached `node` into the empty `side` slot of `parent`.
    /// Returns the new root.
    fn link(arena: &mut [N], root: u32, node: u32, parent: u32, side: Side) -> u32;

    /// Unlinks `node`, which has at most one child, leaving it fully
    /// detached. Returns the new root.
    fn unlink(arena: &mut [N], root: Option<u32>, node: u32) -> Option<u32>;

    /// Strategy-specific invariant checks run by `validate()`.
    fn validate(_arena: &[N], _root: Option<u32>) -> Result<(), TreeError> {
        Ok(())
    }

    /// Per-node extras shown by the debug printer.
    fn label(_node: &N) -> String {
        String::new()
    }
}

pub(crate) fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Arena-backed ordered map core shared by [`BstMap`](crate::BstMap) and
/// [`AvlMap`](crate::AvlMap).
///
/// The arena is kept dense: a removed node is swap-removed and the node that
/// moves into its slot has its links re-pointed, so `arena.len()` is always
/// the number of entries. Indices are therefore only stable until the next
/// removal.
pub struct OrderedMap<K, V, N, O, C>
where
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
    arena: Vec<N>,
    root: Option<u32>,
    comparator: C,
    _kv: PhantomData<(K, V)>,
    _ops: PhantomData<O>,
}

impl<K, V, N, O, C> OrderedMap<K, V, N, O, C>
where
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            comparator,
            _kv: PhantomData,
            _ops: PhantomData,
        }
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn node(&self, idx: u32) -> &N {
        &self.arena[idx as usize]
    }

    pub fn key(&self, idx: u32) -> &K {
        self.node(idx).key()
    }

    pub fn value(&self, idx: u32) -> &V {
        self.node(idx).value()
    }

    fn push_node(&mut self, key: K, value: V) -> u32 {
        self.arena.push(N::from_entry(key, value));
        (self.arena.len() - 1) as u32
    }

    /// Inserts `value` under `key`. An existing key keeps its node and has
    /// its value overwritten; the previous value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(root) = self.root else {
            let idx = self.push_node(key, value);
            self.root = Some(idx);
            return None;
        };

        let mut curr = root;
        loop {
            let side = match (self.comparator)(&key, self.arena[curr as usize].key()) {
                Ordering::Equal => {
                    let slot = self.arena[curr as usize].value_mut();
                    return Some(std::mem::replace(slot, value));
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            match util::child(&self.arena, curr, side) {
                Some(next) => curr = next,
                None => {
                    let idx = self.push_node(key, value);
                    self.root = Some(O::link(&mut self.arena, root, idx, curr, side));
                    return None;
                }
            }
        }
    }

    /// Removes `key` and returns its value. A missing key leaves the tree
    /// untouched.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node = self.find_index(key)?;
        let target = if get_l(&self.arena, node).is_some() && get_r(&self.arena, node).is_some() {
            let pred = prev(&self.arena, node).expect("node with left child has a predecessor");
            util::swap_entries(&mut self.arena, node, pred);
            pred
        } else {
            node
        };
        self.root = O::unlink(&mut self.arena, self.root, target);
        let (_, value) = self.release(target).into_entry();
        Some(value)
    }

    /// Frees a detached node. The last arena node moves into the vacated
    /// slot and every link that referred to it is re-pointed.
    fn release(&mut self, idx: u32) -> N {
        let removed = self.arena.swap_remove(idx as usize);
        let moved = self.arena.len() as u32;
        if moved == idx {
            return removed;
        }
        let arena = &mut self.arena;
        match get_p(arena, idx) {
            None => self.root = Some(idx),
            Some(p) => {
                if get_l(arena, p) == Some(moved) {
                    set_l(arena, p, Some(idx));
                } else {
                    set_r(arena, p, Some(idx));
                }
            }
        }
        if let Some(l) = get_l(arena, idx) {
            set_p(arena, l, Some(idx));
        }
        if let Some(r) = get_r(arena, idx) {
            set_p(arena, r, Some(idx));
        }
        removed
    }

    pub fn clear(&mut self) {
        debug!(released = self.arena.len(), "clearing tree");
        self.root = None;
        self.arena.clear();
    }

    pub fn find_index(&self, key: &K) -> Option<u32> {
        util::find(&self.arena, self.root, key, &self.comparator)
    }

    /// Cursor at `key`, or the end cursor when the key is absent.
    pub fn find(&self, key: &K) -> Cursor<'_, K, V, N, O, C> {
        Cursor::new(self, self.find_index(key))
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_index(key).map(|i| self.value(i))
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find_index(key)?;
        Some(self.arena[idx as usize].value_mut())
    }

    /// Bounds-checked keyed access.
    pub fn at(&self, key: &K) -> Result<&V, MapError> {
        self.get(key).ok_or(MapError::KeyNotFound)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, MapError> {
        self.get_mut(key).ok_or(MapError::KeyNotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn first(&self) -> Option<u32> {
        first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        last(&self.arena, self.root)
    }

    pub fn successor(&self, idx: u32) -> Option<u32> {
        next(&self.arena, idx)
    }

    pub fn predecessor(&self, idx: u32) -> Option<u32> {
        prev(&self.arena, idx)
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.first().map(|i| (self.key(i), self.value(i)))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.last().map(|i| (self.key(i), self.value(i)))
    }

    /// Cursor at the smallest key (the end cursor for an empty map).
    pub fn begin(&self) -> Cursor<'_, K, V, N, O, C> {
        Cursor::new(self, self.first())
    }

    pub fn end(&self) -> Cursor<'_, K, V, N, O, C> {
        Cursor::new(self, None)
    }

    pub fn iter(&self) -> Iter<'_, K, V, N, O, C> {
        Iter {
            map: self,
            curr: self.first(),
            remaining: self.len(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn height(&self) -> usize {
        util::height(&self.arena, self.root)
    }

    pub fn is_balanced(&self) -> bool {
        util::is_balanced(&self.arena, self.root)
    }

    /// Checks that every arena slot hangs off the root, then parent/child
    /// link consistency and strict key order, then whatever the balancing
    /// strategy adds on top.
    pub fn validate(&self) -> Result<(), TreeError> {
        let reachable = util::size(&self.arena, self.root);
        if reachable != self.arena.len() {
            return Err(TreeError::SizeMismatch {
                reachable,
                stored: self.arena.len(),
            });
        }
        let Some(root) = self.root else {
            return Ok(());
        };
        if get_p(&self.arena, root).is_some() {
            return Err(TreeError::RootHasParent);
        }

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            for side in [Side::Left, Side::Right] {
                if let Some(c) = util::child(&self.arena, node, side) {
                    if get_p(&self.arena, c) != Some(node) {
                        return Err(TreeError::BrokenParentLink { node, side });
                    }
                    stack.push(c);
                }
            }
        }

        let mut curr = self.first();
        let mut prev_node: Option<u32> = None;
        while let Some(i) = curr {
            if let Some(p) = prev_node {
                if (self.comparator)(self.key(p), self.key(i)) != Ordering::Less {
                    return Err(TreeError::OrderViolated { node: i });
                }
            }
            prev_node = Some(i);
            curr = self.successor(i);
        }

        O::validate(&self.arena, self.root)
    }

    pub fn print(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        util::print::<K, V, N, _>(&self.arena, self.root, "", &O::label)
    }
}

impl<K, V, N, O, C> fmt::Debug for OrderedMap<K, V, N, O, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Position in an [`OrderedMap`]: either an entry or the end.
///
/// Holds a shared borrow, so the map cannot change underneath it.
pub struct Cursor<'a, K, V, N, O, C>
where
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
    map: &'a OrderedMap<K, V, N, O, C>,
    curr: Option<u32>,
}

impl<'a, K, V, N, O, C> Cursor<'a, K, V, N, O, C>
where
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
    fn new(map: &'a OrderedMap<K, V, N, O, C>, curr: Option<u32>) -> Self {
        Self { map, curr }
    }

    pub fn is_end(&self) -> bool {
        self.curr.is_none()
    }

    pub fn index(&self) -> Option<u32> {
        self.curr
    }

    pub fn key(&self) -> Option<&'a K> {
        let map = self.map;
        self.curr.map(|i| map.key(i))
    }

    pub fn value(&self) -> Option<&'a V> {
        let map = self.map;
        self.curr.map(|i| map.value(i))
    }

    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        let map = self.map;
        self.curr.map(|i| (map.key(i), map.value(i)))
    }

    /// Advances to the in-order successor. The end cursor stays at the end.
    pub fn move_next(&mut self) {
        if let Some(i) = self.curr {
            self.curr = self.map.successor(i);
        }
    }

    /// Steps to the in-order predecessor. From the end this lands on the
    /// largest key; from the smallest key it reaches the end.
    pub fn move_prev(&mut self) {
        self.curr = match self.curr {
            Some(i) => self.map.predecessor(i),
            None => self.map.last(),
        };
    }
}

impl<K, V, N, O, C> Clone for Cursor<'_, K, V, N, O, C>
where
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, N, O, C> Copy for Cursor<'_, K, V, N, O, C>
where
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
}

impl<K, V, N, O, C> PartialEq for Cursor<'_, K, V, N, O, C>
where
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.map, other.map) && self.curr == other.curr
    }
}

impl<K, V, N, O, C> Eq for Cursor<'_, K, V, N, O, C>
where
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
}

impl<K, V, N, O, C> fmt::Debug for Cursor<'_, K, V, N, O, C>
where
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("index", &self.curr).finish()
    }
}

/// In-order iterator over `(key, value)` pairs.
pub struct Iter<'a, K, V, N, O, C>
where
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
    map: &'a OrderedMap<K, V, N, O, C>,
    curr: Option<u32>,
    remaining: usize,
}

impl<'a, K, V, N, O, C> Iterator for Iter<'a, K, V, N, O, C>
where
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        let map = self.map;
        self.curr = map.successor(i);
        self.remaining -= 1;
        Some((map.key(i), map.value(i)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, N, O, C> ExactSizeIterator for Iter<'_, K, V, N, O, C>
where
    N: KvNode<K, V>,
    O: TreeOps<K, V, N>,
    C: Fn(&K, &K) -> Ordering,
{
}
