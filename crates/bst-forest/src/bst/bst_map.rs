use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use crate::error::{MapError, TreeError};
use crate::map::{default_comparator, Cursor, Iter, OrderedMap, TreeOps};
use crate::tree_node::TreeNode;
use crate::types::Side;
use crate::util;

/// Hooks for the unbalanced tree: link and splice, nothing else.
pub struct PlainOps;

impl<K, V> TreeOps<K, V, TreeNode<K, V>> for PlainOps {
    fn link(arena: &mut [TreeNode<K, V>], root: u32, node: u32, parent: u32, side: Side) -> u32 {
        util::attach(arena, node, parent, side);
        root
    }

    fn unlink(arena: &mut [TreeNode<K, V>], root: Option<u32>, node: u32) -> Option<u32> {
        util::splice(arena, root, node)
    }
}

pub type BstCursor<'a, K, V, C> = Cursor<'a, K, V, TreeNode<K, V>, PlainOps, C>;
pub type BstIter<'a, K, V, C> = Iter<'a, K, V, TreeNode<K, V>, PlainOps, C>;

/// Ordered map backed by an unbalanced binary search tree.
///
/// The shape of the tree follows insertion order; sorted input degenerates
/// into a list. [`is_balanced`](Self::is_balanced) reports whether the
/// current shape happens to be height-balanced.
///
/// ```
/// use bst_forest::BstMap;
///
/// let mut map = BstMap::new();
/// map.insert(2, "two");
/// map.insert(1, "one");
/// map.insert(3, "three");
/// assert!(map.is_balanced());
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert!(map.at(&4).is_err());
/// ```
pub struct BstMap<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    inner: OrderedMap<K, V, TreeNode<K, V>, PlainOps, C>,
}

impl<K, V> BstMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for BstMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> BstMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            inner: OrderedMap::with_comparator(comparator),
        }
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }

    pub fn find(&self, key: &K) -> BstCursor<'_, K, V, C> {
        self.inner.find(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.inner.get_mut(key)
    }

    pub fn at(&self, key: &K) -> Result<&V, MapError> {
        self.inner.at(key)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, MapError> {
        self.inner.at_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn begin(&self) -> BstCursor<'_, K, V, C> {
        self.inner.begin()
    }

    pub fn end(&self) -> BstCursor<'_, K, V, C> {
        self.inner.end()
    }

    pub fn iter(&self) -> BstIter<'_, K, V, C> {
        self.inner.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.inner.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.inner.values()
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.inner.first_key_value()
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.inner.last_key_value()
    }

    pub fn root_key(&self) -> Option<&K> {
        self.inner.root_index().map(|i| self.inner.key(i))
    }

    pub fn height(&self) -> usize {
        self.inner.height()
    }

    pub fn is_balanced(&self) -> bool {
        self.inner.is_balanced()
    }

    pub fn validate(&self) -> Result<(), TreeError> {
        self.inner.validate()
    }

    pub fn print(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        self.inner.print()
    }
}

impl<K, V, C> fmt::Debug for BstMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl<K, V, C> Index<&K> for BstMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        match self.at(key) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a BstMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = BstIter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> Extend<(K, V)> for BstMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for BstMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
