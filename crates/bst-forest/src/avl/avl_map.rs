use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use crate::error::{MapError, TreeError};
use crate::map::{default_comparator, Cursor, Iter, OrderedMap, TreeOps};
use crate::types::Side;

use super::types::{AvlNode, AvlNodeLike};
use super::util;

/// Balancing hooks for [`AvlMap`].
pub struct AvlOps;

impl<K, V> TreeOps<K, V, AvlNode<K, V>> for AvlOps {
    fn link(arena: &mut [AvlNode<K, V>], root: u32, node: u32, parent: u32, side: Side) -> u32 {
        util::insert::<K, V, _>(arena, root, node, parent, side)
    }

    fn unlink(arena: &mut [AvlNode<K, V>], root: Option<u32>, node: u32) -> Option<u32> {
        util::remove::<K, V, _>(arena, root, node)
    }

    fn validate(arena: &[AvlNode<K, V>], root: Option<u32>) -> Result<(), TreeError> {
        util::assert_balance::<K, V, _>(arena, root)
    }

    fn label(node: &AvlNode<K, V>) -> String {
        format!(" [bf={}]", node.bf())
    }
}

pub type AvlCursor<'a, K, V, C> = Cursor<'a, K, V, AvlNode<K, V>, AvlOps, C>;
pub type AvlIter<'a, K, V, C> = Iter<'a, K, V, AvlNode<K, V>, AvlOps, C>;

/// Ordered map backed by an AVL tree.
///
/// Every insert and remove rebalances, so the height stays within
/// `O(log n)` for any sequence of operations.
///
/// ```
/// use bst_forest::AvlMap;
///
/// let mut map = AvlMap::new();
/// for k in 1..=7 {
///     map.insert(k, k * 10);
/// }
/// assert_eq!(map.height(), 3);
/// assert_eq!(map.get(&4), Some(&40));
/// assert!(map.find(&8).is_end());
/// ```
pub struct AvlMap<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    inner: OrderedMap<K, V, AvlNode<K, V>, AvlOps, C>,
}

impl<K, V> AvlMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for AvlMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
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

    pub fn find(&self, key: &K) -> AvlCursor<'_, K, V, C> {
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

    pub fn begin(&self) -> AvlCursor<'_, K, V, C> {
        self.inner.begin()
    }

    pub fn end(&self) -> AvlCursor<'_, K, V, C> {
        self.inner.end()
    }

    pub fn iter(&self) -> AvlIter<'_, K, V, C> {
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

    /// Balance factor stored at `key`'s node.
    pub fn balance_of(&self, key: &K) -> Option<i8> {
        self.inner.find_index(key).map(|i| self.inner.node(i).bf())
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

impl<K, V, C> fmt::Debug for AvlMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl<K, V, C> Index<&K> for AvlMap<K, V, C>
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

impl<'a, K, V, C> IntoIterator for &'a AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = AvlIter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> Extend<(K, V)> for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for AvlMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
