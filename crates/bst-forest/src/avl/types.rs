use crate::types::{KvNode, Node};

/// Node of the AVL tree.
///
/// Same links and entry as [`TreeNode`](crate::TreeNode), plus the balance
/// factor the fixups maintain. The factor belongs to the tree position, so
/// it stays put when a removal swaps entries between nodes.
#[derive(Clone, Debug)]
pub struct AvlNode<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub v: V,
    /// Balance factor, `height(right) - height(left)`.
    pub bf: i8,
}

impl<K, V> AvlNode<K, V> {
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            bf: 0,
        }
    }
}

impl<K, V> Node for AvlNode<K, V> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K, V> KvNode<K, V> for AvlNode<K, V> {
    fn from_entry(key: K, value: V) -> Self {
        Self::new(key, value)
    }

    fn key(&self) -> &K {
        &self.k
    }

    fn value(&self) -> &V {
        &self.v
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.v
    }

    fn entry_mut(&mut self) -> (&mut K, &mut V) {
        (&mut self.k, &mut self.v)
    }

    fn into_entry(self) -> (K, V) {
        (self.k, self.v)
    }
}

/// AVL-specific node behavior.
pub trait AvlNodeLike<K, V>: KvNode<K, V> {
    fn bf(&self) -> i8;
    fn set_bf(&mut self, bf: i8);
}

impl<K, V> AvlNodeLike<K, V> for AvlNode<K, V> {
    fn bf(&self) -> i8 {
        self.bf
    }

    fn set_bf(&mut self, bf: i8) {
        self.bf = bf;
    }
}
