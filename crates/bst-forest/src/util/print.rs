use std::fmt::Debug;

use crate::types::KvNode;

/// Debug printer for binary trees.
///
/// `label` renders any per-node extras (for example an AVL balance factor);
/// pass `|_| String::new()` for plain trees.
pub fn print<K, V, N, F>(arena: &[N], node: Option<u32>, tab: &str, label: &F) -> String
where
    K: Debug,
    V: Debug,
    N: KvNode<K, V>,
    F: Fn(&N) -> String,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<K, V, N, F>(arena, n.l(), &format!("{tab}  "), label);
            let right = print::<K, V, N, F>(arena, n.r(), &format!("{tab}  "), label);
            format!(
                "Node[{i}]{} {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                label(n),
                n.key(),
                n.value()
            )
        }
    }
}
