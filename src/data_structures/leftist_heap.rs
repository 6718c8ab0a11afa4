use std::fmt::Debug;
use std::rc::Rc;

/// A (possibly empty) persistent leftist min-heap
pub type HeapRef<K, V> = Option<Rc<LeftistNode<K, V>>>;

/// A node of a persistent leftist min-heap.
///
/// Nodes are immutable once created: [`insert`] returns a new root and
/// allocates fresh nodes only along the rightmost spine from the root to the
/// insertion point, sharing every other subtree with the input heap by
/// reference. Many logical heaps can therefore share most of their structure,
/// which is what makes per-vertex sidetrack heaps affordable.
///
/// Two invariants hold for every node:
/// - heap order: both children's keys are >= the node's key;
/// - leftist property: rank(left) >= rank(right), where rank is the
///   null-path length (rank of an absent child is 0) and
///   rank(node) = 1 + rank(right child).
#[derive(Debug)]
pub struct LeftistNode<K, V>
where
    K: Ord + Copy + Debug,
    V: Copy + Debug,
{
    rank: u32,
    key: K,
    value: V,
    left: HeapRef<K, V>,
    right: HeapRef<K, V>,
}

impl<K, V> LeftistNode<K, V>
where
    K: Ord + Copy + Debug,
    V: Copy + Debug,
{
    /// Null-path length of this node
    pub fn rank(&self) -> u32 {
        self.rank
    }

    /// The heap key (minimum over this node's subtree)
    pub fn key(&self) -> K {
        self.key
    }

    /// The payload stored alongside the key
    pub fn value(&self) -> V {
        self.value
    }

    /// Left child, if any
    pub fn left(&self) -> &HeapRef<K, V> {
        &self.left
    }

    /// Right child, if any
    pub fn right(&self) -> &HeapRef<K, V> {
        &self.right
    }

    /// Walks the whole subtree checking heap order and the leftist property,
    /// returning the number of nodes. Panics on the first violation; used by
    /// property tests.
    pub fn assert_invariants(&self) -> usize {
        let mut size = 1;
        for child in [&self.left, &self.right] {
            if let Some(c) = child {
                assert!(c.key >= self.key, "heap order violated");
                size += c.assert_invariants();
            }
        }
        let left_rank = self.left.as_ref().map_or(0, |c| c.rank);
        let right_rank = self.right.as_ref().map_or(0, |c| c.rank);
        assert!(left_rank >= right_rank, "leftist property violated");
        assert_eq!(self.rank, right_rank + 1, "rank out of date");
        size
    }
}

/// Persistent insert: returns a new heap containing the old elements plus
/// `(key, value)`, leaving the input heap fully intact.
pub fn insert<K, V>(heap: &HeapRef<K, V>, key: K, value: V) -> HeapRef<K, V>
where
    K: Ord + Copy + Debug,
    V: Copy + Debug,
{
    let root = match heap {
        // Empty heap, or the new key displaces the root: the whole old heap
        // becomes the left child of a fresh singleton.
        None => {
            return Some(Rc::new(LeftistNode {
                rank: 1,
                key,
                value,
                left: None,
                right: None,
            }))
        }
        Some(root) if key < root.key => {
            return Some(Rc::new(LeftistNode {
                rank: 1,
                key,
                value,
                left: heap.clone(),
                right: None,
            }))
        }
        Some(root) => root,
    };

    // Recurse down the right spine, then restore the leftist property by
    // swapping children if needed. Only nodes on this spine are re-allocated;
    // the left subtree is shared with the input heap.
    let mut left = root.left.clone();
    let mut right = insert(&root.right, key, value);

    let left_rank = left.as_ref().map_or(0, |c| c.rank);
    let right_rank = right.as_ref().map_or(0, |c| c.rank);
    if right_rank > left_rank {
        std::mem::swap(&mut left, &mut right);
    }
    let rank = right.as_ref().map_or(0, |c| c.rank) + 1;

    Some(Rc::new(LeftistNode {
        rank,
        key: root.key,
        value: root.value,
        left,
        right,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_keys(heap: &HeapRef<i64, usize>, out: &mut Vec<i64>) {
        if let Some(node) = heap {
            out.push(node.key());
            collect_keys(node.left(), out);
            collect_keys(node.right(), out);
        }
    }

    #[test]
    fn insert_keeps_minimum_at_root() {
        let mut heap: HeapRef<i64, usize> = None;
        for (i, k) in [5, 3, 8, 1, 9, 1].into_iter().enumerate() {
            heap = insert(&heap, k, i);
            assert_eq!(heap.as_ref().unwrap().assert_invariants(), i + 1);
        }
        assert_eq!(heap.unwrap().key(), 1);
    }

    #[test]
    fn insert_does_not_disturb_prior_version() {
        let mut v1: HeapRef<i64, usize> = None;
        for k in [4, 7, 2, 9] {
            v1 = insert(&v1, k, 0);
        }
        let mut before = Vec::new();
        collect_keys(&v1, &mut before);

        let v2 = insert(&v1, 1, 0);
        let v3 = insert(&v1, 6, 0);

        let mut after = Vec::new();
        collect_keys(&v1, &mut after);
        assert_eq!(before, after);

        assert_eq!(v2.as_ref().unwrap().key(), 1);
        v2.unwrap().assert_invariants();
        v3.unwrap().assert_invariants();
    }
}
