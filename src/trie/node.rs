use std::cmp::Ordering;
use std::sync::Arc;

use crate::key;
use crate::nibble::{Nibbles, SIZE};

use super::pair::Pair;

/// A trie node: one head pair plus sixteen optional children indexed by
/// nibble value.
///
/// Nodes are never mutated once shared. Every change clones the node (a head
/// pointer and sixteen child pointers) and links the copy in place of the
/// original, so all untouched subtrees stay shared between versions.
///
/// The head is always the smallest key of the subtree. A node reached by
/// consuming the nibbles `P` of a key stores in bucket `i` exactly the keys
/// whose nibble following `P` is `i`.
pub(crate) struct Node<K, V> {
    pub(crate) head: Pair<K, V>,
    pub(crate) buckets: [Option<Arc<Node<K, V>>>; SIZE],
}

impl<K, V> Clone for Node<K, V> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            buckets: self.buckets.clone(),
        }
    }
}

impl<K, V> Node<K, V> {
    pub(crate) fn singleton(head: Pair<K, V>) -> Arc<Self> {
        Arc::new(Self {
            head,
            buckets: Default::default(),
        })
    }

    /// The first populated bucket at or after `from`.
    #[inline]
    pub(crate) fn child_from(&self, from: usize) -> Option<(usize, &Arc<Self>)> {
        (from..SIZE).find_map(|i| self.buckets[i].as_ref().map(|child| (i, child)))
    }

    /// The last populated bucket strictly below `below`.
    #[inline]
    pub(crate) fn child_below(&self, below: usize) -> Option<(usize, &Arc<Self>)> {
        (0..below)
            .rev()
            .find_map(|i| self.buckets[i].as_ref().map(|child| (i, child)))
    }

    /// Number of pairs stored in this subtree.
    pub(crate) fn count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.buckets.iter().filter_map(|b| b.as_deref()));
        }
        count
    }

    fn with_bucket(&self, idx: u8, bucket: Option<Arc<Self>>) -> Arc<Self> {
        let mut res = self.clone();
        res.buckets[idx as usize] = bucket;
        Arc::new(res)
    }
}

impl<K: AsRef<[u8]>, V> Node<K, V> {
    pub(crate) fn get(&self, key: &[u8]) -> Option<&Pair<K, V>> {
        let mut node = self;
        let mut nibbles = Nibbles::new(key);
        loop {
            if key::equal_to(node.head.bytes(), key) {
                return Some(&node.head);
            }
            let (idx, rest) = nibbles.consume()?;
            node = node.buckets[idx as usize].as_deref()?;
            nibbles = rest;
        }
    }

    /// Inserts `pair`, where `nibbles` is the cursor over the pair's key
    /// positioned at this node's depth.
    pub(crate) fn put(self: &Arc<Self>, pair: &Pair<K, V>, nibbles: Nibbles<'_>) -> Arc<Self> {
        match key::compare(pair.bytes(), self.head.bytes()) {
            Ordering::Equal => self.replace_head(pair),
            Ordering::Less => self.demote_head(pair, nibbles),
            Ordering::Greater => self.append(pair, nibbles),
        }
    }

    fn replace_head(&self, pair: &Pair<K, V>) -> Arc<Self> {
        let mut res = self.clone();
        res.head = pair.clone();
        Arc::new(res)
    }

    /// `pair` sorts before the current head, so it takes its place and the
    /// old head moves one level down, into the bucket its own key selects at
    /// this depth.
    fn demote_head(&self, pair: &Pair<K, V>, nibbles: Nibbles<'_>) -> Arc<Self> {
        let old = &self.head;
        let Some((idx, rest)) = nibbles.branch(old.bytes()).consume() else {
            panic!("programmer error: demoted a non-consumable key");
        };
        let bucket = match &self.buckets[idx as usize] {
            Some(bucket) => bucket.put(old, rest),
            None => Self::singleton(old.clone()),
        };
        let mut res = self.clone();
        res.head = pair.clone();
        res.buckets[idx as usize] = Some(bucket);
        Arc::new(res)
    }

    fn append(&self, pair: &Pair<K, V>, nibbles: Nibbles<'_>) -> Arc<Self> {
        let Some((idx, rest)) = nibbles.consume() else {
            panic!("programmer error: appended a non-consumable key");
        };
        let bucket = match &self.buckets[idx as usize] {
            Some(bucket) => bucket.put(pair, rest),
            None => Self::singleton(pair.clone()),
        };
        self.with_bucket(idx, Some(bucket))
    }

    /// Removes `key` from this subtree.
    ///
    /// Returns `None` if the key is absent. Otherwise returns the removed pair
    /// and the replacement for this node, which is `None` if the subtree became
    /// empty.
    pub(crate) fn remove(
        &self,
        key: &[u8],
        nibbles: Nibbles<'_>,
    ) -> Option<(Pair<K, V>, Option<Arc<Self>>)> {
        if key::equal_to(self.head.bytes(), key) {
            return Some((self.head.clone(), self.promote()));
        }
        let (idx, rest) = nibbles.consume()?;
        let bucket = self.buckets[idx as usize].as_ref()?;
        let (removed, replacement) = bucket.remove(key, rest)?;
        Some((removed, Some(self.with_bucket(idx, replacement))))
    }

    /// Drops the head, pulling the smallest key of the subtree up in its place.
    /// Returns `None` when the node has no children left to promote from.
    pub(crate) fn promote(&self) -> Option<Arc<Self>> {
        let (idx, least) = self.least_bucket()?;
        let mut res = self.clone();
        res.head = least.head.clone();
        res.buckets[idx] = least.promote();
        Some(Arc::new(res))
    }

    fn least_bucket(&self) -> Option<(usize, &Arc<Self>)> {
        self.buckets
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.as_ref().map(|b| (i, b)))
            .min_by(|(_, l), (_, r)| key::compare(l.head.bytes(), r.head.bytes()))
    }

    /// Removes every key starting with `prefix` from this subtree.
    ///
    /// Returns `None` if nothing matched, otherwise the replacement for this
    /// node (`None` if the subtree became empty).
    pub(crate) fn remove_prefix(
        &self,
        prefix: &[u8],
        nibbles: Nibbles<'_>,
    ) -> Option<Option<Arc<Self>>> {
        if key::has_prefix(self.head.bytes(), prefix) {
            // A promoted head can match the prefix as well, keep dropping heads
            // until one survives.
            let mut current = self.promote();
            while let Some(node) = &current {
                if !key::has_prefix(node.head.bytes(), prefix) {
                    break;
                }
                current = node.promote();
            }
            return Some(current.and_then(|node| match node.remove_prefix(prefix, nibbles) {
                Some(replacement) => replacement,
                None => Some(node),
            }));
        }
        let (idx, rest) = nibbles.consume()?;
        let bucket = self.buckets[idx as usize].as_ref()?;
        let replacement = bucket.remove_prefix(prefix, rest)?;
        Some(Some(self.with_bucket(idx, replacement)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(node: Option<Arc<Node<&'static str, u32>>>, key: &'static str, value: u32) -> Arc<Node<&'static str, u32>> {
        let pair = Pair::new(key, value);
        match node {
            Some(node) => node.put(&pair, Nibbles::new(pair.bytes())),
            None => Node::singleton(pair),
        }
    }

    #[test]
    fn smaller_key_becomes_head() {
        let node = put(None, "b", 1);
        let node = put(Some(node), "a", 2);
        assert_eq!(*node.head.key(), "a");
        // 'b' = 0x62 is demoted into bucket 6.
        let bucket = node.buckets[6].as_ref().unwrap();
        assert_eq!(*bucket.head.key(), "b");
        assert_eq!(node.count(), 2);
    }

    #[test]
    fn larger_key_is_appended() {
        let node = put(None, "a", 1);
        let node = put(Some(node), "q", 2);
        assert_eq!(*node.head.key(), "a");
        // 'q' = 0x71 lands in bucket 7.
        assert_eq!(*node.buckets[7].as_ref().unwrap().head.key(), "q");
    }

    #[test]
    fn put_shares_untouched_buckets() {
        let node = put(None, "a", 1);
        let node = put(Some(node), "q", 2);
        let before = Arc::clone(node.buckets[7].as_ref().unwrap());
        let node = put(Some(node), "b", 3);
        assert!(Arc::ptr_eq(&before, node.buckets[7].as_ref().unwrap()));
    }

    #[test]
    fn promote_pulls_smallest_child() {
        let mut node = put(None, "m", 0);
        for (i, k) in ["z", "c", "q", "a"].into_iter().enumerate() {
            node = put(Some(node), k, i as u32);
        }
        assert_eq!(*node.head.key(), "a");
        let promoted = node.promote().unwrap();
        assert_eq!(*promoted.head.key(), "c");
        assert_eq!(promoted.count(), 4);

        let single = put(None, "x", 0);
        assert!(single.promote().is_none());
    }

    #[test]
    fn remove_missing_key() {
        let node = put(None, "hello", 1);
        assert!(node.remove(b"help", Nibbles::new("help")).is_none());
    }

    #[test]
    fn remove_prefix_after_promoting_heads() {
        let mut node = put(None, "ab", 0);
        for (i, k) in ["abc", "b", "abd", "ba", "a"].into_iter().enumerate() {
            node = put(Some(node), k, i as u32);
        }
        // "a" is the head and does not match; the match sits one bucket down.
        let rest = node.remove_prefix(b"ab", Nibbles::new("ab")).unwrap().unwrap();
        assert_eq!(rest.count(), 3);
        assert!(rest.get(b"abc").is_none());
        assert!(rest.get(b"ba").is_some());

        // Removing the head's own prefix promotes past every match and then
        // keeps the survivors below the new head.
        let rest = node.remove_prefix(b"a", Nibbles::new("a")).unwrap().unwrap();
        assert_eq!(*rest.head.key(), "b");
        assert_eq!(rest.count(), 2);
        assert!(node.remove_prefix(b"c", Nibbles::new("c")).is_none());

        let single = put(None, "x", 0);
        assert!(single.remove_prefix(b"x", Nibbles::new("x")).unwrap().is_none());
    }

    #[test]
    fn get_descends_buckets() {
        let mut node = put(None, "hello", 1);
        node = put(Some(node), "help", 2);
        node = put(Some(node), "he", 3);
        assert_eq!(node.get(b"he").map(|p| *p.value()), Some(3));
        assert_eq!(node.get(b"help").map(|p| *p.value()), Some(2));
        assert_eq!(node.get(b"hello").map(|p| *p.value()), Some(1));
        assert!(node.get(b"h").is_none());
        assert!(node.get(b"helps").is_none());
    }
}
