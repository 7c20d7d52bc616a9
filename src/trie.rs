//! The persistent trie handle.
//!
//! A [`Trie`] is either empty or points at a shared root [`node`]. All
//! operations take `&self` and hand back a new version; the receiver keeps
//! answering exactly as before. Versions share every subtree that a change did
//! not touch, so keeping many versions alive costs only the paths that differ.

pub(crate) mod node;
mod pair;
mod validate;

use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

use crate::key::{self, Key};
use crate::nibble::Nibbles;
use crate::query::{Cursor, Direction, Iter, Query};

use node::Node;
pub use pair::Pair;
pub use validate::InvariantError;

/// A persistent ordered map from byte-like keys to values.
pub struct Trie<K, V> {
    root: Option<Arc<Node<K, V>>>,
}

impl<K, V> Clone for Trie<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<K, V> Default for Trie<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Trie<K, V> {
    /// Creates an empty trie.
    pub const fn new() -> Self {
        Self { root: None }
    }

    fn from_root(root: Option<Arc<Node<K, V>>>) -> Self {
        Self { root }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of pairs in the trie. This walks the whole trie.
    pub fn count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.count())
    }

    /// Returns true if both handles point at the very same root.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(l), Some(r)) => Arc::ptr_eq(l, r),
            (None, None) => true,
            _ => false,
        }
    }

    /// The pair with the smallest key.
    pub fn first(&self) -> Option<Pair<K, V>> {
        self.root.as_ref().map(|root| root.head.clone())
    }

    /// Starts a query over the pairs of this trie.
    pub fn select(&self) -> Direction<K, V> {
        Direction::new(self.root.clone())
    }

    /// Iterates over all pairs in ascending key order.
    pub fn iter(&self) -> Iter<Cursor<K, V>> {
        self.select().ascending().all().iter()
    }
}

impl<K: Key, V> Trie<K, V> {
    /// Builds a trie by inserting every pair of `pairs`.
    ///
    /// The result only depends on the final association of each key, not on
    /// the order in which pairs are produced. Later duplicates win.
    pub fn build<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut res = Self::new();
        let mut consumed = 0usize;
        for (key, value) in pairs {
            res = res.put(key, value);
            consumed += 1;
        }
        tracing::debug!(consumed, "built trie");
        res
    }

    /// Returns a new trie that maps `key` to `value`, replacing any previous
    /// value for that key.
    pub fn put(&self, key: K, value: V) -> Self {
        let pair = Pair::new(key, value);
        let root = match &self.root {
            Some(root) => root.put(&pair, Nibbles::new(pair.bytes())),
            None => Node::singleton(pair),
        };
        Self::from_root(Some(root))
    }

    pub fn get<Q: AsRef<[u8]> + ?Sized>(&self, key: &Q) -> Option<&V> {
        self.get_pair(key).map(Pair::value)
    }

    pub fn get_pair<Q: AsRef<[u8]> + ?Sized>(&self, key: &Q) -> Option<&Pair<K, V>> {
        self.root.as_ref()?.get(key.as_ref())
    }

    pub fn contains_key<Q: AsRef<[u8]> + ?Sized>(&self, key: &Q) -> bool {
        self.get_pair(key).is_some()
    }

    /// Removes `key`, returning the removed pair and the new trie.
    ///
    /// If the key is absent the returned trie is the receiver itself, sharing
    /// its root (see [`Trie::ptr_eq`]).
    pub fn remove<Q: AsRef<[u8]> + ?Sized>(&self, key: &Q) -> (Option<Pair<K, V>>, Self) {
        let key = key.as_ref();
        let Some(root) = &self.root else {
            return (None, self.clone());
        };
        match root.remove(key, Nibbles::new(key)) {
            Some((removed, rest)) => (Some(removed), Self::from_root(rest)),
            None => (None, self.clone()),
        }
    }

    /// Removes every key starting with `prefix`.
    ///
    /// Returns the new trie and whether anything was removed. If nothing
    /// matched the returned trie is the receiver itself.
    pub fn remove_prefix<Q: AsRef<[u8]> + ?Sized>(&self, prefix: &Q) -> (Self, bool) {
        let prefix = prefix.as_ref();
        let Some(root) = &self.root else {
            return (self.clone(), false);
        };
        let (res, removed) = match root.remove_prefix(prefix, Nibbles::new(prefix)) {
            Some(rest) => (Self::from_root(rest), true),
            None => (self.clone(), false),
        };
        tracing::debug!(prefix_len = prefix.len(), removed, "remove_prefix");
        (res, removed)
    }

    /// The trie without its smallest pair.
    pub fn rest(&self) -> Self {
        Self::from_root(self.root.as_ref().and_then(|root| root.promote()))
    }

    /// Splits off the smallest pair, returning it together with the rest.
    pub fn split(&self) -> Option<(Pair<K, V>, Self)> {
        let root = self.root.as_ref()?;
        Some((root.head.clone(), Self::from_root(root.promote())))
    }

    /// Checks the structural invariants of the trie.
    pub fn validate(&self) -> Result<(), InvariantError> {
        match &self.root {
            Some(root) => validate::validate(root),
            None => Ok(()),
        }
    }

    /// Histogram of nodes by number of populated buckets: entry `i` counts
    /// the nodes with exactly `i` children.
    #[cfg(debug_assertions)]
    pub fn debug_bucket_fill(&self) -> [u64; 17] {
        let mut fill = [0u64; 17];
        if let Some(root) = &self.root {
            let mut stack = vec![root];
            while let Some(node) = stack.pop() {
                let children = node.buckets.iter().filter_map(|b| b.as_ref());
                let before = stack.len();
                stack.extend(children);
                fill[stack.len() - before] += 1;
            }
        }
        fill
    }
}

impl<K: Key, V> FromIterator<(K, V)> for Trie<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::build(iter)
    }
}

impl<'a, K, V> IntoIterator for &'a Trie<K, V> {
    type Item = Pair<K, V>;
    type IntoIter = Iter<Cursor<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Trie<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for pair in self {
            map.entry(pair.key(), pair.value());
        }
        map.finish()
    }
}

impl<K: Key, V: PartialEq> PartialEq for Trie<K, V> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let mut l = self.iter();
        let mut r = other.iter();
        loop {
            match (l.next(), r.next()) {
                (None, None) => return true,
                (Some(a), Some(b))
                    if key::equal_to(a.bytes(), b.bytes()) && a.value() == b.value() => {}
                _ => return false,
            }
        }
    }
}

impl<K: Key, V: Eq> Eq for Trie<K, V> {}
