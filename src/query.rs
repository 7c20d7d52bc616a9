//! Lazy, immutable queries over a trie.
//!
//! A query is a value describing "the remaining pairs". Pulling the next pair
//! with [`Query::next`] does not modify the query; it returns the pair along
//! with a new query for what comes after it. The same query can be replayed
//! any number of times, handed to another thread, or parked indefinitely.
//!
//! ```
//! use nibble_trie::{Query, Trie};
//!
//! let trie = Trie::build([("apple", 1), ("banana", 2), ("cherry", 3)]);
//! let mut keys = vec![];
//! trie.select()
//!     .descending()
//!     .from("blueberry")
//!     .for_each(|k, _| keys.push(*k));
//! assert_eq!(keys, ["banana", "apple"]);
//! ```
pub mod cursor;
pub mod filter;

use std::iter::FusedIterator;
use std::sync::Arc;

use crate::trie::node::Node;
use crate::trie::Pair;

pub use cursor::Cursor;
pub use filter::{Where, While};

/// Traversal order of a query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// A lazy, pull-based sequence of pairs.
pub trait Query: Clone {
    type Key;
    type Value;

    /// Returns the next pair and the query producing the pairs after it, or
    /// `None` if the query is exhausted.
    fn next(&self) -> Option<(Pair<Self::Key, Self::Value>, Self)>;

    /// Calls `visitor` for every remaining pair, in order.
    fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&Self::Key, &Self::Value),
    {
        let mut step = self.next();
        while let Some((pair, rest)) = step {
            visitor(pair.key(), pair.value());
            step = rest.next();
        }
    }

    /// Keeps only the pairs matching `predicate`.
    ///
    /// Non-matching pairs are skipped; the scan continues to the end of the
    /// underlying query.
    fn filter<F>(self, predicate: F) -> Where<Self, F>
    where
        F: Fn(&Self::Key, &Self::Value) -> bool,
    {
        Where::new(self, predicate)
    }

    /// Yields pairs while `predicate` holds and stops at the first pair for
    /// which it does not, without looking any further.
    fn take_while<F>(self, predicate: F) -> While<Self, F>
    where
        F: Fn(&Self::Key, &Self::Value) -> bool,
    {
        While::new(self, predicate)
    }

    /// Adapts the query into a standard iterator.
    fn iter(&self) -> Iter<Self> {
        Iter {
            query: Some(self.clone()),
        }
    }
}

/// The first step of a query: picks the traversal order.
///
/// [`Direction::all`] and [`Direction::from`] are shorthands for ascending
/// traversal.
pub struct Direction<K, V> {
    root: Option<Arc<Node<K, V>>>,
}

impl<K, V> Direction<K, V> {
    pub(crate) fn new(root: Option<Arc<Node<K, V>>>) -> Self {
        Self { root }
    }

    pub fn ascending(self) -> Select<K, V> {
        Select {
            root: self.root,
            order: Order::Ascending,
        }
    }

    pub fn descending(self) -> Select<K, V> {
        Select {
            root: self.root,
            order: Order::Descending,
        }
    }

    pub fn all(self) -> Cursor<K, V> {
        self.ascending().all()
    }

    pub fn from<Q: AsRef<[u8]> + ?Sized>(self, key: &Q) -> Cursor<K, V>
    where
        K: AsRef<[u8]>,
    {
        self.ascending().from(key)
    }
}

/// The second step of a query: picks where traversal starts.
pub struct Select<K, V> {
    root: Option<Arc<Node<K, V>>>,
    order: Order,
}

impl<K, V> Select<K, V> {
    pub fn order(&self) -> Order {
        self.order
    }

    /// Every pair of the trie.
    pub fn all(self) -> Cursor<K, V> {
        Cursor::all(self.root.as_ref(), self.order)
    }

    /// Starts at `key` if present. Otherwise starts at the nearest key after
    /// it in traversal order: the next greater key when ascending, the next
    /// smaller key when descending.
    pub fn from<Q: AsRef<[u8]> + ?Sized>(self, key: &Q) -> Cursor<K, V>
    where
        K: AsRef<[u8]>,
    {
        Cursor::seek(self.root.as_ref(), self.order, key.as_ref())
    }
}

/// A standard [`Iterator`] driving a [`Query`].
pub struct Iter<Q> {
    query: Option<Q>,
}

impl<Q: Query> Iterator for Iter<Q> {
    type Item = Pair<Q::Key, Q::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let (pair, rest) = self.query.take()?.next()?;
        self.query = Some(rest);
        Some(pair)
    }
}

impl<Q: Query> FusedIterator for Iter<Q> {}
