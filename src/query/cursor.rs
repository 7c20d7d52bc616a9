//! Ordered traversal of a trie as a chain of frames.
//!
//! Traversal state is an explicit, reference-counted list of frames instead of
//! the call stack: each frame names a node, the bucket where scanning of that
//! node resumes, and the frame to continue with once the node is exhausted.
//! Frames are never modified, so a continuation shares the whole chain above
//! the frames it had to replace.
//!
//! The frame on top of a cursor always holds the next pair to emit as its
//! node's head. For ascending cursors the node's buckets from `bucket` upwards
//! are still pending. For descending cursors the top node's buckets have all
//! been visited, and a parent frame's buckets below `bucket` are still pending
//! ahead of its own head.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::key;
use crate::nibble::{Nibbles, SIZE};
use crate::trie::node::Node;
use crate::trie::Pair;

use super::{Order, Query};

struct Frame<K, V> {
    node: Arc<Node<K, V>>,
    bucket: usize,
    parent: Option<Arc<Frame<K, V>>>,
}

impl<K, V> Frame<K, V> {
    fn new(node: Arc<Node<K, V>>, bucket: usize, parent: Option<Arc<Frame<K, V>>>) -> Arc<Self> {
        Arc::new(Self {
            node,
            bucket,
            parent,
        })
    }
}

/// A position in an ordered traversal of a trie.
pub struct Cursor<K, V> {
    order: Order,
    frame: Option<Arc<Frame<K, V>>>,
}

impl<K, V> Clone for Cursor<K, V> {
    fn clone(&self) -> Self {
        Self {
            order: self.order,
            frame: self.frame.clone(),
        }
    }
}

impl<K, V> Cursor<K, V> {
    pub(crate) fn all(root: Option<&Arc<Node<K, V>>>, order: Order) -> Self {
        let frame = root.map(|root| match order {
            Order::Ascending => Frame::new(Arc::clone(root), 0, None),
            Order::Descending => settle(Frame::new(Arc::clone(root), SIZE, None)),
        });
        Self { order, frame }
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn is_exhausted(&self) -> bool {
        self.frame.is_none()
    }
}

impl<K: AsRef<[u8]>, V> Cursor<K, V> {
    pub(crate) fn seek(root: Option<&Arc<Node<K, V>>>, order: Order, key: &[u8]) -> Self {
        tracing::trace!(?order, key_len = key.len(), "seek");
        let frame = root.and_then(|root| match order {
            Order::Ascending => seek_ascending(root, key),
            Order::Descending => seek_descending(root, key),
        });
        Self { order, frame }
    }
}

impl<K, V> Query for Cursor<K, V> {
    type Key = K;
    type Value = V;

    fn next(&self) -> Option<(Pair<K, V>, Self)> {
        let frame = self.frame.as_ref()?;
        let rest = match self.order {
            Order::Ascending => advance(frame),
            Order::Descending => frame.parent.clone().map(settle),
        };
        Some((
            frame.node.head.clone(),
            Self {
                order: self.order,
                frame: rest,
            },
        ))
    }
}

/// Ascending successor of `frame`, whose head has already been emitted: the
/// first populated bucket from `frame.bucket` on, or the parent's next bucket
/// once this node is exhausted.
fn advance<K, V>(frame: &Arc<Frame<K, V>>) -> Option<Arc<Frame<K, V>>> {
    let mut frame = Arc::clone(frame);
    loop {
        let next = frame
            .node
            .child_from(frame.bucket)
            .map(|(idx, child)| (idx, Arc::clone(child)));
        if let Some((idx, child)) = next {
            let parent = if idx + 1 < SIZE {
                Some(Frame::new(Arc::clone(&frame.node), idx + 1, frame.parent.clone()))
            } else {
                frame.parent.clone()
            };
            return Some(Frame::new(child, 0, parent));
        }
        frame = frame.parent.clone()?;
    }
}

/// Descends through the highest pending buckets until reaching a node with
/// nothing left below its head; that head is the next descending pair.
fn settle<K, V>(frame: Arc<Frame<K, V>>) -> Arc<Frame<K, V>> {
    let mut frame = frame;
    loop {
        let next = frame
            .node
            .child_below(frame.bucket)
            .map(|(idx, child)| (idx, Arc::clone(child)));
        let Some((idx, child)) = next else {
            return frame;
        };
        let resume = Frame::new(Arc::clone(&frame.node), idx, frame.parent.clone());
        frame = Frame::new(child, SIZE, Some(resume));
    }
}

/// Positions an ascending traversal on the first pair `>= key`.
fn seek_ascending<K: AsRef<[u8]>, V>(root: &Arc<Node<K, V>>, key: &[u8]) -> Option<Arc<Frame<K, V>>> {
    let mut node = Arc::clone(root);
    let mut parent = None;
    let mut nibbles = Nibbles::new(key);
    loop {
        // The head is the minimum of its subtree, so everything here qualifies.
        if key::compare(key, node.head.bytes()) != Ordering::Greater {
            return Some(Frame::new(node, 0, parent));
        }
        let Some((idx, rest)) = nibbles.consume() else {
            return advance(&Frame::new(node, 0, parent));
        };
        let idx = idx as usize;
        let child = node.buckets[idx].clone();
        // Buckets below `idx` only hold smaller keys, those above only larger.
        let resume = Frame::new(node, idx + 1, parent);
        match child {
            Some(child) => {
                node = child;
                parent = Some(resume);
                nibbles = rest;
            }
            None => return advance(&resume),
        }
    }
}

/// Positions a descending traversal on the last pair `<= key`.
fn seek_descending<K: AsRef<[u8]>, V>(root: &Arc<Node<K, V>>, key: &[u8]) -> Option<Arc<Frame<K, V>>> {
    let mut node = Arc::clone(root);
    let mut parent: Option<Arc<Frame<K, V>>> = None;
    let mut nibbles = Nibbles::new(key);
    loop {
        match key::compare(key, node.head.bytes()) {
            Ordering::Less => return parent.map(settle),
            Ordering::Equal => return Some(Frame::new(node, 0, parent)),
            Ordering::Greater => {}
        }
        let Some((idx, rest)) = nibbles.consume() else {
            return Some(Frame::new(node, 0, parent));
        };
        let idx = idx as usize;
        let child = node.buckets[idx].clone();
        let resume = Frame::new(node, idx, parent);
        match child {
            Some(child) => {
                node = child;
                parent = Some(resume);
                nibbles = rest;
            }
            None => return Some(settle(resume)),
        }
    }
}
