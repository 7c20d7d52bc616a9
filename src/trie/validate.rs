use std::fmt;

use crate::key;
use crate::nibble::Nibbles;

use super::node::Node;

/// A structural invariant that does not hold for a trie.
///
/// These can only be produced by a defect in the trie implementation; a trie
/// built exclusively through the public API always validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// A node's head is larger than the head of one of its children.
    HeadNotMinimal { key: Vec<u8>, depth: usize },
    /// A key is stored in a bucket that does not match its nibble at that depth.
    MisplacedKey { key: Vec<u8>, depth: usize },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::HeadNotMinimal { key, depth } => {
                write!(f, "head {key:?} at nibble depth {depth} is not minimal")
            }
            InvariantError::MisplacedKey { key, depth } => {
                write!(f, "key {key:?} misplaced at nibble depth {depth}")
            }
        }
    }
}

impl std::error::Error for InvariantError {}

pub(crate) fn validate<K: AsRef<[u8]>, V>(root: &Node<K, V>) -> Result<(), InvariantError> {
    let mut stack: Vec<(&Node<K, V>, Vec<u8>)> = vec![(root, Vec::new())];
    while let Some((node, path)) = stack.pop() {
        let head = node.head.bytes();
        if !follows(head, &path) {
            return Err(InvariantError::MisplacedKey {
                key: head.to_vec(),
                depth: path.len(),
            });
        }
        for (idx, child) in node.buckets.iter().enumerate() {
            let Some(child) = child else { continue };
            if key::less_than(child.head.bytes(), head) {
                return Err(InvariantError::HeadNotMinimal {
                    key: head.to_vec(),
                    depth: path.len(),
                });
            }
            let mut child_path = path.clone();
            child_path.push(idx as u8);
            stack.push((child, child_path));
        }
    }
    Ok(())
}

/// Whether the nibbles of `key` start with `path`.
fn follows(key: &[u8], path: &[u8]) -> bool {
    let mut nibbles = Nibbles::new(key);
    for &expected in path {
        match nibbles.consume() {
            Some((nibble, rest)) if nibble == expected => nibbles = rest,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::pair::Pair;
    use std::sync::Arc;

    #[test]
    fn detects_misplaced_key() {
        let mut root = (*Node::singleton(Pair::new("a", 0))).clone();
        // 'b' = 0x62 belongs in bucket 6, not 7.
        root.buckets[7] = Some(Node::singleton(Pair::new("b", 1)));
        let err = validate(&root).unwrap_err();
        assert_eq!(
            err,
            InvariantError::MisplacedKey {
                key: b"b".to_vec(),
                depth: 1
            }
        );
    }

    #[test]
    fn detects_non_minimal_head() {
        let mut root = (*Node::singleton(Pair::new("q", 0))).clone();
        root.buckets[6] = Some(Node::singleton(Pair::new("b", 1)));
        assert!(matches!(
            validate(&root),
            Err(InvariantError::HeadNotMinimal { .. })
        ));
    }

    #[test]
    fn accepts_well_formed_node() {
        let mut root = (*Node::singleton(Pair::new("a", 0))).clone();
        root.buckets[6] = Some(Node::singleton(Pair::new("b", 1)));
        let root = Arc::new(root);
        assert!(validate(&root).is_ok());
        assert_eq!(
            InvariantError::HeadNotMinimal {
                key: vec![1],
                depth: 2
            }
            .to_string(),
            "head [1] at nibble depth 2 is not minimal"
        );
    }
}
