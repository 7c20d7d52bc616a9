#![doc = include_str!("../README.md")]

pub mod key;
pub mod nibble;
pub mod query;
pub mod trie;

#[cfg(feature = "proptest")]
pub mod strategy;

#[cfg(kani)]
#[path = "../proofs/mod.rs"]
mod proofs;

pub use key::Key;
pub use query::{Cursor, Direction, Iter, Order, Query, Select, Where, While};
pub use trie::{InvariantError, Pair, Trie};
