//! Proptest strategies producing tries, for downstream property tests.

use proptest::collection::{vec, SizeRange};
use proptest::strategy::{BoxedStrategy, Strategy};

use crate::key::Key;
use crate::trie::Trie;

/// Tries built from up to `size` pairs drawn from `key` and `value`.
///
/// Duplicate keys keep the value drawn last, so the resulting trie may hold
/// fewer pairs than were drawn.
pub fn trie<K, V>(
    key: impl Strategy<Value = K> + 'static,
    value: impl Strategy<Value = V> + 'static,
    size: impl Into<SizeRange>,
) -> BoxedStrategy<Trie<K, V>>
where
    K: Key + std::fmt::Debug + 'static,
    V: std::fmt::Debug + 'static,
{
    vec((key, value), size).prop_map(Trie::build).boxed()
}

/// Short byte-string keys over a small alphabet, so that generated keys often
/// share prefixes and exercise deep paths.
pub fn clustered_key(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    vec(proptest::sample::select(&b"\x00\x01\x0f\x10ab\xf0\xff"[..]), 0..=max_len)
}
