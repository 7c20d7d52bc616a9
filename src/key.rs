//! Byte-lexicographic ordering of keys.
//!
//! Any type exposing its bytes through [`AsRef<[u8]>`] can be used as a key.
//! Keys are compared by their raw bytes, so a `String` and a `&str` with the
//! same content compare equal, and `"a" < "ab" < "b"`.

use std::cmp::Ordering;

/// Types usable as trie keys.
///
/// This is a blanket marker over [`AsRef<[u8]>`]; text-like and byte-like
/// values implement it automatically.
pub trait Key: AsRef<[u8]> {}

impl<T: AsRef<[u8]> + ?Sized> Key for T {}

/// Compares two keys by their byte representation.
#[inline]
pub fn compare<L, R>(l: &L, r: &R) -> Ordering
where
    L: AsRef<[u8]> + ?Sized,
    R: AsRef<[u8]> + ?Sized,
{
    l.as_ref().cmp(r.as_ref())
}

/// Returns whether the two keys have identical bytes.
#[inline]
pub fn equal_to<L, R>(l: &L, r: &R) -> bool
where
    L: AsRef<[u8]> + ?Sized,
    R: AsRef<[u8]> + ?Sized,
{
    compare(l, r) == Ordering::Equal
}

/// Returns whether `l` sorts strictly before `r`.
#[inline]
pub fn less_than<L, R>(l: &L, r: &R) -> bool
where
    L: AsRef<[u8]> + ?Sized,
    R: AsRef<[u8]> + ?Sized,
{
    compare(l, r) == Ordering::Less
}

/// Returns whether `l` sorts strictly after `r`.
#[inline]
pub fn greater_than<L, R>(l: &L, r: &R) -> bool
where
    L: AsRef<[u8]> + ?Sized,
    R: AsRef<[u8]> + ?Sized,
{
    compare(l, r) == Ordering::Greater
}

/// Returns whether the bytes of `key` start with the bytes of `prefix`.
#[inline]
pub fn has_prefix<K, P>(key: &K, prefix: &P) -> bool
where
    K: AsRef<[u8]> + ?Sized,
    P: AsRef<[u8]> + ?Sized,
{
    key.as_ref().starts_with(prefix.as_ref())
}
