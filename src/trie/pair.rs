use std::fmt;
use std::sync::Arc;

/// An immutable key/value pair.
///
/// Pairs are reference counted: cloning one, moving it between nodes during
/// promotion or demotion, or handing it out from a query never copies the key
/// or the value.
pub struct Pair<K, V> {
    inner: Arc<(K, V)>,
}

impl<K, V> Pair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self {
            inner: Arc::new((key, value)),
        }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.inner.0
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.inner.1
    }

    #[inline]
    pub(crate) fn bytes(&self) -> &[u8]
    where
        K: AsRef<[u8]>,
    {
        self.inner.0.as_ref()
    }
}

impl<K, V> Clone for Pair<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Pair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pair")
            .field(self.key())
            .field(self.value())
            .finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Pair<K, V> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl<K: Eq, V: Eq> Eq for Pair<K, V> {}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
