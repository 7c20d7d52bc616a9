//! Decomposition of keys into 4-bit nibbles.
//!
//! A [`Nibbles`] cursor walks a key's bytes left to right, yielding the high
//! nibble of each byte before its low nibble. Cursors are `Copy`; consuming
//! returns a fresh cursor for the remainder and leaves the original intact, so
//! callers can keep a cursor for a given depth around while exploring deeper.

/// Number of distinct nibble values, and thus the number of buckets per node.
pub const SIZE: usize = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    High,
    Low,
    Exhausted,
}

/// A cursor producing the nibbles of a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Nibbles<'a> {
    data: &'a [u8],
    off: usize,
    phase: Phase,
}

impl<'a> Nibbles<'a> {
    /// Creates a cursor positioned before the first nibble of `key`.
    /// An empty key yields an exhausted cursor.
    pub fn new<K: AsRef<[u8]> + ?Sized>(key: &'a K) -> Self {
        Self::at(key.as_ref(), 0, Phase::High)
    }

    fn at(data: &'a [u8], off: usize, phase: Phase) -> Self {
        let phase = if off < data.len() {
            phase
        } else {
            Phase::Exhausted
        };
        Self { data, off, phase }
    }

    /// The byte position of the next nibble. Stays on a byte between its high
    /// and low nibble and advances once the low nibble has been consumed.
    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.off
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.phase == Phase::Exhausted
    }

    /// Returns the next nibble together with the cursor for the remainder, or
    /// `None` if the key has been fully consumed. Consuming an exhausted cursor
    /// keeps returning `None`.
    #[inline]
    pub fn consume(self) -> Option<(u8, Nibbles<'a>)> {
        match self.phase {
            Phase::High => {
                let nibble = self.data[self.off] >> 4;
                Some((
                    nibble,
                    Nibbles {
                        phase: Phase::Low,
                        ..self
                    },
                ))
            }
            Phase::Low => {
                let nibble = self.data[self.off] & 0x0F;
                Some((nibble, Self::at(self.data, self.off + 1, Phase::High)))
            }
            Phase::Exhausted => None,
        }
    }

    /// Derives a cursor over `other` anchored at this cursor's position,
    /// i.e. at the same byte offset and on the same half of that byte.
    ///
    /// Used when an entry already stored at some depth has to be classified
    /// into a bucket at that depth. If `other` is too short to have a nibble
    /// at this position the derived cursor is exhausted.
    pub fn branch<'b, K: AsRef<[u8]> + ?Sized>(&self, other: &'b K) -> Nibbles<'b> {
        let phase = match self.phase {
            Phase::Low => Phase::Low,
            Phase::High | Phase::Exhausted => Phase::High,
        };
        Nibbles::at(other.as_ref(), self.off, phase)
    }
}
