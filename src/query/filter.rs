use std::sync::Arc;

use crate::trie::Pair;

use super::Query;

/// Skips the pairs of the wrapped query that fail the predicate.
pub struct Where<Q, F> {
    query: Q,
    predicate: Arc<F>,
}

impl<Q, F> Where<Q, F> {
    pub(crate) fn new(query: Q, predicate: F) -> Self {
        Self {
            query,
            predicate: Arc::new(predicate),
        }
    }
}

impl<Q: Clone, F> Clone for Where<Q, F> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<Q, F> Query for Where<Q, F>
where
    Q: Query,
    F: Fn(&Q::Key, &Q::Value) -> bool,
{
    type Key = Q::Key;
    type Value = Q::Value;

    fn next(&self) -> Option<(Pair<Q::Key, Q::Value>, Self)> {
        let mut step = self.query.next();
        while let Some((pair, rest)) = step {
            if (self.predicate)(pair.key(), pair.value()) {
                return Some((
                    pair,
                    Self {
                        query: rest,
                        predicate: Arc::clone(&self.predicate),
                    },
                ));
            }
            step = rest.next();
        }
        None
    }
}

/// Ends the wrapped query at the first pair failing the predicate.
pub struct While<Q, F> {
    query: Q,
    predicate: Arc<F>,
}

impl<Q, F> While<Q, F> {
    pub(crate) fn new(query: Q, predicate: F) -> Self {
        Self {
            query,
            predicate: Arc::new(predicate),
        }
    }
}

impl<Q: Clone, F> Clone for While<Q, F> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<Q, F> Query for While<Q, F>
where
    Q: Query,
    F: Fn(&Q::Key, &Q::Value) -> bool,
{
    type Key = Q::Key;
    type Value = Q::Value;

    fn next(&self) -> Option<(Pair<Q::Key, Q::Value>, Self)> {
        let (pair, rest) = self.query.next()?;
        if !(self.predicate)(pair.key(), pair.value()) {
            return None;
        }
        Some((
            pair,
            Self {
                query: rest,
                predicate: Arc::clone(&self.predicate),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Trie;
    use std::cell::Cell;

    fn numbers() -> Trie<[u8; 1], u8> {
        (0u8..20).map(|i| ([i], i)).collect()
    }

    #[test]
    fn where_scans_past_rejected_pairs() {
        let q = numbers().select().all().filter(|_, v| v % 7 == 0);
        let values: Vec<u8> = q.iter().map(|p| *p.value()).collect();
        assert_eq!(values, [0, 7, 14]);
    }

    #[test]
    fn where_without_matches_is_empty() {
        let q = numbers().select().all().filter(|_, v| *v > 100);
        assert!(q.next().is_none());
    }

    #[test]
    fn while_stops_without_looking_ahead() {
        let seen = Cell::new(0);
        let q = numbers().select().all().take_while(|_, v| {
            seen.set(seen.get() + 1);
            *v < 3
        });
        assert_eq!(q.iter().count(), 3);
        // Three accepted pairs plus the one that ended the scan.
        assert_eq!(seen.get(), 4);
    }

    #[test]
    fn clones_share_the_predicate() {
        let q = numbers().select().descending().all().filter(|_, v| v % 2 == 1);
        let copy = q.clone();
        assert!(Arc::ptr_eq(&q.predicate, &copy.predicate));
        assert_eq!(q.iter().count(), 10);
        assert_eq!(copy.iter().next().map(|p| *p.value()), Some(19));
    }
}
