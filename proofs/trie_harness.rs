#![cfg(kani)]

use super::util;
use crate::{Query, Trie};

const KEY_LEN: usize = 2;

#[kani::proof]
#[kani::unwind(8)]
fn put_then_get_returns_value() {
    let first = util::bounded_key::<KEY_LEN>();
    let second = util::bounded_key::<KEY_LEN>();
    let trie = Trie::new().put(first.clone(), 1u8).put(second.clone(), 2u8);

    assert_eq!(trie.get(&second), Some(&2));
    if first != second {
        assert_eq!(trie.get(&first), Some(&1));
        assert_eq!(trie.count(), 2);
    } else {
        assert_eq!(trie.count(), 1);
    }
    assert!(trie.validate().is_ok());
}

#[kani::proof]
#[kani::unwind(8)]
fn head_is_minimum() {
    let a = util::bounded_key::<KEY_LEN>();
    let b = util::bounded_key::<KEY_LEN>();
    let c = util::bounded_key::<KEY_LEN>();
    let trie = Trie::build([(a.clone(), ()), (b.clone(), ()), (c.clone(), ())]);
    let first = trie.first().expect("non-empty");
    let min = a.clone().min(b).min(c);
    assert_eq!(*first.key(), min);
}

#[kani::proof]
#[kani::unwind(8)]
fn remove_leaves_original_untouched() {
    let a = util::bounded_key::<KEY_LEN>();
    let b = util::bounded_key::<KEY_LEN>();
    let trie = Trie::build([(a.clone(), 0u8), (b.clone(), 1u8)]);
    let (removed, rest) = trie.remove(&a);

    assert!(removed.is_some());
    assert!(rest.get(&a).is_none());
    assert!(trie.get(&a).is_some());
    assert!(rest.validate().is_ok());
}

#[kani::proof]
#[kani::unwind(8)]
fn descending_from_is_bounded_by_key() {
    let a = util::bounded_key::<KEY_LEN>();
    let b = util::bounded_key::<KEY_LEN>();
    let probe = util::bounded_key::<KEY_LEN>();
    let trie = Trie::build([(a, ()), (b, ())]);
    if let Some((pair, _)) = trie.select().descending().from(&probe).next() {
        assert!(*pair.key() <= probe);
    }
}
