use std::collections::BTreeMap;

use nibble_trie::{Query, Trie};
use rand::{thread_rng, Rng};

#[test]
fn descending_from_present_key() {
    let trie: Trie<String, usize> = (0..500).map(|i| (format!("{i:03}"), i)).collect();
    let values: Vec<usize> = trie
        .select()
        .descending()
        .from("250")
        .iter()
        .map(|p| *p.value())
        .collect();
    assert_eq!(values, (0..=250).rev().collect::<Vec<_>>());
}

#[test]
fn descending_from_absent_key() {
    let trie: Trie<String, usize> = (0..500).map(|i| (format!("{i:03}"), i)).collect();
    let first = trie.select().descending().from("25").next().map(|(p, _)| *p.value());
    assert_eq!(first, Some(249));
    let first = trie.select().descending().from("2500").next().map(|(p, _)| *p.value());
    assert_eq!(first, Some(250));
    assert!(trie.select().descending().from("").next().is_none());
}

#[test]
fn random_seeks_match_btree() {
    let mut rng = thread_rng();
    let mut reference = BTreeMap::new();
    let mut trie = Trie::new();
    for _ in 0..2_000 {
        let len = rng.gen_range(0..5);
        let key: Vec<u8> = (0..len).map(|_| rng.gen_range(0..4) * 0x41).collect();
        let value: u16 = rng.gen();
        reference.insert(key.clone(), value);
        trie = trie.put(key, value);
    }

    for _ in 0..200 {
        let len = rng.gen_range(0..6);
        let probe: Vec<u8> = (0..len).map(|_| rng.gen_range(0..4) * 0x41).collect();

        let asc: Vec<_> = trie
            .select()
            .ascending()
            .from(&probe)
            .iter()
            .map(|p| (p.key().clone(), *p.value()))
            .collect();
        let expected: Vec<_> = reference
            .range(probe.clone()..)
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        assert_eq!(asc, expected);

        let desc: Vec<_> = trie
            .select()
            .descending()
            .from(&probe)
            .iter()
            .map(|p| (p.key().clone(), *p.value()))
            .collect();
        let expected: Vec<_> = reference
            .range(..=probe.clone())
            .rev()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        assert_eq!(desc, expected);
    }
}
