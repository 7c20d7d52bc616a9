use std::collections::HashMap;

use nibble_trie::{Query, Trie};

fn words() -> HashMap<&'static str, i32> {
    HashMap::from([
        ("hello", 1),
        ("there", 2),
        ("how", 9),
        ("are", 5),
        ("you", 37),
        ("today", 4),
        ("curious", 128),
        ("to", 64),
        ("hear", 32),
        ("a", 16),
        ("bit", 1024),
    ])
}

#[test]
fn eleven_words() {
    let trie = Trie::build(words());
    assert_eq!(trie.count(), 11);
    assert_eq!(trie.first().map(|p| *p.key()), Some("a"));

    let mut ascending = vec![];
    trie.select().ascending().all().for_each(|k, _| ascending.push(*k));
    assert_eq!(
        ascending,
        ["a", "are", "bit", "curious", "hear", "hello", "how", "there", "to", "today", "you"]
    );

    let updated = trie.put("today", 32);
    assert_eq!(updated.get("today"), Some(&32));
    assert_eq!(trie.get("today"), Some(&4));

    let (without_h, removed) = trie.remove_prefix("h");
    assert!(removed);
    assert_eq!(without_h.count(), 8);
    assert_eq!(trie.count(), 11);

    let (without_to, removed) = trie.remove_prefix("to");
    assert!(removed);
    assert!(!without_to.contains_key("to"));
    assert!(!without_to.contains_key("today"));
    assert!(without_to.contains_key("there"));
}

#[test]
fn build_is_independent_of_order() {
    let mut pairs: Vec<_> = words().into_iter().collect();
    let forward = Trie::build(pairs.clone());
    pairs.reverse();
    let backward = Trie::build(pairs);
    assert_eq!(forward, backward);
}
