mod nibble_harness;
mod trie_harness;
mod util;
