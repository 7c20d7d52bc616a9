#![cfg(kani)]

/// A key of up to `N` bytes.
///
/// Bytes are restricted to two nibble values per half so that distinct keys
/// collide on shared prefixes often while the state space stays small.
pub fn bounded_key<const N: usize>() -> Vec<u8> {
    let raw: [u8; N] = kani::any();
    let len: usize = kani::any();
    kani::assume(len <= N);
    raw[..len].iter().map(|byte| byte & 0x11).collect()
}
