#![cfg(kani)]

use crate::nibble::Nibbles;

#[kani::proof]
#[kani::unwind(6)]
fn nibbles_reassemble_bytes() {
    let raw: [u8; 2] = kani::any();
    let mut nibbles = Nibbles::new(&raw);
    let mut out = [0u8; 2];
    for byte in out.iter_mut() {
        let (high, rest) = nibbles.consume().expect("high nibble");
        let (low, rest) = rest.consume().expect("low nibble");
        assert!(high < 16 && low < 16);
        *byte = (high << 4) | low;
        nibbles = rest;
    }
    assert!(nibbles.is_exhausted());
    assert_eq!(out, raw);
}

#[kani::proof]
fn branch_preserves_position() {
    let left: [u8; 2] = kani::any();
    let right: [u8; 2] = kani::any();
    let skip_low: bool = kani::any();
    let mut nibbles = Nibbles::new(&left).consume().expect("first nibble").1;
    if skip_low {
        nibbles = nibbles.consume().expect("second nibble").1;
    }
    let branched = nibbles.branch(&right);
    assert_eq!(branched.byte_offset(), nibbles.byte_offset());
    let (expected, _) = nibbles.consume().expect("same length");
    let (actual, _) = branched.consume().expect("same length");
    let shift = if skip_low { 4 } else { 0 };
    assert_eq!(expected, (left[branched.byte_offset()] >> shift) & 0x0F);
    assert_eq!(actual, (right[branched.byte_offset()] >> shift) & 0x0F);
}
