#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

// === Latin1 ===

#[test]
fn latin1_is_one_byte_per_char() {
    let text = b"a\xe9\xff";
    assert!(!Latin1.is_multibyte());
    assert_eq!(Latin1.char_len(text, 0), 1);
    assert_eq!(Latin1.char_len(text, 2), 1);
    assert_eq!(Latin1.char_len(text, 3), 0);
    assert_eq!(Latin1.decode(text, 1), 0xE9);
    assert_eq!(Latin1.decode(text, 3), 0);
    assert_eq!(Latin1.head_offset(text, 0, 2), 0);
}

#[test]
fn latin1_encode_replaces_wide_values() {
    let mut out = GrowArray::new();
    assert_eq!(Latin1.encode(0xE9, &mut out).unwrap(), 1);
    assert_eq!(Latin1.encode(0x20AC, &mut out).unwrap(), 1);
    assert_eq!(out.as_slice(), b"\xe9?");
}

// === UTF-8 lengths ===

#[test]
fn utf8_char_lengths() {
    let text = "aé€😀".as_bytes();
    assert_eq!(Utf8.char_len(text, 0), 1);
    assert_eq!(Utf8.char_len(text, 1), 2);
    assert_eq!(Utf8.char_len(text, 3), 3);
    assert_eq!(Utf8.char_len(text, 6), 4);
    assert_eq!(Utf8.char_len(text, 10), 0);
}

#[test]
fn utf8_malformed_sequences_are_one_byte() {
    // Truncated three-byte sequence.
    assert_eq!(Utf8.char_len(&[0xE2, 0x82], 0), 1);
    // Stray continuation byte.
    assert_eq!(Utf8.char_len(&[0x80, b'a'], 0), 1);
    // Overlong encoding of '/'.
    assert_eq!(Utf8.char_len(&[0xC0, 0xAF], 0), 1);
    // UTF-16 surrogate half.
    assert_eq!(Utf8.char_len(&[0xED, 0xA0, 0x80], 0), 1);
    // Lead byte followed by a non-continuation byte.
    assert_eq!(Utf8.char_len(&[0xE2, b'a', b'b'], 0), 1);
}

#[test]
fn utf8_decode() {
    let text = "a€".as_bytes();
    assert_eq!(Utf8.decode(text, 0), u32::from('a'));
    assert_eq!(Utf8.decode(text, 1), 0x20AC);
    // Invalid bytes decode as themselves.
    assert_eq!(Utf8.decode(&[0xFF], 0), 0xFF);
    assert_eq!(Utf8.decode(text, 4), 0);
}

// === Composing ===

#[test]
fn composing_table_boundaries() {
    assert!(!is_composing_char(u32::from('e')));
    assert!(is_composing_char(0x0300));
    assert!(is_composing_char(0x0301));
    assert!(is_composing_char(0x036F));
    assert!(!is_composing_char(0x0370));
    assert!(is_composing_char(0x05BF));
    assert!(!is_composing_char(0x05C0));
    assert!(is_composing_char(0xFE0F));
    assert!(is_composing_char(0xE0100));
    assert!(!is_composing_char(0x1F600));
}

#[test]
fn utf8_composing_detection() {
    let text = "e\u{301}".as_bytes();
    assert!(!Utf8.is_composing(text, 0));
    assert!(Utf8.is_composing(text, 1));
    // Latin1 never composes.
    assert!(!Latin1.is_composing(text, 1));
}

#[test]
fn cluster_len_includes_composing() {
    let text = "e\u{301}\u{308}x".as_bytes();
    assert_eq!(Utf8.char_len(text, 0), 1);
    assert_eq!(Utf8.cluster_len(text, 0), 5);
    assert_eq!(Utf8.cluster_len(text, 5), 1);
    assert_eq!(Utf8.cluster_len(text, 6), 0);
}

// === Head offset ===

#[test]
fn utf8_head_offset_inside_char() {
    let text = "a€b".as_bytes();
    assert_eq!(Utf8.head_offset(text, 0, 0), 0);
    assert_eq!(Utf8.head_offset(text, 0, 1), 0);
    assert_eq!(Utf8.head_offset(text, 0, 2), 1);
    assert_eq!(Utf8.head_offset(text, 0, 3), 2);
    assert_eq!(Utf8.head_offset(text, 0, 4), 0);
}

#[test]
fn utf8_head_offset_backs_over_composing() {
    let text = "xe\u{301}\u{308}".as_bytes();
    // Last byte of U+0308 belongs to the cluster starting at 'e'.
    assert_eq!(Utf8.head_offset(text, 0, 5), 4);
    // A base starting at `base` stops the search.
    assert_eq!(Utf8.head_offset(text, 2, 3), 1);
}

#[test]
fn utf8_head_offset_of_invalid_byte_is_zero() {
    let text = [b'a', 0x80, 0x80];
    assert_eq!(Utf8.head_offset(&text, 0, 1), 0);
    assert_eq!(Utf8.head_offset(&text, 0, 2), 0);
}

// === UTF-8 encode ===

#[test]
fn utf8_encode() {
    let mut out = GrowArray::new();
    assert_eq!(Utf8.encode(0x20AC, &mut out).unwrap(), 3);
    assert_eq!(Utf8.encode(u32::from('a'), &mut out).unwrap(), 1);
    assert_eq!(out.as_slice(), "€a".as_bytes());
    assert_eq!(Utf8.encoded_len(0x1F600), 4);
}

#[test]
fn utf8_encode_non_scalar_as_replacement() {
    let mut out = GrowArray::new();
    assert_eq!(Utf8.encoded_len(0xD800), 3);
    assert_eq!(Utf8.encode(0xD800, &mut out).unwrap(), 3);
    assert_eq!(out.as_slice(), "\u{fffd}".as_bytes());
}

// === Double byte ===

#[test]
fn double_byte_lengths_and_decode() {
    let text = [b'A', 0xB0, 0xA1, b'B'];
    assert!(DoubleByte.is_multibyte());
    assert_eq!(DoubleByte.char_len(&text, 0), 1);
    assert_eq!(DoubleByte.char_len(&text, 1), 2);
    assert_eq!(DoubleByte.char_len(&text, 3), 1);
    assert_eq!(DoubleByte.decode(&text, 1), 0xB0A1);
    assert_eq!(DoubleByte.decode(&text, 3), u32::from(b'B'));
}

#[test]
fn double_byte_lone_lead() {
    assert_eq!(DoubleByte.char_len(&[0xB0], 0), 1);
    assert_eq!(DoubleByte.char_len(&[0xB0, 0x00], 0), 1);
}

#[test]
fn double_byte_head_offset_scans_from_base() {
    let text = [b'A', 0xB0, 0xA1, b'B'];
    assert_eq!(DoubleByte.head_offset(&text, 0, 2), 1);
    // 0xA1 is also a lead byte, but 'B' starts a character.
    assert_eq!(DoubleByte.head_offset(&text, 0, 3), 0);

    // Three lead-range bytes: [B0 B0] [B0].
    let ambiguous = [0xB0, 0xB0, 0xB0];
    assert_eq!(DoubleByte.head_offset(&ambiguous, 0, 1), 1);
    assert_eq!(DoubleByte.head_offset(&ambiguous, 0, 2), 0);
    // Starting one byte later pairs them differently: [B0] [B0 B0].
    assert_eq!(DoubleByte.head_offset(&ambiguous, 1, 2), 1);
}

#[test]
fn double_byte_encode() {
    let mut out = GrowArray::new();
    assert_eq!(DoubleByte.encoded_len(0xB0A1), 2);
    assert_eq!(DoubleByte.encode(0xB0A1, &mut out).unwrap(), 2);
    assert_eq!(DoubleByte.encode(u32::from(b'z'), &mut out).unwrap(), 1);
    assert_eq!(out.as_slice(), &[0xB0, 0xA1, b'z']);
}

#[test]
fn double_byte_encode_replaces_unrepresentable() {
    let mut out = GrowArray::new();
    for c in [0x1B0A1, 0x41A1, 0xB000, 0x20AC] {
        assert_eq!(DoubleByte.encoded_len(c), 1);
        assert_eq!(DoubleByte.encode(c, &mut out).unwrap(), 1);
    }
    assert_eq!(out.as_slice(), b"????");
}

#[test]
fn double_byte_encode_decodes_back() {
    for c in [0x8140, 0xB0A1, 0xFEFE, u32::from(b'a'), 0xFF] {
        let mut out = GrowArray::new();
        let len = DoubleByte.encode(c, &mut out).unwrap();
        assert_eq!(DoubleByte.char_len(out.as_slice(), 0), len);
        assert_eq!(DoubleByte.decode(out.as_slice(), 0), c);
    }
}
