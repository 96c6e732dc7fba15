//! UTF-8 encoding with composing-character awareness.

use quill_garray::{GrowArray, GrowError};

use super::{is_composing_char, CharEncoding};

/// UTF-8. Composing characters are identified by [`is_composing_char`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Utf8;

/// Sequence length announced by a leading byte.
///
/// - `0xC2..=0xDF`: 2 bytes
/// - `0xE0..=0xEF`: 3 bytes
/// - `0xF0..=0xF4`: 4 bytes
/// - Everything else (ASCII, continuation, `0xC0`/`0xC1`, `0xF5..`): 1 byte
#[inline]
fn lead_width(byte: u8) -> usize {
    match byte {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decode the well-formed sequence at `offset`, if there is one.
///
/// Returns the character and its byte length. Truncated sequences,
/// overlong forms, surrogates and stray continuation bytes yield `None`.
fn decode_valid(bytes: &[u8], offset: usize) -> Option<(char, usize)> {
    let lead = *bytes.get(offset)?;
    if lead < 0x80 {
        return Some((char::from(lead), 1));
    }
    let width = lead_width(lead);
    let seq = bytes.get(offset..offset + width)?;
    let s = std::str::from_utf8(seq).ok()?;
    s.chars().next().map(|c| (c, width))
}

impl Utf8 {
    /// First byte of the scalar containing `offset`, ignoring composing.
    fn scalar_start(bytes: &[u8], base: usize, offset: usize) -> usize {
        let floor = base.max(offset.saturating_sub(3));
        let mut lead = offset;
        while lead > floor && is_continuation(bytes[lead]) {
            lead -= 1;
        }
        // A lead byte only owns `offset` if its sequence is valid and long
        // enough to reach it; otherwise `offset` is a lone invalid byte.
        match decode_valid(bytes, lead) {
            Some((_, len)) if lead + len > offset => lead,
            _ => offset,
        }
    }
}

impl CharEncoding for Utf8 {
    #[inline]
    fn is_multibyte(&self) -> bool {
        true
    }

    fn char_len(&self, bytes: &[u8], offset: usize) -> usize {
        if offset >= bytes.len() {
            return 0;
        }
        decode_valid(bytes, offset).map_or(1, |(_, len)| len)
    }

    fn is_composing(&self, bytes: &[u8], offset: usize) -> bool {
        decode_valid(bytes, offset).is_some_and(|(c, _)| is_composing_char(u32::from(c)))
    }

    fn decode(&self, bytes: &[u8], offset: usize) -> u32 {
        match decode_valid(bytes, offset) {
            Some((c, _)) => u32::from(c),
            None => bytes.get(offset).copied().map_or(0, u32::from),
        }
    }

    /// Backs up to the base character, so composing characters are part of
    /// the character they follow. This mirrors [`cluster_len`] going forward.
    ///
    /// [`cluster_len`]: CharEncoding::cluster_len
    fn head_offset(&self, bytes: &[u8], base: usize, offset: usize) -> usize {
        if offset >= bytes.len() || offset <= base {
            return 0;
        }
        let mut head = Self::scalar_start(bytes, base, offset);
        while head > base && self.is_composing(bytes, head) {
            head = Self::scalar_start(bytes, base, head - 1);
        }
        offset - head
    }

    fn encoded_len(&self, c: u32) -> usize {
        char::from_u32(c).map_or(char::REPLACEMENT_CHARACTER.len_utf8(), char::len_utf8)
    }

    /// Values that are not Unicode scalars are written as U+FFFD.
    fn encode(&self, c: u32, out: &mut GrowArray<u8>) -> Result<usize, GrowError> {
        let ch = char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER);
        let mut buf = [0u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        out.concat(encoded.as_bytes())?;
        Ok(encoded.len())
    }
}
