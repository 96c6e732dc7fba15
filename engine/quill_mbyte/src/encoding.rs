//! Encoding contract and the encodings the engine ships.
//!
//! All queries take the whole text slice plus a byte offset rather than a
//! sub-slice, because some answers (composing tests, head offsets for
//! double-byte text) depend on bytes before the offset.

use quill_garray::{GrowArray, GrowError};

mod composing;
mod double_byte;
mod utf8;

pub use composing::is_composing_char;
pub use double_byte::DoubleByte;
pub use utf8::Utf8;

/// Per-character queries supplied by an encoding.
///
/// # Contract
///
/// For any `offset < bytes.len()`, [`char_len`](Self::char_len) and
/// [`cluster_len`](Self::cluster_len) return at least 1 and never run past
/// the end of `bytes`. At or past the end they return 0.
pub trait CharEncoding {
    /// Returns `false` when every character is exactly one byte.
    fn is_multibyte(&self) -> bool;

    /// Byte length of the character at `offset`, excluding any composing
    /// characters that follow it.
    fn char_len(&self, bytes: &[u8], offset: usize) -> usize;

    /// Returns `true` if the character at `offset` combines with the
    /// preceding base character instead of starting a new cell.
    fn is_composing(&self, _bytes: &[u8], _offset: usize) -> bool {
        false
    }

    /// Byte length of the character at `offset` plus all composing
    /// characters that follow it.
    fn cluster_len(&self, bytes: &[u8], offset: usize) -> usize {
        let mut len = self.char_len(bytes, offset);
        if len == 0 {
            return 0;
        }
        while offset + len < bytes.len() && self.is_composing(bytes, offset + len) {
            len += self.char_len(bytes, offset + len);
        }
        len
    }

    /// Scalar value of the character at `offset`.
    ///
    /// Invalid sequences decode as the value of their first byte. Returns 0
    /// at or past the end.
    fn decode(&self, bytes: &[u8], offset: usize) -> u32;

    /// Distance from `offset` back to the first byte of the character that
    /// contains it.
    ///
    /// `base` is an offset known to start a character (usually the start of
    /// the line); the search never goes before it.
    fn head_offset(&self, bytes: &[u8], base: usize, offset: usize) -> usize;

    /// Number of bytes [`encode`](Self::encode) writes for `c`.
    fn encoded_len(&self, c: u32) -> usize;

    /// Append the encoding of `c` to `out`, returning the byte count.
    fn encode(&self, c: u32, out: &mut GrowArray<u8>) -> Result<usize, GrowError>;
}

/// Single-byte encoding: every byte is one character.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Latin1;

impl CharEncoding for Latin1 {
    #[inline]
    fn is_multibyte(&self) -> bool {
        false
    }

    #[inline]
    fn char_len(&self, bytes: &[u8], offset: usize) -> usize {
        usize::from(offset < bytes.len())
    }

    #[inline]
    fn decode(&self, bytes: &[u8], offset: usize) -> u32 {
        bytes.get(offset).copied().map_or(0, u32::from)
    }

    #[inline]
    fn head_offset(&self, _bytes: &[u8], _base: usize, _offset: usize) -> usize {
        0
    }

    #[inline]
    fn encoded_len(&self, _c: u32) -> usize {
        1
    }

    /// Values above `0xFF` have no Latin-1 form and are written as `?`.
    fn encode(&self, c: u32, out: &mut GrowArray<u8>) -> Result<usize, GrowError> {
        out.append_byte(u8::try_from(c).unwrap_or(b'?'))?;
        Ok(1)
    }
}

#[cfg(test)]
mod tests;
