//! Double-byte character sets (GBK/CP936 style).

use quill_garray::{GrowArray, GrowError};

use super::CharEncoding;

/// Double-byte encoding where bytes `0x81..=0xFE` lead a two-byte character.
///
/// Trail bytes overlap the ASCII and lead ranges, so a byte in the middle
/// of the text cannot tell whether it starts a character. Backing up
/// therefore scans forward from a known boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DoubleByte;

#[inline]
fn is_lead(byte: u8) -> bool {
    (0x81..=0xFE).contains(&byte)
}

/// Lead and trail bytes of `c`, if it is a two-byte character that
/// decodes back to itself.
fn to_pair(c: u32) -> Option<[u8; 2]> {
    let [lead, trail] = u16::try_from(c).ok()?.to_be_bytes();
    (is_lead(lead) && trail != 0).then_some([lead, trail])
}

impl CharEncoding for DoubleByte {
    #[inline]
    fn is_multibyte(&self) -> bool {
        true
    }

    /// A lead byte followed by NUL or end of text is a lone byte.
    fn char_len(&self, bytes: &[u8], offset: usize) -> usize {
        match bytes.get(offset) {
            None => 0,
            Some(&b) if is_lead(b) => match bytes.get(offset + 1) {
                Some(&trail) if trail != 0 => 2,
                _ => 1,
            },
            Some(_) => 1,
        }
    }

    fn decode(&self, bytes: &[u8], offset: usize) -> u32 {
        match self.char_len(bytes, offset) {
            0 => 0,
            2 => (u32::from(bytes[offset]) << 8) | u32::from(bytes[offset + 1]),
            _ => u32::from(bytes[offset]),
        }
    }

    fn head_offset(&self, bytes: &[u8], base: usize, offset: usize) -> usize {
        if offset <= base || offset >= bytes.len() || bytes[offset] == 0 {
            return 0;
        }
        // Only a byte after a lead byte can be a trail byte.
        if !is_lead(bytes[offset - 1]) {
            return 0;
        }
        let mut q = base;
        while q < offset {
            q += self.char_len(bytes, q);
        }
        usize::from(q != offset)
    }

    fn encoded_len(&self, c: u32) -> usize {
        if to_pair(c).is_some() {
            2
        } else {
            1
        }
    }

    /// Values with no double-byte form are written as `?`: anything above
    /// `0xFFFF`, and two-byte values whose high byte is not a lead byte or
    /// whose low byte is NUL.
    fn encode(&self, c: u32, out: &mut GrowArray<u8>) -> Result<usize, GrowError> {
        if let Some(pair) = to_pair(c) {
            out.concat(&pair)?;
            Ok(2)
        } else {
            out.append_byte(u8::try_from(c).unwrap_or(b'?'))?;
            Ok(1)
        }
    }
}
