//! Character cursor over encoded text.
//!
//! The cursor moves over a byte slice one character at a time. In
//! single-byte mode every step is one byte; in multi-byte mode step sizes
//! come from the captured [`CharEncoding`].
//!
//! # Two Forward Steps
//!
//! - [`TextCursor::advance`] steps over a base character and every
//!   composing character after it, so the cursor always lands on the next
//!   base character. Normal cursor motion uses this.
//! - [`TextCursor::advance_unit`] steps over exactly one encoded character,
//!   leaving composing marks individually addressable for low-level edits.

use std::fmt;

use quill_garray::{GrowArray, GrowError};

use crate::CharEncoding;

/// Byte range of one character in the text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CharSpan {
    pub start: usize,
    pub len: usize,
    /// The character modifies the preceding base character.
    pub is_composing: bool,
}

impl CharSpan {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Cursor over encoded text.
///
/// [`Copy`], so callers snapshot it for look-ahead and restore by
/// assignment.
///
/// # Invariant
///
/// `pos <= text.len()`.
pub struct TextCursor<'a, E: CharEncoding + ?Sized> {
    text: &'a [u8],
    pos: usize,
    enc: &'a E,
}

// Manual impls: deriving would require `E: Clone`.
impl<E: CharEncoding + ?Sized> Clone for TextCursor<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: CharEncoding + ?Sized> Copy for TextCursor<'_, E> {}

impl<E: CharEncoding + ?Sized> fmt::Debug for TextCursor<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextCursor")
            .field("pos", &self.pos)
            .field("len", &self.text.len())
            .field("multibyte", &self.enc.is_multibyte())
            .finish()
    }
}

impl<'a, E: CharEncoding + ?Sized> TextCursor<'a, E> {
    /// Create a cursor at the start of `text`.
    pub fn new(text: &'a [u8], enc: &'a E) -> Self {
        TextCursor { text, pos: 0, enc }
    }

    /// Create a cursor at `pos`, clamped to the end of `text`.
    pub fn at(text: &'a [u8], pos: usize, enc: &'a E) -> Self {
        TextCursor {
            text,
            pos: pos.min(text.len()),
            enc,
        }
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move to `pos`, clamped to the end of the text.
    ///
    /// The caller is responsible for `pos` being on a character boundary.
    #[inline]
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.text.len());
    }

    #[inline]
    pub fn text(&self) -> &'a [u8] {
        self.text
    }

    /// Bytes from the cursor to the end of the text.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.text[self.pos..]
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    #[inline]
    pub fn is_multibyte(&self) -> bool {
        self.enc.is_multibyte()
    }

    /// Byte length of the character at the cursor, excluding composing
    /// characters. 0 at end of text.
    #[inline]
    pub fn char_len(&self) -> usize {
        if self.enc.is_multibyte() {
            self.enc.char_len(self.text, self.pos)
        } else {
            usize::from(!self.is_eof())
        }
    }

    /// Byte length of the character at the cursor plus any composing
    /// characters after it. 0 at end of text.
    #[inline]
    pub fn cluster_len(&self) -> usize {
        if self.enc.is_multibyte() {
            self.enc.cluster_len(self.text, self.pos)
        } else {
            usize::from(!self.is_eof())
        }
    }

    /// Scalar value of the character at the cursor. 0 at end of text.
    #[inline]
    pub fn char_value(&self) -> u32 {
        if self.enc.is_multibyte() {
            self.enc.decode(self.text, self.pos)
        } else {
            self.text.get(self.pos).copied().map_or(0, u32::from)
        }
    }

    #[inline]
    pub fn is_composing(&self) -> bool {
        self.enc.is_multibyte() && self.enc.is_composing(self.text, self.pos)
    }

    /// Span of the single character at the cursor.
    pub fn span(&self) -> CharSpan {
        CharSpan {
            start: self.pos,
            len: self.char_len(),
            is_composing: self.is_composing(),
        }
    }

    /// Move past the character at the cursor and its composing characters.
    ///
    /// Does nothing at end of text.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.cluster_len();
    }

    /// Move past exactly one encoded character, composing or not.
    ///
    /// Does nothing at end of text.
    #[inline]
    pub fn advance_unit(&mut self) {
        self.pos += self.char_len();
    }

    /// Move back to the start of the previous character.
    ///
    /// `start` is the offset of the first character of the text being
    /// walked (usually the line start); it bounds the look-behind the
    /// encoding needs to find character boundaries. In multi-byte mode the
    /// cursor lands on the base character of a composed cluster.
    ///
    /// # Contract
    ///
    /// `pos() > start`. Calling at `start` is a caller bug; it is caught by
    /// a debug assertion and leaves the cursor unmoved in release builds.
    pub fn retreat(&mut self, start: usize) {
        debug_assert!(
            self.pos > start,
            "retreat at {} not after start {start}",
            self.pos
        );
        if self.pos <= start {
            return;
        }
        let step = if self.enc.is_multibyte() {
            self.enc.head_offset(self.text, start, self.pos - 1) + 1
        } else {
            1
        };
        self.pos -= step;
    }

    /// Copy the character at the cursor to the end of `dst` and advance.
    ///
    /// In multi-byte mode the whole cluster (base plus composing
    /// characters) is copied. Returns the number of bytes copied; on error
    /// neither the cursor nor `dst` changes.
    pub fn copy_char(&mut self, dst: &mut GrowArray<u8>) -> Result<usize, GrowError> {
        let len = self.cluster_len();
        if len == 0 {
            return Ok(0);
        }
        dst.concat(&self.text[self.pos..self.pos + len])?;
        self.pos += len;
        Ok(len)
    }
}

/// Number of characters in `text`.
///
/// Composing characters count as part of their base character in
/// multi-byte mode; in single-byte mode this is the byte length.
pub fn char_count<E: CharEncoding + ?Sized>(text: &[u8], enc: &E) -> usize {
    if !enc.is_multibyte() {
        return text.len();
    }
    let mut cursor = TextCursor::new(text, enc);
    let mut count = 0;
    while !cursor.is_eof() {
        cursor.advance();
        count += 1;
    }
    count
}
