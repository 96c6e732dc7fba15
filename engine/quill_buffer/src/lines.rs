//! Buffer lines.
//!
//! Lines are numbered from 1. Line 0 never exists, which leaves
//! [`Position::NONE`] free to mean "no position". A buffer always holds at
//! least one line; an empty buffer is one empty line.

use std::fmt;

use memchr::memchr_iter;
use quill_garray::GrowArray;
use quill_mbyte::{CharEncoding, TextCursor};
use quill_pos::Position;

use crate::BufferError;

/// Minimum growth step for tables built from text, which usually arrive in
/// bulk.
const LINE_GROW_SIZE: usize = 64;

#[inline]
fn to_col(offset: usize) -> Result<u32, BufferError> {
    u32::try_from(offset).map_err(|_| BufferError::LineTooLong { len: offset })
}

/// The lines of one buffer, without line terminators.
#[derive(Clone, PartialEq, Eq)]
pub struct LineTable {
    lines: GrowArray<Box<[u8]>>,
}

impl LineTable {
    /// A buffer with a single empty line.
    pub fn new() -> Self {
        LineTable {
            lines: GrowArray::from(vec![Box::default()]),
        }
    }

    /// Split `text` into lines at `\n`.
    ///
    /// A trailing `\n` ends the last line rather than starting a new one,
    /// so `b"a\n"` is one line. Empty text is one empty line.
    #[tracing::instrument(level = "trace", skip_all, fields(bytes = text.len()))]
    pub fn from_text(text: &[u8]) -> Result<Self, BufferError> {
        let mut lines: GrowArray<Box<[u8]>> = GrowArray::with_grow_size(LINE_GROW_SIZE);
        let mut start = 0;
        for end in memchr_iter(b'\n', text) {
            lines.push(Box::from(&text[start..end]))?;
            start = end + 1;
        }
        if start < text.len() || lines.is_empty() {
            lines.push(Box::from(&text[start..]))?;
        }
        tracing::trace!(lines = lines.len(), "split text");
        Ok(LineTable { lines })
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Array index of `lnum`, if the line exists.
    fn index(&self, lnum: u32) -> Result<usize, BufferError> {
        let index = (lnum as usize).wrapping_sub(1);
        if index < self.lines.len() {
            Ok(index)
        } else {
            Err(BufferError::LineOutOfRange {
                line: lnum,
                count: self.lines.len(),
            })
        }
    }

    /// Line number the next appended line would get.
    fn next_lnum(&self) -> Result<u32, BufferError> {
        u32::try_from(self.lines.len() + 1).map_err(|_| BufferError::LineOutOfRange {
            line: u32::MAX,
            count: self.lines.len(),
        })
    }

    pub fn line(&self, lnum: u32) -> Result<&[u8], BufferError> {
        let index = self.index(lnum)?;
        Ok(&self.lines[index])
    }

    pub fn is_line_empty(&self, lnum: u32) -> Result<bool, BufferError> {
        self.line(lnum).map(<[u8]>::is_empty)
    }

    /// `true` for a buffer that is one empty line.
    pub fn is_buffer_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines.first().is_some_and(|line| line.is_empty())
    }

    /// All lines in order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.lines.iter().map(|line| &**line)
    }

    /// Add a line at the end and return its number.
    #[tracing::instrument(level = "trace", skip_all, fields(len = text.len()))]
    pub fn append_line(&mut self, text: &[u8]) -> Result<u32, BufferError> {
        let lnum = self.next_lnum()?;
        self.lines.push(Box::from(text))?;
        Ok(lnum)
    }

    /// Insert a line so that it becomes line `lnum`.
    ///
    /// `lnum` may be one past the last line, which appends.
    #[tracing::instrument(level = "trace", skip_all, fields(lnum = lnum, len = text.len()))]
    pub fn insert_line(&mut self, lnum: u32, text: &[u8]) -> Result<(), BufferError> {
        let index = (lnum as usize).wrapping_sub(1);
        if index > self.lines.len() {
            return Err(BufferError::LineOutOfRange {
                line: lnum,
                count: self.lines.len(),
            });
        }
        self.next_lnum()?;
        self.lines.insert(index, Box::from(text))?;
        Ok(())
    }

    /// Remove line `lnum` and return its contents.
    ///
    /// Deleting the only line empties it instead, since a buffer always has
    /// one line.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn delete_line(&mut self, lnum: u32) -> Result<Box<[u8]>, BufferError> {
        let index = self.index(lnum)?;
        if self.lines.len() == 1 {
            return Ok(std::mem::take(self.line_mut(lnum)?));
        }
        self.lines
            .remove(index)
            .ok_or(BufferError::LineOutOfRange {
                line: lnum,
                count: self.lines.len(),
            })
    }

    /// Replace the contents of line `lnum` and return the old contents.
    pub fn set_line(&mut self, lnum: u32, text: &[u8]) -> Result<Box<[u8]>, BufferError> {
        let line = self.line_mut(lnum)?;
        Ok(std::mem::replace(line, Box::from(text)))
    }

    fn line_mut(&mut self, lnum: u32) -> Result<&mut Box<[u8]>, BufferError> {
        let index = self.index(lnum)?;
        Ok(&mut self.lines.as_mut_slice()[index])
    }

    /// Overwrite the byte at `pos`.
    ///
    /// The line length never changes, so `pos.col` must address an
    /// existing byte.
    pub fn put_byte(&mut self, pos: Position, byte: u8) -> Result<(), BufferError> {
        let line = self.line_mut(pos.line)?;
        let len = line.len();
        let slot = line
            .get_mut(pos.col as usize)
            .ok_or(BufferError::ColumnOutOfRange {
                line: pos.line,
                col: pos.col,
                len,
            })?;
        *slot = byte;
        Ok(())
    }

    /// The whole buffer as text, each line followed by `\n`.
    pub fn to_text(&self) -> Result<GrowArray<u8>, BufferError> {
        let total: usize = self.lines.iter().map(|line| line.len() + 1).sum();
        let mut text = GrowArray::try_with_capacity(total)?;
        for line in &self.lines {
            text.concat(line)?;
            text.append_byte(b'\n')?;
        }
        Ok(text)
    }

    /// Cursor on the line of `pos`, at its column.
    ///
    /// The column may equal the line length (just past the last byte).
    fn cursor_at<'a, E: CharEncoding + ?Sized>(
        &'a self,
        pos: Position,
        enc: &'a E,
    ) -> Result<TextCursor<'a, E>, BufferError> {
        let line = self.line(pos.line)?;
        if pos.col as usize > line.len() {
            return Err(BufferError::ColumnOutOfRange {
                line: pos.line,
                col: pos.col,
                len: line.len(),
            });
        }
        Ok(TextCursor::at(line, pos.col as usize, enc))
    }

    /// Scalar value of the character at `pos`; 0 at the end of the line.
    pub fn char_at<E: CharEncoding + ?Sized>(
        &self,
        pos: Position,
        enc: &E,
    ) -> Result<u32, BufferError> {
        Ok(self.cursor_at(pos, enc)?.char_value())
    }

    /// Position of the character after the one at `pos`.
    ///
    /// Composing characters are skipped together with their base. Past the
    /// last character of a line this moves to the start of the next line;
    /// returns `None` at the end of the last line.
    pub fn next_char_pos<E: CharEncoding + ?Sized>(
        &self,
        pos: Position,
        enc: &E,
    ) -> Result<Option<Position>, BufferError> {
        let mut cursor = self.cursor_at(pos, enc)?;
        if !cursor.is_eof() {
            cursor.advance();
            if !cursor.is_eof() {
                return Ok(Some(Position::new(pos.line, to_col(cursor.pos())?)));
            }
        }
        if (pos.line as usize) < self.lines.len() {
            Ok(Some(Position::at_line_start(pos.line + 1)))
        } else {
            Ok(None)
        }
    }

    /// Position of the character before `pos`.
    ///
    /// From column 0 this moves to the last character of the previous line
    /// (column 0 if that line is empty); returns `None` at the start of the
    /// first line.
    pub fn prev_char_pos<E: CharEncoding + ?Sized>(
        &self,
        pos: Position,
        enc: &E,
    ) -> Result<Option<Position>, BufferError> {
        let mut cursor = self.cursor_at(pos, enc)?;
        if cursor.pos() > 0 {
            cursor.retreat(0);
            return Ok(Some(Position::new(pos.line, to_col(cursor.pos())?)));
        }
        if pos.line <= 1 {
            return Ok(None);
        }
        let prev = pos.line - 1;
        let line = self.line(prev)?;
        if line.is_empty() {
            return Ok(Some(Position::at_line_start(prev)));
        }
        let mut cursor = TextCursor::at(line, line.len(), enc);
        cursor.retreat(0);
        Ok(Some(Position::new(prev, to_col(cursor.pos())?)))
    }
}

impl Default for LineTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LineTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(String::from_utf8_lossy))
            .finish()
    }
}
