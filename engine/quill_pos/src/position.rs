//! Buffer position triple.

use std::fmt;

/// A location in a buffer.
///
/// Layout: 12 bytes total
/// - line: u32 - 1-based line number, 0 means "no line"
/// - col: u32 - byte offset into the line
/// - coladd: u32 - virtual columns past `col`, used when the cursor sits
///   beyond the stored text (block selection, `virtualedit`)
///
/// The derived ordering compares fields in declaration order, which is
/// exactly the lexicographic (line, col, coladd) order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub col: u32,
    pub coladd: u32,
}

crate::static_assert_size!(Position, 12);

impl Position {
    /// The empty position. Never a valid cursor location.
    pub const NONE: Position = Position {
        line: 0,
        col: 0,
        coladd: 0,
    };

    /// Create a position with no virtual adjustment.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Position {
            line,
            col,
            coladd: 0,
        }
    }

    /// Create a position including a virtual column adjustment.
    #[inline]
    pub const fn with_coladd(line: u32, col: u32, coladd: u32) -> Self {
        Position { line, col, coladd }
    }

    /// First column of `line`.
    #[inline]
    pub const fn at_line_start(line: u32) -> Self {
        Position::new(line, 0)
    }

    /// Same line, different column. The adjustment is dropped.
    #[inline]
    #[must_use]
    pub const fn with_col(self, col: u32) -> Self {
        Position::new(self.line, col)
    }

    /// Returns `true` if all three fields are zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.line == 0 && self.col == 0 && self.coladd == 0
    }

    /// Returns `true` if the position names a real line.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.line != 0
    }

    /// Reset to [`Position::NONE`] in place.
    #[inline]
    pub fn clear(&mut self) {
        *self = Position::NONE;
    }

    /// Strictly before `other`.
    #[inline]
    pub fn is_before(&self, other: &Position) -> bool {
        self < other
    }

    /// Before or equal to `other`.
    #[inline]
    pub fn is_at_or_before(&self, other: &Position) -> bool {
        self <= other
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Position::NONE")
        } else {
            write!(f, "Position({self})")
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coladd == 0 {
            write!(f, "{}:{}", self.line, self.col)
        } else {
            write!(f, "{}:{}+{}", self.line, self.col, self.coladd)
        }
    }
}
