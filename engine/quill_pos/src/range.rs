//! Half-open position ranges for selections.

use std::fmt;

use crate::Position;

/// A normalized half-open range `[start, end)` of positions.
///
/// Construction orders the endpoints, so a selection dragged backwards
/// yields the same range as one dragged forwards.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PosRange {
    pub start: Position,
    pub end: Position,
}

impl PosRange {
    /// Create a range from two endpoints in either order.
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            PosRange { start: a, end: b }
        } else {
            PosRange { start: b, end: a }
        }
    }

    /// Zero-width range at `pos`.
    #[inline]
    pub const fn point(pos: Position) -> Self {
        PosRange {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if `pos` falls inside the range. `end` is exclusive.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Check if `other` lies entirely within this range.
    #[inline]
    pub fn contains_range(&self, other: PosRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if the two ranges share at least one position.
    #[inline]
    pub fn overlaps(&self, other: PosRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Smallest range covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: PosRange) -> PosRange {
        PosRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Number of lines touched, counting both endpoint lines.
    ///
    /// Widened to `u64`: a range over every line number has `u32::MAX + 1`
    /// of them.
    pub fn line_count(&self) -> u64 {
        u64::from(self.end.line) - u64::from(self.start.line) + 1
    }
}

impl fmt::Debug for PosRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
