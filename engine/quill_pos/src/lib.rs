//! Quill positions - cursor and selection coordinates.
//!
//! This crate contains the value types every other part of the engine uses
//! to talk about locations in a buffer:
//! - [`Position`]: a (line, column, virtual column adjustment) triple
//! - [`PosRange`]: a normalized half-open range of positions
//!
//! # Line Numbering
//!
//! Lines are 1-based. Line 0 never names a real line, which lets the
//! all-zero [`Position::NONE`] act as the "no position" sentinel without a
//! separate `Option` wrapper. Columns are 0-based byte offsets into the line.
//!
//! # Ordering
//!
//! Positions are totally ordered: by line, then column, then adjustment.
//! Range algorithms that sort or binary-search positions rely on this.

/// Compile-time assertion that a type has a specific size.
///
/// Positions are copied around constantly; keep them small.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod position;
mod range;

pub use position::Position;
pub use range::PosRange;
