//! Quill multi-byte text traversal.
//!
//! Buffers store encoded bytes. This crate walks those bytes one character
//! at a time without decoding the whole line:
//!
//! - [`CharEncoding`]: the contract an encoding provides (char length,
//!   composing test, decode, head offset, encode)
//! - [`Latin1`], [`Utf8`], [`DoubleByte`]: the encodings the engine ships
//! - [`TextCursor`]: a `Copy` byte cursor that advances, retreats and copies
//!   whole characters
//! - [`ascii`]: locale-independent ASCII classification and case mapping
//!
//! # Encoding Mode
//!
//! Whether variable-width decoding is active is a property of the encoding
//! value ([`CharEncoding::is_multibyte`]). A cursor captures its encoding at
//! construction, so the same traversal code runs in single-byte and
//! multi-byte mode without any process-wide switch.
//!
//! # Malformed Input
//!
//! Invalid or truncated sequences are never an error. Every encoding
//! reports a length of at least 1 for any byte inside the text, so
//! traversal always makes progress and degrades to byte-at-a-time over
//! garbage.

pub mod ascii;
mod cursor;
mod encoding;

pub use cursor::{char_count, CharSpan, TextCursor};
pub use encoding::{is_composing_char, CharEncoding, DoubleByte, Latin1, Utf8};
