//! Quill growable arrays.
//!
//! [`GrowArray`] backs every per-buffer array in the engine (line tables,
//! argument lists, byte sinks for encoded text). It differs from a bare
//! `Vec` in two ways:
//!
//! - **Fallible growth**: running out of memory is reported as a
//!   [`GrowError`] and leaves the array untouched, so callers can abandon
//!   the higher-level operation instead of aborting the process.
//! - **Split fast path**: [`GrowArray::has_room`] answers "will this
//!   reallocate?" without mutating anything, so hot append loops branch on
//!   the common non-growing case and only call into the cold growth path
//!   when they must.
//!
//! Growth is geometric (at least doubling) with a configurable minimum
//! increment, giving amortized O(1) appends.

mod grow_array;

pub use grow_array::{GrowArray, GrowError, DEFAULT_GROW_SIZE};
