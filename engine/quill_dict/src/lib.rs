//! Quill keyed tables.
//!
//! A symbol-table style mapping where the key lives inside the record it
//! identifies. The lookup table never holds a second copy of the key; its
//! slots hold a cached hash and an [`ItemId`] handle, and the key is read
//! back through the record when probing.
//!
//! # Layout
//!
//! - [`RecordArena`]: owns the records in slot storage. Slots are reused
//!   after removal, with a generation counter so old handles stop resolving.
//! - [`KeyTable`]: open-addressing hash table of `(hash, ItemId)` slots.
//! - [`Dict`]: ties the two together behind a key-based API.
//!
//! # Handles Instead of Offsets
//!
//! Going from a key back to its record is a checked arena lookup
//! ([`Dict::record_of`]), not address arithmetic. A stale handle resolves
//! to [`DictError::StaleHandle`] rather than to whatever now occupies the
//! memory.
//!
//! # Keys Are Frozen
//!
//! [`Keyed`] gives read-only access to the key and mutable access only to
//! the record's value part. Once a record is in a [`Dict`] its key cannot
//! change, so the table can never point at a record under the wrong hash.

mod arena;
mod dict;
mod table;

pub use arena::{ItemId, RecordArena};
pub use dict::{Dict, DictError, DictItem, Keyed};
pub use table::KeyTable;
