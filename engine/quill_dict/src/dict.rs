//! Key-embedded dictionary.

use std::fmt;
use std::hash::{Hash, Hasher};

use quill_garray::GrowError;
use rustc_hash::FxHasher;

use crate::{ItemId, KeyTable, RecordArena};

/// A record that carries its own lookup key.
///
/// The key is only reachable through a shared reference; mutation goes
/// through [`Keyed::value_mut`], which must not expose the key. This keeps
/// a stored record's key in step with the hash the table filed it under.
pub trait Keyed {
    type Key: ?Sized + Hash + Eq;
    type Value: ?Sized;

    fn key(&self) -> &Self::Key;

    /// Mutable access to everything except the key.
    fn value_mut(&mut self) -> &mut Self::Value;
}

/// Errors from dictionary operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictError {
    /// A record with an equal key is already stored.
    #[error("key already present as {existing:?}")]
    DuplicateKey { existing: ItemId },

    /// The handle was removed, or never came from this dictionary.
    #[error("stale handle {0:?}")]
    StaleHandle(ItemId),

    #[error("record arena is full at {0} slots")]
    ArenaFull(usize),

    /// Internal bookkeeping no longer holds. Always a bug in this crate.
    #[error("dictionary corrupted: {0}")]
    Corrupt(&'static str),

    #[error(transparent)]
    Grow(#[from] GrowError),
}

#[inline]
fn hash_key<K: ?Sized + Hash>(key: &K) -> u64 {
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Records indexed by the key they carry.
///
/// # Invariants
///
/// - Every table entry names a live arena record whose key hashes to the
///   entry's hash.
/// - Every live arena record has exactly one table entry.
/// - No two live records have equal keys.
pub struct Dict<R: Keyed> {
    arena: RecordArena<R>,
    table: KeyTable,
}

impl<R: Keyed> Dict<R> {
    pub const fn new() -> Self {
        Dict {
            arena: RecordArena::new(),
            table: KeyTable::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    fn find_hashed(&self, hash: u64, key: &R::Key) -> Option<ItemId> {
        self.table
            .find(hash, |id| self.arena.get(id).is_some_and(|r| r.key() == key))
    }

    /// Store `record` under its own key.
    ///
    /// Fails with [`DictError::DuplicateKey`] if the key is taken. On any
    /// error the dictionary is unchanged and `record` is dropped.
    pub fn insert(&mut self, record: R) -> Result<ItemId, DictError> {
        let hash = hash_key(record.key());
        if let Some(existing) = self.find_hashed(hash, record.key()) {
            return Err(DictError::DuplicateKey { existing });
        }
        // Reserve before storing so a failed table grow leaves no orphan.
        self.table.reserve_one()?;
        let id = self.arena.alloc(record)?;
        if let Err(err) = self.table.insert(hash, id) {
            self.arena.release(id);
            return Err(err.into());
        }
        Ok(id)
    }

    /// Handle of the record stored under `key`.
    pub fn find(&self, key: &R::Key) -> Option<ItemId> {
        self.find_hashed(hash_key(key), key)
    }

    #[inline]
    pub fn contains_key(&self, key: &R::Key) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &R::Key) -> Option<&R> {
        self.find(key).and_then(|id| self.arena.get(id))
    }

    /// Mutable access to the value part of the record under `key`.
    pub fn value_mut(&mut self, key: &R::Key) -> Option<&mut R::Value> {
        let id = self.find(key)?;
        self.arena.get_mut(id).map(Keyed::value_mut)
    }

    /// The record behind a handle.
    pub fn record_of(&self, id: ItemId) -> Result<&R, DictError> {
        self.arena.get(id).ok_or(DictError::StaleHandle(id))
    }

    /// The key of the record behind a handle.
    pub fn key_of(&self, id: ItemId) -> Result<&R::Key, DictError> {
        self.record_of(id).map(Keyed::key)
    }

    pub fn value_mut_of(&mut self, id: ItemId) -> Result<&mut R::Value, DictError> {
        self.arena
            .get_mut(id)
            .map(Keyed::value_mut)
            .ok_or(DictError::StaleHandle(id))
    }

    /// Remove the record stored under `key` and hand it back.
    pub fn remove(&mut self, key: &R::Key) -> Option<R> {
        let hash = hash_key(key);
        // The table entry goes first: it must never name a freed record.
        let id = self
            .table
            .remove(hash, |id| self.arena.get(id).is_some_and(|r| r.key() == key))?;
        self.arena.release(id)
    }

    /// Remove the record behind a handle.
    pub fn remove_id(&mut self, id: ItemId) -> Result<R, DictError> {
        let key = self.key_of(id)?;
        let hash = hash_key(key);
        self.table
            .remove(hash, |found| found == id)
            .ok_or(DictError::Corrupt("live record missing from key table"))?;
        self.arena
            .release(id)
            .ok_or(DictError::Corrupt("record vanished during removal"))
    }

    /// Live records in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.arena.iter().map(|(_, record)| record)
    }

    /// Live records with their handles, in storage order.
    pub fn iter_ids(&self) -> impl Iterator<Item = (ItemId, &R)> + '_ {
        self.arena.iter()
    }

    /// Drop every record. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.table.clear();
        self.arena.clear();
    }
}

impl<R: Keyed> Default for Dict<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Keyed + fmt::Debug> fmt::Debug for Dict<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// A string-keyed record with an arbitrary value.
///
/// The general-purpose record for a [`Dict`] when the caller has no record
/// type of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictItem<V> {
    key: Box<str>,
    value: V,
}

impl<V> DictItem<V> {
    pub fn new(key: impl Into<Box<str>>, value: V) -> Self {
        DictItem {
            key: key.into(),
            value,
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V> Keyed for DictItem<V> {
    type Key = str;
    type Value = V;

    fn key(&self) -> &str {
        &self.key
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

#[cfg(test)]
mod tests;
