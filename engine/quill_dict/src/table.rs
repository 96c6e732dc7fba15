//! Open-addressing key table.
//!
//! Slots hold the full hash of the key and the [`ItemId`] of the record
//! that owns it, nothing else. Probing compares hashes first and asks the
//! caller to compare keys only on a hash match, since the key itself lives
//! in the record.
//!
//! # Probing
//!
//! Linear probing over a power-of-two slot array. Removal leaves a
//! tombstone so later probes keep walking; tombstones are dropped on the
//! next rebuild. The table rebuilds once used plus removed slots pass two
//! thirds of the array.

use std::fmt;

use quill_garray::{GrowArray, GrowError};

use crate::ItemId;

/// Smallest slot array the table allocates.
const MIN_SLOTS: usize = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Slot {
    Empty,
    Removed,
    Used { hash: u64, id: ItemId },
}

/// Hash-to-handle index with open addressing.
pub struct KeyTable {
    slots: GrowArray<Slot>,
    /// Slots in [`Slot::Used`].
    used: usize,
    /// Slots in [`Slot::Removed`].
    removed: usize,
}

impl KeyTable {
    /// An empty table. Allocates on first insert.
    pub const fn new() -> Self {
        KeyTable {
            slots: GrowArray::new(),
            used: 0,
            removed: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Size of the slot array.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "masked to the slot count right after"
    )]
    #[inline]
    fn home(&self, hash: u64) -> usize {
        (hash as usize) & self.mask()
    }

    /// Find the handle stored under `hash` for which `is_match` holds.
    ///
    /// `is_match` is only called for slots whose stored hash equals `hash`.
    pub fn find(&self, hash: u64, mut is_match: impl FnMut(ItemId) -> bool) -> Option<ItemId> {
        self.find_slot(hash, &mut is_match)
            .and_then(|index| match self.slots.get(index) {
                Some(Slot::Used { id, .. }) => Some(*id),
                _ => None,
            })
    }

    fn find_slot(&self, hash: u64, is_match: &mut impl FnMut(ItemId) -> bool) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }
        let mut index = self.home(hash);
        // A full scan bounds the walk even if the load invariant is broken.
        for _ in 0..self.slots.len() {
            match self.slots.get(index)? {
                Slot::Empty => return None,
                Slot::Used { hash: h, id } if *h == hash && is_match(*id) => return Some(index),
                Slot::Used { .. } | Slot::Removed => {}
            }
            index = (index + 1) & self.mask();
        }
        None
    }

    /// Make sure one more entry fits without a rebuild.
    ///
    /// After this returns `Ok`, the next [`insert`](Self::insert) cannot
    /// fail. On error the table is unchanged.
    pub fn reserve_one(&mut self) -> Result<(), GrowError> {
        if (self.used + self.removed + 1) * 3 <= self.slots.len() * 2 {
            return Ok(());
        }
        self.rebuild(self.used + 1)
    }

    /// Add `id` under `hash`.
    ///
    /// The caller guarantees no entry with an equal key is present.
    pub fn insert(&mut self, hash: u64, id: ItemId) -> Result<(), GrowError> {
        self.reserve_one()?;
        let mask = self.mask();
        let mut index = self.home(hash);
        loop {
            match self.slots.as_mut_slice().get_mut(index) {
                Some(slot @ (Slot::Empty | Slot::Removed)) => {
                    if *slot == Slot::Removed {
                        self.removed -= 1;
                    }
                    *slot = Slot::Used { hash, id };
                    self.used += 1;
                    return Ok(());
                }
                Some(Slot::Used { .. }) => index = (index + 1) & mask,
                // reserve_one leaves at least a third of the slots open
                None => return Ok(()),
            }
        }
    }

    /// Remove the entry under `hash` for which `is_match` holds and return
    /// its handle.
    pub fn remove(&mut self, hash: u64, mut is_match: impl FnMut(ItemId) -> bool) -> Option<ItemId> {
        let index = self.find_slot(hash, &mut is_match)?;
        let slot = self.slots.as_mut_slice().get_mut(index)?;
        let Slot::Used { id, .. } = *slot else {
            return None;
        };
        *slot = Slot::Removed;
        self.used -= 1;
        self.removed += 1;
        Some(id)
    }

    /// Handles of every entry, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Used { id, .. } => Some(*id),
            Slot::Empty | Slot::Removed => None,
        })
    }

    /// Drop every entry and release the slot array.
    pub fn clear(&mut self) {
        self.slots.clear_and_free();
        self.used = 0;
        self.removed = 0;
    }

    /// Reallocate for at least `wanted` entries and reinsert the live ones.
    #[cold]
    fn rebuild(&mut self, wanted: usize) -> Result<(), GrowError> {
        // Keep the new table at most a quarter full so a burst of inserts
        // does not immediately rebuild again.
        let new_size = wanted
            .checked_mul(4)
            .and_then(usize::checked_next_power_of_two)
            .ok_or(GrowError::CapacityOverflow {
                len: self.slots.len(),
                additional: wanted,
            })?
            .max(MIN_SLOTS);

        let mut fresh = GrowArray::try_with_capacity(new_size)?;
        for _ in 0..new_size {
            fresh.push(Slot::Empty)?;
        }
        let mask = new_size - 1;
        for slot in self.slots.iter() {
            let Slot::Used { hash, id } = *slot else {
                continue;
            };
            #[allow(
                clippy::cast_possible_truncation,
                reason = "masked to the slot count right after"
            )]
            let mut index = (hash as usize) & mask;
            while let Some(Slot::Used { .. }) = fresh.get(index) {
                index = (index + 1) & mask;
            }
            if let Some(target) = fresh.get_mut(index) {
                *target = Slot::Used { hash, id };
            }
        }

        tracing::debug!(
            old_size = self.slots.len(),
            new_size,
            used = self.used,
            dropped_tombstones = self.removed,
            "rebuilt key table"
        );
        self.slots = fresh;
        self.removed = 0;
        Ok(())
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyTable")
            .field("used", &self.used)
            .field("removed", &self.removed)
            .field("slots", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
