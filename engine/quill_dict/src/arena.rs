//! Generational record storage.
//!
//! Records live in a flat slot array addressed by [`ItemId`]. Removing a
//! record bumps the slot's generation and puts the slot on a free list, so
//! the next insert reuses it while handles to the old record stop
//! resolving.

use std::fmt;

use quill_garray::GrowArray;

use crate::DictError;

/// Handle to a record in a [`RecordArena`].
///
/// A slot index plus the generation the slot had when the record was
/// stored. Handles are only meaningful for the arena that issued them.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ItemId {
    index: u32,
    generation: u32,
}

impl ItemId {
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({}v{})", self.index, self.generation)
    }
}

enum Slot<R> {
    Occupied { generation: u32, record: R },
    Free { generation: u32, next_free: Option<u32> },
}

impl<R> Slot<R> {
    fn generation(&self) -> u32 {
        match self {
            Slot::Occupied { generation, .. } | Slot::Free { generation, .. } => *generation,
        }
    }
}

/// Slot storage for records with reusable, generation-checked handles.
pub struct RecordArena<R> {
    slots: GrowArray<Slot<R>>,
    free_head: Option<u32>,
    len: usize,
}

impl<R> RecordArena<R> {
    pub const fn new() -> Self {
        RecordArena {
            slots: GrowArray::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Number of live records.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `record`, reusing a freed slot when one is available.
    ///
    /// On error the arena is unchanged and `record` is dropped.
    pub fn alloc(&mut self, record: R) -> Result<ItemId, DictError> {
        if let Some(index) = self.free_head {
            let slot = self
                .slots
                .get_mut(index as usize)
                .ok_or(DictError::Corrupt("free list points past the slot array"))?;
            let (generation, next_free) = match slot {
                Slot::Free {
                    generation,
                    next_free,
                } => (*generation, *next_free),
                Slot::Occupied { .. } => {
                    return Err(DictError::Corrupt("free list points at a live slot"));
                }
            };
            *slot = Slot::Occupied { generation, record };
            self.free_head = next_free;
            self.len += 1;
            return Ok(ItemId { index, generation });
        }

        let index =
            u32::try_from(self.slots.len()).map_err(|_| DictError::ArenaFull(self.slots.len()))?;
        self.slots.push(Slot::Occupied {
            generation: 0,
            record,
        })?;
        self.len += 1;
        Ok(ItemId {
            index,
            generation: 0,
        })
    }

    /// `true` if `id` refers to a live record in this arena.
    #[inline]
    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ItemId) -> Option<&R> {
        match self.slots.get(id.index())? {
            Slot::Occupied { generation, record } if *generation == id.generation => Some(record),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut R> {
        match self.slots.get_mut(id.index())? {
            Slot::Occupied { generation, record } if *generation == id.generation => Some(record),
            _ => None,
        }
    }

    /// Take the record out of its slot and retire the handle.
    ///
    /// Returns `None` if `id` is stale.
    pub fn release(&mut self, id: ItemId) -> Option<R> {
        let slot = self.slots.get_mut(id.index())?;
        if !matches!(slot, Slot::Occupied { generation, .. } if *generation == id.generation) {
            return None;
        }
        let freed = Slot::Free {
            generation: slot.generation().wrapping_add(1),
            next_free: self.free_head,
        };
        let Slot::Occupied { record, .. } = std::mem::replace(slot, freed) else {
            return None;
        };
        self.free_head = Some(id.index);
        self.len -= 1;
        Some(record)
    }

    /// Live records with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &R)> + '_ {
        self.slots
            .iter()
            .zip(0u32..)
            .filter_map(|(slot, index)| match slot {
                Slot::Occupied { generation, record } => Some((
                    ItemId {
                        index,
                        generation: *generation,
                    },
                    record,
                )),
                Slot::Free { .. } => None,
            })
    }

    /// Drop every record. Outstanding handles become stale.
    pub fn clear(&mut self) {
        let mut free_head = None;
        for (slot, index) in self.slots.as_mut_slice().iter_mut().zip(0u32..) {
            let generation = slot.generation().wrapping_add(1);
            *slot = Slot::Free {
                generation,
                next_free: free_head,
            };
            free_head = Some(index);
        }
        self.free_head = free_head;
        self.len = 0;
    }
}

impl<R> Default for RecordArena<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: fmt::Debug> fmt::Debug for RecordArena<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
