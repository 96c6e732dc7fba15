//! Growable array with fallible, amortized growth.

use std::borrow::Cow;
use std::collections::TryReserveError;
use std::fmt;
use std::ops::Deref;

/// Minimum number of slots added by a single growth step.
///
/// With a minimum of 1 the policy is pure doubling.
pub const DEFAULT_GROW_SIZE: usize = 1;

/// Error when an array cannot grow to hold the requested items.
///
/// The array that reported the error is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrowError {
    /// `len + additional` does not fit in `usize`.
    #[error("array capacity overflow: {len} items + {additional} more")]
    CapacityOverflow { len: usize, additional: usize },
    /// The allocator refused the request.
    #[error("failed to grow array to {requested} items")]
    AllocFailed {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
    /// An insertion point past the end of the array.
    #[error("insert index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Contiguous, owned, amortized-growth array.
///
/// # Invariant
///
/// `len() <= capacity()`. Growth never shrinks the array; capacity is only
/// released by [`GrowArray::clear_and_free`] or drop.
#[derive(Clone)]
pub struct GrowArray<T> {
    items: Vec<T>,
    /// Minimum slots added per growth step.
    grow_size: usize,
    /// Number of reallocations performed so far.
    grow_count: u32,
}

impl<T> GrowArray<T> {
    /// Create an empty array with no allocation.
    pub const fn new() -> Self {
        Self::with_grow_size(DEFAULT_GROW_SIZE)
    }

    /// Create an empty array that grows by at least `grow_size` slots.
    ///
    /// Small arrays that are known to receive bursts of appends (argument
    /// lists, line tables) use a larger minimum to skip the 1, 2, 4 steps.
    pub const fn with_grow_size(grow_size: usize) -> Self {
        GrowArray {
            items: Vec::new(),
            grow_size: if grow_size == 0 { 1 } else { grow_size },
            grow_count: 0,
        }
    }

    /// Create an empty array with room for `capacity` items.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, GrowError> {
        let mut array = Self::new();
        array.ensure_capacity(capacity)?;
        Ok(array)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    #[inline]
    pub fn grow_size(&self) -> usize {
        self.grow_size
    }

    /// Number of reallocations performed since creation.
    #[inline]
    pub fn grow_count(&self) -> u32 {
        self.grow_count
    }

    /// Returns `true` if `additional` more items fit without reallocating.
    ///
    /// Never mutates; safe to call in hot loops before committing to growth.
    #[inline]
    pub fn has_room(&self, additional: usize) -> bool {
        self.items.capacity() - self.items.len() >= additional
    }

    /// Guarantee room for at least `additional` more items.
    ///
    /// Does nothing when [`has_room`](Self::has_room) already holds.
    #[inline]
    pub fn ensure_capacity(&mut self, additional: usize) -> Result<(), GrowError> {
        if self.has_room(additional) {
            return Ok(());
        }
        self.grow(additional)
    }

    /// Slow path of [`ensure_capacity`](Self::ensure_capacity).
    ///
    /// Target capacity is the largest of the exact requirement, double the
    /// current capacity, and current capacity plus `grow_size`. If the
    /// geometric target cannot be allocated, the exact requirement is tried
    /// before giving up.
    #[cold]
    fn grow(&mut self, additional: usize) -> Result<(), GrowError> {
        let len = self.items.len();
        let cap = self.items.capacity();
        let required = len
            .checked_add(additional)
            .ok_or(GrowError::CapacityOverflow { len, additional })?;
        let target = required
            .max(cap.saturating_mul(2))
            .max(cap.saturating_add(self.grow_size));

        let result = match self.items.try_reserve_exact(target - len) {
            Ok(()) => Ok(()),
            Err(_) if target > required => self.items.try_reserve_exact(additional),
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                self.grow_count += 1;
                tracing::trace!(
                    old_cap = cap,
                    new_cap = self.items.capacity(),
                    len,
                    "grew array"
                );
                Ok(())
            }
            Err(source) => {
                tracing::debug!(required, cap, "array growth failed");
                Err(GrowError::AllocFailed {
                    requested: required,
                    source,
                })
            }
        }
    }

    /// Append one item.
    #[inline]
    pub fn push(&mut self, item: T) -> Result<(), GrowError> {
        self.ensure_capacity(1)?;
        self.items.push(item);
        Ok(())
    }

    /// Insert an item at `index`, shifting later items right.
    ///
    /// `index` may equal `len()`, which appends.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), GrowError> {
        let len = self.items.len();
        if index > len {
            return Err(GrowError::IndexOutOfBounds { index, len });
        }
        self.ensure_capacity(1)?;
        self.items.insert(index, item);
        Ok(())
    }

    /// Remove and return the item at `index`, shifting later items left.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Drop items past `len`. Capacity is kept.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Drop all items. Capacity is kept for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drop all items and release the backing storage.
    pub fn clear_and_free(&mut self) {
        self.items = Vec::new();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> GrowArray<T> {
    /// Append clones of all items in `items`, growing at most once.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), GrowError> {
        self.ensure_capacity(items.len())?;
        self.items.extend_from_slice(items);
        Ok(())
    }
}

impl GrowArray<u8> {
    /// Append a single byte.
    #[inline]
    pub fn append_byte(&mut self, byte: u8) -> Result<(), GrowError> {
        self.push(byte)
    }

    /// Append raw bytes.
    pub fn concat(&mut self, bytes: &[u8]) -> Result<(), GrowError> {
        self.extend_from_slice(bytes)
    }

    pub fn concat_str(&mut self, s: &str) -> Result<(), GrowError> {
        self.concat(s.as_bytes())
    }

    /// View the bytes as text, replacing invalid UTF-8.
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.items)
    }
}

impl<T> Default for GrowArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Adopt an existing vector. Its capacity carries over; no growth is counted.
impl<T> From<Vec<T>> for GrowArray<T> {
    fn from(items: Vec<T>) -> Self {
        GrowArray {
            items,
            grow_size: DEFAULT_GROW_SIZE,
            grow_count: 0,
        }
    }
}

impl<T> Deref for GrowArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> PartialEq for GrowArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for GrowArray<T> {}

impl<T: fmt::Debug> fmt::Debug for GrowArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a GrowArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for GrowArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
