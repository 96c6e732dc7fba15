//! Named marks.
//!
//! A mark is a name bound to a [`Position`]. Marks are stored in a
//! [`Dict`] keyed by the name embedded in each [`Mark`], and follow line
//! insertions and deletions through the `adjust_for_*` calls.

use std::cmp::Ordering;

use quill_dict::{Dict, ItemId, Keyed};
use quill_pos::Position;

use crate::BufferError;

/// A named position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mark {
    name: Box<str>,
    pos: Position,
}

impl Mark {
    pub fn new(name: impl Into<Box<str>>, pos: Position) -> Self {
        Mark {
            name: name.into(),
            pos,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn pos(&self) -> Position {
        self.pos
    }
}

impl Keyed for Mark {
    type Key = str;
    type Value = Position;

    fn key(&self) -> &str {
        &self.name
    }

    fn value_mut(&mut self) -> &mut Position {
        &mut self.pos
    }
}

/// The marks of one buffer.
#[derive(Debug, Default)]
pub struct MarkTable {
    marks: Dict<Mark>,
}

impl MarkTable {
    pub const fn new() -> Self {
        MarkTable { marks: Dict::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Bind `name` to `pos`, moving the mark if it already exists.
    pub fn set(&mut self, name: &str, pos: Position) -> Result<(), BufferError> {
        if let Some(slot) = self.marks.value_mut(name) {
            *slot = pos;
            return Ok(());
        }
        self.marks.insert(Mark::new(name, pos))?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Position> {
        self.marks.get(name).map(Mark::pos)
    }

    /// Forget `name`, returning where it pointed.
    pub fn remove(&mut self, name: &str) -> Option<Position> {
        self.marks.remove(name).map(|mark| mark.pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mark> + '_ {
        self.marks.iter()
    }

    /// Update marks after line `lnum` was deleted.
    ///
    /// Marks on the deleted line are removed and marks below it move up one
    /// line. Returns how many marks were removed. Line 0 never exists, so
    /// `lnum == 0` changes nothing.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn adjust_for_deleted_line(&mut self, lnum: u32) -> Result<usize, BufferError> {
        if lnum == 0 {
            return Ok(0);
        }
        let mut dropped: Vec<ItemId> = Vec::new();
        let mut shifted: Vec<ItemId> = Vec::new();
        for (id, mark) in self.marks.iter_ids() {
            match mark.pos.line.cmp(&lnum) {
                Ordering::Equal => dropped.push(id),
                Ordering::Greater => shifted.push(id),
                Ordering::Less => {}
            }
        }
        for id in shifted {
            self.marks.value_mut_of(id)?.line -= 1;
        }
        for &id in &dropped {
            self.marks.remove_id(id)?;
        }
        tracing::trace!(dropped = dropped.len(), "adjusted marks");
        Ok(dropped.len())
    }

    /// Update marks after a line was inserted so that it became line `lnum`.
    ///
    /// Marks at or below `lnum` move down one line. `lnum == 0` changes
    /// nothing.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn adjust_for_inserted_line(&mut self, lnum: u32) -> Result<(), BufferError> {
        if lnum == 0 {
            return Ok(());
        }
        let shifted: Vec<ItemId> = self
            .marks
            .iter_ids()
            .filter(|(_, mark)| mark.pos.line >= lnum && !mark.pos.is_empty())
            .map(|(id, _)| id)
            .collect();
        for id in shifted {
            let pos = self.marks.value_mut_of(id)?;
            pos.line = pos.line.saturating_add(1);
        }
        Ok(())
    }
}
