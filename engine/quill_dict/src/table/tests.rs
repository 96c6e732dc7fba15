#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::RecordArena;
use pretty_assertions::assert_eq;

/// Issue `n` distinct handles from a throwaway arena.
fn ids(n: usize) -> Vec<ItemId> {
    let mut arena = RecordArena::new();
    (0..n).map(|i| arena.alloc(i).unwrap()).collect()
}

#[test]
fn empty_table_finds_nothing() {
    let table = KeyTable::new();
    assert!(table.is_empty());
    assert_eq!(table.capacity(), 0);
    assert_eq!(table.find(42, |_| true), None);
}

#[test]
fn first_insert_allocates_minimum() {
    let id = ids(1)[0];
    let mut table = KeyTable::new();
    table.insert(7, id).unwrap();
    assert_eq!(table.capacity(), MIN_SLOTS);
    assert_eq!(table.find(7, |found| found == id), Some(id));
    assert_eq!(table.len(), 1);
}

#[test]
fn matcher_only_sees_equal_hashes() {
    let handles = ids(2);
    let mut table = KeyTable::new();
    table.insert(1, handles[0]).unwrap();
    table.insert(2, handles[1]).unwrap();
    let mut seen = Vec::new();
    table.find(2, |id| {
        seen.push(id);
        true
    });
    assert_eq!(seen, vec![handles[1]]);
}

#[test]
fn colliding_hashes_are_told_apart_by_matcher() {
    let handles = ids(3);
    let mut table = KeyTable::new();
    for &id in &handles {
        table.insert(5, id).unwrap();
    }
    for &id in &handles {
        assert_eq!(table.find(5, |found| found == id), Some(id));
    }
}

#[test]
fn probe_continues_past_tombstone() {
    let handles = ids(2);
    let mut table = KeyTable::new();
    // Same home slot: the second entry sits behind the first.
    table.insert(3, handles[0]).unwrap();
    table.insert(3, handles[1]).unwrap();
    assert_eq!(table.remove(3, |id| id == handles[0]), Some(handles[0]));
    assert_eq!(table.find(3, |id| id == handles[1]), Some(handles[1]));
    assert_eq!(table.find(3, |id| id == handles[0]), None);
    assert_eq!(table.len(), 1);
}

#[test]
fn remove_missing_is_none() {
    let handles = ids(1);
    let mut table = KeyTable::new();
    table.insert(9, handles[0]).unwrap();
    assert_eq!(table.remove(10, |_| true), None);
    assert_eq!(table.remove(9, |_| false), None);
    assert_eq!(table.len(), 1);
}

#[test]
fn load_stays_under_two_thirds() {
    let handles = ids(200);
    let mut table = KeyTable::new();
    for (hash, &id) in (0u64..).zip(&handles) {
        table.insert(hash.wrapping_mul(0x9E37_79B9_7F4A_7C15), id).unwrap();
        assert!(table.len() * 3 <= table.capacity() * 2);
        assert!(table.capacity().is_power_of_two());
    }
    let mut stored: Vec<_> = table.ids().collect();
    stored.sort_by_key(|id| id.index());
    assert_eq!(stored, handles);
}

#[test]
fn churn_does_not_grow_without_bound() {
    let handles = ids(1);
    let mut table = KeyTable::new();
    for hash in 0..1000u64 {
        table.insert(hash, handles[0]).unwrap();
        table.remove(hash, |_| true).unwrap();
    }
    assert!(table.is_empty());
    // Tombstones are swept on rebuild, so the array stays small.
    assert_eq!(table.capacity(), MIN_SLOTS);
}

#[test]
fn clear_releases_slots() {
    let handles = ids(4);
    let mut table = KeyTable::new();
    for (hash, &id) in (0u64..).zip(&handles) {
        table.insert(hash, id).unwrap();
    }
    table.clear();
    assert!(table.is_empty());
    assert_eq!(table.capacity(), 0);
    assert_eq!(table.ids().count(), 0);
}
