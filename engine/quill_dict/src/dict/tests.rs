#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

/// A record whose key is a number and whose value is a label.
#[derive(Debug, PartialEq)]
struct Register {
    slot: u8,
    label: String,
}

impl Keyed for Register {
    type Key = u8;
    type Value = String;

    fn key(&self) -> &u8 {
        &self.slot
    }

    fn value_mut(&mut self) -> &mut String {
        &mut self.label
    }
}

fn reg(slot: u8, label: &str) -> Register {
    Register {
        slot,
        label: label.to_owned(),
    }
}

// === Insert and lookup ===

#[test]
fn insert_then_get() {
    let mut dict = Dict::new();
    let id = dict.insert(DictItem::new("tabstop", 8)).unwrap();
    assert_eq!(dict.len(), 1);
    assert_eq!(dict.find("tabstop"), Some(id));
    assert_eq!(dict.get("tabstop").map(DictItem::value), Some(&8));
    assert_eq!(dict.get("shiftwidth"), None);
}

#[test]
fn duplicate_key_is_rejected() {
    let mut dict = Dict::new();
    let first = dict.insert(DictItem::new("wrap", true)).unwrap();
    let err = dict.insert(DictItem::new("wrap", false)).unwrap_err();
    assert_eq!(err, DictError::DuplicateKey { existing: first });
    assert_eq!(dict.len(), 1);
    assert_eq!(dict.get("wrap").map(DictItem::value), Some(&true));
}

#[test]
fn key_of_reads_embedded_key() {
    let mut dict = Dict::new();
    let id = dict.insert(DictItem::new("number", ())).unwrap();
    assert_eq!(dict.key_of(id).unwrap(), "number");
    assert_eq!(dict.record_of(id).unwrap().key(), "number");
}

#[test]
fn custom_record_type() {
    let mut dict = Dict::new();
    dict.insert(reg(b'a', "first")).unwrap();
    dict.insert(reg(b'b', "second")).unwrap();
    assert_eq!(dict.get(&b'b'), Some(&reg(b'b', "second")));
    assert!(dict.contains_key(&b'a'));
    assert!(!dict.contains_key(&b'c'));
}

// === Mutation ===

#[test]
fn value_mut_leaves_key_alone() {
    let mut dict = Dict::new();
    dict.insert(reg(b'q', "macro")).unwrap();
    dict.value_mut(&b'q').unwrap().push_str(" recorded");
    assert_eq!(dict.get(&b'q').unwrap().label, "macro recorded");
    assert_eq!(dict.find(&b'q').map(|id| *dict.key_of(id).unwrap()), Some(b'q'));
}

#[test]
fn value_mut_of_handle() {
    let mut dict = Dict::new();
    let id = dict.insert(DictItem::new("count", 1)).unwrap();
    *dict.value_mut_of(id).unwrap() += 1;
    assert_eq!(dict.record_of(id).unwrap().value(), &2);
}

// === Removal ===

#[test]
fn remove_returns_record() {
    let mut dict = Dict::new();
    let id = dict.insert(DictItem::new("list", false)).unwrap();
    let item = dict.remove("list").unwrap();
    assert_eq!(item.key(), "list");
    assert!(!item.into_value());
    assert!(dict.is_empty());
    assert_eq!(dict.find("list"), None);
    assert_eq!(dict.remove("list"), None);
    assert_eq!(dict.record_of(id), Err(DictError::StaleHandle(id)));
}

#[test]
fn stale_handle_does_not_alias_new_record() {
    let mut dict = Dict::new();
    let old = dict.insert(DictItem::new("a", 1)).unwrap();
    dict.remove("a");
    let new = dict.insert(DictItem::new("b", 2)).unwrap();
    // Same slot, different generation.
    assert_eq!(old.index(), new.index());
    assert_eq!(dict.key_of(old), Err(DictError::StaleHandle(old)));
    assert_eq!(dict.key_of(new).unwrap(), "b");
}

#[test]
fn remove_id_clears_table_entry() {
    let mut dict = Dict::new();
    let id = dict.insert(reg(3, "x")).unwrap();
    assert_eq!(dict.remove_id(id).unwrap(), reg(3, "x"));
    assert_eq!(dict.find(&3), None);
    assert_eq!(dict.remove_id(id), Err(DictError::StaleHandle(id)));
    // The key is free again.
    dict.insert(reg(3, "y")).unwrap();
}

#[test]
fn reinsert_after_remove() {
    let mut dict = Dict::new();
    for round in 0..100 {
        dict.insert(DictItem::new("k", round)).unwrap();
        assert_eq!(dict.remove("k").map(DictItem::into_value), Some(round));
    }
    assert!(dict.is_empty());
}

#[test]
fn many_keys_survive_rebuilds() {
    let mut dict = Dict::new();
    let ids: Vec<_> = (0..500)
        .map(|n| dict.insert(DictItem::new(format!("key{n}"), n)).unwrap())
        .collect();
    assert_eq!(dict.len(), 500);
    for (n, id) in ids.iter().enumerate() {
        let key = format!("key{n}");
        assert_eq!(dict.find(&key), Some(*id));
        assert_eq!(dict.key_of(*id).unwrap(), key);
    }
}

#[test]
fn clear_empties_dict() {
    let mut dict = Dict::new();
    let id = dict.insert(DictItem::new("a", 1)).unwrap();
    dict.clear();
    assert!(dict.is_empty());
    assert_eq!(dict.find("a"), None);
    assert_eq!(dict.record_of(id), Err(DictError::StaleHandle(id)));
    dict.insert(DictItem::new("a", 2)).unwrap();
    assert_eq!(dict.get("a").map(DictItem::value), Some(&2));
}

#[test]
fn iter_visits_live_records() {
    let mut dict = Dict::new();
    dict.insert(reg(1, "one")).unwrap();
    dict.insert(reg(2, "two")).unwrap();
    dict.insert(reg(3, "three")).unwrap();
    dict.remove(&2);
    let mut keys: Vec<u8> = dict.iter().map(|r| r.slot).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![1, 3]);
    assert!(dict.iter_ids().all(|(id, r)| dict.key_of(id).unwrap() == &r.slot));
}

#[test]
fn error_messages() {
    let id = Dict::new().insert(reg(0, "")).unwrap();
    assert_eq!(
        DictError::StaleHandle(id).to_string(),
        "stale handle ItemId(0v0)"
    );
}

// === Property tests ===

mod proptest_model {
    use std::collections::HashMap;

    use super::super::{Dict, DictItem};
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        Insert(u8, u32),
        Remove(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..32, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            (0u8..32).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn matches_hash_map(ops in proptest::collection::vec(op(), 0..200)) {
            let mut dict = Dict::new();
            let mut model = HashMap::new();
            for op in ops {
                match op {
                    Op::Insert(k, v) => {
                        let key = k.to_string();
                        let inserted = dict.insert(DictItem::new(key.as_str(), v)).is_ok();
                        prop_assert_eq!(inserted, !model.contains_key(&key));
                        model.entry(key).or_insert(v);
                    }
                    Op::Remove(k) => {
                        let key = k.to_string();
                        let removed = dict.remove(&key).map(DictItem::into_value);
                        prop_assert_eq!(removed, model.remove(&key));
                    }
                }
                prop_assert_eq!(dict.len(), model.len());
            }
            for (key, value) in &model {
                prop_assert_eq!(dict.get(key).map(DictItem::value), Some(value));
            }
        }
    }
}
