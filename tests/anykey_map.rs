// AnyKeyMap integration suite.
//
// Each test documents what behavior is being verified. The core
// invariants exercised:
// - Uniqueness: one entry per distinct key by equality, whatever the mix of
//   hashable and unhashable keys.
// - Order stability: replacing a value keeps the key's position; new keys
//   append at the end.
// - Order-independent equality against this crate's maps and std maps.
// - Copies are independent of their source.
// - Partition transparency: reads, deletes and membership behave the same
//   whichever partition holds the key.
use anykey_map::{AnyKeyError, AnyKeyMap, Source, Value};
use std::collections::{BTreeMap, HashMap};

fn v(s: &str) -> Value {
    Value::from(s)
}

fn scenario_map() -> AnyKeyMap<Value, Value> {
    let mut d = AnyKeyMap::new();
    d.set(Value::from(1), v("one"));
    d.set(Value::from(2), v("two"));
    d.set(Value::list([1, 2]), v("one two"));
    d
}

// Test: mixed hashable and unhashable keys share one order.
// Verifies: length, keys and values after three inserts.
#[test]
fn mixed_keys_keep_insertion_order() {
    let d = scenario_map();
    assert_eq!(d.len(), 3);
    assert_eq!(
        d.keys(),
        [Value::from(1), Value::from(2), Value::list([1, 2])]
    );
    assert_eq!(d.values(), [v("one"), v("two"), v("one two")]);
    assert_eq!(d.hashed_len(), 2);
    assert_eq!(d.linear_len(), 1);
}

// Test: deleting an unhashable key.
// Verifies: the key leaves the order and the remaining order is unchanged.
#[test]
fn delete_unhashable_key() {
    let mut d = scenario_map();
    d.delete(&Value::list([1, 2])).expect("present");
    assert_eq!(d.keys(), [Value::from(1), Value::from(2)]);
    assert_eq!(d.delete(&Value::list([1, 2])), Err(AnyKeyError::MissingKey));
}

// Test: reads of a missing key.
// Verifies: a default is returned when supplied; otherwise MissingKey.
#[test]
fn missing_key_reads() {
    let d = scenario_map();
    let nan = v("NaN");
    assert_eq!(d.get_or(&Value::from(3), &nan), &v("NaN"));
    assert_eq!(d.try_get(&Value::from(3)), Err(AnyKeyError::MissingKey));
    assert_eq!(d.get(&Value::from(3)), None);
    assert_eq!(d[&Value::from(1)], v("one"));
}

// Test: uniqueness under repeated sets.
// Verifies: length counts distinct keys; the later value wins in place.
#[test]
fn repeated_sets_count_distinct_keys() {
    let mut d: AnyKeyMap<Value, i32> = AnyKeyMap::new();
    for round in 0..3 {
        d.set(Value::list([1]), round);
        d.set(Value::from("a"), round);
        d.set(Value::tuple([Value::list([2])]), round);
    }
    assert_eq!(d.len(), 3);
    assert_eq!(d.linear_len(), 2);
    assert_eq!(d.values(), [2, 2, 2]);
    d.set(Value::from("b"), 9);
    assert_eq!(d.keys().iter().last(), Some(&Value::from("b")));
}

// Test: equality is order independent.
// Verifies: maps built from P and reversed(P) compare equal, and compare
// equal to std maps with the same contents.
#[test]
fn equality_ignores_order() {
    let pairs = vec![(1, "one"), (2, "two"), (3, "three")];
    let a: AnyKeyMap<i32, &str> = pairs.iter().copied().collect();
    let b: AnyKeyMap<i32, &str> = pairs.iter().rev().copied().collect();
    assert_eq!(a, b);

    let h: HashMap<i32, &str> = pairs.iter().copied().collect();
    let t: BTreeMap<i32, &str> = pairs.iter().copied().collect();
    assert!(a == h);
    assert!(a == t);

    let mut c = a.copy();
    c.set(3, "THREE");
    assert!(a != c);
    c.delete(&3).unwrap();
    assert!(a != c);
}

// Test: copies are independent.
// Verifies: copy() == source, and mutating the copy leaves the source alone.
#[test]
fn copy_is_independent() {
    let d = scenario_map();
    let mut c = d.copy();
    assert_eq!(c, d);
    c.set(Value::from(4), v("four"));
    if let Some(x) = c.get_mut(&Value::list([1, 2])) {
        *x = v("changed");
    }
    assert_eq!(d.len(), 3);
    assert_eq!(d.get(&Value::list([1, 2])), Some(&v("one two")));
    assert_ne!(c, d);
}

// Test: partition transparency.
// Verifies: get/delete/contains give the same answers for a hashable and an
// unhashable key holding the same value.
#[test]
fn partitions_behave_alike() {
    let mut d: AnyKeyMap<Value, i32> = AnyKeyMap::new();
    let keys = [Value::tuple([1, 2]), Value::list([1, 2])];
    for k in &keys {
        d.set(k.clone(), 7);
    }
    for k in &keys {
        assert!(d.contains(k));
        assert_eq!(d.get(k), Some(&7));
        assert_eq!(d.pop(k), Ok(7));
        assert!(!d.contains(k));
        assert_eq!(d.pop(k), Err(AnyKeyError::MissingKey));
    }
    assert!(d.is_empty());
}

// Test: construction and update sources.
// Verifies: pair sources apply in order; mapping sources are walked through
// their key list; None is empty / a no-op.
#[test]
fn sources_and_update() {
    let empty: AnyKeyMap<i32, i32> = AnyKeyMap::from_source(None);
    assert!(empty.is_empty());

    let mut d: AnyKeyMap<i32, &str> =
        AnyKeyMap::from_source(Some(vec![(1, "a"), (2, "b"), (1, "A")].into()));
    assert_eq!(d.items(), [(1, "A"), (2, "b")]);

    let other: AnyKeyMap<i32, &str> = [(3, "c"), (2, "B")].into();
    d.update(Some(Source::mapping(&other)));
    assert_eq!(d.items(), [(1, "A"), (2, "B"), (3, "c")]);

    d.update(None);
    assert_eq!(d.len(), 3);

    let fresh: AnyKeyMap<i32, &str> = AnyKeyMap::from_source(Some(Source::mapping(&d)));
    assert_eq!(fresh.keys(), [1, 2, 3]);
}

// Test: setdefault, fromkeys, pop_or and clear.
// Verifies: setdefault stores only for absent keys and returns the stored
// value; fromkeys shares one value; clear empties both partitions.
#[test]
fn setdefault_fromkeys_clear() {
    let mut d: AnyKeyMap<Value, i32> =
        AnyKeyMap::fromkeys([Value::from("x"), Value::list([0])], 0);
    assert_eq!(d.values(), [0, 0]);
    assert_eq!(*d.setdefault(Value::from("x"), 5), 0);
    assert_eq!(*d.setdefault(Value::from("y"), 5), 5);
    assert_eq!(d.pop_or(&Value::from("zz"), -1), -1);
    d.clear();
    assert_eq!((d.len(), d.hashed_len(), d.linear_len()), (0, 0, 0));
}

// Test: rendering.
// Verifies: `{k: v, ...}` in insertion order with literal-style quoting.
#[test]
fn debug_rendering() {
    let d = scenario_map();
    assert_eq!(
        format!("{:?}", d),
        "{1: 'one', 2: 'two', [1, 2]: 'one two'}"
    );
    let empty: AnyKeyMap<Value, Value> = AnyKeyMap::new();
    assert_eq!(format!("{:?}", empty), "{}");
}

// Test: nested maps as values and frozen maps as keys.
// Verifies: a frozen dict is a hashable key; a mutable dict is not.
#[test]
fn nested_maps() {
    let inner: AnyKeyMap<Value, Value> = [(Value::from(1), v("one"))].into();
    let frozen = anykey_map::FrozenAnyKeyMap::from_map(inner.copy());
    let mut d: AnyKeyMap<Value, Value> = AnyKeyMap::new();
    d.set(Value::FrozenDict(frozen.clone()), v("frozen"));
    d.set(Value::Dict(inner.clone()), v("dict"));
    assert_eq!(d.hashed_len(), 1);
    assert_eq!(d.linear_len(), 1);
    assert_eq!(d.get(&Value::FrozenDict(frozen)), Some(&v("frozen")));
}
