// DefaultAnyKeyMap suite.
//
// Invariants exercised:
// - A missing-key read through the factory stores and returns a fresh value.
// - Without a factory, missing keys are MissingKey and nothing is stored.
// - Present keys never consult the factory.
// - A factory that panics on its trial call is rejected at construction.
// - A factory that panics later leaves the map unchanged.
// - The rest of the surface behaves like AnyKeyMap.
use anykey_map::{AnyKeyError, AnyKeyMap, DefaultAnyKeyMap, Source, Value};
use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

fn empty_list() -> Value {
    Value::list(Vec::<Value>::new())
}

// Test: list-producing factory.
// Verifies: appending through a created entry is visible on the next read.
#[test]
fn factory_creates_and_stores() {
    let mut d: DefaultAnyKeyMap<Value, Value> =
        DefaultAnyKeyMap::new(Some(empty_list), None).expect("valid factory");
    d.get_or_create(Value::from(4))
        .unwrap()
        .as_list_mut()
        .expect("list value")
        .push(Value::from(4));
    assert_eq!(d.get_or_create(Value::from(4)), Ok(&mut Value::list([4])));
    assert_eq!(d.len(), 1);
}

// Test: unhashable keys go through the factory too.
// Verifies: creation lands in the linear partition and keeps order.
#[test]
fn factory_with_unhashable_keys() {
    let mut d: DefaultAnyKeyMap<Value, i32> = DefaultAnyKeyMap::new(Some(|| 0), None).unwrap();
    *d.get_or_create(Value::list([1])).unwrap() += 1;
    *d.get_or_create(Value::from("a")).unwrap() += 2;
    *d.get_or_create(Value::list([1])).unwrap() += 3;
    assert_eq!(d.items(), [(Value::list([1]), 4), (Value::from("a"), 2)]);
}

// Test: present keys bypass the factory.
// Verifies: the call count only moves for absent keys (plus the trial call at construction).
#[test]
fn present_keys_do_not_call_factory() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let mut d: DefaultAnyKeyMap<i32, i32> = DefaultAnyKeyMap::new(
        Some(move || {
            counter.set(counter.get() + 1);
            -1
        }),
        Some(vec![(1, 10)].into()),
    )
    .unwrap();
    assert_eq!(calls.get(), 1, "trial call runs once at construction");
    assert_eq!(*d.get_or_create(1).unwrap(), 10);
    assert_eq!(calls.get(), 1);
    assert_eq!(*d.get_or_create(2).unwrap(), -1);
    assert_eq!(calls.get(), 2);
    assert_eq!(d.get(&3), None, "plain get never creates");
    assert_eq!(calls.get(), 2);
}

// Test: no factory.
// Verifies: MissingKey without side effects; other operations still work.
#[test]
fn without_factory_behaves_like_map() {
    let mut d: DefaultAnyKeyMap<Value, Value> = DefaultAnyKeyMap::without_factory(Some(
        Source::pairs(vec![
            (Value::from(1), Value::from("one")),
            (Value::list([1, 2]), Value::from("one two")),
        ]),
    ));
    assert_eq!(
        d.get_or_create(Value::from(3)),
        Err(AnyKeyError::MissingKey)
    );
    assert_eq!(d.len(), 2);
    d.delete(&Value::list([1, 2])).unwrap();
    assert_eq!(d.keys(), [Value::from(1)]);
    let plain: AnyKeyMap<Value, Value> = [(Value::from(1), Value::from("one"))].into();
    assert!(d == plain);
    assert_eq!(
        format!("{:?}", d),
        "DefaultAnyKeyMap(None, [(1, 'one')])"
    );
}

// Test: factory validation.
// Verifies: a panicking factory gives InvalidFactory.
#[test]
fn panicking_factory_is_invalid() {
    let r: Result<DefaultAnyKeyMap<i32, String>, AnyKeyError> = DefaultAnyKeyMap::new(
        Some(|| -> String { panic!("factory cannot produce a value") }),
        None,
    );
    assert!(matches!(r, Err(AnyKeyError::InvalidFactory)));
}

// Test: copies.
// Verifies: a copy has the same items, keeps the factory, and is
// independent of the source.
#[test]
fn copy_keeps_factory() {
    let mut d: DefaultAnyKeyMap<i32, Vec<i32>> =
        DefaultAnyKeyMap::new(Some(Vec::new), Some(vec![(1, vec![1])].into())).unwrap();
    let mut c = d.copy();
    assert!(c.has_factory());
    assert!(c == d);
    c.get_or_create(2).unwrap().push(2);
    assert_eq!(c.len(), 2);
    assert_eq!(d.len(), 1);
    assert_eq!(d.popitem(), Ok((1, vec![1])));
}

// Test: factory that works on its trial call and panics afterwards.
// Verifies: the failed creation leaves no key in the order or in either
// partition, for hashable and unhashable keys alike.
#[test]
fn factory_panic_leaves_map_unchanged() {
    let mut calls = 0;
    let mut d: DefaultAnyKeyMap<Value, i32> = DefaultAnyKeyMap::new(
        Some(move || {
            calls += 1;
            if calls > 1 {
                panic!("factory exhausted");
            }
            0
        }),
        None,
    )
    .unwrap();
    for key in [Value::from(7), Value::list([7])] {
        let r = catch_unwind(AssertUnwindSafe(|| {
            let _ = d.get_or_create(key.clone());
        }));
        assert!(r.is_err());
        assert_eq!(d.len(), 0);
        assert!(!d.contains(&key));
        assert_eq!(d.get(&key), None);
    }
    assert!(d.keys().is_empty());
    assert!(d.items().is_empty());
    d.set(Value::from(1), 1);
    assert_eq!(d.keys(), [Value::from(1)]);
}

// Test: construction from pairs and the plain read surface.
// Verifies: collected maps have no factory; try_get and indexing read
// without creating.
#[test]
fn conversions_and_plain_reads() {
    let d: DefaultAnyKeyMap<Value, i32> = [(Value::from(1), 1), (Value::list([2]), 2)].into();
    assert!(!d.has_factory());
    assert_eq!(d[&Value::list([2])], 2);
    assert_eq!(d.try_get(&Value::from(3)), Err(AnyKeyError::MissingKey));
    assert_eq!(d.len(), 2);

    let collected: DefaultAnyKeyMap<i32, i32> = (0..3).map(|i| (i, i * i)).collect();
    assert_eq!(collected.values(), [0, 1, 4]);

    let from_vec: DefaultAnyKeyMap<i32, &str> = vec![(1, "one"), (1, "uno")].into();
    assert_eq!(from_vec.items(), [(1, "uno")]);

    let plain: AnyKeyMap<i32, i32> = [(5, 5)].into();
    let mut wrapped = DefaultAnyKeyMap::from(plain.copy());
    assert!(wrapped == plain);
    assert_eq!(wrapped.get_or_create(6), Err(AnyKeyError::MissingKey));
}
