#![cfg(test)]

// Property tests for AnyKeyMap kept inside the crate so the partition
// counters and ledger can be checked against a plain ordered model.

use crate::{AnyKey, AnyKeyError, AnyKeyMap, Value};
use proptest::prelude::*;
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking. The flag picks the key's
// shape: `true` is an unhashable list, `false` a hashable string.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, bool, i32),
    GetOrInsert(usize, bool, i32),
    Delete(usize, bool),
    Pop(usize, bool),
    Get(usize, bool),
    Contains(usize, bool),
    PopItem,
    Iterate,
}

fn key_from(pool: &[String], i: usize, list: bool) -> Value {
    let s = &pool[i];
    if list {
        Value::list(s.bytes().map(i64::from))
    } else {
        Value::from(s.as_str())
    }
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-d]{0,3}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<bool>(), any::<i32>()).prop_map(|(i, l, v)| OpI::Set(i, l, v)),
            (idx.clone(), any::<bool>(), any::<i32>()).prop_map(|(i, l, v)| OpI::Set(i, l, v)),
            (idx.clone(), any::<bool>(), any::<i32>())
                .prop_map(|(i, l, v)| OpI::GetOrInsert(i, l, v)),
            (idx.clone(), any::<bool>()).prop_map(|(i, l)| OpI::Delete(i, l)),
            (idx.clone(), any::<bool>()).prop_map(|(i, l)| OpI::Pop(i, l)),
            (idx.clone(), any::<bool>()).prop_map(|(i, l)| OpI::Get(i, l)),
            (idx.clone(), any::<bool>()).prop_map(|(i, l)| OpI::Contains(i, l)),
            Just(OpI::PopItem),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn model_pos(model: &[(Value, i32)], k: &Value) -> Option<usize> {
    model.iter().position(|(mk, _)| mk == k)
}

// Runs one scenario against an ordered Vec model. Invariants exercised:
// - `set` replaces in place and appends new keys at the end.
// - `get`/`contains` parity regardless of the partition holding the key.
// - `delete`/`pop` remove from both the partition and the order.
// - `popitem` takes the most recently inserted entry.
// - `len` equals the partition sizes summed, and the ledger order matches
//   the model after every op.
fn run_scenario<S: BuildHasher>(
    mut sut: AnyKeyMap<Value, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: Vec<(Value, i32)> = Vec::new();
    for op in ops {
        match op {
            OpI::Set(i, l, v) => {
                let k = key_from(pool, i, l);
                let prev = sut.set(k.clone(), v);
                match model_pos(&model, &k) {
                    Some(p) => {
                        prop_assert_eq!(prev, Some(model[p].1));
                        model[p].1 = v;
                    }
                    None => {
                        prop_assert_eq!(prev, None);
                        model.push((k, v));
                    }
                }
            }
            OpI::GetOrInsert(i, l, v) => {
                let k = key_from(pool, i, l);
                let mut ran = false;
                let got = *sut.get_or_insert_with(k.clone(), || {
                    ran = true;
                    v
                });
                match model_pos(&model, &k) {
                    Some(p) => {
                        prop_assert!(!ran, "constructor must not run for a present key");
                        prop_assert_eq!(got, model[p].1);
                    }
                    None => {
                        prop_assert!(ran);
                        prop_assert_eq!(got, v);
                        model.push((k, v));
                    }
                }
            }
            OpI::Delete(i, l) => {
                let k = key_from(pool, i, l);
                let r = sut.delete(&k);
                match model_pos(&model, &k) {
                    Some(p) => {
                        prop_assert_eq!(r, Ok(()));
                        model.remove(p);
                    }
                    None => prop_assert_eq!(r, Err(AnyKeyError::MissingKey)),
                }
            }
            OpI::Pop(i, l) => {
                let k = key_from(pool, i, l);
                let r = sut.pop(&k);
                match model_pos(&model, &k) {
                    Some(p) => prop_assert_eq!(r, Ok(model.remove(p).1)),
                    None => prop_assert_eq!(r, Err(AnyKeyError::MissingKey)),
                }
            }
            OpI::Get(i, l) => {
                let k = key_from(pool, i, l);
                let expected = model_pos(&model, &k).map(|p| &model[p].1);
                prop_assert_eq!(sut.get(&k), expected);
            }
            OpI::Contains(i, l) => {
                let k = key_from(pool, i, l);
                prop_assert_eq!(sut.contains(&k), model_pos(&model, &k).is_some());
            }
            OpI::PopItem => {
                let r = sut.popitem();
                match model.pop() {
                    Some(entry) => prop_assert_eq!(r, Ok(entry)),
                    None => prop_assert_eq!(r, Err(AnyKeyError::MissingKey)),
                }
            }
            OpI::Iterate => {
                let items: Vec<(Value, i32)> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(items, model.clone());
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.len(), sut.hashed_len() + sut.linear_len());
        let unhashable = model.iter().filter(|(k, _)| !k.is_hashable()).count();
        prop_assert_eq!(sut.linear_len(), unhashable);
        let keys: Vec<Value> = sut.keys().iter().cloned().collect();
        let model_keys: Vec<Value> = model.iter().map(|(k, _)| k.clone()).collect();
        prop_assert_eq!(keys, model_keys);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(AnyKeyMap::new(), &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same invariants under worst-case collision behavior, so every
// hashed lookup falls back to equality probing in the index.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(AnyKeyMap::with_hasher(ConstBuildHasher), &pool, ops)?;
    }
}
