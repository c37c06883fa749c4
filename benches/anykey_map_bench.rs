use anykey_map::{AnyKeyMap, Value};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

// Unhashable keys: lists of small integers.
fn list_key(n: u64) -> Value {
    Value::list((0..4).map(|i| ((n >> (i * 16)) & 0xffff) as i64))
}

fn bench_set_hashed(c: &mut Criterion) {
    c.bench_function("anykey_map_set_hashed_10k", |b| {
        b.iter_batched(
            || AnyKeyMap::<String, u64>::new(),
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.set(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("anykey_map_get_hit", |b| {
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        let m: AnyKeyMap<String, u64> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, k)| (k, i as u64))
            .collect();
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("anykey_map_get_miss", |b| {
        let m: AnyKeyMap<String, u64> = lcg(11)
            .take(10_000)
            .enumerate()
            .map(|(i, x)| (key(x), i as u64))
            .collect();
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in map
            let k = key(miss.next().unwrap());
            black_box(m.get(&k));
        })
    });
}

// Linear partition: O(n) per operation, so keep n small.
fn bench_set_get_unhashed(c: &mut Criterion) {
    c.bench_function("anykey_map_set_get_unhashed_500", |b| {
        let keys: Vec<Value> = lcg(3).take(500).map(list_key).collect();
        b.iter_batched(
            || AnyKeyMap::<Value, usize>::new(),
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    m.set(k.clone(), i);
                }
                for k in &keys {
                    black_box(m.get(k));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iterate(c: &mut Criterion) {
    c.bench_function("anykey_map_iterate_mixed_1k", |b| {
        let mut m: AnyKeyMap<Value, u64> = AnyKeyMap::new();
        for (i, x) in lcg(5).take(1_000).enumerate() {
            let k = if i % 10 == 0 {
                list_key(x)
            } else {
                Value::from(key(x))
            };
            m.set(k, x);
        }
        b.iter(|| {
            let sum = m.iter().fold(0u64, |acc, (_, v)| acc.wrapping_add(*v));
            black_box(sum);
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_set_hashed, bench_get_hit, bench_get_miss, bench_set_get_unhashed, bench_iterate
}
criterion_main!(benches);
