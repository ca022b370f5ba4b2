#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use chainmap::ChainedHashMap;
use criterion::{criterion_group, criterion_main, Criterion};
use proptest::{ prelude::{ any, Strategy}, strategy::ValueTree, test_runner::TestRunner};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn hash_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = any::<[(String, String); ITEMS_AMOUNT]>()
    .new_tree(&mut runner)
    .unwrap()
    .current();


    let mut group = c.benchmark_group("Chained hash map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    let mut chained_map = ChainedHashMap::new();
    let mut rust_map = HashMap::new();
    group.bench_function("chainmap insert", |b| {
        b.iter(
            || {
            for (key, value) in items.clone() {
                chained_map.insert(key, value);
            }

        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(
            || {
            for (key, value) in items.clone() {
                rust_map.insert(key, value);
            }

        });
    });
    group.bench_function("chainmap get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = chained_map.get(key);
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = rust_map.get(key);
            }
        });
    });
    group.finish();
}

// Fill and drain a table so every iteration walks through both the growth
// resizes and the shrink back to the initial capacity
fn resize_churn_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resize churn benchmark");
    group.sample_size(SAMPLE_SIZE);
    let keys: Vec<String> = (0..ITEMS_AMOUNT).map(|i| format!("key-{i}")).collect();
    group.bench_function("chainmap grow and shrink cycle", |b| {
        b.iter(|| {
            let mut map = ChainedHashMap::new();
            for (i, key) in keys.iter().enumerate() {
                map.insert(key.clone(), i);
            }
            for key in &keys {
                let _ = map.remove(key);
            }
        });
    });
    group.finish();
}

criterion_group!(benches, hash_map_benches, resize_churn_benches);

criterion_main!(benches);
