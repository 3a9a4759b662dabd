//! Debouncer re-arm benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use debounce::{Debouncer, KeyedDebouncer};
use std::time::Duration;

fn bench_rearm(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
        .unwrap();

    // Window far longer than a bench iteration, so every call supersedes
    let debouncer = Debouncer::with_handle(
        runtime.handle().clone(),
        Duration::from_secs(60),
        |value: u64| {
            black_box(value);
        },
    );

    c.bench_function("debouncer_call_supersede", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            debouncer.call(black_box(i));
        });
    });

    let keyed = KeyedDebouncer::with_handle(
        runtime.handle().clone(),
        Duration::from_secs(60),
        |key: u64, value: u64| {
            black_box((key, value));
        },
    );

    c.bench_function("keyed_call_64_keys", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            keyed.call(black_box(i % 64), black_box(i));
        });
    });

    debouncer.cancel();
    keyed.cancel_all();
}

criterion_group!(benches, bench_rearm);
criterion_main!(benches);
