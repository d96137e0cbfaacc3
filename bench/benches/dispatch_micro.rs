//! Dispatch microbenchmarks using Criterion.
//!
//! These benchmarks measure individual event set operations in isolation:
//! - Raise with a growing number of subscribers
//! - Raise on a key nobody subscribed to
//! - Subscribe/unsubscribe round trips
//! - Raise from several threads against one set

use std::{hint::black_box, thread};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use eventset::{Channel, EventKey, EventSet};
use eventset_bench::payloads::{Bench, Hits, Reading, Tick, counting, reading};

// =============================================================================
// Raise Benchmarks
// =============================================================================

fn bench_raise(c: &mut Criterion) {
    let mut group = c.benchmark_group("raise");

    for handlers in [1, 8, 64] {
        group.throughput(Throughput::Elements(handlers as u64));

        group.bench_with_input(BenchmarkId::new("tick", handlers), &handlers, |b, &n| {
            let set = EventSet::<Bench>::new();
            let key = EventKey::named("tick");
            let hits = Hits::default();
            for _ in 0..n {
                set.add(&key, counting(&hits)).unwrap();
            }

            b.iter(|| black_box(set.raise(&key, &Bench, &Tick(1)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("reading", handlers), &handlers, |b, &n| {
            let set = EventSet::<Bench>::new();
            let key = EventKey::named("reading");
            let hits = Hits::default();
            for _ in 0..n {
                set.add(&key, reading(&hits)).unwrap();
            }
            let payload = Reading {
                sensor: "boiler".to_string(),
                value: 71.5,
            };

            b.iter(|| black_box(set.raise(&key, &Bench, &payload).unwrap()));
        });

        // Single-event producer, no key lookup
        group.bench_with_input(BenchmarkId::new("channel", handlers), &handlers, |b, &n| {
            let channel = Channel::<Bench, Tick>::named("tick");
            let hits = Hits::default();
            for _ in 0..n {
                channel.subscribe(counting(&hits));
            }

            b.iter(|| black_box(channel.raise(&Bench, &Tick(1)).unwrap()));
        });
    }

    group.finish();
}

fn bench_raise_unsubscribed(c: &mut Criterion) {
    let mut group = c.benchmark_group("raise_unsubscribed");

    for channels in [0, 16, 1_024] {
        group.bench_with_input(BenchmarkId::new("miss", channels), &channels, |b, &n| {
            let set = EventSet::<Bench>::with_capacity(n);
            let hits = Hits::default();
            let keys: Vec<_> = (0..n).map(|_| EventKey::new()).collect();
            for key in &keys {
                set.add(key, counting(&hits)).unwrap();
            }
            let silent = EventKey::named("silent");

            b.iter(|| black_box(set.raise(&silent, &Bench, &Tick(1)).unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// Subscription Benchmarks
// =============================================================================

fn bench_add_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_remove");

    // Existing subscribers on the key; add/remove copies the chain.
    for existing in [0, 8, 64] {
        group.bench_with_input(
            BenchmarkId::new("round_trip", existing),
            &existing,
            |b, &n| {
                let set = EventSet::<Bench>::new();
                let key = EventKey::named("churn");
                let hits = Hits::default();
                for _ in 0..n {
                    set.add(&key, counting(&hits)).unwrap();
                }
                let handler = counting(&hits);

                b.iter(|| {
                    set.add(&key, handler.clone()).unwrap();
                    black_box(set.remove(&key, &handler));
                });
            },
        );
    }

    group.bench_function("remove_absent", |b| {
        let set = EventSet::<Bench>::new();
        let key = EventKey::named("absent");
        let hits = Hits::default();
        set.add(&key, counting(&hits)).unwrap();
        let stranger = counting(&hits);

        b.iter(|| black_box(set.remove(&key, &stranger)));
    });

    group.finish();
}

// =============================================================================
// Concurrency Benchmarks
// =============================================================================

fn bench_concurrent_raise(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_raise");
    const RAISES_PER_THREAD: usize = 1_000;

    for threads in [1, 2, 4] {
        group.throughput(Throughput::Elements((threads * RAISES_PER_THREAD) as u64));

        group.bench_with_input(BenchmarkId::new("shared_key", threads), &threads, |b, &n| {
            let set = EventSet::<Bench>::new();
            let key = EventKey::named("shared");
            let hits = Hits::default();
            for _ in 0..8 {
                set.add(&key, counting(&hits)).unwrap();
            }

            b.iter(|| {
                thread::scope(|scope| {
                    for _ in 0..n {
                        scope.spawn(|| {
                            for _ in 0..RAISES_PER_THREAD {
                                black_box(set.raise(&key, &Bench, &Tick(1)).unwrap());
                            }
                        });
                    }
                });
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_raise,
    bench_raise_unsubscribed,
    bench_add_remove,
    bench_concurrent_raise
);
criterion_main!(benches);
