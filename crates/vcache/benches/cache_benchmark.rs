//! Cache facade benchmarks.
//!
//! ```bash
//! cargo bench --package vcache
//! cargo bench --package vcache -- encode
//! ```
//!
//! Store round trips run against the in-memory store, so the numbers cover
//! the facade's own overhead (hashing, composition, context handling) rather
//! than network latency.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde::Serialize;
use vcache::{CacheHandle, CallContext, KeyEncoder, Md5KeyEncoder, MemoryStore, Structured, ToCacheKey};
use vcache_config::CacheSettings;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Foo {
    x: i32,
    y: String,
}

fn foo() -> Structured<Foo> {
    Structured(Foo {
        x: 3,
        y: "world".to_string(),
    })
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    group.bench_function("raw", |b| {
        b.iter(|| {
            let key = black_box("user:12345").to_cache_key().unwrap();
            Md5KeyEncoder.encode(&key).unwrap()
        })
    });

    let structured = foo();
    group.bench_function("structured", |b| {
        b.iter(|| {
            let key = black_box(&structured).to_cache_key().unwrap();
            Md5KeyEncoder.encode(&key).unwrap()
        })
    });

    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let settings = CacheSettings {
        metrics_enabled: false,
        ..CacheSettings::default()
    };
    let cache = runtime
        .block_on(CacheHandle::new(MemoryStore::new(), settings))
        .unwrap();
    let ctx = CallContext::background();
    let key = foo();
    let (cache, ctx, key) = (&cache, &ctx, &key);

    let mut group = c.benchmark_group("round_trip");
    for size in [64usize, 64 * 1000] {
        let value = "a".repeat(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("set", size), &value, |b, value| {
            b.to_async(&runtime)
                .iter(move || async move { cache.set(ctx, "myprefix", key, value).await.unwrap() })
        });

        runtime.block_on(cache.set(ctx, "myprefix", key, &value)).unwrap();
        group.bench_with_input(BenchmarkId::new("get", size), &value, |b, _| {
            b.to_async(&runtime).iter(move || async move {
                let hit = cache.get(ctx, "myprefix", key).await.unwrap();
                assert!(hit.is_some());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_round_trip);
criterion_main!(benches);
