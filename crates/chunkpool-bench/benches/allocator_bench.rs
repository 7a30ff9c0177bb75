//! Allocator benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use chunkpool::{ChunkAllocator, FixedPoolAllocator, GrowableAllocator, SyncAllocator};

fn bench_allocate_deallocate_cycle(c: &mut Criterion) {
    let chunk_sizes: &[usize] = &[16, 64, 256, 1024];
    let mut group = c.benchmark_group("allocate_deallocate_cycle");

    for &chunk_size in chunk_sizes {
        group.bench_with_input(
            BenchmarkId::new("fixed_pool", chunk_size),
            &chunk_size,
            |b, &sz| {
                let mut buf = vec![0u8; sz * 64];
                let mut pool = FixedPoolAllocator::new(&mut buf, sz);
                b.iter(|| {
                    let chunk = pool.allocate();
                    pool.deallocate(criterion::black_box(chunk));
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("growable", chunk_size),
            &chunk_size,
            |b, &sz| {
                let mut alloc = GrowableAllocator::new(sz, 64);
                b.iter(|| {
                    let chunk = alloc.allocate();
                    alloc.deallocate(criterion::black_box(chunk));
                });
            },
        );
    }
    group.finish();
}

fn bench_sync_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_decorator");

    group.bench_function("uncontended_cycle", |b| {
        let alloc = SyncAllocator::new(GrowableAllocator::new(256, 64));
        b.iter(|| {
            let chunk = alloc.allocate();
            alloc.deallocate(criterion::black_box(chunk));
        });
    });

    group.bench_function("introspection", |b| {
        let alloc = SyncAllocator::new(GrowableAllocator::new(256, 64));
        b.iter(|| criterion::black_box(alloc.in_use()));
    });

    group.finish();
}

criterion_group!(benches, bench_allocate_deallocate_cycle, bench_sync_overhead);
criterion_main!(benches);
