//! Criterion micro-benchmarks for pooled versus heap block allocation.

use std::alloc::Layout;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use slabrun_alloc::{Allocator, ArenaRegistry, Heap, RegistryRef};

/// Benchmark: 10K allocate/free cycles of one 24-byte block.
fn bench_pool_cycle_10k(c: &mut Criterion) {
    let registry = ArenaRegistry::new();
    let alloc = RegistryRef::new(&registry);
    let layout = Layout::new::<[u64; 3]>();
    c.bench_function("pool_cycle_10k", |b| {
        b.iter(|| {
            for _ in 0..10_000 {
                let block = alloc.allocate(layout).unwrap();
                unsafe { alloc.deallocate(black_box(block), layout) };
            }
        });
    });
}

/// Benchmark: the same cycle against the global heap.
fn bench_heap_cycle_10k(c: &mut Criterion) {
    let layout = Layout::new::<[u64; 3]>();
    c.bench_function("heap_cycle_10k", |b| {
        b.iter(|| {
            for _ in 0..10_000 {
                let block = Heap.allocate(layout).unwrap();
                unsafe { Heap.deallocate(black_box(block), layout) };
            }
        });
    });
}

/// Benchmark: hold 1K blocks, then release them all.
fn bench_pool_batch_1k(c: &mut Criterion) {
    let registry = ArenaRegistry::new();
    let alloc = RegistryRef::new(&registry);
    let layout = Layout::new::<[u32; 4]>();
    let mut held = Vec::with_capacity(1000);
    c.bench_function("pool_batch_1k", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                held.push(alloc.allocate(layout).unwrap());
            }
            for block in held.drain(..) {
                unsafe { alloc.deallocate(block, layout) };
            }
        });
    });
}

criterion_group!(
    benches,
    bench_pool_cycle_10k,
    bench_heap_cycle_10k,
    bench_pool_batch_1k
);
criterion_main!(benches);
