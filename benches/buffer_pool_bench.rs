use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

use pagepool::{BufferPoolManager, PageFile, PageId, ReplacementStrategy};

const STRATEGIES: [ReplacementStrategy; 4] = [
    ReplacementStrategy::Fifo,
    ReplacementStrategy::Lru,
    ReplacementStrategy::Lfu,
    ReplacementStrategy::Clock,
];

// Create a temporary page file with `page_count` zero pages for testing
fn create_test_buffer_pool(
    pool_size: usize,
    page_count: usize,
    strategy: ReplacementStrategy,
) -> BufferPoolManager {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    let path = temp_file.path().to_str().unwrap().to_string();
    PageFile::create(&path)
        .unwrap()
        .ensure_capacity(page_count as u32)
        .unwrap();
    let buffer_pool = BufferPoolManager::with_strategy(path, pool_size, strategy).unwrap();

    // Keep the temp file alive
    std::mem::forget(temp_file);

    buffer_pool
}

// Generate test data of specified size
fn generate_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

// Populate `page_count` dirty pages and flush them so later runs only read
fn populate(buffer_pool: &BufferPoolManager, page_count: usize) -> Vec<PageId> {
    let data = generate_test_data(100);
    let mut page_ids = Vec::new();
    for page_id in 0..page_count as PageId {
        let handle = buffer_pool.pin_page(page_id).unwrap();
        buffer_pool
            .with_page_mut(&handle, |page| page[..data.len()].copy_from_slice(&data))
            .unwrap();
        buffer_pool.mark_dirty(page_id).unwrap();
        buffer_pool.unpin_page(page_id).unwrap();
        page_ids.push(page_id);
    }
    buffer_pool.flush_all_pages().unwrap();
    page_ids
}

fn access(buffer_pool: &BufferPoolManager, page_id: PageId) {
    let handle = buffer_pool.pin_page(page_id).unwrap();
    buffer_pool.with_page(&handle, |page| page[0]).unwrap();
    buffer_pool.unpin_page(page_id).unwrap();
}

fn buffer_pool_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("BufferPool");

    for strategy in STRATEGIES {
        // Working set twice the pool size so every policy has to evict
        let pool_size = 64;
        let page_count = pool_size * 2;

        group.bench_with_input(
            BenchmarkId::new("sequential_access", strategy),
            &strategy,
            |b, &strategy| {
                let buffer_pool = create_test_buffer_pool(pool_size, page_count, strategy);
                let page_ids = populate(&buffer_pool, page_count);

                b.iter(|| {
                    for &page_id in &page_ids {
                        access(&buffer_pool, page_id);
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("random_access", strategy),
            &strategy,
            |b, &strategy| {
                let buffer_pool = create_test_buffer_pool(pool_size, page_count, strategy);
                let page_ids = populate(&buffer_pool, page_count);

                // Skewed pattern: most accesses land on a small hot set
                let mut rng = StdRng::seed_from_u64(42);
                let random_indices: Vec<usize> = (0..page_count)
                    .map(|_| {
                        if rng.gen_bool(0.8) {
                            rng.gen_range(0..pool_size / 4)
                        } else {
                            rng.gen_range(0..page_count)
                        }
                    })
                    .collect();

                b.iter(|| {
                    for &idx in &random_indices {
                        access(&buffer_pool, page_ids[idx]);
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, buffer_pool_benchmark);
criterion_main!(benches);
