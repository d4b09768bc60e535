// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_rtree::{Aabb2D, RTree};

type Entry = (u32, Aabb2D<f64>);

fn bbox_of(e: &Entry) -> Aabb2D<f64> {
    e.1
}

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Entry> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push((out.len() as u32, Aabb2D::<f64>::from_xywh(x0, y0, cell, cell)));
        }
    }
    out
}

fn gen_random_rects(count: usize, extent: f64, max_size: f64, seed: u64) -> Vec<Entry> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let x0 = rng.gen_range(0.0..extent);
            let y0 = rng.gen_range(0.0..extent);
            let w = rng.gen_range(0.0..max_size);
            let h = rng.gen_range(0.0..max_size);
            (i as u32, Aabb2D::<f64>::from_xywh(x0, y0, w, h))
        })
        .collect()
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Entry> {
    let mut rng = StdRng::seed_from_u64(0xC1A5_7E55);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let cx = rng.gen_range(0.0..2000.0);
        let cy = rng.gen_range(0.0..2000.0);
        for _ in 0..per_cluster {
            let dx = rng.gen_range(-0.5..0.5) * spread;
            let dy = rng.gen_range(-0.5..0.5) * spread;
            out.push((out.len() as u32, Aabb2D::<f64>::from_xywh(cx + dx, cy + dy, 12.0, 12.0)));
        }
    }
    out
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for &n in &[1_000usize, 10_000, 100_000] {
        let entries = gen_random_rects(n, 10_000.0, 20.0, 0xCAFE_F00D);
        group.throughput(Throughput::Elements(n as u64));
        for &m in &[9usize, 16] {
            group.bench_function(format!("omt_n{n}_m{m}"), |b| {
                b.iter_batched(
                    || entries.clone(),
                    |entries| {
                        let mut tree = RTree::with_extract(m, bbox_of).unwrap();
                        tree.load(entries);
                        black_box(tree.height());
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[1_000usize, 10_000] {
        let entries = gen_random_rects(n, 10_000.0, 20.0, 0xFACE_FEED);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("one_by_one_n{n}"), |b| {
            b.iter_batched(
                || entries.clone(),
                |entries| {
                    let mut tree = RTree::with_extract(9, bbox_of).unwrap();
                    for e in entries {
                        tree.insert(e);
                    }
                    black_box(tree.len());
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let datasets = [
        ("grid", gen_grid_rects(256, 10.0)),
        ("random", gen_random_rects(65_536, 2560.0, 12.0, 0xBADC_F00D)),
        ("clustered", gen_clustered_rects(64, 1024, 120.0)),
    ];
    let queries: Vec<Aabb2D<f64>> = gen_random_rects(256, 2400.0, 160.0, 0x5EED)
        .into_iter()
        .map(|(_, r)| r)
        .collect();
    for (name, entries) in datasets {
        let mut tree = RTree::with_extract(16, bbox_of).unwrap();
        tree.load(entries);
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("{name}_256_queries"), |b| {
            b.iter(|| {
                let hits: usize = queries.iter().map(|q| tree.search(q).len()).sum();
                black_box(hits);
            });
        });
        group.bench_function(format!("{name}_256_collides"), |b| {
            b.iter(|| {
                let hits = queries.iter().filter(|q| tree.collides(q)).count();
                black_box(hits);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load, bench_insert, bench_search);
criterion_main!(benches);
