// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_rtree::{Aabb2D, RTree};

use rstar::AABB;
use rstar::primitives::Rectangle;

fn gen_grid_rects(n: usize, cell: f64) -> Vec<[f64; 4]> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push([x0, y0, x0 + cell, y0 + cell]);
        }
    }
    out
}

fn to_rstar_rects(v: &[[f64; 4]]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r[0], r[1]], [r[2], r[3]]))
        .collect()
}

fn bench_rtree_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_f64");
    for &n in &[64usize, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let query = Aabb2D::<f64>::from_xywh(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_query_insert_n{n}"), |b| {
            b.iter_batched(
                || rects.clone(),
                |rects| {
                    let mut tree = RTree::<f64, [f64; 4]>::new(9).unwrap();
                    for r in rects {
                        tree.insert(r);
                    }
                    black_box(tree.search(&query).len());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("understory_build_query_bulk_n{n}"), |b| {
            b.iter_batched(
                || rects.clone(),
                |rects| {
                    let mut tree = RTree::<f64, [f64; 4]>::new(9).unwrap();
                    tree.load(rects);
                    black_box(tree.search(&query).len());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_bulk_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let tree = rstar::RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [query.min_x, query.min_y],
                        [query.max_x, query.max_y],
                    );
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_f64);
criterion_main!(benches);
