// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree basics.
//!
//! Bulk-load random rectangles, search a window, then add a few items one by one.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example rtree_basics`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_rtree::{Aabb2D, RTree};

fn main() {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(2025);
    let rects: Vec<[f64; 4]> = (0..10_000)
        .map(|_| {
            let x = rng.gen_range(0.0..1000.0);
            let y = rng.gen_range(0.0..1000.0);
            [x, y, x + rng.gen_range(0.0..5.0), y + rng.gen_range(0.0..5.0)]
        })
        .collect();

    let mut tree = RTree::<f64, [f64; 4]>::new(16).unwrap();
    tree.load(rects);
    println!("{tree:?}");

    let window = Aabb2D::new(100.0, 100.0, 150.0, 150.0);
    let hits = tree.search(&window);
    log::info!("{} rectangles intersect {window:?}", hits.len());
    println!("first hits: {:?}", &hits[..hits.len().min(3)]);

    // Incremental inserts land in the leaf chosen by the subtree selector.
    let extra = [500.0, 500.0, 501.0, 501.0];
    let target = tree.choose_subtree(&Aabb2D::from(extra)).bbox;
    println!("{extra:?} goes into the leaf covering {target:?}");
    tree.insert(extra);

    assert!(tree.collides(&Aabb2D::from_point(500.5, 500.5)));
    println!("{} items, height {}", tree.len(), tree.height());
}
