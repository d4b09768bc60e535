// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index `kurbo` rectangles directly.
//!
//! Run:
//! - `cargo run -p understory_demos --example rtree_kurbo`

use kurbo::{Point, Rect};
use understory_rtree::{Aabb2D, RTree};

fn main() {
    env_logger::init();

    let widgets = vec![
        Rect::new(0.0, 0.0, 200.0, 40.0),
        Rect::new(0.0, 40.0, 200.0, 400.0),
        Rect::new(10.0, 50.0, 190.0, 90.0),
        Rect::new(10.0, 100.0, 190.0, 140.0),
        Rect::new(150.0, 350.0, 190.0, 390.0),
    ];
    let mut tree = RTree::<f64, Rect>::new(4).unwrap();
    tree.load(widgets);

    let cursor = Point::new(20.0, 60.0);
    let under: Vec<_> = tree.search(&Aabb2D::from(cursor));
    println!("under {cursor:?}: {under:?}");
}
