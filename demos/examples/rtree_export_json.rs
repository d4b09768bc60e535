// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Export a tree as JSON and load it back without rebuilding.
//!
//! Run:
//! - `cargo run -p understory_demos --example rtree_export_json`

use understory_rtree::{Aabb2D, Node, RTree, RTreeConfig};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Shop {
    name: String,
    x: f64,
    y: f64,
}

fn location(s: &Shop) -> Aabb2D<f64> {
    Aabb2D::from_point(s.x, s.y)
}

fn main() {
    env_logger::init();

    let config: RTreeConfig = serde_json::from_str(r#"{ "max_entries": 4 }"#).unwrap();
    let mut tree = RTree::from_config(config, location).unwrap();
    tree.load((0_u32..12).map(|i| Shop {
        name: format!("shop-{i}"),
        x: f64::from(i % 4) * 10.0,
        y: f64::from(i / 4) * 10.0,
    }));

    let json = serde_json::to_string_pretty(tree.export()).unwrap();
    println!("{json}");

    let root: Node<f64, Shop> = serde_json::from_str(&json).unwrap();
    if let Err(e) = root.check(&location) {
        log::error!("refusing to import: {e}");
        return;
    }
    let mut copy = RTree::from_config(config, location).unwrap();
    copy.import(root);

    let near: Vec<_> = copy
        .search(&Aabb2D::new(5.0, 5.0, 20.0, 20.0))
        .into_iter()
        .map(|s| s.name.as_str())
        .collect();
    println!("near the centre: {near:?}");
}
