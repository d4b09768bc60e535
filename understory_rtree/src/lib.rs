// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_rtree --heading-base-level=0

//! Understory R-tree: a static-friendly 2D R-tree over axis-aligned rectangles.
//!
//! - Bulk-load a whole set of items at once with the overlap-minimizing tiling
//!   (OMT) loader, which produces shallow trees with little sibling overlap.
//! - Query by intersecting rectangle; subtrees whose bbox misses the query are
//!   skipped.
//! - Add items one by one with [`RTree::insert`], which uses the R*-tree
//!   `ChooseSubtree` rule to pick a leaf and splits overflowing nodes.
//! - Export the node structure as plain values and import it again, optionally
//!   through `serde`.
//!
//! Items are owned by the tree. Their rectangles come from an extraction
//! function: either the item's own [`ToBBox`] impl (arrays, tuples, [`Aabb2D`])
//! or a closure given to [`RTree::with_extract`].
//!
//! The tree is generic over the scalar type `T` (`f32`, `f64`, `i64`). Area
//! metrics use widened accumulators (f32→f64, f64→f64, i64→i128).
//!
//! # Example
//!
//! ```rust
//! use understory_rtree::{Aabb2D, RTree};
//!
//! let mut tree = RTree::<f64, [f64; 4]>::new(4).unwrap();
//! tree.load((0_i32..10).map(|i| {
//!     let v = f64::from(i);
//!     [v, v, v, v]
//! }));
//!
//! let hits = tree.search(&Aabb2D::new(2.0, 2.0, 4.0, 4.0));
//! assert_eq!(hits.len(), 3);
//! assert_eq!(tree.height(), 2);
//! ```
//!
//! Items that are not rectangles themselves provide a closure:
//!
//! ```rust
//! use understory_rtree::{Aabb2D, RTree};
//!
//! struct Pin {
//!     id: u32,
//!     x: i64,
//!     y: i64,
//! }
//!
//! let mut tree = RTree::with_extract(9, |p: &Pin| Aabb2D::from_point(p.x, p.y)).unwrap();
//! tree.insert(Pin { id: 1, x: 3, y: 4 });
//! tree.insert(Pin { id: 2, x: 30, y: 40 });
//!
//! let ids: Vec<_> = tree.search(&Aabb2D::new(0, 0, 10, 10)).iter().map(|p| p.id).collect();
//! assert_eq!(ids, [1]);
//! ```
//!
//! ## Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` for [`Aabb2D`], [`RTreeConfig`]
//!   and [`Node`]. A node travels as `{ leaf, bbox, children }`.
//! - `kurbo`: conversions from `kurbo::Rect`/`kurbo::Point` into [`Aabb2D`].
//!
//! ### Float semantics
//!
//! Rectangles with NaN coordinates never intersect anything and never win a
//! comparison; they do not corrupt the tree. Closed intervals are used, so
//! rectangles that merely touch do intersect.

#![no_std]

extern crate alloc;

mod bulk;
mod choose;
pub mod config;
pub mod error;
pub mod extract;
pub mod node;
mod split;
pub mod tree;
pub mod types;

pub use config::RTreeConfig;
pub use error::{Error, Result};
pub use extract::{DefaultExtract, ToBBox};
pub use node::{Children, Node};
pub use tree::RTree;
pub use types::{Aabb2D, Scalar, ScalarAcc, area, enlarged_area, intersection_area, overlap_area};
