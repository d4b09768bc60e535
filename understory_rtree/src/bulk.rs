// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap-minimizing tiling (OMT) bulk loader.
//!
//! The loader works top-down. At the root it picks a fan-out that makes the
//! finished tree as shallow as the item count allows, sorts everything by
//! `min_x`, and cuts the sorted run into vertical bands. Each band is re-sorted
//! along the other axis and cut into groups, and each group becomes a child
//! built the same way one level deeper, with the sort axis alternating per
//! level. The result is a grid-like tiling with little sibling overlap.
//!
//! All sorts are stable, so the same input order always yields the same tree.

use alloc::vec::Vec;

use crate::node::Node;
use crate::types::{Aabb2D, Scalar, cmp_t};

/// Build a fully propagated tree from `items`.
pub(crate) fn build<T, I, F>(items: Vec<I>, max_entries: usize, extract: &F) -> Node<T, I>
where
    T: Scalar,
    F: Fn(&I) -> Aabb2D<T>,
{
    let entries: Vec<(Aabb2D<T>, I)> = items.into_iter().map(|i| (extract(&i), i)).collect();
    let mut root = build_level(entries, 0, max_entries);
    root.propagate_bboxes(extract);
    root
}

fn build_level<T: Scalar, I>(
    mut entries: Vec<(Aabb2D<T>, I)>,
    level: usize,
    max_entries: usize,
) -> Node<T, I> {
    let n = entries.len();
    if n <= max_entries {
        return Node::leaf(entries.into_iter().map(|(_, item)| item).collect());
    }

    let mut fan_out = max_entries;
    if level == 0 {
        fan_out = root_fan_out(n, max_entries);
        entries.sort_by(|a, b| cmp_t(a.0.min_x, b.0.min_x));
    }

    let group_size = n.div_ceil(fan_out);
    let band_size = group_size * ceil_sqrt(fan_out);
    let along_x = level % 2 == 1;

    let mut children = Vec::with_capacity(n.div_ceil(group_size));
    let mut rest = entries.into_iter();
    loop {
        let mut band: Vec<_> = rest.by_ref().take(band_size).collect();
        if band.is_empty() {
            break;
        }
        if along_x {
            band.sort_by(|a, b| cmp_t(a.0.min_x, b.0.min_x));
        } else {
            band.sort_by(|a, b| cmp_t(a.0.min_y, b.0.min_y));
        }
        let mut band = band.into_iter();
        loop {
            let group: Vec<_> = band.by_ref().take(group_size).collect();
            if group.is_empty() {
                break;
            }
            children.push(build_level(group, level + 1, max_entries));
        }
    }

    Node::internal(children)
}

/// Root fan-out `ceil(n / m^(h - 1))` for a tree of height `h = ceil(log_m n)`.
///
/// The height is found exactly in integers as the smallest `h` with `m^h >= n`.
fn root_fan_out(n: usize, m: usize) -> usize {
    let mut height = 1;
    let mut below_root = 1_usize;
    let mut capacity = m;
    while capacity < n {
        below_root = capacity;
        capacity = capacity.saturating_mul(m);
        height += 1;
    }
    let fan_out = n.div_ceil(below_root);
    log::trace!("bulk load of {n} items: height {height}, root fan-out {fan_out}");
    fan_out
}

fn ceil_sqrt(v: usize) -> usize {
    let mut s = 1_usize;
    while s * s < v {
        s += 1;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Children;
    use alloc::vec;

    fn point(p: &(i64, i64)) -> Aabb2D<i64> {
        Aabb2D::from_point(p.0, p.1)
    }

    #[test]
    fn fan_out_uses_exact_height() {
        // 10 items, M = 4: height 2, root fan-out ceil(10 / 4) = 3.
        assert_eq!(root_fan_out(10, 4), 3);
        // 17 items, M = 4: height 3, root fan-out ceil(17 / 16) = 2.
        assert_eq!(root_fan_out(17, 4), 2);
        // Exact powers must not round up to an extra level.
        assert_eq!(root_fan_out(16, 4), 4);
        assert_eq!(root_fan_out(1000, 10), 10);
        assert_eq!(root_fan_out(1001, 10), 2);
    }

    #[test]
    fn ceil_sqrt_small_values() {
        let got: Vec<_> = (1..=10).map(ceil_sqrt).collect();
        assert_eq!(got, vec![1, 2, 2, 2, 3, 3, 3, 3, 3, 4]);
    }

    #[test]
    fn small_input_is_a_single_leaf() {
        let root = build(vec![(3, 4), (1, 1)], 4, &point);
        assert_eq!(root.children, Children::Items(vec![(3, 4), (1, 1)]));
        assert_eq!(root.bbox, Aabb2D::new(1, 1, 3, 4));
    }

    #[test]
    fn diagonal_points_tile_into_three_leaves() {
        let items: Vec<_> = (0..10).map(|i| (i, i)).collect();
        let root = build(items, 4, &point);
        let Children::Nodes(leaves) = &root.children else {
            panic!("ten items with M = 4 need an internal root");
        };
        let sizes: Vec<_> = leaves.iter().map(Node::len).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
        assert_eq!(leaves[2].bbox, Aabb2D::new(8, 8, 9, 9));
        assert_eq!(root.bbox, Aabb2D::new(0, 0, 9, 9));
    }

    #[test]
    fn equal_keys_keep_input_order() {
        // All share min_x; the stable sorts must preserve the id order per leaf.
        let items: Vec<_> = (0..9).map(|i| (0, i % 3)).collect();
        let a = build(items.clone(), 4, &point);
        let b = build(items, 4, &point);
        assert_eq!(a, b);
        let mut order = Vec::new();
        a.for_each_leaf(&mut |leaf| {
            if let Children::Items(items) = &leaf.children {
                order.extend(items.iter().copied());
            }
        });
        // Bands of six are re-sorted by min_y; ties stay in input order.
        assert_eq!(
            order,
            vec![
                (0, 0),
                (0, 0),
                (0, 1),
                (0, 1),
                (0, 2),
                (0, 2),
                (0, 0),
                (0, 1),
                (0, 2)
            ]
        );
    }
}
