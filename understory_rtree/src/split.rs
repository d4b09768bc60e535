// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overflow split used by incremental insertion.
//!
//! For a split point `k` along a sorted axis we minimize:
//!
//! `cost(k) = area(LB_k) * k + area(RB_k) * (n - k)`
//!
//! where `LB_k` and `RB_k` are the bounding boxes of the first `k` and remaining
//! `n - k` entries. Both axes are tried, ordered by box centre, and every `k`
//! that leaves at least `min_fill` entries on each side is evaluated in O(1)
//! from prefix/suffix bounding boxes.

use alloc::vec::Vec;

use crate::types::{Aabb2D, Scalar, area, cmp_t, lt};

/// Split `entries` into two groups with the lowest SAH-like cost.
///
/// Fewer than two entries cannot be split and come back unchanged on the left.
pub(crate) fn split_entries<T, E, F>(
    entries: Vec<E>,
    min_fill: usize,
    bbox_of: F,
) -> (Vec<E>, Vec<E>)
where
    T: Scalar,
    F: Fn(&E) -> Aabb2D<T>,
{
    let n = entries.len();
    if n < 2 {
        return (entries, Vec::new());
    }
    let min_fill = min_fill.clamp(1, n / 2);
    let boxes: Vec<Aabb2D<T>> = entries.iter().map(&bbox_of).collect();

    let mut by_x: Vec<usize> = (0..n).collect();
    by_x.sort_by(|&a, &b| cmp_t(centre_x(&boxes[a]), centre_x(&boxes[b])));
    let mut by_y: Vec<usize> = (0..n).collect();
    by_y.sort_by(|&a, &b| cmp_t(centre_y(&boxes[a]), centre_y(&boxes[b])));
    let orders = [by_x, by_y];

    // (cost, axis, k)
    let mut best: Option<(T::Acc, usize, usize)> = None;
    for (axis, order) in orders.iter().enumerate() {
        let mut prefix: Vec<Aabb2D<T>> = Vec::with_capacity(n);
        let mut acc = Aabb2D::empty();
        for &i in order {
            acc = acc.union(&boxes[i]);
            prefix.push(acc);
        }
        let mut suffix: Vec<Aabb2D<T>> = Vec::with_capacity(n);
        let mut acc = Aabb2D::empty();
        for &i in order.iter().rev() {
            acc = acc.union(&boxes[i]);
            suffix.push(acc);
        }
        suffix.reverse();

        for k in min_fill..=(n - min_fill) {
            let cost = area(&prefix[k - 1]) * T::acc_from_usize(k)
                + area(&suffix[k]) * T::acc_from_usize(n - k);
            if best.map(|(bc, _, _)| lt(cost, bc)).unwrap_or(true) {
                best = Some((cost, axis, k));
            }
        }
    }

    let (axis, k) = best.map(|(_, axis, k)| (axis, k)).unwrap_or((0, n / 2));
    let mut slots: Vec<Option<E>> = entries.into_iter().map(Some).collect();
    let mut left = Vec::with_capacity(k);
    let mut right = Vec::with_capacity(n - k);
    for (pos, &i) in orders[axis].iter().enumerate() {
        if let Some(e) = slots[i].take() {
            if pos < k {
                left.push(e);
            } else {
                right.push(e);
            }
        }
    }
    (left, right)
}

fn centre_x<T: Scalar>(b: &Aabb2D<T>) -> T {
    T::mid(b.min_x, b.max_x)
}

fn centre_y<T: Scalar>(b: &Aabb2D<T>) -> T {
    T::mid(b.min_y, b.max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn id(b: &Aabb2D<i64>) -> Aabb2D<i64> {
        *b
    }

    #[test]
    fn separates_two_clusters() {
        let entries = vec![
            Aabb2D::new(0, 0, 1, 1),
            Aabb2D::new(100, 0, 101, 1),
            Aabb2D::new(1, 1, 2, 2),
            Aabb2D::new(101, 1, 102, 2),
            Aabb2D::new(2, 0, 3, 1),
        ];
        let (left, right) = split_entries(entries, 2, id);
        assert_eq!(left.len(), 3);
        assert_eq!(right.len(), 2);
        assert!(left.iter().all(|b| b.max_x <= 3), "left keeps the low cluster");
        assert!(right.iter().all(|b| b.min_x >= 100), "right keeps the high cluster");
    }

    #[test]
    fn vertical_stack_splits_on_y() {
        let entries: Vec<_> = (0..6).map(|i| Aabb2D::new(0, i * 10, 5, i * 10 + 1)).collect();
        let (left, right) = split_entries(entries, 2, id);
        assert_eq!(left.len() + right.len(), 6);
        let left_top = left.iter().map(|b| b.max_y).max();
        let right_bottom = right.iter().map(|b| b.min_y).min();
        assert!(left_top < right_bottom, "groups must not interleave along y");
    }

    #[test]
    fn respects_min_fill() {
        // One outlier would be cheapest to isolate, but min fill forbids a 1 / 4 split.
        let mut entries: Vec<_> = (0..4).map(|i| Aabb2D::new(i, 0, i + 1, 1)).collect();
        entries.push(Aabb2D::new(1000, 0, 1001, 1));
        let (left, right) = split_entries(entries, 2, id);
        assert!(left.len() >= 2 && right.len() >= 2, "both halves hold at least two");
    }

    #[test]
    fn degenerate_inputs() {
        let (l, r) = split_entries(vec![Aabb2D::new(0, 0, 1, 1)], 2, id);
        assert_eq!((l.len(), r.len()), (1, 0));
        // Identical boxes still split, keeping every entry.
        let (l, r) = split_entries(vec![Aabb2D::new(0, 0, 1, 1); 5], 2, id);
        assert_eq!(l.len() + r.len(), 5);
        assert!(l.len() >= 2 && r.len() >= 2, "min fill holds for ties");
    }
}
