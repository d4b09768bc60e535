// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subtree selection (R*-tree `ChooseSubtree`).
//!
//! Above the leaves a child is picked by least area enlargement, then least
//! area. When the children are leaves, overlap matters more: the 32 children
//! with least enlargement are shortlisted and the one whose growth adds the
//! least overlap with the other shortlisted siblings wins, with enlargement and
//! area as tie-breaks.
//!
//! Per-child metrics live in a local vector; selection never touches the tree.

use alloc::vec::Vec;

use crate::node::{Children, Node};
use crate::types::{Aabb2D, Scalar, area, cmp_t, enlarged_area, lt, overlap_area};

/// Size of the shortlist used for the overlap test.
pub(crate) const OVERLAP_CANDIDATES: usize = 32;

struct Candidate<A> {
    index: usize,
    area: A,
    enlargement: A,
    overlap: Option<A>,
}

impl<A: Copy + PartialOrd> Candidate<A> {
    /// Lexicographic `(overlap, enlargement, area)` comparison; incomparable
    /// values never win.
    fn precedes(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.overlap, other.overlap) {
            match a.partial_cmp(&b) {
                Some(core::cmp::Ordering::Equal) => {}
                Some(o) => return o.is_lt(),
                None => return false,
            }
        }
        match self.enlargement.partial_cmp(&other.enlargement) {
            Some(core::cmp::Ordering::Equal) => lt(self.area, other.area),
            Some(o) => o.is_lt(),
            None => false,
        }
    }
}

/// Index of the child of an internal node that should receive `bbox`.
///
/// Returns `None` when there are no children.
pub(crate) fn choose_child<T: Scalar, I>(
    children: &[Node<T, I>],
    bbox: &Aabb2D<T>,
) -> Option<usize> {
    let first = children.first()?;
    let mut candidates: Vec<Candidate<T::Acc>> = children
        .iter()
        .enumerate()
        .map(|(index, child)| {
            let area = area(&child.bbox);
            Candidate {
                index,
                area,
                enlargement: enlarged_area(bbox, &child.bbox) - area,
                overlap: None,
            }
        })
        .collect();

    if first.is_leaf() {
        candidates.sort_by(|a, b| cmp_t(a.enlargement, b.enlargement));
        candidates.truncate(OVERLAP_CANDIDATES);
        let boxes: Vec<Aabb2D<T>> = candidates.iter().map(|c| children[c.index].bbox).collect();
        for (pos, c) in candidates.iter_mut().enumerate() {
            c.overlap = Some(overlap_area(bbox, pos, &boxes));
        }
    }

    let mut best = &candidates[0];
    for c in &candidates[1..] {
        if c.precedes(best) {
            best = c;
        }
    }
    Some(best.index)
}

/// The leaf (or childless internal node) that should receive `bbox`.
pub(crate) fn choose_leaf<'a, T: Scalar, I>(
    root: &'a Node<T, I>,
    bbox: &Aabb2D<T>,
) -> &'a Node<T, I> {
    let mut node = root;
    while let Children::Nodes(children) = &node.children {
        let Some(idx) = choose_child(children, bbox) else {
            break;
        };
        node = &children[idx];
    }
    node
}
