// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! How the tree obtains a rectangle for an item.
//!
//! The tree never looks inside an item. Every rectangle comes from an
//! extraction function `Fn(&I) -> Aabb2D<T>` chosen when the tree is created.
//! It must be pure: the same item has to produce the same rectangle for as long
//! as the item lives in the tree.
//!
//! Items that already carry their coordinates can implement [`ToBBox`] and use
//! the default extraction, which reads four sequential coordinates
//! `[min_x, min_y, max_x, max_y]`.

use crate::types::Aabb2D;

/// Items that know their own bounding box.
pub trait ToBBox<T> {
    /// The item's rectangle.
    fn to_bbox(&self) -> Aabb2D<T>;
}

/// Extraction function used when the caller supplies none.
pub type DefaultExtract<T, I> = fn(&I) -> Aabb2D<T>;

impl<T: Copy> ToBBox<T> for [T; 4] {
    #[inline]
    fn to_bbox(&self) -> Aabb2D<T> {
        Aabb2D::from(*self)
    }
}

impl<T: Copy> ToBBox<T> for (T, T, T, T) {
    #[inline]
    fn to_bbox(&self) -> Aabb2D<T> {
        Aabb2D::new(self.0, self.1, self.2, self.3)
    }
}

impl<T: Copy> ToBBox<T> for Aabb2D<T> {
    #[inline]
    fn to_bbox(&self) -> Self {
        *self
    }
}

#[cfg(feature = "kurbo")]
impl ToBBox<f64> for kurbo::Rect {
    fn to_bbox(&self) -> Aabb2D<f64> {
        Aabb2D::from(*self)
    }
}

#[cfg(feature = "kurbo")]
impl ToBBox<f64> for kurbo::Point {
    fn to_bbox(&self) -> Aabb2D<f64> {
        Aabb2D::from(*self)
    }
}
