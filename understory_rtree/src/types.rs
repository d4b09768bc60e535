// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle type, scalar abstraction and the geometry primitives used by the tree.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// A box is valid when `min_x <= max_x` and `min_y <= max_y`. Degenerate boxes
/// (zero width and/or height) are valid and describe points or segments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy> Aabb2D<T> {
    /// A degenerate AABB covering a single point.
    pub const fn from_point(x: T, y: T) -> Self {
        Self::new(x, y, x, y)
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// The empty accumulator `(+inf, +inf, -inf, -inf)`.
    ///
    /// Unioning any box into it yields that box. Integer scalars use their
    /// `MAX`/`MIN` values in place of infinities.
    pub fn empty() -> Self {
        Self::new(T::infinity(), T::infinity(), T::neg_infinity(), T::neg_infinity())
    }

    /// Create an AABB from origin and size.
    pub fn from_xywh(x: T, y: T, w: T, h: T) -> Self {
        Self::new(x, y, T::add(x, w), T::add(y, h))
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether the two closed boxes overlap or touch.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        le(other.min_x, self.max_x)
            && le(other.min_y, self.max_y)
            && le(self.min_x, other.max_x)
            && le(self.min_y, other.max_y)
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &Self) -> bool {
        le(self.min_x, other.min_x)
            && le(self.min_y, other.min_y)
            && le(other.max_x, self.max_x)
            && le(other.max_y, self.max_y)
    }

    /// Whether this AABB contains the point.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }

    /// The smallest box covering both `self` and `other`.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: min_t(self.min_x, other.min_x),
            min_y: min_t(self.min_y, other.min_y),
            max_x: max_t(self.max_x, other.max_x),
            max_y: max_t(self.max_y, other.max_y),
        }
    }

    /// Grow this box in place so that it also covers `other`.
    #[inline]
    pub fn extend(&mut self, other: &Self) {
        *self = self.union(other);
    }

    /// Return true if the AABB is inverted (such as the empty accumulator). Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }
}

impl<T> From<[T; 4]> for Aabb2D<T> {
    fn from([min_x, min_y, max_x, max_y]: [T; 4]) -> Self {
        Self::new(min_x, min_y, max_x, max_y)
    }
}

impl<T> From<Aabb2D<T>> for [T; 4] {
    fn from(b: Aabb2D<T>) -> Self {
        [b.min_x, b.min_y, b.max_x, b.max_y]
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for Aabb2D<f64> {
    fn from(r: kurbo::Rect) -> Self {
        Self::new(r.x0.min(r.x1), r.y0.min(r.y1), r.x0.max(r.x1), r.y0.max(r.y1))
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Point> for Aabb2D<f64> {
    fn from(p: kurbo::Point) -> Self {
        Self::from_point(p.x, p.y)
    }
}

/// Numeric scalar abstraction for 2D AABBs.
///
/// This trait provides the operations needed for area metrics and centroid
/// ordering, and an associated widened accumulator type for area
/// (e.g., f32→f64, i64→i128).
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for area/cost computations.
    type Acc: Copy
        + PartialOrd
        + core::ops::Add<Output = Self::Acc>
        + core::ops::Sub<Output = Self::Acc>
        + core::ops::Mul<Output = Self::Acc>
        + Debug;

    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// The largest value, standing in for positive infinity.
    fn infinity() -> Self;

    /// The smallest value, standing in for negative infinity.
    fn neg_infinity() -> Self;

    /// Max of the scalar value and zero.
    fn max_zero(v: Self) -> Self;

    /// Midpoint between a and b (used for centroid ordering).
    fn mid(a: Self, b: Self) -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;

    /// Convert a `usize` to the accumulator type (for split cost weighting).
    fn acc_from_usize(n: usize) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn infinity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn neg_infinity() -> Self {
        Self::NEG_INFINITY
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as f64
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn infinity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn neg_infinity() -> Self {
        Self::NEG_INFINITY
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as Self::Acc
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn infinity() -> Self {
        Self::MAX
    }

    #[inline]
    fn neg_infinity() -> Self {
        Self::MIN
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow: (a & b) + ((a ^ b) >> 1)
        (a & b) + ((a ^ b) >> 1)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as i128
    }
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

/// Area of an AABB in the widened accumulator type. Inverted extents count as zero.
#[inline]
pub fn area<T: Scalar>(a: &Aabb2D<T>) -> T::Acc {
    let w = T::max_zero(T::sub(a.max_x, a.min_x));
    let h = T::max_zero(T::sub(a.max_y, a.min_y));
    T::widen(w) * T::widen(h)
}

/// Area that `a` would have after growing to cover `b`. Neither input is modified.
#[inline]
pub fn enlarged_area<T: Scalar>(a: &Aabb2D<T>, b: &Aabb2D<T>) -> T::Acc {
    area(&a.union(b))
}

/// Area shared by `a` and `b`; zero when they are disjoint.
#[inline]
pub fn intersection_area<T: Scalar>(a: &Aabb2D<T>, b: &Aabb2D<T>) -> T::Acc {
    let min_x = max_t(a.min_x, b.min_x);
    let max_x = min_t(a.max_x, b.max_x);
    let min_y = max_t(a.min_y, b.min_y);
    let max_y = min_t(a.max_y, b.max_y);
    let w = T::max_zero(T::sub(max_x, min_x));
    let h = T::max_zero(T::sub(max_y, min_y));
    T::widen(w) * T::widen(h)
}

/// Overlap that growing `siblings[candidate]` to cover `target` would create with
/// the other siblings.
///
/// Sums the intersection area between the enlarged candidate and every other
/// entry of `siblings`.
pub fn overlap_area<T: Scalar>(
    target: &Aabb2D<T>,
    candidate: usize,
    siblings: &[Aabb2D<T>],
) -> T::Acc {
    let zero = T::widen(T::zero());
    let Some(grown) = siblings.get(candidate).map(|b| b.union(target)) else {
        return zero;
    };
    siblings
        .iter()
        .enumerate()
        .filter(|&(i, b)| i != candidate && grown.intersects(b))
        .fold(zero, |sum, (_, b)| sum + intersection_area(&grown, b))
}

/// Total order on scalars for sorting: NaN sorts after every other value and
/// all NaNs compare equal.
#[inline]
pub(crate) fn cmp_t<T: PartialOrd>(a: T, b: T) -> Ordering {
    match a.partial_cmp(&b) {
        Some(o) => o,
        None => is_nan(&a).cmp(&is_nan(&b)),
    }
}

#[inline]
fn is_nan<T: PartialOrd>(v: &T) -> bool {
    v.partial_cmp(v).is_none()
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Aabb2D;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    // Boxes travel as `[min_x, min_y, max_x, max_y]`.
    impl<T: Serialize> Serialize for Aabb2D<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            (&self.min_x, &self.min_y, &self.max_x, &self.max_y).serialize(serializer)
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for Aabb2D<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            <[T; 4]>::deserialize(deserializer).map(Self::from)
        }
    }
}
