//! Coordinate access for values stored in a [`KdTree`](crate::KdTree).

use std::cmp::Ordering;

use glam::{DVec2, DVec3};

/// A value with ordered numeric coordinates.
///
/// The tree reads coordinates `0..dim` for the `dim` it was built with;
/// implementors only need to answer for those axes.
pub trait KdPoint {
    /// Coordinate along `axis`.
    fn coordinate(&self, axis: usize) -> f64;
}

impl<const N: usize> KdPoint for [f64; N] {
    #[inline]
    fn coordinate(&self, axis: usize) -> f64 {
        self[axis]
    }
}

impl KdPoint for [f64] {
    #[inline]
    fn coordinate(&self, axis: usize) -> f64 {
        self[axis]
    }
}

impl KdPoint for Vec<f64> {
    #[inline]
    fn coordinate(&self, axis: usize) -> f64 {
        self[axis]
    }
}

impl KdPoint for DVec2 {
    #[inline]
    fn coordinate(&self, axis: usize) -> f64 {
        self[axis]
    }
}

impl KdPoint for DVec3 {
    #[inline]
    fn coordinate(&self, axis: usize) -> f64 {
        self[axis]
    }
}

impl<P: KdPoint + ?Sized> KdPoint for &P {
    #[inline]
    fn coordinate(&self, axis: usize) -> f64 {
        (**self).coordinate(axis)
    }
}

/// Squared Euclidean distance over the first `dim` axes.
#[inline]
pub fn distance_sq<A, B>(a: &A, b: &B, dim: usize) -> f64
where
    A: KdPoint + ?Sized,
    B: KdPoint + ?Sized,
{
    (0..dim)
        .map(|axis| {
            let d = a.coordinate(axis) - b.coordinate(axis);
            d * d
        })
        .sum()
}

/// Orders two points on `axis`, breaking ties lexicographically on the
/// remaining axes starting at `(axis + 1) % dim`.
///
/// Uses IEEE total ordering, so the result is a strict weak order even with
/// duplicate points. Fully coincident points compare `Equal`.
pub(crate) fn compare_on_axis<P: KdPoint + ?Sized>(a: &P, b: &P, axis: usize, dim: usize) -> Ordering {
    let mut i = axis;
    loop {
        match a.coordinate(i).total_cmp(&b.coordinate(i)) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        i = (i + 1) % dim;
        if i == axis {
            return Ordering::Equal;
        }
    }
}
