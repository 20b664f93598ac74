//! Geometric predicates with explicit tolerance.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Converts an `f64` literal into `F`.
///
/// Every `Float` type can represent these constants, so the fallback is never
/// taken in practice.
#[inline]
pub(crate) fn constant<F: Float>(value: f64) -> F {
    F::from(value).unwrap_or_else(F::nan)
}

/// Absolute coordinate tolerance for geometry whose coordinates reach `scale`.
///
/// A few dozen ulps of the largest coordinate, never less than a few dozen
/// ulps of one.
#[inline]
pub fn coordinate_tolerance<F: Float>(scale: F) -> F {
    scale.abs().max(F::one()) * F::epsilon() * constant(64.0)
}

/// Checks if a point lies on a line segment within tolerance.
#[inline]
pub fn point_on_segment<F: Float>(p: Point2<F>, segment: Segment2<F>, eps: F) -> bool {
    segment.distance_to_point(p) <= eps
}

/// How two boundary edges meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeContact<F> {
    /// The edges do not meet.
    None,
    /// The edges cross transversally, away from every endpoint.
    Crossing {
        /// The crossing point.
        point: Point2<F>,
        /// Parameter along the first edge, strictly inside (0, 1).
        t1: F,
        /// Parameter along the second edge, strictly inside (0, 1).
        t2: F,
    },
    /// The edges meet at an endpoint or run along each other.
    ///
    /// Such contacts make the inside/outside status of a boundary ambiguous
    /// and are never used as crossings.
    Touch,
}

/// Classifies the contact between two edges.
///
/// `eps` is a distance tolerance: endpoints within `eps` of the other edge,
/// and edges that stay within `eps` of each other while parallel, are
/// reported as [`EdgeContact::Touch`].
pub fn edge_contact<F: Float>(s1: Segment2<F>, s2: Segment2<F>, eps: F) -> EdgeContact<F> {
    let d1 = s1.direction();
    let d2 = s2.direction();
    let len1 = d1.magnitude();
    let len2 = d2.magnitude();

    if len1 <= eps || len2 <= eps {
        let near = s1.distance_to_point(s2.start) <= eps || s2.distance_to_point(s1.start) <= eps;
        return if near {
            EdgeContact::Touch
        } else {
            EdgeContact::None
        };
    }

    let denom = d1.cross(d2);

    // Parallel within tolerance: the perpendicular drift over the shorter
    // edge stays below eps.
    if denom.abs() * len1.min(len2) <= eps * len1 * len2 {
        let touching = point_on_segment(s2.start, s1, eps)
            || point_on_segment(s2.end, s1, eps)
            || point_on_segment(s1.start, s2, eps)
            || point_on_segment(s1.end, s2, eps);
        return if touching {
            EdgeContact::Touch
        } else {
            EdgeContact::None
        };
    }

    let d = s2.start - s1.start;
    let t1 = d.cross(d2) / denom;
    let t2 = d.cross(d1) / denom;
    let pt1 = eps / len1;
    let pt2 = eps / len2;

    if t1 < -pt1 || t1 > F::one() + pt1 || t2 < -pt2 || t2 > F::one() + pt2 {
        return EdgeContact::None;
    }

    if t1 <= pt1 || t1 >= F::one() - pt1 || t2 <= pt2 || t2 >= F::one() - pt2 {
        return EdgeContact::Touch;
    }

    EdgeContact::Crossing {
        point: s1.point_at(t1),
        t1,
        t2,
    }
}
