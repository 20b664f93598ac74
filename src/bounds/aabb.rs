//! Axis-aligned bounding rectangle.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// A 2D axis-aligned bounding rectangle.
///
/// Simple polygons cache one of these so that crossing searches between
/// boundaries can be pruned before any edge is visited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2<F> {
    /// Minimum corner (smallest x and y values).
    pub min: Point2<F>,
    /// Maximum corner (largest x and y values).
    pub max: Point2<F>,
}

impl<F: Float> Aabb2<F> {
    /// Creates a rectangle from min and max corners. Does not validate.
    #[inline]
    pub fn new(min: Point2<F>, max: Point2<F>) -> Self {
        Self { min, max }
    }

    /// Creates a rectangle from two arbitrary corners.
    #[inline]
    pub fn from_corners(a: Point2<F>, b: Point2<F>) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates the smallest rectangle holding every point.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<F>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| acc.expand_to_include(p)))
    }

    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(self) -> Point2<F> {
        self.min.midpoint(self.max)
    }

    /// Corner with minimum x and maximum y.
    #[inline]
    pub fn top_left(self) -> Point2<F> {
        Point2::new(self.min.x, self.max.y)
    }

    /// Corners in counter-clockwise order starting at `min`.
    pub fn corners(self) -> [Point2<F>; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// The corner with the largest absolute coordinate.
    pub fn point_furthest_from_origin(self) -> Point2<F> {
        let x = if self.min.x.abs() > self.max.x.abs() {
            self.min.x
        } else {
            self.max.x
        };
        let y = if self.min.y.abs() > self.max.y.abs() {
            self.min.y
        } else {
            self.max.y
        };
        Point2::new(x, y)
    }

    /// Returns a rectangle grown to include `p`.
    #[inline]
    pub fn expand_to_include(self, p: Point2<F>) -> Self {
        Self {
            min: Point2::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point2::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Smallest rectangle containing both.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        self.expand_to_include(other.min).expand_to_include(other.max)
    }

    /// Shared region of two rectangles, if they overlap.
    pub fn intersection(self, other: Self) -> Option<Self> {
        let min = Point2::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Point2::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));

        if min.x <= max.x && min.y <= max.y {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Returns `true` if the point lies inside or on the rectangle.
    #[inline]
    pub fn contains_point(self, p: Point2<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns `true` if `other` lies entirely inside this rectangle.
    #[inline]
    pub fn contains_rect(self, other: Self) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Returns `true` if the rectangles share any point, edges included.
    #[inline]
    pub fn overlaps(self, other: Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Grows the rectangle by `margin` on every side.
    #[inline]
    pub fn inflated(self, margin: F) -> Self {
        Self {
            min: Point2::new(self.min.x - margin, self.min.y - margin),
            max: Point2::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// Returns `true` if the segment's bounds come within `margin` of this rectangle.
    #[inline]
    pub fn overlaps_segment(self, segment: Segment2<F>, margin: F) -> bool {
        self.inflated(margin)
            .overlaps(Self::from_corners(segment.start, segment.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Aabb2<f64> {
        Aabb2::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    #[test]
    fn test_from_points() {
        let pts = vec![Point2::new(1.0, 2.0), Point2::new(-3.0, 5.0), Point2::new(4.0, -1.0)];
        let r: Aabb2<f64> = Aabb2::from_points(pts).unwrap();
        assert_eq!(r, rect(-3.0, -1.0, 4.0, 5.0));
        assert!(Aabb2::<f64>::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_overlaps_and_intersection() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 15.0, 15.0);
        let c = rect(11.0, 0.0, 12.0, 1.0);
        assert!(a.overlaps(b));
        assert!(!a.overlaps(c));
        assert_eq!(a.intersection(b), Some(rect(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersection(c).is_none());
    }

    #[test]
    fn test_overlaps_segment() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps_segment(Segment2::from_coords(-5.0, 5.0, 5.0, 5.0), 0.0));
        assert!(!a.overlaps_segment(Segment2::from_coords(11.0, 0.0, 12.0, 5.0), 0.5));
        assert!(a.overlaps_segment(Segment2::from_coords(10.4, 0.0, 12.0, 5.0), 0.5));
    }

    #[test]
    fn test_touching_rects_overlap() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(1.0, 0.0, 2.0, 1.0);
        assert!(a.overlaps(b));
    }

    #[test]
    fn test_contains() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.contains_point(Point2::new(10.0, 0.0)));
        assert!(a.contains_rect(rect(1.0, 1.0, 2.0, 2.0)));
        assert!(!a.contains_rect(rect(9.0, 9.0, 11.0, 10.0)));
    }

    #[test]
    fn test_point_furthest_from_origin() {
        let r = rect(-20.0, 1.0, 3.0, 4.0);
        assert_eq!(r.point_furthest_from_origin(), Point2::new(-20.0, 4.0));
    }

    #[test]
    fn test_union_and_corners() {
        let u = rect(0.0, 0.0, 1.0, 1.0).union(rect(2.0, -1.0, 3.0, 0.5));
        assert_eq!(u, rect(0.0, -1.0, 3.0, 1.0));
        assert_eq!(u.top_left(), Point2::new(0.0, 1.0));
        assert_eq!(u.corners()[1], Point2::new(3.0, -1.0));
    }
}
