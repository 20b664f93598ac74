//! 2D line segment type.

use super::{Point2, Vec2};
use num_traits::Float;

/// A 2D line segment defined by two endpoints.
///
/// Polygon boundaries are walked as sequences of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2<F> {
    pub start: Point2<F>,
    pub end: Point2<F>,
}

impl<F: Float> Segment2<F> {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(start: Point2<F>, end: Point2<F>) -> Self {
        Self { start, end }
    }

    /// Creates a segment from coordinate pairs.
    #[inline]
    pub fn from_coords(x1: F, y1: F, x2: F, y2: F) -> Self {
        Self {
            start: Point2::new(x1, y1),
            end: Point2::new(x2, y2),
        }
    }

    /// Returns the direction vector from start to end.
    #[inline]
    pub fn direction(self) -> Vec2<F> {
        self.end - self.start
    }

    /// Returns the length of the segment.
    #[inline]
    pub fn length(self) -> F {
        self.start.distance(self.end)
    }

    /// Returns the point at parameter `t` (0 at `start`, 1 at `end`).
    #[inline]
    pub fn point_at(self, t: F) -> Point2<F> {
        self.start.lerp(self.end, t)
    }

    /// Returns the reversed segment.
    #[inline]
    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Closest point on the segment to `p`, with its clamped parameter.
    pub fn closest_point(self, p: Point2<F>) -> (Point2<F>, F) {
        let v = self.direction();
        let len_sq = v.magnitude_squared();

        if len_sq <= F::epsilon() {
            return (self.start, F::zero());
        }

        let t = (p - self.start).dot(v) / len_sq;
        let t = t.max(F::zero()).min(F::one());
        (self.point_at(t), t)
    }

    /// Computes the distance from a point to this segment.
    #[inline]
    pub fn distance_to_point(self, p: Point2<F>) -> F {
        let (closest, _) = self.closest_point(p);
        p.distance(closest)
    }

    /// Returns `true` if the interiors or endpoints of the two segments meet.
    pub fn intersects(self, other: Self) -> bool {
        let d1 = self.direction();
        let d2 = other.direction();
        let denom = d1.cross(d2);
        if denom == F::zero() {
            return false;
        }
        let d = other.start - self.start;
        let t = d.cross(d2) / denom;
        let u = d.cross(d1) / denom;
        t >= F::zero() && t <= F::one() && u >= F::zero() && u <= F::one()
    }

    /// Minimum distance to another segment, with the closest point on each.
    ///
    /// Returns `(distance, on_self, on_other)`; distance is zero when the
    /// segments intersect.
    pub fn closest_points(self, other: Self) -> (F, Point2<F>, Point2<F>) {
        let d1 = self.direction();
        let d2 = other.direction();
        let denom = d1.cross(d2);
        if denom != F::zero() {
            let d = other.start - self.start;
            let t = d.cross(d2) / denom;
            let u = d.cross(d1) / denom;
            if t >= F::zero() && t <= F::one() && u >= F::zero() && u <= F::one() {
                let p = self.point_at(t);
                return (F::zero(), p, p);
            }
        }

        let candidates = [
            (self.start, other.closest_point(self.start).0, false),
            (self.end, other.closest_point(self.end).0, false),
            (other.start, self.closest_point(other.start).0, true),
            (other.end, self.closest_point(other.end).0, true),
        ];

        let mut best = (F::infinity(), self.start, other.start);
        for (from, to, swapped) in candidates {
            let dist = from.distance(to);
            if dist < best.0 {
                best = if swapped {
                    (dist, to, from)
                } else {
                    (dist, from, to)
                };
            }
        }
        best
    }
}

impl<F: Float> From<(Point2<F>, Point2<F>)> for Segment2<F> {
    fn from((start, end): (Point2<F>, Point2<F>)) -> Self {
        Self::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_closest_point_clamps() {
        let s: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 4.0, 0.0);

        let (c, t) = s.closest_point(Point2::new(1.0, 2.0));
        assert_relative_eq!(c.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(t, 0.25, epsilon = 1e-12);

        let (c, t) = s.closest_point(Point2::new(9.0, 1.0));
        assert_eq!(c, Point2::new(4.0, 0.0));
        assert_eq!(t, 1.0);
    }

    #[test]
    fn test_distance_to_point() {
        let s: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 0.0, 10.0);
        assert_relative_eq!(s.distance_to_point(Point2::new(-3.0, 5.0)), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_intersects() {
        let a: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 2.0, 2.0);
        let b = Segment2::from_coords(0.0, 2.0, 2.0, 0.0);
        let c = Segment2::from_coords(3.0, 0.0, 3.0, 1.0);
        assert!(a.intersects(b));
        assert!(!a.intersects(c));
    }

    #[test]
    fn test_closest_points_disjoint() {
        let a: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 2.0, 0.0);
        let b = Segment2::from_coords(3.0, 1.0, 3.0, 5.0);
        let (d, on_a, on_b) = a.closest_points(b);
        assert_relative_eq!(d, 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(on_a, Point2::new(2.0, 0.0));
        assert_eq!(on_b, Point2::new(3.0, 1.0));
    }

    #[test]
    fn test_closest_points_crossing() {
        let a: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 2.0, 2.0);
        let b = Segment2::from_coords(0.0, 2.0, 2.0, 0.0);
        let (d, on_a, on_b) = a.closest_points(b);
        assert_eq!(d, 0.0);
        assert_relative_eq!(on_a.x, 1.0, epsilon = 1e-12);
        assert_eq!(on_a, on_b);
    }
}
