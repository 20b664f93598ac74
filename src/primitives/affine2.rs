//! 2D affine transformation type.

use super::{Point2, Segment2, Vec2};
use num_traits::Float;
use std::ops::Mul;

/// A 2D affine transformation.
///
/// Stored as a 2x3 row-major matrix:
/// ```text
/// | a  b  tx |
/// | c  d  ty |
/// ```
///
/// Holed polygons use these for rotation, scaling about a point, reflection
/// and user-supplied projections.
///
/// # Example
///
/// ```
/// use holedpoly::primitives::{Affine2, Point2};
/// use std::f64::consts::FRAC_PI_2;
///
/// let t: Affine2<f64> = Affine2::rotation_around(FRAC_PI_2, Point2::new(1.0, 1.0));
/// let p = t.apply_point(Point2::new(2.0, 1.0));
/// assert!((p.x - 1.0).abs() < 1e-12);
/// assert!((p.y - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2<F> {
    pub a: F,
    pub b: F,
    pub c: F,
    pub d: F,
    pub tx: F,
    pub ty: F,
}

impl<F: Float> Affine2<F> {
    /// Creates a transform from matrix components.
    #[inline]
    pub fn new(a: F, b: F, c: F, d: F, tx: F, ty: F) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// The identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self::new(F::one(), F::zero(), F::zero(), F::one(), F::zero(), F::zero())
    }

    /// A pure translation.
    #[inline]
    pub fn translation(offset: Vec2<F>) -> Self {
        Self::new(F::one(), F::zero(), F::zero(), F::one(), offset.x, offset.y)
    }

    /// Counter-clockwise rotation about the origin, angle in radians.
    #[inline]
    pub fn rotation(angle: F) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self::new(cos_a, -sin_a, sin_a, cos_a, F::zero(), F::zero())
    }

    /// Counter-clockwise rotation about `center`.
    pub fn rotation_around(angle: F, center: Point2<F>) -> Self {
        Self::about(Self::rotation(angle), center)
    }

    /// Uniform scaling by `factor` about `center`.
    pub fn scale_around(factor: F, center: Point2<F>) -> Self {
        let linear = Self::new(factor, F::zero(), F::zero(), factor, F::zero(), F::zero());
        Self::about(linear, center)
    }

    /// Point reflection through `center`.
    pub fn reflect_through(center: Point2<F>) -> Self {
        Self::scale_around(-F::one(), center)
    }

    /// Reflection across the infinite line through `line`.
    ///
    /// A degenerate line yields the identity.
    pub fn reflect_across(line: Segment2<F>) -> Self {
        let Some(n) = line.direction().normalize() else {
            return Self::identity();
        };
        let two = F::one() + F::one();
        let linear = Self::new(
            two * n.x * n.x - F::one(),
            two * n.x * n.y,
            two * n.x * n.y,
            two * n.y * n.y - F::one(),
            F::zero(),
            F::zero(),
        );
        Self::about(linear, line.start)
    }

    fn about(linear: Self, center: Point2<F>) -> Self {
        Self::translation(-center.to_vec())
            .then(linear)
            .then(Self::translation(center.to_vec()))
    }

    /// Applies this transform to a point.
    #[inline]
    pub fn apply_point(&self, p: Point2<F>) -> Point2<F> {
        Point2::new(
            self.a * p.x + self.b * p.y + self.tx,
            self.c * p.x + self.d * p.y + self.ty,
        )
    }

    /// Composes with another transform; the result applies `other` first.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            tx: self.a * other.tx + self.b * other.ty + self.tx,
            ty: self.c * other.tx + self.d * other.ty + self.ty,
        }
    }

    /// Returns a transform that applies `self` first, then `other`.
    #[inline]
    pub fn then(&self, other: Self) -> Self {
        other.compose(self)
    }

    /// Determinant of the linear part. Negative for reflections.
    #[inline]
    pub fn determinant(&self) -> F {
        self.a * self.d - self.b * self.c
    }

    /// Returns the inverse transform, or `None` if singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < F::epsilon() {
            return None;
        }

        let inv_det = F::one() / det;
        Some(Self {
            a: self.d * inv_det,
            b: -self.b * inv_det,
            c: -self.c * inv_det,
            d: self.a * inv_det,
            tx: (self.b * self.ty - self.d * self.tx) * inv_det,
            ty: (self.c * self.tx - self.a * self.ty) * inv_det,
        })
    }
}

impl<F: Float> Default for Affine2<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float> Mul for Affine2<F> {
    type Output = Self;

    /// The result applies `rhs` first, then `self`.
    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

impl<F: Float> Mul<Point2<F>> for Affine2<F> {
    type Output = Point2<F>;

    fn mul(self, rhs: Point2<F>) -> Point2<F> {
        self.apply_point(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_rotation_around() {
        let t: Affine2<f64> = Affine2::rotation_around(PI, Point2::new(5.0, 5.0));
        let p = t.apply_point(Point2::new(6.0, 5.0));
        assert_relative_eq!(p.x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_around() {
        let t: Affine2<f64> = Affine2::scale_around(2.0, Point2::new(1.0, 1.0));
        let p = t * Point2::new(2.0, 3.0);
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reflect_across_horizontal_line() {
        let line = Segment2::from_coords(0.0_f64, 1.0, 5.0, 1.0);
        let t = Affine2::reflect_across(line);
        let p = t.apply_point(Point2::new(3.0, 4.0));
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, -2.0, epsilon = 1e-12);
        assert!(t.determinant() < 0.0);
    }

    #[test]
    fn test_reflect_through_point() {
        let t: Affine2<f64> = Affine2::reflect_through(Point2::new(1.0, 0.0));
        let p = t.apply_point(Point2::new(3.0, 2.0));
        assert_relative_eq!(p.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_round_trip() {
        let t: Affine2<f64> = Affine2::rotation_around(0.3, Point2::new(2.0, -1.0))
            .then(Affine2::scale_around(1.5, Point2::origin()));
        let inv = t.inverse().unwrap();
        let p = Point2::new(7.0, 3.0);
        let back = inv.apply_point(t.apply_point(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-10);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-10);
    }

    #[test]
    fn test_singular_has_no_inverse() {
        let t: Affine2<f64> = Affine2::scale_around(0.0, Point2::origin());
        assert!(t.inverse().is_none());
    }
}
