//! Polygons with holes.

use super::core::{sort_by_distance_from, ClosestApproach, SimplePolygon};
use super::degenerate::Grid;
use crate::bounds::Aabb2;
use crate::error::HoledPolyError;
use crate::primitives::{Affine2, Interval, Point2, Segment2, Vec2};
use crate::tolerance::constant;
use num_traits::Float;
use rand::Rng;

/// A polygon with an outer rim and any number of holes.
///
/// Every hole should lie inside the rim and no two holes should overlap;
/// [`is_valid`](Self::is_valid) checks this, nothing enforces it. A default
/// instance has no rim: every predicate on it returns `false` and every
/// Boolean operation returns nothing.
///
/// # Example
///
/// ```
/// use holedpoly::polygon::{HoledPolygon, SimplePolygon};
/// use holedpoly::primitives::Point2;
///
/// let rim = SimplePolygon::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(10.0, 10.0),
///     Point2::new(0.0, 10.0),
/// ]);
/// let hole = SimplePolygon::new(vec![
///     Point2::new(2.0, 2.0),
///     Point2::new(4.0, 2.0),
///     Point2::new(4.0, 4.0),
///     Point2::new(2.0, 4.0),
/// ]);
/// let shape = HoledPolygon::with_holes(rim, vec![hole]);
///
/// assert!(shape.is_valid());
/// assert!(shape.contains_point(Point2::new(1.0, 1.0)));
/// assert!(!shape.contains_point(Point2::new(3.0, 3.0)));
/// assert_eq!(shape.area(), 96.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HoledPolygon<F> {
    rim: Option<SimplePolygon<F>>,
    holes: Vec<SimplePolygon<F>>,
}

impl<F> Default for HoledPolygon<F> {
    fn default() -> Self {
        Self {
            rim: None,
            holes: Vec::new(),
        }
    }
}

impl<F: Float> From<SimplePolygon<F>> for HoledPolygon<F> {
    fn from(rim: SimplePolygon<F>) -> Self {
        Self::new(rim)
    }
}

impl<F: Float> HoledPolygon<F> {
    /// A holed polygon with the given rim and no holes.
    pub fn new(rim: SimplePolygon<F>) -> Self {
        Self {
            rim: Some(rim),
            holes: Vec::new(),
        }
    }

    pub fn with_holes(rim: SimplePolygon<F>, holes: Vec<SimplePolygon<F>>) -> Self {
        Self {
            rim: Some(rim),
            holes,
        }
    }

    #[inline]
    pub fn rim(&self) -> Option<&SimplePolygon<F>> {
        self.rim.as_ref()
    }

    pub fn set_rim(&mut self, rim: SimplePolygon<F>) {
        self.rim = Some(rim);
    }

    #[inline]
    pub fn holes(&self) -> &[SimplePolygon<F>] {
        &self.holes
    }

    #[inline]
    pub fn hole(&self, i: usize) -> Option<&SimplePolygon<F>> {
        self.holes.get(i)
    }

    #[inline]
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    pub fn add_hole(&mut self, hole: SimplePolygon<F>) {
        self.holes.push(hole);
    }

    /// Replaces hole `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn set_hole(&mut self, i: usize, hole: SimplePolygon<F>) {
        self.holes[i] = hole;
    }

    /// Removes and returns hole `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn remove_hole(&mut self, i: usize) -> SimplePolygon<F> {
        self.holes.remove(i)
    }

    /// Removes the rim and every hole.
    pub fn clear(&mut self) {
        self.rim = None;
        self.holes.clear();
    }

    /// Total number of edges over the rim and holes.
    pub fn line_count(&self) -> usize {
        self.rings().map(SimplePolygon::len).sum()
    }

    /// The rim followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &SimplePolygon<F>> {
        self.rim.iter().chain(self.holes.iter())
    }

    fn rings_mut(&mut self) -> impl Iterator<Item = &mut SimplePolygon<F>> {
        self.rim.iter_mut().chain(self.holes.iter_mut())
    }

    /// Returns `true` if every hole lies inside the rim and no two holes overlap.
    pub fn is_valid(&self) -> bool {
        let Some(rim) = &self.rim else {
            return false;
        };
        if !self.holes.iter().all(|h| rim.contains_polygon(h)) {
            return false;
        }
        self.holes
            .iter()
            .enumerate()
            .all(|(i, h)| self.holes[i + 1..].iter().all(|o| !h.overlaps(o)))
    }

    /// Rim area less the hole areas.
    pub fn area(&self) -> F {
        let Some(rim) = &self.rim else {
            return F::zero();
        };
        self.holes
            .iter()
            .fold(rim.area(), |acc, h| acc - h.area())
    }

    /// Sum of the rim and hole perimeters.
    pub fn perimeter(&self) -> F {
        self.rings()
            .fold(F::zero(), |acc, ring| acc + ring.perimeter())
    }

    /// Bounds of the rim and holes together.
    pub fn bounding_rect(&self) -> Option<Aabb2<F>> {
        self.rings()
            .filter_map(SimplePolygon::bounds)
            .reduce(Aabb2::union)
    }

    pub fn project_onto_vector(&self, direction: Vec2<F>) -> Option<Interval<F>> {
        self.rim.as_ref()?.project_onto_vector(direction)
    }

    pub fn project_onto_line(&self, line: Segment2<F>) -> Option<Interval<F>> {
        self.rim.as_ref()?.project_onto_line(line)
    }

    /// Returns `true` if any two edges of the rim and holes cross.
    ///
    /// Neighbouring edges of the same ring share a vertex and are not
    /// compared.
    pub fn has_crossing_lines(&self) -> bool {
        let edges: Vec<(usize, usize, usize, Segment2<F>)> = self
            .rings()
            .enumerate()
            .flat_map(|(r, ring)| {
                let n = ring.len();
                ring.edges().enumerate().map(move |(i, e)| (r, i, n, e))
            })
            .collect();

        edges.iter().enumerate().any(|(k, &(r1, i, n, e1))| {
            edges[k + 1..].iter().any(|&(r2, j, _, e2)| {
                let adjacent = r1 == r2 && (j == i + 1 || (i == 0 && j + 1 == n));
                !adjacent && e1.intersects(e2)
            })
        })
    }

    /// Inside the rim and outside every hole.
    pub fn contains_point(&self, point: Point2<F>) -> bool {
        self.rim.as_ref().is_some_and(|rim| rim.contains_point(point))
            && !self.holes.iter().any(|h| h.contains_point(point))
    }

    pub fn contains_segment(&self, segment: Segment2<F>) -> bool {
        self.rim
            .as_ref()
            .is_some_and(|rim| rim.contains_segment(segment))
            && !self
                .holes
                .iter()
                .any(|h| h.crosses_segment(segment) || h.contains_point(segment.start))
    }

    pub fn contains_polygon(&self, polygon: &SimplePolygon<F>) -> bool {
        self.rim
            .as_ref()
            .is_some_and(|rim| rim.contains_polygon(polygon))
            && !self.holes.iter().any(|h| h.overlaps(polygon))
    }

    pub fn contains_holed(&self, other: &HoledPolygon<F>) -> bool {
        match &other.rim {
            Some(rim) => {
                self.contains_polygon(rim) && other.holes.iter().all(|h| self.contains_polygon(h))
            }
            None => false,
        }
    }

    pub fn contains_rect(&self, rect: Aabb2<F>) -> bool {
        self.rim.as_ref().is_some_and(|rim| rim.contains_rect(rect))
            && !self.holes.iter().any(|h| h.overlaps_rect(rect))
    }

    pub fn is_contained_by(&self, rect: Aabb2<F>) -> bool {
        self.rim.as_ref().is_some_and(|rim| rim.is_contained_by(rect))
    }

    pub fn crosses_segment(&self, segment: Segment2<F>) -> bool {
        self.rings().any(|ring| ring.crosses_segment(segment))
    }

    /// Points where any ring meets the segment, ordered from its start.
    pub fn segment_crossings(&self, segment: Segment2<F>) -> Vec<Point2<F>> {
        let mut points: Vec<Point2<F>> = self
            .rings()
            .flat_map(|ring| ring.segment_crossings(segment))
            .collect();
        sort_by_distance_from(&mut points, segment.start);
        points
    }

    /// Points where any ring meets the ray, ordered from its origin.
    pub fn ray_crossings(&self, origin: Point2<F>, direction: Vec2<F>) -> Vec<Point2<F>> {
        let mut points: Vec<Point2<F>> = self
            .rings()
            .flat_map(|ring| ring.ray_crossings(origin, direction))
            .collect();
        sort_by_distance_from(&mut points, origin);
        points
    }

    pub fn crosses_polygon(&self, polygon: &SimplePolygon<F>) -> bool {
        self.rim.is_some() && self.rings().any(|ring| ring.crosses_polygon(polygon))
    }

    pub fn crosses_rect(&self, rect: Aabb2<F>) -> bool {
        self.rim.is_some() && self.rings().any(|ring| ring.crosses_rect(rect))
    }

    /// Shares area with `polygon`, which must not sit wholly inside a hole.
    pub fn overlaps(&self, polygon: &SimplePolygon<F>) -> bool {
        self.rim.as_ref().is_some_and(|rim| rim.overlaps(polygon))
            && !self.holes.iter().any(|h| h.contains_polygon(polygon))
    }

    pub fn overlaps_holed(&self, other: &HoledPolygon<F>) -> bool {
        let (Some(rim), Some(other_rim)) = (&self.rim, &other.rim) else {
            return false;
        };
        self.overlaps(other_rim) && !other.holes.iter().any(|h| h.contains_polygon(rim))
    }

    pub fn overlaps_rect(&self, rect: Aabb2<F>) -> bool {
        self.rim.as_ref().is_some_and(|rim| rim.overlaps_rect(rect))
            && !self.holes.iter().any(|h| h.contains_rect(rect))
    }

    /// Signed distance to the nearest ring; negative inside the holed area.
    pub fn distance_to_point(&self, point: Point2<F>) -> Option<F> {
        let rim = self.rim.as_ref().filter(|r| !r.is_empty())?;
        let d = rim.distance_to_point(point);
        let mut inside = d < F::zero();
        let mut best = d.abs();
        for h in &self.holes {
            let dh = h.distance_to_point(point);
            if dh < F::zero() {
                inside = false;
            }
            best = best.min(dh.abs());
        }
        Some(if inside { -best } else { best })
    }

    /// Signed distance to a segment; zero if any ring meets it.
    pub fn distance_to_segment(&self, segment: Segment2<F>) -> Option<F> {
        let rim = self.rim.as_ref().filter(|r| !r.is_empty())?;
        let d = rim.distance_to_segment(segment);
        if d == F::zero() {
            return Some(d);
        }
        let mut inside = d < F::zero();
        let mut best = d.abs();
        for h in &self.holes {
            let dh = h.distance_to_segment(segment);
            if dh == F::zero() {
                return Some(dh);
            }
            if dh < F::zero() {
                inside = false;
            }
            best = best.min(dh.abs());
        }
        Some(if inside { -best } else { best })
    }

    /// Closest approach to a simple polygon over the rim and holes.
    pub fn distance_to_polygon(&self, polygon: &SimplePolygon<F>) -> Option<ClosestApproach<F>> {
        let rim = self.rim.as_ref()?;
        let first = rim.distance_to_polygon(polygon)?;
        if first.distance == F::zero() {
            return Some(first);
        }
        let mut inside = first.distance < F::zero();
        let mut best = ClosestApproach {
            distance: first.distance.abs(),
            ..first
        };
        for h in &self.holes {
            let Some(approach) = h.distance_to_polygon(polygon) else {
                continue;
            };
            if approach.distance == F::zero() {
                return Some(approach);
            }
            if approach.distance < F::zero() {
                inside = false;
            }
            if approach.distance.abs() < best.distance {
                best = ClosestApproach {
                    distance: approach.distance.abs(),
                    ..approach
                };
            }
        }
        if inside {
            best.distance = -best.distance;
        }
        Some(best)
    }

    /// Returns `true` if `point` is within `dist` of the rim or any hole.
    pub fn is_within_distance(&self, point: Point2<F>, dist: F) -> bool {
        self.rim.is_some() && self.rings().any(|ring| ring.is_within_distance(point, dist))
    }

    pub fn translate(&mut self, offset: Vec2<F>) {
        self.rings_mut().for_each(|ring| ring.translate(offset));
    }

    /// Rotates counter-clockwise by `angle` radians around `origin`.
    pub fn rotate(&mut self, angle: F, origin: Point2<F>) {
        self.transform(&Affine2::rotation_around(angle, origin));
    }

    /// Scales by `factor` around `origin`.
    pub fn grow(&mut self, factor: F, origin: Point2<F>) {
        self.transform(&Affine2::scale_around(factor, origin));
    }

    /// Point reflection through `center`.
    pub fn reflect_through(&mut self, center: Point2<F>) {
        self.transform(&Affine2::reflect_through(center));
    }

    /// Mirror image across the infinite line through `line`.
    pub fn reflect_across(&mut self, line: Segment2<F>) {
        self.transform(&Affine2::reflect_across(line));
    }

    pub fn transform(&mut self, transform: &Affine2<F>) {
        self.rings_mut().for_each(|ring| ring.transform(transform));
    }

    /// Undoes `transform` on the rim and every hole.
    pub fn inverse_transform(&mut self, transform: &Affine2<F>) -> Result<(), HoledPolyError> {
        let inverse = transform
            .inverse()
            .ok_or_else(|| HoledPolyError::SingularTransform {
                determinant: transform.determinant().to_f64().unwrap_or(f64::NAN),
            })?;
        self.transform(&inverse);
        Ok(())
    }

    /// Moves the whole shape by a small random offset.
    ///
    /// Each axis moves by 10 to 100 times the coordinate precision of the
    /// rim's furthest corner, in a random direction.
    pub fn random_perturb<R: Rng>(&mut self, rng: &mut R) {
        let Some(bounds) = self.rim.as_ref().and_then(SimplePolygon::bounds) else {
            return;
        };
        let reach = bounds.point_furthest_from_origin().max_abs_coord().max(F::one());
        let unit = reach * F::epsilon().sqrt();
        let mut component = || {
            let magnitude = unit * constant(rng.random_range(10.0..=100.0));
            if rng.random_bool(0.5) {
                -magnitude
            } else {
                magnitude
            }
        };
        let offset = Vec2::new(component(), component());
        self.translate(offset);
    }

    /// Snaps every ring to the grid.
    pub fn snap_to_grid(&mut self, grid: &Grid<F>) {
        let size = grid.grid_size();
        self.rings_mut().for_each(|ring| ring.snap_to_grid(size));
    }

    /// Drops holes that no longer bound any area.
    pub(crate) fn drop_collapsed_holes(&mut self) {
        self.holes.retain(|h| h.len() >= 3 && h.area() > F::zero());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    fn square(x0: f64, y0: f64, size: f64) -> SimplePolygon<f64> {
        SimplePolygon::new(vec![
            Point2::new(x0, y0),
            Point2::new(x0 + size, y0),
            Point2::new(x0 + size, y0 + size),
            Point2::new(x0, y0 + size),
        ])
    }

    fn framed() -> HoledPolygon<f64> {
        HoledPolygon::with_holes(square(0.0, 0.0, 10.0), vec![square(2.0, 2.0, 2.0)])
    }

    #[test]
    fn test_default_has_no_rim() {
        let empty = HoledPolygon::<f64>::default();
        assert!(empty.rim().is_none());
        assert!(!empty.is_valid());
        assert!(!empty.contains_point(Point2::new(0.0, 0.0)));
        assert!(!empty.contains_polygon(&square(0.0, 0.0, 1.0)));
        assert!(!empty.overlaps(&square(0.0, 0.0, 1.0)));
        assert!(!empty.crosses_polygon(&square(0.0, 0.0, 1.0)));
        assert!(empty.distance_to_point(Point2::new(0.0, 0.0)).is_none());
        assert!(empty.bounding_rect().is_none());
        assert_eq!(empty.line_count(), 0);
        assert_eq!(empty.area(), 0.0);
    }

    #[test]
    fn test_contains_point_respects_holes() {
        let shape = framed();
        assert!(shape.contains_point(Point2::new(1.0, 1.0)));
        assert!(!shape.contains_point(Point2::new(3.0, 3.0)));
        assert!(!shape.contains_point(Point2::new(11.0, 1.0)));
    }

    #[test]
    fn test_is_valid() {
        assert!(framed().is_valid());

        let mut escaped = framed();
        escaped.add_hole(square(8.0, 8.0, 4.0));
        assert!(!escaped.is_valid());

        let mut overlapping = framed();
        overlapping.add_hole(square(3.0, 3.0, 2.0));
        assert!(!overlapping.is_valid());
    }

    #[test]
    fn test_hole_accessors() {
        let mut shape = framed();
        assert_eq!(shape.hole_count(), 1);
        shape.add_hole(square(6.0, 6.0, 1.0));
        shape.set_hole(0, square(1.0, 6.0, 1.0));
        assert_eq!(shape.hole(0), Some(&square(1.0, 6.0, 1.0)));
        let removed = shape.remove_hole(1);
        assert_eq!(removed, square(6.0, 6.0, 1.0));
        assert_eq!(shape.line_count(), 8);
        shape.clear();
        assert!(shape.rim().is_none());
        assert_eq!(shape.hole_count(), 0);
    }

    #[test]
    fn test_contains_segment_and_polygon() {
        let shape = framed();
        assert!(shape.contains_segment(Segment2::from_coords(1.0, 1.0, 1.0, 9.0)));
        assert!(!shape.contains_segment(Segment2::from_coords(1.0, 3.0, 9.0, 3.0)));
        assert!(shape.contains_polygon(&square(5.0, 5.0, 2.0)));
        assert!(!shape.contains_polygon(&square(1.0, 1.0, 2.0)));
        assert!(!shape.contains_polygon(&square(2.5, 2.5, 1.0)));
    }

    #[test]
    fn test_contains_holed_and_rect() {
        let shape = framed();
        let inner = HoledPolygon::with_holes(square(5.0, 5.0, 4.0), vec![square(6.0, 6.0, 1.0)]);
        assert!(shape.contains_holed(&inner));
        assert!(!inner.contains_holed(&shape));
        assert!(!shape.contains_holed(&HoledPolygon::default()));

        let rect = Aabb2::new(Point2::new(5.0, 5.0), Point2::new(6.0, 6.0));
        assert!(shape.contains_rect(rect));
        let over_hole = Aabb2::new(Point2::new(1.0, 1.0), Point2::new(3.0, 3.0));
        assert!(!shape.contains_rect(over_hole));
        assert!(shape.overlaps_rect(over_hole));
        let in_hole = Aabb2::new(Point2::new(2.5, 2.5), Point2::new(3.5, 3.5));
        assert!(!shape.overlaps_rect(in_hole));
        assert!(shape.is_contained_by(Aabb2::new(Point2::new(-1.0, -1.0), Point2::new(11.0, 11.0))));
    }

    #[test]
    fn test_overlaps() {
        let shape = framed();
        assert!(shape.overlaps(&square(8.0, 8.0, 4.0)));
        assert!(!shape.overlaps(&square(2.5, 2.5, 1.0)));
        assert!(!shape.overlaps(&square(20.0, 20.0, 1.0)));

        let island = HoledPolygon::new(square(2.5, 2.5, 1.0));
        assert!(!island.overlaps_holed(&shape));
        assert!(shape.overlaps_holed(&HoledPolygon::new(square(5.0, 5.0, 1.0))));
    }

    #[test]
    fn test_crossings_merge_rim_and_holes() {
        let shape = framed();
        let line = Segment2::from_coords(-2.0, 3.0, 14.0, 3.0);
        assert!(shape.crosses_segment(line));
        let pts = shape.segment_crossings(line);
        assert_eq!(pts.len(), 4);
        for (p, x) in pts.iter().zip([0.0, 2.0, 4.0, 10.0]) {
            assert_relative_eq!(p.x, x);
            assert_relative_eq!(p.y, 3.0);
        }

        let ray = shape.ray_crossings(Point2::new(3.0, 3.0), Vec2::new(1.0, 0.0));
        let xs: Vec<f64> = ray.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![4.0, 10.0]);
    }

    #[test]
    fn test_crosses_polygon_and_rect() {
        let shape = framed();
        assert!(shape.crosses_polygon(&square(3.0, 3.0, 2.0)));
        assert!(!shape.crosses_polygon(&square(6.0, 6.0, 1.0)));
        assert!(shape.crosses_rect(Aabb2::new(Point2::new(9.0, 9.0), Point2::new(12.0, 12.0))));
    }

    #[test]
    fn test_distance_to_point_sign() {
        let shape = framed();
        assert_relative_eq!(shape.distance_to_point(Point2::new(1.0, 5.0)).unwrap(), -1.0);
        assert_relative_eq!(shape.distance_to_point(Point2::new(3.0, 3.0)).unwrap(), 1.0);
        assert_relative_eq!(shape.distance_to_point(Point2::new(13.0, 5.0)).unwrap(), 3.0);
        assert_relative_eq!(shape.distance_to_point(Point2::new(5.0, 3.0)).unwrap(), -1.0);
    }

    #[test]
    fn test_distance_to_segment() {
        let shape = framed();
        let inside = Segment2::from_coords(6.0, 3.0, 6.0, 4.0);
        assert_relative_eq!(shape.distance_to_segment(inside).unwrap(), -2.0);
        let crossing = Segment2::from_coords(3.0, 3.0, 6.0, 3.0);
        assert_eq!(shape.distance_to_segment(crossing), Some(0.0));
        let outside = Segment2::from_coords(12.0, 0.0, 12.0, 10.0);
        assert_relative_eq!(shape.distance_to_segment(outside).unwrap(), 2.0);
    }

    #[test]
    fn test_distance_to_polygon() {
        let shape = framed();
        let near_hole = square(5.0, 2.0, 1.0);
        let approach = shape.distance_to_polygon(&near_hole).unwrap();
        assert_relative_eq!(approach.distance, -1.0);
        assert_relative_eq!(approach.on_self.x, 4.0);
        assert_relative_eq!(approach.on_other.x, 5.0);

        let outside = square(12.0, 0.0, 1.0);
        assert_relative_eq!(shape.distance_to_polygon(&outside).unwrap().distance, 2.0);
    }

    #[test]
    fn test_within_distance_and_perimeter() {
        let shape = framed();
        assert!(shape.is_within_distance(Point2::new(11.0, 5.0), 1.5));
        assert!(!shape.is_within_distance(Point2::new(13.0, 5.0), 1.5));
        assert_relative_eq!(shape.perimeter(), 48.0);
        assert_relative_eq!(shape.area(), 96.0);
    }

    #[test]
    fn test_bounds_and_projection() {
        let shape = framed();
        let b = shape.bounding_rect().unwrap();
        assert_eq!(b, Aabb2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)));
        let iv = shape.project_onto_vector(Vec2::new(1.0, 0.0)).unwrap();
        assert_relative_eq!(iv.min, 0.0);
        assert_relative_eq!(iv.max, 10.0);
    }

    #[test]
    fn test_has_crossing_lines() {
        assert!(!framed().has_crossing_lines());
        let mut bad = framed();
        bad.add_hole(square(9.0, 5.0, 2.0));
        assert!(bad.has_crossing_lines());
    }

    #[test]
    fn test_transforms_move_holes_too() {
        let mut shape = framed();
        shape.translate(Vec2::new(1.0, 0.0));
        assert!(shape.contains_point(Point2::new(2.0, 1.0)));
        assert!(!shape.contains_point(Point2::new(4.0, 3.0)));

        let mut rotated = framed();
        rotated.rotate(PI, Point2::new(5.0, 5.0));
        assert!(!rotated.contains_point(Point2::new(7.0, 7.0)));
        assert!(rotated.contains_point(Point2::new(3.0, 3.0)));

        let mut grown = framed();
        grown.grow(2.0, Point2::origin());
        assert_relative_eq!(grown.area(), 384.0, epsilon = 1e-9);

        let mut mirrored = framed();
        mirrored.reflect_across(Segment2::from_coords(5.0, 0.0, 5.0, 1.0));
        assert!(!mirrored.contains_point(Point2::new(7.0, 3.0)));
        assert!(mirrored.contains_point(Point2::new(3.0, 3.0)));

        let mut flipped = framed();
        flipped.reflect_through(Point2::origin());
        assert!(!flipped.contains_point(Point2::new(-3.0, -3.0)));
    }

    #[test]
    fn test_inverse_transform_restores_holes() {
        let t = Affine2::rotation_around(0.3, Point2::new(1.0, 2.0))
            .then(Affine2::translation(Vec2::new(4.0, -1.0)));
        let mut shape = framed();
        shape.transform(&t);
        shape.inverse_transform(&t).unwrap();
        let original = framed();
        for (a, b) in shape.rings().zip(original.rings()) {
            for (p, q) in a.vertices().iter().zip(b.vertices()) {
                assert_relative_eq!(p.x, q.x, epsilon = 1e-9);
                assert_relative_eq!(p.y, q.y, epsilon = 1e-9);
            }
        }

        let singular = Affine2::new(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);
        assert!(matches!(
            shape.inverse_transform(&singular),
            Err(HoledPolyError::SingularTransform { .. })
        ));
    }

    #[test]
    fn test_random_perturb_is_small_and_seeded() {
        let mut a = framed();
        let mut b = framed();
        a.random_perturb(&mut StdRng::seed_from_u64(7));
        b.random_perturb(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_ne!(a, framed());

        let moved = a.rim().unwrap().start().unwrap();
        let d = moved.distance(Point2::origin());
        let unit = 10.0 * f64::EPSILON.sqrt();
        assert!(d >= 10.0 * unit && d <= 100.0 * unit * 2.0_f64.sqrt());
    }

    #[test]
    fn test_snap_to_grid() {
        let mut shape = framed();
        shape.translate(Vec2::new(0.1, -0.1));
        let grid = Grid::default().with_grid_size(1.0).unwrap();
        shape.snap_to_grid(&grid);
        assert_eq!(shape, framed());
    }
}
