//! Simple polygon: a closed vertex ring with cached bounds.

use crate::bounds::Aabb2;
use crate::error::HoledPolyError;
use crate::primitives::{Affine2, Interval, Point2, Segment2, Vec2};
use crate::tolerance::{constant, dedup_ring, snap_to_grid};
use num_traits::Float;

/// A simple polygon represented as a closed ring of vertices.
///
/// The ring is implicitly closed: edge `i` runs from vertex `i` to vertex
/// `(i + 1) % n`. The bounding rectangle is cached and kept current by every
/// mutating method.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplePolygon<F> {
    vertices: Vec<Point2<F>>,
    bounds: Option<Aabb2<F>>,
}

/// Closest approach between two boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach<F> {
    /// Signed distance; negative when one shape lies inside the other.
    pub distance: F,
    /// Closest point on the first shape.
    pub on_self: Point2<F>,
    /// Closest point on the second shape.
    pub on_other: Point2<F>,
}

impl<F: Float> SimplePolygon<F> {
    /// Creates a polygon from vertices without validating them.
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        let bounds = Aabb2::from_points(vertices.iter().copied());
        Self { vertices, bounds }
    }

    /// Creates a polygon, rejecting rings that cannot bound an area.
    pub fn try_new(vertices: Vec<Point2<F>>) -> Result<Self, HoledPolyError> {
        if vertices.len() < 3 {
            return Err(HoledPolyError::TooFewVertices {
                count: vertices.len(),
            });
        }
        if let Some(index) = vertices
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(HoledPolyError::NonFiniteVertex { index });
        }
        Ok(Self::new(vertices))
    }

    /// Creates an empty polygon.
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            bounds: None,
        }
    }

    /// Creates the counter-clockwise outline of a rectangle.
    pub fn from_aabb(rect: Aabb2<F>) -> Self {
        Self::new(rect.corners().to_vec())
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2<F>] {
        &self.vertices
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of vertices, which is also the number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// The first boundary point, where boundary walks begin.
    #[inline]
    pub fn start(&self) -> Option<Point2<F>> {
        self.vertices.first().copied()
    }

    /// Cached bounding rectangle; `None` for an empty polygon.
    #[inline]
    pub fn bounds(&self) -> Option<Aabb2<F>> {
        self.bounds
    }

    /// Edge `i`, from vertex `i` to the next vertex around the ring.
    #[inline]
    pub fn edge(&self, i: usize) -> Segment2<F> {
        let n = self.vertices.len();
        Segment2::new(self.vertices[i], self.vertices[(i + 1) % n])
    }

    /// Iterates over the edges in boundary order.
    pub fn edges(&self) -> impl Iterator<Item = Segment2<F>> + '_ {
        (0..self.vertices.len()).map(move |i| self.edge(i))
    }

    /// Returns `true` if the bounding rectangles of both polygons overlap.
    #[inline]
    pub fn bounds_overlap(&self, other: &Self) -> bool {
        match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => a.overlaps(b),
            _ => false,
        }
    }

    /// Signed area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> F {
        ring_signed_area(&self.vertices)
    }

    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Reverses the ring if it winds clockwise.
    pub fn ensure_ccw(&mut self) {
        if self.signed_area() < F::zero() {
            self.vertices.reverse();
        }
    }

    /// Total edge length.
    pub fn perimeter(&self) -> F {
        if self.vertices.len() < 2 {
            return F::zero();
        }
        self.edges().fold(F::zero(), |acc, e| acc + e.length())
    }

    /// Ray-casting point-in-polygon test.
    ///
    /// Points exactly on the boundary may report either answer.
    pub fn contains_point(&self, point: Point2<F>) -> bool {
        match self.bounds {
            Some(b) if b.contains_point(point) => ring_contains(&self.vertices, point),
            _ => false,
        }
    }

    /// Returns `true` if the segment lies inside without touching the boundary.
    pub fn contains_segment(&self, segment: Segment2<F>) -> bool {
        self.contains_point(segment.start)
            && self.contains_point(segment.end)
            && !self.crosses_segment(segment)
    }

    /// Returns `true` if `other` lies entirely inside this polygon.
    pub fn contains_polygon(&self, other: &Self) -> bool {
        let (Some(bounds), Some(other_bounds), Some(start)) =
            (self.bounds, other.bounds, other.start())
        else {
            return false;
        };
        bounds.contains_rect(other_bounds)
            && self.contains_point(start)
            && !self.crosses_polygon(other)
    }

    /// Returns `true` if the rectangle lies entirely inside this polygon.
    pub fn contains_rect(&self, rect: Aabb2<F>) -> bool {
        self.contains_polygon(&Self::from_aabb(rect))
    }

    /// Returns `true` if the polygon lies inside the rectangle.
    pub fn is_contained_by(&self, rect: Aabb2<F>) -> bool {
        self.bounds.is_some_and(|b| rect.contains_rect(b))
    }

    /// Returns `true` if any edge meets the segment.
    pub fn crosses_segment(&self, segment: Segment2<F>) -> bool {
        self.edges().any(|e| e.intersects(segment))
    }

    /// Points where the boundary meets the segment, ordered from its start.
    pub fn segment_crossings(&self, segment: Segment2<F>) -> Vec<Point2<F>> {
        let mut points: Vec<Point2<F>> = self
            .edges()
            .filter_map(|e| segment_hit(segment, e).map(|(t, _)| segment.point_at(t)))
            .collect();
        sort_by_distance_from(&mut points, segment.start);
        points
    }

    /// Points where the boundary meets the ray, ordered from its origin.
    pub fn ray_crossings(&self, origin: Point2<F>, direction: Vec2<F>) -> Vec<Point2<F>> {
        let d1 = direction;
        let mut points = Vec::new();
        for e in self.edges() {
            let d2 = e.direction();
            let denom = d1.cross(d2);
            if denom == F::zero() {
                continue;
            }
            let d = e.start - origin;
            let t = d.cross(d2) / denom;
            let u = d.cross(d1) / denom;
            if t >= F::zero() && u >= F::zero() && u <= F::one() {
                points.push(origin + d1 * t);
            }
        }
        sort_by_distance_from(&mut points, origin);
        points
    }

    /// Returns `true` if any pair of edges of the two polygons meet.
    pub fn crosses_polygon(&self, other: &Self) -> bool {
        if !self.bounds_overlap(other) {
            return false;
        }
        self.edges()
            .any(|e| other.edges().any(|o| e.intersects(o)))
    }

    /// Returns `true` if the boundary meets the rectangle's outline.
    pub fn crosses_rect(&self, rect: Aabb2<F>) -> bool {
        self.crosses_polygon(&Self::from_aabb(rect))
    }

    /// Returns `true` if the two polygons share any area.
    pub fn overlaps(&self, other: &Self) -> bool {
        let (Some(start), Some(other_start)) = (self.start(), other.start()) else {
            return false;
        };
        self.bounds_overlap(other)
            && (self.crosses_polygon(other)
                || self.contains_point(other_start)
                || other.contains_point(start))
    }

    /// Returns `true` if the polygon shares any area with the rectangle.
    pub fn overlaps_rect(&self, rect: Aabb2<F>) -> bool {
        self.overlaps(&Self::from_aabb(rect))
    }

    /// Signed distance from the boundary; negative when `point` is inside.
    pub fn distance_to_point(&self, point: Point2<F>) -> F {
        let d = self
            .edges()
            .map(|e| e.distance_to_point(point))
            .fold(F::infinity(), F::min);
        if self.contains_point(point) {
            -d
        } else {
            d
        }
    }

    /// Signed distance to a segment; zero if it meets the boundary, negative
    /// if it lies inside.
    pub fn distance_to_segment(&self, segment: Segment2<F>) -> F {
        if self.crosses_segment(segment) {
            return F::zero();
        }
        let d = self
            .edges()
            .map(|e| e.closest_points(segment).0)
            .fold(F::infinity(), F::min);
        if self.contains_point(segment.start) {
            -d
        } else {
            d
        }
    }

    /// Closest approach to another polygon.
    ///
    /// The distance is zero when the boundaries meet and negative when one
    /// polygon lies inside the other. Returns `None` if either is empty.
    pub fn distance_to_polygon(&self, other: &Self) -> Option<ClosestApproach<F>> {
        let (start, other_start) = (self.start()?, other.start()?);

        let mut best = ClosestApproach {
            distance: F::infinity(),
            on_self: start,
            on_other: other_start,
        };
        for e in self.edges() {
            for o in other.edges() {
                let (d, on_self, on_other) = e.closest_points(o);
                if d < best.distance {
                    best = ClosestApproach {
                        distance: d,
                        on_self,
                        on_other,
                    };
                }
            }
        }

        if best.distance > F::zero()
            && (self.contains_point(other_start) || other.contains_point(start))
        {
            best.distance = -best.distance;
        }
        Some(best)
    }

    /// Returns `true` if `point` is inside or within `dist` of the boundary.
    pub fn is_within_distance(&self, point: Point2<F>, dist: F) -> bool {
        !self.is_empty() && self.distance_to_point(point) <= dist
    }

    /// Extent of the vertices projected onto `direction` (not normalised).
    pub fn project_onto_vector(&self, direction: Vec2<F>) -> Option<Interval<F>> {
        let mut iter = self.vertices.iter().map(|p| p.to_vec().dot(direction));
        let first = iter.next()?;
        Some(iter.fold(Interval::from_value(first), Interval::expand_to_include))
    }

    /// Extent of the vertices along `line`, in units of its length from its start.
    pub fn project_onto_line(&self, line: Segment2<F>) -> Option<Interval<F>> {
        let dir = line.direction();
        let len_sq = dir.magnitude_squared();
        if len_sq <= F::zero() {
            return None;
        }
        let mut iter = self
            .vertices
            .iter()
            .map(|p| (*p - line.start).dot(dir) / len_sq);
        let first = iter.next()?;
        Some(iter.fold(Interval::from_value(first), Interval::expand_to_include))
    }

    /// Moves every vertex by `offset`.
    pub fn translate(&mut self, offset: Vec2<F>) {
        for v in &mut self.vertices {
            *v = *v + offset;
        }
        self.refresh_bounds();
    }

    /// Applies an affine transform to every vertex.
    pub fn transform(&mut self, transform: &Affine2<F>) {
        for v in &mut self.vertices {
            *v = transform.apply_point(*v);
        }
        self.refresh_bounds();
    }

    /// Snaps every vertex to the grid and drops vertices that collapse.
    pub fn snap_to_grid(&mut self, grid_size: F) {
        let snapped = snap_to_grid(&self.vertices, grid_size);
        self.vertices = dedup_ring(&snapped, grid_size * constant(1e-3));
        self.refresh_bounds();
    }

    fn refresh_bounds(&mut self) {
        self.bounds = Aabb2::from_points(self.vertices.iter().copied());
    }
}

/// Signed shoelace area of a ring; positive for counter-clockwise winding.
pub(crate) fn ring_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    if vertices.len() < 3 {
        return F::zero();
    }

    let n = vertices.len();
    let twice = (0..n).fold(F::zero(), |acc, i| {
        let (a, b) = (vertices[i], vertices[(i + 1) % n]);
        acc + a.x * b.y - b.x * a.y
    });
    twice / constant(2.0)
}

fn ring_contains<F: Float>(vertices: &[Point2<F>], point: Point2<F>) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for (i, &vi) in vertices.iter().enumerate() {
        let vj = vertices[j];
        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Parameters `(t, u)` where `a` and `b` meet, both in `[0, 1]`.
fn segment_hit<F: Float>(a: Segment2<F>, b: Segment2<F>) -> Option<(F, F)> {
    let d1 = a.direction();
    let d2 = b.direction();
    let denom = d1.cross(d2);
    if denom == F::zero() {
        return None;
    }
    let d = b.start - a.start;
    let t = d.cross(d2) / denom;
    let u = d.cross(d1) / denom;
    let unit = |v: F| v >= F::zero() && v <= F::one();
    (unit(t) && unit(u)).then_some((t, u))
}

pub(crate) fn sort_by_distance_from<F: Float>(points: &mut [Point2<F>], origin: Point2<F>) {
    points.sort_by(|a, b| {
        origin
            .distance_squared(*a)
            .partial_cmp(&origin.distance_squared(*b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
