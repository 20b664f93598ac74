//! Crossing index shared by every boundary of a Boolean operation.
//!
//! Each crossing is stored once, with the edge and edge parameter it has on
//! both boundaries, so the routes of the two operands are cut at the very
//! same point.

use super::core::SimplePolygon;
use super::route::RouteHit;
use crate::primitives::Point2;
use crate::tolerance::{edge_contact, EdgeContact};
use num_traits::Float;
use std::cmp::Ordering;

/// Which operand of a Boolean operation a boundary belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    First,
    Second,
}

impl Operand {
    pub fn other(self) -> Self {
        match self {
            Operand::First => Operand::Second,
            Operand::Second => Operand::First,
        }
    }
}

/// Which ring of a holed polygon a boundary is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ring {
    Rim,
    Hole(usize),
}

/// Identifies one boundary taking part in a Boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryId {
    pub operand: Operand,
    pub ring: Ring,
}

impl BoundaryId {
    pub fn new(operand: Operand, ring: Ring) -> Self {
        Self { operand, ring }
    }

    pub fn rim(operand: Operand) -> Self {
        Self::new(operand, Ring::Rim)
    }

    pub fn hole(operand: Operand, index: usize) -> Self {
        Self::new(operand, Ring::Hole(index))
    }
}

/// Where a crossing sits on one of its two boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryHit<F> {
    pub boundary: BoundaryId,
    pub edge: usize,
    pub param: F,
}

/// A transversal crossing between two boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing<F> {
    pub point: Point2<F>,
    pub hits: [BoundaryHit<F>; 2],
}

/// Flat store of crossings between any number of boundary pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossingArena<F> {
    crossings: Vec<Crossing<F>>,
    touches: usize,
}

impl<F: Float> Default for CrossingArena<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> CrossingArena<F> {
    pub fn new() -> Self {
        Self {
            crossings: Vec::new(),
            touches: 0,
        }
    }

    /// Indexes every crossing between boundary `a` and boundary `b`.
    ///
    /// Pairs whose bounds are disjoint are skipped. Endpoint contacts and
    /// collinear overlaps are counted as touches and never recorded as
    /// crossings.
    pub fn index_pair(
        &mut self,
        a: (BoundaryId, &SimplePolygon<F>),
        b: (BoundaryId, &SimplePolygon<F>),
        eps: F,
    ) {
        let (a_id, a_poly) = a;
        let (b_id, b_poly) = b;
        debug_assert_ne!(a_id, b_id, "a boundary is never paired with itself");
        if !a_poly.bounds_overlap(b_poly) {
            return;
        }
        let Some(b_bounds) = b_poly.bounds() else {
            return;
        };

        for (i, ea) in a_poly.edges().enumerate() {
            if !b_bounds.overlaps_segment(ea, eps) {
                continue;
            }
            for (j, eb) in b_poly.edges().enumerate() {
                match edge_contact(ea, eb, eps) {
                    EdgeContact::None => {}
                    EdgeContact::Touch => self.touches += 1,
                    EdgeContact::Crossing { point, t1, t2 } => {
                        self.crossings.push(Crossing {
                            point,
                            hits: [
                                BoundaryHit {
                                    boundary: a_id,
                                    edge: i,
                                    param: t1,
                                },
                                BoundaryHit {
                                    boundary: b_id,
                                    edge: j,
                                    param: t2,
                                },
                            ],
                        });
                    }
                }
            }
        }
    }

    pub fn crossings(&self) -> &[Crossing<F>] {
        &self.crossings
    }

    /// Number of endpoint or collinear contacts seen while indexing.
    pub fn touches(&self) -> usize {
        self.touches
    }

    pub fn is_empty(&self) -> bool {
        self.crossings.is_empty()
    }

    /// Number of crossings lying on `boundary`.
    pub fn count_for(&self, boundary: BoundaryId) -> usize {
        self.crossings
            .iter()
            .flat_map(|c| c.hits.iter())
            .filter(|h| h.boundary == boundary)
            .count()
    }

    /// Crossings on `boundary` in traversal order, sorted by edge then parameter.
    pub fn hits_for(&self, boundary: BoundaryId) -> Vec<RouteHit<F>> {
        let mut hits: Vec<RouteHit<F>> = self
            .crossings
            .iter()
            .flat_map(|c| {
                c.hits
                    .iter()
                    .filter(move |h| h.boundary == boundary)
                    .map(move |h| RouteHit {
                        edge: h.edge,
                        param: h.param,
                        point: c.point,
                    })
            })
            .collect();
        hits.sort_by(|a, b| {
            a.edge
                .cmp(&b.edge)
                .then(a.param.partial_cmp(&b.param).unwrap_or(Ordering::Equal))
                .then(a.point.x.partial_cmp(&b.point.x).unwrap_or(Ordering::Equal))
                .then(a.point.y.partial_cmp(&b.point.y).unwrap_or(Ordering::Equal))
        });
        hits
    }
}

/// Indexes the crossings between two simple polygons.
///
/// `a` is recorded as the first operand's rim and `b` as the second's.
///
/// # Example
///
/// ```
/// use holedpoly::polygon::{index_crossings, SimplePolygon};
/// use holedpoly::primitives::Point2;
///
/// let a = SimplePolygon::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(10.0, 10.0),
///     Point2::new(0.0, 10.0),
/// ]);
/// let b = SimplePolygon::new(vec![
///     Point2::new(5.0, 5.0),
///     Point2::new(15.0, 5.0),
///     Point2::new(15.0, 15.0),
///     Point2::new(5.0, 15.0),
/// ]);
///
/// let arena = index_crossings(&a, &b, 1e-9);
/// assert_eq!(arena.crossings().len(), 2);
/// ```
pub fn index_crossings<F: Float>(
    a: &SimplePolygon<F>,
    b: &SimplePolygon<F>,
    eps: F,
) -> CrossingArena<F> {
    let mut arena = CrossingArena::new();
    arena.index_pair(
        (BoundaryId::rim(Operand::First), a),
        (BoundaryId::rim(Operand::Second), b),
        eps,
    );
    arena
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f64 = 1e-9;

    fn square(x0: f64, y0: f64, size: f64) -> SimplePolygon<f64> {
        SimplePolygon::new(vec![
            Point2::new(x0, y0),
            Point2::new(x0 + size, y0),
            Point2::new(x0 + size, y0 + size),
            Point2::new(x0, y0 + size),
        ])
    }

    #[test]
    fn test_offset_squares() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let arena = index_crossings(&a, &b, EPS);

        assert_eq!(arena.crossings().len(), 2);
        assert_eq!(arena.touches(), 0);

        let first = BoundaryId::rim(Operand::First);
        let hits = arena.hits_for(first);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].edge, 1);
        assert_relative_eq!(hits[0].point.x, 10.0);
        assert_relative_eq!(hits[0].point.y, 5.0);
        assert_eq!(hits[1].edge, 2);
        assert_relative_eq!(hits[1].point.x, 5.0);
        assert_relative_eq!(hits[1].point.y, 10.0);

        let second = BoundaryId::rim(Operand::Second);
        let hits = arena.hits_for(second);
        assert_eq!(hits[0].edge, 0);
        assert_eq!(hits[1].edge, 3);
    }

    #[test]
    fn test_shared_points_are_identical() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(3.3, 2.7, 10.0);
        let arena = index_crossings(&a, &b, EPS);
        let mut pa: Vec<_> = arena
            .hits_for(BoundaryId::rim(Operand::First))
            .iter()
            .map(|h| (h.point.x.to_bits(), h.point.y.to_bits()))
            .collect();
        let mut pb: Vec<_> = arena
            .hits_for(BoundaryId::rim(Operand::Second))
            .iter()
            .map(|h| (h.point.x.to_bits(), h.point.y.to_bits()))
            .collect();
        pa.sort_unstable();
        pb.sort_unstable();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_disjoint_bounds_skipped() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 5.0, 1.0);
        let arena = index_crossings(&a, &b, EPS);
        assert!(arena.is_empty());
        assert_eq!(arena.touches(), 0);
    }

    #[test]
    fn test_coincident_edges_are_touches() {
        let a = square(0.0, 0.0, 10.0);
        let arena = index_crossings(&a, &a.clone(), EPS);
        assert!(arena.is_empty());
        assert!(arena.touches() > 0);
    }

    #[test]
    fn test_crossing_counts_are_even() {
        let a = square(0.0, 0.0, 10.0);
        let b = SimplePolygon::new(vec![
            Point2::new(-1.0, 2.0),
            Point2::new(11.0, 2.0),
            Point2::new(11.0, 4.0),
            Point2::new(-1.0, 4.0),
        ]);
        let arena = index_crossings(&a, &b, EPS);
        assert_eq!(arena.count_for(BoundaryId::rim(Operand::First)), 4);
        assert_eq!(arena.count_for(BoundaryId::rim(Operand::Second)), 4);
    }

    #[test]
    fn test_multiple_pairs_share_arena() {
        let a = square(0.0, 0.0, 10.0);
        let hole = square(2.0, 2.0, 2.0);
        let b = square(3.0, 3.0, 10.0);
        let mut arena = CrossingArena::new();
        let rim_b = BoundaryId::rim(Operand::Second);
        arena.index_pair((BoundaryId::rim(Operand::First), &a), (rim_b, &b), EPS);
        arena.index_pair((BoundaryId::hole(Operand::First, 0), &hole), (rim_b, &b), EPS);

        assert_eq!(arena.count_for(rim_b), 4);
        assert_eq!(arena.count_for(BoundaryId::hole(Operand::First, 0)), 2);
        let hits = arena.hits_for(rim_b);
        assert!(hits
            .windows(2)
            .all(|w| (w[0].edge, w[0].param) <= (w[1].edge, w[1].param)));
    }

    #[test]
    fn test_operand_other() {
        assert_eq!(Operand::First.other(), Operand::Second);
        assert_eq!(Operand::Second.other(), Operand::First);
    }
}
