//! Routes: chains of boundary pieces strung between crossings.
//!
//! A boundary that crosses the other operand is cut at every crossing, and
//! the pieces on the wanted side become routes. Routes from both operands are
//! then merge-joined end to end into closed loops.

use super::core::SimplePolygon;
use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// A crossing located on one particular boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteHit<F> {
    /// Edge of the boundary the crossing lies on.
    pub edge: usize,
    /// Parameter along that edge, in (0, 1).
    pub param: F,
    /// The crossing point, shared bit-for-bit with the other boundary.
    pub point: Point2<F>,
}

/// An ordered chain of boundary points.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<F> {
    points: Vec<Point2<F>>,
}

impl<F: Float> Route<F> {
    pub fn new(points: Vec<Point2<F>>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point2<F>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<Point2<F>> {
        self.points.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Point2<F>> {
        self.points.last().copied()
    }

    /// The boundary fragments of this route, in order.
    pub fn segments(&self) -> impl Iterator<Item = Segment2<F>> + '_ {
        self.points.windows(2).map(|w| Segment2::new(w[0], w[1]))
    }

    /// Returns `true` if the chain ends where it starts.
    pub fn is_closed(&self, eps: F) -> bool {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => self.points.len() > 1 && a.approx_eq(b, eps),
            _ => false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.points.reverse();
        self
    }

    /// Appends `other`, skipping its first point if it repeats our last.
    pub fn append(&mut self, other: Route<F>, eps: F) {
        for p in other.points {
            push_distinct(&mut self.points, p, eps);
        }
    }

    /// Same chain in either direction.
    fn same_path(&self, other: &Self, eps: F) -> bool {
        if self.points.len() != other.points.len() {
            return false;
        }
        let forward = self
            .points
            .iter()
            .zip(&other.points)
            .all(|(a, b)| a.approx_eq(*b, eps));
        forward
            || self
                .points
                .iter()
                .zip(other.points.iter().rev())
                .all(|(a, b)| a.approx_eq(*b, eps))
    }

    /// Drops the closing duplicate and returns the ring as a polygon.
    pub fn into_polygon(mut self, eps: F) -> SimplePolygon<F> {
        if self.is_closed(eps) {
            self.points.pop();
        }
        SimplePolygon::new(self.points)
    }
}

/// Closed and leftover routes after merge-joining.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRoutes<F> {
    /// Routes that close into loops.
    pub closed: Vec<Route<F>>,
    /// Routes that could not be closed; a degenerate condition.
    pub open: Vec<Route<F>>,
}

/// The routes gathered for one Boolean operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSet<F> {
    routes: Vec<Route<F>>,
}

impl<F: Float> Default for RouteSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> RouteSet<F> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn push(&mut self, route: Route<F>) {
        self.routes.push(route);
    }

    /// Moves every route of `other` into this set.
    pub fn extract_all_of(&mut self, other: &mut RouteSet<F>) {
        self.routes.append(&mut other.routes);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route<F>> {
        self.routes.iter()
    }

    /// Returns `true` if every route is a closed loop.
    pub fn is_closed(&self, eps: F) -> bool {
        self.routes.iter().all(|r| r.is_closed(eps))
    }

    /// Removes routes that appear in both sets, from both sets.
    ///
    /// Such routes trace a boundary stretch the two operands share exactly.
    /// Returns the number of pairs removed.
    pub fn remove_shared(&mut self, other: &mut RouteSet<F>, eps: F) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.routes.len() {
            let twin = other
                .routes
                .iter()
                .position(|r| r.same_path(&self.routes[i], eps));
            match twin {
                Some(j) => {
                    self.routes.remove(i);
                    other.routes.remove(j);
                    removed += 1;
                }
                None => i += 1,
            }
        }
        removed
    }

    /// Joins open routes that share endpoints until each closes.
    ///
    /// A route is extended at its tail by any route starting there, or by the
    /// reverse of any route ending there. Routes that run out of partners
    /// before closing are reported in [`MergedRoutes::open`].
    pub fn merge_joining(self, eps: F) -> MergedRoutes<F> {
        let (mut closed, mut pending): (Vec<_>, Vec<_>) =
            self.routes.into_iter().partition(|r| r.is_closed(eps));
        let mut open = Vec::new();

        while let Some(mut route) = pending.pop() {
            loop {
                if route.is_closed(eps) {
                    closed.push(route);
                    break;
                }
                let Some(tail) = route.last() else {
                    break;
                };

                let forward = pending
                    .iter()
                    .position(|r| r.first().is_some_and(|p| p.approx_eq(tail, eps)));
                if let Some(j) = forward {
                    let next = pending.swap_remove(j);
                    route.append(next, eps);
                    continue;
                }

                let backward = pending
                    .iter()
                    .position(|r| r.last().is_some_and(|p| p.approx_eq(tail, eps)));
                if let Some(j) = backward {
                    let next = pending.swap_remove(j).reversed();
                    route.append(next, eps);
                    continue;
                }

                open.push(route);
                break;
            }
        }

        MergedRoutes { closed, open }
    }
}

impl<F> IntoIterator for RouteSet<F> {
    type Item = Route<F>;
    type IntoIter = std::vec::IntoIter<Route<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}

fn push_distinct<F: Float>(points: &mut Vec<Point2<F>>, p: Point2<F>, eps: F) {
    if points.last().map_or(true, |last| !last.approx_eq(p, eps)) {
        points.push(p);
    }
}

impl<F: Float> SimplePolygon<F> {
    /// Cuts the boundary at `hits` and returns the pieces on the wanted side.
    ///
    /// `hits` must be sorted by `(edge, param)`. The walk starts at vertex 0,
    /// whose side is given by `start_inside`, and flips side at every hit;
    /// pieces are kept while the side equals `keep_inside`. When the walk ends
    /// on a kept piece and the first kept piece began at vertex 0, the two are
    /// joined so that no route is split at the ring's seam.
    pub fn routes(
        &self,
        hits: &[RouteHit<F>],
        start_inside: bool,
        keep_inside: bool,
        eps: F,
    ) -> Vec<Route<F>> {
        let n = self.len();
        if n == 0 || hits.is_empty() {
            return Vec::new();
        }
        debug_assert!(hits
            .windows(2)
            .all(|w| (w[0].edge, w[0].param) <= (w[1].edge, w[1].param)));

        let vertices = self.vertices();
        let mut routes: Vec<Route<F>> = Vec::new();
        let mut current: Option<Vec<Point2<F>>> =
            (start_inside == keep_inside).then(|| vec![vertices[0]]);
        let starts_at_origin = current.is_some();
        let mut next = 0;

        for e in 0..n {
            while next < hits.len() && hits[next].edge == e {
                let p = hits[next].point;
                match current.take() {
                    Some(mut chain) => {
                        push_distinct(&mut chain, p, eps);
                        if chain.len() > 1 {
                            routes.push(Route::new(chain));
                        }
                    }
                    None => current = Some(vec![p]),
                }
                next += 1;
            }
            if let Some(chain) = current.as_mut() {
                push_distinct(chain, vertices[(e + 1) % n], eps);
            }
        }
        debug_assert_eq!(next, hits.len(), "hit edge index out of range");

        if let Some(tail) = current {
            let mut tail = Route::new(tail);
            if starts_at_origin && !routes.is_empty() {
                let head = routes.remove(0);
                tail.append(head, eps);
                routes.insert(0, tail);
            } else if tail.len() > 1 {
                routes.push(tail);
            }
        }

        routes
    }
}
