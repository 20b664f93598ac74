//! Boolean operations on polygons with holes.
//!
//! Both operands' boundaries are cut at their crossings into routes, the
//! routes on the wanted side of the other operand are joined into closed
//! loops, and the loops are nested back into holed polygons. Configurations
//! that break this (vertices on edges, shared edges, odd crossing counts) are
//! reported as [`DegenerateCondition`]s and, depending on the [`Grid`]
//! strategy, retried on a perturbed or grid-snapped copy of the operands.

use super::core::SimplePolygon;
use super::degenerate::{DegenerateCondition, DegenerateHandling, Grid};
use super::holed::HoledPolygon;
use super::intersect::{BoundaryId, CrossingArena, Operand, Ring};
use super::nesting::polygons_to_holed_polygons;
use super::route::{Route, RouteSet};
use crate::tolerance::{coordinate_tolerance, dedup_ring};
use num_traits::Float;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Whether the operands' boundaries had anything to do with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// Disjoint, or nothing to combine. The engine produced no polygons.
    None,
    /// The operands cross or one lies inside the other.
    Interacting,
}

/// Result of a Boolean operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanOutcome<F> {
    /// The resulting holed polygons.
    pub polygons: Vec<HoledPolygon<F>>,
    /// Degenerate conditions met by every pass, retries included.
    pub diagnostics: Vec<DegenerateCondition>,
    pub interaction: Interaction,
    /// `true` if `polygons` came from a pass that met no condition warranting
    /// a retry. A successful retry sets this even though `diagnostics` still
    /// holds what the earlier passes met.
    pub resolved: bool,
}

impl<F: Float> BooleanOutcome<F> {
    fn empty(interaction: Interaction) -> Self {
        Self::settled(Vec::new(), Vec::new(), interaction)
    }

    fn settled(
        polygons: Vec<HoledPolygon<F>>,
        diagnostics: Vec<DegenerateCondition>,
        interaction: Interaction,
    ) -> Self {
        let resolved = !diagnostics.iter().any(DegenerateCondition::triggers_retry);
        Self {
            polygons,
            diagnostics,
            interaction,
            resolved,
        }
    }

    /// Returns `true` if no pass met a condition that warrants a retry.
    pub fn is_clean(&self) -> bool {
        !self.diagnostics.iter().any(DegenerateCondition::triggers_retry)
    }

    /// Total area of the resulting polygons.
    pub fn area(&self) -> F {
        self.polygons
            .iter()
            .fold(F::zero(), |acc, p| acc + p.area())
    }
}

/// Computes a Boolean combination of two holed polygons.
///
/// `a_inside` selects the parts of `a`'s boundary lying inside `b`, and
/// `b_inside` the parts of `b`'s boundary lying inside `a`:
///
/// | operation    | `a_inside` | `b_inside` |
/// |--------------|------------|------------|
/// | union        | `false`    | `false`    |
/// | intersection | `true`     | `true`     |
/// | difference   | `false`    | `true`     |
///
/// An absent rim on either side yields an empty outcome. When the operands
/// do not interact the outcome is empty with [`Interaction::None`]; the
/// [`HoledPolygon::union`], [`HoledPolygon::overlap`] and
/// [`HoledPolygon::difference`] wrappers fill in the answer for that case.
pub fn boolean<F: Float>(
    a: &HoledPolygon<F>,
    b: &HoledPolygon<F>,
    a_inside: bool,
    b_inside: bool,
    grid: &Grid<F>,
) -> BooleanOutcome<F> {
    let first = boolean_pass(a, b, a_inside, b_inside);
    let handling = grid.handling();
    if !handling.retries() || first.resolved {
        return first;
    }

    let (Some(rim_a), Some(rim_b)) = (a.rim(), b.rim()) else {
        return first;
    };
    let settings = match (handling, rim_a.bounds(), rim_b.bounds()) {
        (DegenerateHandling::DynamicGrid, Some(ba), Some(bb)) => match ba.intersection(bb) {
            Some(shared) => grid.set_to_min_grid_size(shared),
            None => return first,
        },
        _ => *grid,
    };
    let nested = settings.nested();
    let mut rng = StdRng::seed_from_u64(grid.seed());

    let mut diagnostics = first.diagnostics.clone();
    let mut last = first;
    for attempt in 0..settings.attempts() {
        log::debug!(
            "retrying degenerate boolean with {:?}, attempt {}",
            handling,
            attempt + 1
        );

        let mut outcome = match handling {
            DegenerateHandling::None => break,
            DegenerateHandling::RandomPerturbation => {
                let mut moved = b.clone();
                moved.random_perturb(&mut rng);
                boolean(a, &moved, a_inside, b_inside, &nested)
            }
            DegenerateHandling::DynamicGrid | DegenerateHandling::PreDefinedGrid => {
                let mut snapped_a = a.clone();
                let mut snapped_b = b.clone();
                snapped_a.snap_to_grid(&settings);
                snapped_b.snap_to_grid(&settings);
                nudge(&snapped_a, &mut snapped_b, &settings, attempt);
                boolean(&snapped_a, &snapped_b, a_inside, b_inside, &nested)
            }
            DegenerateHandling::PreDefinedGridPreSnapped => {
                let mut moved = b.clone();
                nudge(a, &mut moved, &settings, attempt);
                boolean(a, &moved, a_inside, b_inside, &nested)
            }
        };
        if handling.snaps_results() {
            outcome = resnap(outcome, &settings);
        }

        diagnostics.extend(outcome.diagnostics.iter().cloned());
        let clean = outcome.resolved;
        last = outcome;
        if clean {
            break;
        }
    }

    last.diagnostics = diagnostics;
    last
}

/// Moves `b` off the grid, away from `a`.
fn nudge<F: Float>(a: &HoledPolygon<F>, b: &mut HoledPolygon<F>, grid: &Grid<F>, attempt: usize) {
    let from = a.rim().and_then(SimplePolygon::bounds);
    let to = b.rim().and_then(SimplePolygon::bounds);
    if let (Some(from), Some(to)) = (from, to) {
        let offset = grid.nudge(from.top_left(), to.top_left(), attempt);
        b.translate(offset);
    }
}

/// Snaps every result back to the grid and drops what collapses.
fn resnap<F: Float>(mut outcome: BooleanOutcome<F>, grid: &Grid<F>) -> BooleanOutcome<F> {
    for polygon in &mut outcome.polygons {
        polygon.snap_to_grid(grid);
        polygon.drop_collapsed_holes();
    }
    outcome
        .polygons
        .retain(|p| p.rim().is_some_and(|rim| rim.len() >= 3 && rim.area() > F::zero()));
    outcome
}

fn report(diagnostics: &mut Vec<DegenerateCondition>, condition: DegenerateCondition) {
    log::warn!("degenerate boolean geometry: {condition}");
    diagnostics.push(condition);
}

/// Boundaries of one operand, rim first.
fn boundaries<F: Float>(
    operand: Operand,
    polygon: &HoledPolygon<F>,
) -> impl Iterator<Item = (BoundaryId, &SimplePolygon<F>)> {
    polygon
        .rim()
        .into_iter()
        .map(move |rim| (BoundaryId::rim(operand), rim))
        .chain(
            polygon
                .holes()
                .iter()
                .enumerate()
                .map(move |(i, hole)| (BoundaryId::hole(operand, i), hole)),
        )
        .filter(|(_, ring)| !ring.is_empty())
}

/// One pass of the Boolean engine, without retries.
fn boolean_pass<F: Float>(
    a: &HoledPolygon<F>,
    b: &HoledPolygon<F>,
    a_inside: bool,
    b_inside: bool,
) -> BooleanOutcome<F> {
    let (Some(rim_a), Some(rim_b)) = (a.rim(), b.rim()) else {
        return BooleanOutcome::empty(Interaction::None);
    };
    let (Some(bounds_a), Some(bounds_b), Some(start_a), Some(start_b)) =
        (rim_a.bounds(), rim_b.bounds(), rim_a.start(), rim_b.start())
    else {
        return BooleanOutcome::empty(Interaction::None);
    };
    if !bounds_a.overlaps(bounds_b) {
        return BooleanOutcome::empty(Interaction::None);
    }

    let reach = bounds_a
        .union(bounds_b)
        .point_furthest_from_origin()
        .max_abs_coord();
    let tol = coordinate_tolerance(reach);
    let mut diagnostics = Vec::new();

    let mut arena = CrossingArena::new();
    for ring_a in boundaries(Operand::First, a) {
        for ring_b in boundaries(Operand::Second, b) {
            arena.index_pair(ring_a, ring_b, tol);
        }
    }
    if arena.touches() > 0 {
        report(
            &mut diagnostics,
            DegenerateCondition::CoincidentContact {
                count: arena.touches(),
            },
        );
    }

    let rim_hits = arena.count_for(BoundaryId::rim(Operand::First))
        + arena.count_for(BoundaryId::rim(Operand::Second));
    if rim_hits == 0 && !b.contains_point(start_a) && !a.contains_point(start_b) {
        return BooleanOutcome::settled(Vec::new(), diagnostics, Interaction::None);
    }

    let mut pieces = Pieces {
        holes: Vec::new(),
        rims: Vec::new(),
    };
    let mut routes_a = RouteSet::new();
    let mut routes_b = RouteSet::new();
    let side_a = Side {
        operand: Operand::First,
        this: a,
        other: b,
        keep_inside: a_inside,
        other_keeps_inside: b_inside,
    };
    let side_b = Side {
        operand: Operand::Second,
        this: b,
        other: a,
        keep_inside: b_inside,
        other_keeps_inside: a_inside,
    };
    side_a.collect(&arena, tol, &mut routes_a, &mut pieces, &mut diagnostics);
    side_b.collect(&arena, tol, &mut routes_b, &mut pieces, &mut diagnostics);

    routes_a.remove_shared(&mut routes_b, tol);
    routes_a.extract_all_of(&mut routes_b);
    let merged = routes_a.merge_joining(tol);
    for route in &merged.open {
        report(
            &mut diagnostics,
            DegenerateCondition::UnclosedRoute {
                points: route.len(),
            },
        );
    }

    let loops: Vec<SimplePolygon<F>> = merged
        .closed
        .into_iter()
        .filter_map(|route| close_loop(route, tol))
        .collect();
    let mut polygons = polygons_to_holed_polygons(loops);
    polygons.extend(pieces.rims.into_iter().map(HoledPolygon::new));
    attach_holes(&mut polygons, pieces.holes);

    if !a_inside && !b_inside && polygons.len() != 1 {
        report(
            &mut diagnostics,
            DegenerateCondition::UnexpectedPolygonCount {
                found: polygons.len(),
            },
        );
    }

    BooleanOutcome::settled(polygons, diagnostics, Interaction::Interacting)
}

/// Uncrossed rings passed straight through to the result.
struct Pieces<F> {
    /// Holes that stay holes of whichever result polygon encloses them.
    holes: Vec<SimplePolygon<F>>,
    /// Holes of the subtrahend that bound result area on their own.
    rims: Vec<SimplePolygon<F>>,
}

/// One operand seen from the Boolean pass.
struct Side<'a, F> {
    operand: Operand,
    this: &'a HoledPolygon<F>,
    other: &'a HoledPolygon<F>,
    keep_inside: bool,
    other_keeps_inside: bool,
}

impl<F: Float> Side<'_, F> {
    fn collect(
        &self,
        arena: &CrossingArena<F>,
        tol: F,
        routes: &mut RouteSet<F>,
        pieces: &mut Pieces<F>,
        diagnostics: &mut Vec<DegenerateCondition>,
    ) {
        for (id, ring) in boundaries(self.operand, self.this) {
            let Some(start) = ring.start() else {
                continue;
            };
            let hits = arena.hits_for(id);
            if hits.len() % 2 != 0 {
                report(
                    diagnostics,
                    DegenerateCondition::OddCrossingCount {
                        boundary: id,
                        count: hits.len(),
                    },
                );
            }

            let start_inside = self.other.contains_point(start);
            if !hits.is_empty() {
                for route in ring.routes(&hits, start_inside, self.keep_inside, tol) {
                    routes.push(route);
                }
                continue;
            }
            if start_inside != self.keep_inside {
                continue;
            }
            match id.ring {
                Ring::Rim => routes.push(closed_route(ring)),
                Ring::Hole(_) if self.keep_inside && !self.other_keeps_inside => {
                    pieces.rims.push(ring.clone())
                }
                Ring::Hole(_) => pieces.holes.push(ring.clone()),
            }
        }
    }
}

fn closed_route<F: Float>(ring: &SimplePolygon<F>) -> Route<F> {
    let mut points = ring.vertices().to_vec();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    Route::new(points)
}

/// Turns a closed route into a counter-clockwise polygon, or `None` if it
/// encloses no real area.
fn close_loop<F: Float>(route: Route<F>, tol: F) -> Option<SimplePolygon<F>> {
    let ring = route.into_polygon(tol);
    let mut polygon = SimplePolygon::new(dedup_ring(ring.vertices(), tol));
    if polygon.len() < 3 || polygon.area() <= tol * polygon.perimeter() {
        return None;
    }
    polygon.ensure_ccw();
    Some(polygon)
}

/// Gives each hole to the smallest result polygon whose rim encloses it.
fn attach_holes<F: Float>(polygons: &mut [HoledPolygon<F>], holes: Vec<SimplePolygon<F>>) {
    for hole in holes {
        let Some(start) = hole.start() else {
            continue;
        };
        let owner = polygons
            .iter_mut()
            .filter_map(|p| {
                let area = p.rim().filter(|rim| rim.contains_point(start))?.area();
                Some((area, p))
            })
            .reduce(|best, next| if next.0 < best.0 { next } else { best });
        match owner {
            Some((_, polygon)) => polygon.add_hole(hole),
            None => log::debug!("dropping hole with no enclosing result polygon"),
        }
    }
}

impl<F: Float> HoledPolygon<F> {
    /// Boolean combination with `other`; see [`boolean`].
    pub fn boolean(
        &self,
        other: &HoledPolygon<F>,
        self_inside: bool,
        other_inside: bool,
        grid: &Grid<F>,
    ) -> BooleanOutcome<F> {
        boolean(self, other, self_inside, other_inside, grid)
    }

    /// The area covered by either polygon.
    ///
    /// Polygons that do not interact are returned unchanged as two results.
    ///
    /// # Example
    ///
    /// ```
    /// use holedpoly::polygon::{Grid, HoledPolygon, SimplePolygon};
    /// use holedpoly::primitives::Point2;
    ///
    /// let square = |x: f64, y: f64| {
    ///     HoledPolygon::new(SimplePolygon::new(vec![
    ///         Point2::new(x, y),
    ///         Point2::new(x + 10.0, y),
    ///         Point2::new(x + 10.0, y + 10.0),
    ///         Point2::new(x, y + 10.0),
    ///     ]))
    /// };
    ///
    /// let union = square(0.0, 0.0).union(&square(5.0, 5.0), &Grid::default());
    /// assert_eq!(union.polygons.len(), 1);
    /// assert!((union.area() - 175.0).abs() < 1e-9);
    /// ```
    pub fn union(&self, other: &HoledPolygon<F>, grid: &Grid<F>) -> BooleanOutcome<F> {
        let mut outcome = boolean(self, other, false, false, grid);
        if outcome.interaction == Interaction::None && self.rim().is_some() && other.rim().is_some()
        {
            outcome.polygons = vec![self.clone(), other.clone()];
        }
        outcome
    }

    /// The area covered by both polygons.
    pub fn overlap(&self, other: &HoledPolygon<F>, grid: &Grid<F>) -> BooleanOutcome<F> {
        boolean(self, other, true, true, grid)
    }

    /// The area covered by `self` but not by `other`.
    ///
    /// When the polygons do not interact the result is `self` unchanged.
    pub fn difference(&self, other: &HoledPolygon<F>, grid: &Grid<F>) -> BooleanOutcome<F> {
        let mut outcome = boolean(self, other, false, true, grid);
        if outcome.interaction == Interaction::None && self.rim().is_some() && other.rim().is_some()
        {
            outcome.polygons = vec![self.clone()];
        }
        outcome
    }
}
