//! Degenerate-geometry handling: retry strategy, grid configuration and the
//! conditions a Boolean pass can report.

use super::intersect::BoundaryId;
use crate::bounds::Aabb2;
use crate::error::HoledPolyError;
use crate::primitives::{Point2, Vec2};
use crate::tolerance::constant;
use num_traits::Float;
use thiserror::Error;

/// Sub-grid offsets applied to the second operand, one pair per attempt.
///
/// Every factor lies strictly between zero and one half, so rounding a nudged
/// vertex to the nearest node returns it to its original grid position.
const NUDGE_FACTORS: [(f64, f64); 3] = [
    (0.411923, 0.313131),
    (0.271828, 0.377215),
    (0.218034, 0.141421),
];

/// How a Boolean operation reacts to a degenerate configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DegenerateHandling {
    /// Report the condition and keep the result as computed.
    #[default]
    None,
    /// Retry with the second operand moved by a small random offset.
    RandomPerturbation,
    /// Pick a grid from the operands' extent, then behave as `PreDefinedGrid`.
    DynamicGrid,
    /// Snap both operands, nudge the second off-grid, retry and re-snap.
    PreDefinedGrid,
    /// As `PreDefinedGrid`, for operands already on the grid.
    PreDefinedGridPreSnapped,
}

impl DegenerateHandling {
    /// Returns `true` if this strategy retries after a degenerate pass.
    pub fn retries(self) -> bool {
        self != DegenerateHandling::None
    }

    /// Returns `true` if this strategy snaps its results back to the grid.
    pub fn snaps_results(self) -> bool {
        matches!(
            self,
            DegenerateHandling::DynamicGrid
                | DegenerateHandling::PreDefinedGrid
                | DegenerateHandling::PreDefinedGridPreSnapped
        )
    }
}

/// Degenerate-handling configuration for a Boolean operation.
///
/// A `Grid` is an immutable value: operations derive adjusted copies for
/// their retries and never modify the caller's.
///
/// # Example
///
/// ```
/// use holedpoly::polygon::{DegenerateHandling, Grid};
///
/// let grid = Grid::<f64>::default()
///     .with_handling(DegenerateHandling::PreDefinedGrid)
///     .with_grid_size(0.001)
///     .unwrap();
/// assert_eq!(grid.grid_size(), 0.001);
/// assert!(Grid::<f64>::default().with_grid_size(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid<F> {
    handling: DegenerateHandling,
    grid_size: F,
    seed: u64,
    max_attempts: usize,
}

impl<F: Float> Default for Grid<F> {
    fn default() -> Self {
        Self {
            handling: DegenerateHandling::None,
            grid_size: constant(1e-4),
            seed: 0,
            max_attempts: NUDGE_FACTORS.len(),
        }
    }
}

impl<F: Float> Grid<F> {
    /// Default configuration with the given strategy.
    pub fn new(handling: DegenerateHandling) -> Self {
        Self::default().with_handling(handling)
    }

    pub fn with_handling(mut self, handling: DegenerateHandling) -> Self {
        self.handling = handling;
        self
    }

    /// Sets the grid spacing, which must be finite and positive.
    pub fn with_grid_size(mut self, grid_size: F) -> Result<Self, HoledPolyError> {
        if !grid_size.is_finite() || grid_size <= F::zero() {
            return Err(HoledPolyError::InvalidGridSize {
                size: grid_size.to_f64().unwrap_or(f64::NAN),
            });
        }
        self.grid_size = grid_size;
        Ok(self)
    }

    /// Seed for [`DegenerateHandling::RandomPerturbation`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of retries allowed after a degenerate pass, at least one.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[inline]
    pub fn handling(&self) -> DegenerateHandling {
        self.handling
    }

    #[inline]
    pub fn grid_size(&self) -> F {
        self.grid_size
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Number of retries actually run.
    ///
    /// Grid strategies have one distinct nudge per attempt, so they stop once
    /// those are used up.
    pub(crate) fn attempts(&self) -> usize {
        if self.handling.snaps_results() {
            self.max_attempts.min(NUDGE_FACTORS.len())
        } else {
            self.max_attempts
        }
    }

    /// Returns a copy whose grid is the smallest power of ten at or above the
    /// coordinate precision of `rect`.
    ///
    /// Precision is taken as the rectangle's largest coordinate times the
    /// square root of machine epsilon.
    pub fn set_to_min_grid_size(self, rect: Aabb2<F>) -> Self {
        let reach = rect.point_furthest_from_origin().max_abs_coord();
        let precision = (reach * F::epsilon().sqrt()).max(F::min_positive_value());
        let ten = constant::<F>(10.0);
        let grid_size = ten.powf(precision.log10().ceil());
        Self { grid_size, ..self }
    }

    /// Snaps a point to this grid.
    #[inline]
    pub fn snap(&self, p: Point2<F>) -> Point2<F> {
        p.snapped(self.grid_size)
    }

    /// Sub-grid offset that moves the second operand away from the first.
    ///
    /// Each axis points from `from` towards `to`, or negative when they agree.
    pub(crate) fn nudge(&self, from: Point2<F>, to: Point2<F>, attempt: usize) -> Vec2<F> {
        let (fx, fy) = NUDGE_FACTORS[attempt % NUDGE_FACTORS.len()];
        let away = |delta: F| {
            if delta > F::zero() {
                self.grid_size
            } else {
                -self.grid_size
            }
        };
        Vec2::new(
            away(to.x - from.x) * constant(fx),
            away(to.y - from.y) * constant(fy),
        )
    }

    /// Configuration for a nested pass: same values, no further retries.
    pub(crate) fn nested(self) -> Self {
        self.with_handling(DegenerateHandling::None)
    }
}

/// A numerically degenerate configuration met during a Boolean pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DegenerateCondition {
    /// A boundary is crossed an odd number of times.
    #[error("boundary {boundary:?} has an odd number of crossings ({count})")]
    OddCrossingCount { boundary: BoundaryId, count: usize },

    /// Edges touch at endpoints or run along each other.
    #[error("{count} coincident edge contacts")]
    CoincidentContact { count: usize },

    /// A route could not be joined into a closed loop.
    #[error("route of {points} points could not be closed")]
    UnclosedRoute { points: usize },

    /// A union produced other than exactly one polygon.
    #[error("union produced {found} polygons")]
    UnexpectedPolygonCount { found: usize },
}

impl DegenerateCondition {
    /// Returns `true` if a retry strategy should react to this condition.
    pub fn triggers_retry(&self) -> bool {
        !matches!(self, DegenerateCondition::UnexpectedPolygonCount { .. })
    }
}
