//! holedpoly - Boolean operations on 2D polygons with holes
//!
//! Union, intersection and difference of polygons that may contain holes,
//! computed in plain floating point. Degenerate input (vertices on edges,
//! shared edges) is detected and retried on a perturbed or grid-snapped copy
//! rather than solved with exact arithmetic.

pub mod bounds;
pub mod error;
pub mod polygon;
pub mod primitives;
pub mod tolerance;

pub use bounds::Aabb2;
pub use error::HoledPolyError;
pub use polygon::{
    BooleanOutcome, DegenerateCondition, DegenerateHandling, Grid, HoledPolygon, Interaction,
    SimplePolygon,
};
pub use primitives::{Affine2, Interval, Point2, Segment2, Vec2};
