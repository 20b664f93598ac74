//! Polygons with holes and Boolean operations on them.
//!
//! This module provides:
//! - [`SimplePolygon`], a closed vertex ring with cached bounds
//! - [`HoledPolygon`], a rim with any number of holes
//! - union, intersection and difference of holed polygons, with
//!   retry strategies for degenerate input
//! - grouping of unlabelled rings into holed polygons
//!
//! # Example
//!
//! ```
//! use holedpoly::polygon::{DegenerateHandling, Grid, HoledPolygon, SimplePolygon};
//! use holedpoly::primitives::Point2;
//!
//! let square = |x: f64, y: f64, size: f64| {
//!     SimplePolygon::new(vec![
//!         Point2::new(x, y),
//!         Point2::new(x + size, y),
//!         Point2::new(x + size, y + size),
//!         Point2::new(x, y + size),
//!     ])
//! };
//!
//! let frame = HoledPolygon::with_holes(square(0.0, 0.0, 10.0), vec![square(4.0, 4.0, 2.0)]);
//! let cutter = HoledPolygon::new(square(5.0, -5.0, 20.0));
//! let grid = Grid::new(DegenerateHandling::PreDefinedGrid);
//!
//! let left = frame.difference(&cutter, &grid);
//! assert_eq!(left.polygons.len(), 1);
//! assert!((left.area() - 48.0).abs() < 1e-9);
//! ```

mod boolean;
mod core;
mod degenerate;
mod holed;
mod intersect;
mod nesting;
mod route;

pub use boolean::{boolean, BooleanOutcome, Interaction};
pub use core::{ClosestApproach, SimplePolygon};
pub use degenerate::{DegenerateCondition, DegenerateHandling, Grid};
pub use holed::HoledPolygon;
pub use intersect::{
    index_crossings, BoundaryHit, BoundaryId, Crossing, CrossingArena, Operand, Ring,
};
pub use nesting::polygons_to_holed_polygons;
pub use route::{MergedRoutes, Route, RouteHit, RouteSet};
