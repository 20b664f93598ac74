//! Tolerance-aware predicates and grid snapping.
//!
//! All functions in this module take explicit tolerance parameters.

mod predicates;
mod snap;

pub(crate) use predicates::constant;
pub use predicates::{coordinate_tolerance, edge_contact, point_on_segment, EdgeContact};
pub use snap::{dedup_ring, snap_to_grid};
