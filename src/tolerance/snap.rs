//! Grid snapping and ring cleanup.
//!
//! Grid-based degenerate handling snaps operands onto a regular grid, and
//! snapping a result back can collapse neighbouring vertices onto the same
//! grid node. These helpers do the snapping and remove what collapses.
//!
//! # Example
//!
//! ```
//! use holedpoly::tolerance::{dedup_ring, snap_to_grid};
//! use holedpoly::Point2;
//!
//! let ring = vec![
//!     Point2::new(0.02_f64, 0.0),
//!     Point2::new(10.0, 0.03),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//! ];
//!
//! let snapped = dedup_ring(&snap_to_grid(&ring, 0.1), 1e-9);
//! assert_eq!(snapped.len(), 4);
//! ```

use crate::primitives::Point2;
use num_traits::Float;

/// Snaps points to a regular grid.
///
/// Each coordinate is rounded to the nearest multiple of `grid_size`.
pub fn snap_to_grid<F: Float>(points: &[Point2<F>], grid_size: F) -> Vec<Point2<F>> {
    points.iter().map(|p| p.snapped(grid_size)).collect()
}

/// Removes consecutive duplicate vertices from a closed ring.
///
/// The wrap-around pair (last, first) is treated as consecutive too, so the
/// result never repeats its first vertex at the end.
pub fn dedup_ring<F: Float>(points: &[Point2<F>], epsilon: F) -> Vec<Point2<F>> {
    let mut result: Vec<Point2<F>> = Vec::with_capacity(points.len());

    for &p in points {
        match result.last() {
            Some(last) if last.approx_eq(p, epsilon) => {}
            _ => result.push(p),
        }
    }

    while result.len() > 1 && result[result.len() - 1].approx_eq(result[0], epsilon) {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        let pts = vec![Point2::new(0.26_f64, 1.74), Point2::new(-0.26, 0.0)];
        let snapped = snap_to_grid(&pts, 0.5);
        assert_eq!(snapped[0], Point2::new(0.5, 1.5));
        assert_eq!(snapped[1], Point2::new(-0.5, 0.0));
    }

    #[test]
    fn test_dedup_ring_consecutive() {
        let pts = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 1.0),
        ];
        assert_eq!(dedup_ring(&pts, 1e-9).len(), 3);
    }

    #[test]
    fn test_dedup_ring_wraparound() {
        let pts = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 0.0),
        ];
        let ring = dedup_ring(&pts, 1e-9);
        assert_eq!(ring.len(), 3);
        assert_eq!(ring[0], Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_dedup_ring_empty() {
        let pts: Vec<Point2<f64>> = Vec::new();
        assert!(dedup_ring(&pts, 1e-9).is_empty());
    }
}
