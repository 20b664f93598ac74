//! Grouping of unlabelled simple polygons into holed polygons.

use super::core::SimplePolygon;
use super::holed::HoledPolygon;
use num_traits::Float;

/// Groups simple polygons into holed polygons, assigning each hole to the rim
/// that encloses it.
///
/// Polygons are taken from the back of `polygons`. Each is first tested as a
/// hole of the holed polygons already formed, then compared against the pool
/// of still unmatched polygons: it becomes a hole of the first pooled polygon
/// containing its start, or the rim of every pooled polygon whose start it
/// contains. Polygons never matched come out as holeless holed polygons,
/// ahead of the newly formed ones.
///
/// Containment is judged by start vertex only, so the input is expected to
/// be free of crossings.
///
/// # Example
///
/// ```
/// use holedpoly::polygon::{polygons_to_holed_polygons, SimplePolygon};
/// use holedpoly::primitives::Point2;
///
/// let square = |x: f64, y: f64, s: f64| {
///     SimplePolygon::new(vec![
///         Point2::new(x, y),
///         Point2::new(x + s, y),
///         Point2::new(x + s, y + s),
///         Point2::new(x, y + s),
///     ])
/// };
///
/// let grouped = polygons_to_holed_polygons(vec![square(0.0, 0.0, 10.0), square(2.0, 2.0, 2.0)]);
/// assert_eq!(grouped.len(), 1);
/// assert_eq!(grouped[0].hole_count(), 1);
/// ```
pub fn polygons_to_holed_polygons<F: Float>(
    mut polygons: Vec<SimplePolygon<F>>,
) -> Vec<HoledPolygon<F>> {
    let mut unmatched: Vec<SimplePolygon<F>> = Vec::new();
    let mut formed: Vec<HoledPolygon<F>> = Vec::new();

    while let Some(poly) = polygons.pop() {
        let Some(start) = poly.start() else {
            continue;
        };

        if let Some(owner) = formed
            .iter_mut()
            .find(|h| h.rim().is_some_and(|rim| rim.contains_point(start)))
        {
            owner.add_hole(poly);
            continue;
        }

        let encloses = |outer: &SimplePolygon<F>, inner: &SimplePolygon<F>| {
            inner.start().is_some_and(|p| outer.contains_point(p))
        };
        let first = unmatched
            .iter()
            .position(|pooled| pooled.contains_point(start) || encloses(&poly, pooled));

        match first {
            None => unmatched.push(poly),
            Some(u) if unmatched[u].contains_point(start) => {
                let rim = unmatched.remove(u);
                formed.push(HoledPolygon::with_holes(rim, vec![poly]));
            }
            Some(u) => {
                let mut holes = Vec::new();
                let mut i = u;
                while i < unmatched.len() {
                    if encloses(&poly, &unmatched[i]) {
                        holes.push(unmatched.remove(i));
                    } else {
                        i += 1;
                    }
                }
                formed.push(HoledPolygon::with_holes(poly, holes));
            }
        }
    }

    let mut result: Vec<HoledPolygon<F>> = unmatched.into_iter().map(HoledPolygon::new).collect();
    result.extend(formed);
    result
}
